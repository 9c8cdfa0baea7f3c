pub use self::error::Error;

pub mod client;
pub mod error;
#[cfg(test)]
mod test;
pub mod tomato;
pub mod wargaming;

pub type Result<T> = std::result::Result<T, Error>;
