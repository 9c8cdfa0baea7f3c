use std::num::ParseFloatError;

/// Failures of the upstream statistics APIs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The lookup has been performed successfully but yielded nothing.
    #[error("{0} is not found")]
    NotFound(String),

    /// The upstream has responded with something unexpected.
    #[error("unexpected upstream response: {0}")]
    Upstream(String),

    #[error("request has failed")]
    Network(#[source] reqwest::Error),

    #[error("not a number")]
    Parse(#[from] ParseFloatError),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Upstream(format!("{:#}", anyhow::Error::new(error)))
        } else {
            Self::Network(error)
        }
    }
}

impl Error {
    /// Transport failures which may succeed on a second attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(error) => error.is_timeout() || error.is_connect(),
            _ => false,
        }
    }
}
