use std::collections::HashMap;

use serde::Deserialize;

use crate::api::Error;

pub type AccountId = i64;
pub type TankId = i64;

/// Search accounts item.
#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct FoundAccount {
    pub nickname: String,

    #[serde(rename = "account_id")]
    pub id: AccountId,
}

/// Tankopedia entry, only the fields requested via `fields=short_name,tank_id`.
#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct Vehicle {
    pub tank_id: TankId,
    pub short_name: String,
}

/// Tankopedia keyed by the stringified tank ID.
pub type Tankopedia = HashMap<String, Vehicle>;

/// Generic Wargaming.net API response.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Data {
        data: T,
    },

    /// See: <https://developers.wargaming.net/documentation/guide/getting-started/#common-errors>
    Error {
        error: ApiError,
    },
}

/// Wargaming.net API error.
#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct ApiError {
    #[serde(default)]
    message: String,

    #[serde(default)]
    code: Option<u16>,

    #[serde(default)]
    field: Option<String>,
}

impl<T> From<ApiResponse<T>> for Result<T, Error> {
    fn from(response: ApiResponse<T>) -> Self {
        match response {
            ApiResponse::Data { data } => Ok(data),
            ApiResponse::Error { error } => Err(Error::Upstream(format!(
                r#"[{}] "{}" in "{}""#,
                error.code.unwrap_or_default(),
                error.message,
                error.field.unwrap_or_default(),
            ))),
        }
    }
}
