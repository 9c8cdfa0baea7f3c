use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::api;
use crate::prelude::*;

/// Anything an upstream may put into a numeric field.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Lenient {
    fn into_finite(self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(value),
            Self::Text(text) => match parse_f64(&text) {
                Ok(value) => Some(value),
                Err(error) => {
                    debug!(text = text.as_str(), "{:#}", error);
                    None
                }
            },
            Self::Other(_) => None,
        };
        value.filter(|value| value.is_finite())
    }
}

/// Parses a decimal number as the upstreams send it, surrounding whitespace is ignored.
pub fn parse_f64(value: &str) -> Result<f64, api::Error> {
    Ok(value.trim().parse::<f64>()?)
}

/// Accepts a number, a numeric string, or anything else.
/// Only finite numbers survive, everything else becomes `None`.
pub fn deserialize_lenient_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Ok(Lenient::deserialize(deserializer)?.into_finite())
}

/// Same as [`deserialize_lenient_f64`] but rounds to an integer, `0` when there is no number.
pub fn deserialize_lenient_i64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<i64, D::Error> {
    Ok(Lenient::deserialize(deserializer)?
        .into_finite()
        .map_or(0, |value| value.round() as i64))
}
