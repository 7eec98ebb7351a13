use serde::{Deserialize, Serialize};

/// A money column as the backend sends it.
///
/// Numeric columns come back as JSON numbers from some endpoints and as
/// strings from others (`"1234.50"`, `"1.234,50"`). The adapter decides
/// whether the value is usable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}
