use serde::Serialize;

use crate::error::ServiceError;

/// Serialize a response as compact JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ServiceError> {
    Ok(serde_json::to_string(value)?)
}
