//! Lenient JSON request bodies.
//!
//! A body that is missing, blank, not valid JSON, or not a JSON object is
//! treated as `{}` so that validation reports the missing fields. An object
//! whose fields have the wrong type is rejected outright.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

pub fn parse<T>(body: &[u8]) -> Result<T, ApiError>
where
  T: DeserializeOwned + Default,
{
  match serde_json::from_slice::<Value>(body) {
    Ok(value @ Value::Object(_)) => {
      serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
    }
    _ => Ok(T::default()),
  }
}
