//! Inbound body validation shared by both deployment shapes.

use serde_json::{Map, Value};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    pub url: String,
    /// Passthrough options: every non-null top-level key except `url`.
    pub options: Map<String, Value>,
}

impl DownloadRequest {
    /// Outbound Cobalt body: `url` first, then options in inbound order.
    pub fn payload(&self) -> Value {
        let mut payload = Map::with_capacity(self.options.len() + 1);
        payload.insert("url".to_string(), Value::String(self.url.clone()));
        for (key, value) in &self.options {
            payload.insert(key.clone(), value.clone());
        }
        Value::Object(payload)
    }
}

pub fn parse_download_request(body: &[u8]) -> Result<DownloadRequest, ApiError> {
    let data: Value = if body.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(body).map_err(|_| ApiError::invalid_json())?
    };

    // Valid JSON that is not an object cannot carry a url.
    let Value::Object(mut fields) = data else {
        return Err(ApiError::missing_url());
    };

    let url = match fields.shift_remove("url") {
        Some(Value::String(url)) => url.trim().to_string(),
        _ => String::new(),
    };
    if url.is_empty() {
        return Err(ApiError::missing_url());
    }

    fields.retain(|_, value| !value.is_null());

    Ok(DownloadRequest {
        url,
        options: fields,
    })
}
