//! Outbound response shape

use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Status, headers, and a JSON body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl Response {
    /// A response whose body is `payload` serialized as JSON
    pub fn json<T: Serialize + ?Sized>(status_code: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::raw(status_code, body),
            Err(e) => Self::error(500, &format!("Failed to serialize response: {e}")),
        }
    }

    /// An error response carrying `{"message": ...}`
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::raw(status_code, json!({ "message": message }).to_string())
    }

    fn raw(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Adds or replaces a header
    pub fn with_header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }
}
