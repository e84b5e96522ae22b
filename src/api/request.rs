//! Inbound request shape

use crate::adapters::database::ID_FIELD;
use crate::domain::ParentId;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Request verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("Unsupported method: {other}")),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        write!(f, "{name}")
    }
}

/// A parsed request addressed to one parent kind
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,

    /// Identifier taken from the path, if any
    pub path_id: Option<String>,

    /// Query string parameters
    pub query: BTreeMap<String, String>,

    /// Raw JSON body
    pub body: Option<String>,
}

impl Request {
    /// Create a request with no identifier, query, or body
    pub fn new(method: Method) -> Self {
        Self {
            method,
            path_id: None,
            query: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_path_id(mut self, id: impl Into<String>) -> Self {
        self.path_id = Some(id.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Body text, if present and not blank
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Resolves the target identifier
    ///
    /// Looks at the query `_id`, then the path, then a string `_id` in the
    /// JSON body. Blank values are skipped.
    pub fn resolve_id(&self) -> Option<ParentId> {
        let from_query = self.query.get(ID_FIELD).map(String::as_str);
        let from_path = self.path_id.as_deref();

        from_query
            .into_iter()
            .chain(from_path)
            .map(str::to_string)
            .chain(self.body_id())
            .find(|id| !id.trim().is_empty())
            .and_then(|id| ParentId::new(id).ok())
    }

    fn body_id(&self) -> Option<String> {
        let body: Value = serde_json::from_str(self.body_text()?).ok()?;
        body.get(ID_FIELD)?.as_str().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_id_resolution_order() {
        let request = Request::new(Method::Put)
            .with_query("_id", "from-query")
            .with_path_id("from-path")
            .with_body(r#"{"_id":"from-body"}"#);
        assert_eq!(request.resolve_id().unwrap().as_str(), "from-query");

        let request = Request::new(Method::Put)
            .with_path_id("from-path")
            .with_body(r#"{"_id":"from-body"}"#);
        assert_eq!(request.resolve_id().unwrap().as_str(), "from-path");

        let request = Request::new(Method::Put).with_body(r#"{"_id":"from-body"}"#);
        assert_eq!(request.resolve_id().unwrap().as_str(), "from-body");
    }

    #[test]
    fn test_missing_or_blank_id() {
        assert!(Request::new(Method::Delete).resolve_id().is_none());
        assert!(Request::new(Method::Delete)
            .with_path_id("  ")
            .resolve_id()
            .is_none());
        assert!(Request::new(Method::Put)
            .with_body("not json")
            .resolve_id()
            .is_none());
    }
}
