//! HTTP verbs understood by the session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LibrariesError;

/// The four verbs the libraries.io API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Update.
    Put,
    /// Remove.
    Delete,
}

impl HttpVerb {
    /// Upper-case verb name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = LibrariesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpVerb::Get),
            "POST" => Ok(HttpVerb::Post),
            "PUT" => Ok(HttpVerb::Put),
            "DELETE" => Ok(HttpVerb::Delete),
            _ => Err(LibrariesError::InvalidOperation {
                operation: "*".to_string(),
                verb: s.to_string(),
                reason: "request type can only be GET, POST, PUT or DELETE",
            }),
        }
    }
}

impl From<HttpVerb> for reqwest::Method {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Get => reqwest::Method::GET,
            HttpVerb::Post => reqwest::Method::POST,
            HttpVerb::Put => reqwest::Method::PUT,
            HttpVerb::Delete => reqwest::Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpVerb>().unwrap(), HttpVerb::Get);
        assert_eq!("Delete".parse::<HttpVerb>().unwrap(), HttpVerb::Delete);
    }

    #[test]
    fn test_unsupported_verb_is_invalid_operation() {
        let err = "PATCH".parse::<HttpVerb>().unwrap_err();
        assert!(matches!(err, LibrariesError::InvalidOperation { .. }));
    }

    #[test]
    fn test_into_reqwest_method() {
        assert_eq!(reqwest::Method::from(HttpVerb::Put), reqwest::Method::PUT);
    }
}
