//! Decoded response bodies and facade call outcomes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Cardinality;
use crate::error::{LibrariesError, Result};

/// Status reported by the synthetic body of a body-less DELETE.
pub const DELETED_STATUS: &str = "success";

/// A decoded libraries.io response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// A list of resources (collection endpoints).
    Collection(Vec<Value>),
    /// A single resource.
    Single(Map<String, Value>),
}

impl Response {
    /// Classify a decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`LibrariesError::UnexpectedPayload`] when the value is neither
    /// an object nor an array.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::Collection(items)),
            Value::Object(map) => Ok(Self::Single(map)),
            Value::Null => Err(LibrariesError::UnexpectedPayload("null")),
            Value::Bool(_) => Err(LibrariesError::UnexpectedPayload("boolean")),
            Value::Number(_) => Err(LibrariesError::UnexpectedPayload("number")),
            Value::String(_) => Err(LibrariesError::UnexpectedPayload("string")),
        }
    }

    /// Decode a raw body.
    ///
    /// # Errors
    ///
    /// Returns a parse error for invalid JSON and
    /// [`LibrariesError::UnexpectedPayload`] for scalar JSON.
    pub fn from_body(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Confirmation substituted for a DELETE answered with no content.
    #[must_use]
    pub fn deleted() -> Self {
        let mut map = Map::new();
        map.insert("status".to_string(), Value::String(DELETED_STATUS.to_string()));
        Self::Single(map)
    }

    /// Empty body of the given shape.
    #[must_use]
    pub fn empty(cardinality: Cardinality) -> Self {
        match cardinality {
            Cardinality::Collection => Self::Collection(Vec::new()),
            Cardinality::Singleton => Self::Single(Map::new()),
        }
    }

    /// Whether the body holds no items (or no fields).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Collection(items) => items.is_empty(),
            Self::Single(map) => map.is_empty(),
        }
    }

    /// Number of items (or fields).
    pub fn len(&self) -> usize {
        match self {
            Self::Collection(items) => items.len(),
            Self::Single(map) => map.len(),
        }
    }

    /// Items of a collection body.
    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Self::Collection(items) => Some(items),
            Self::Single(_) => None,
        }
    }

    /// Fields of a single-resource body.
    pub fn as_single(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Single(map) => Some(map),
            Self::Collection(_) => None,
        }
    }

    /// Convert back into a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Self::Collection(items) => Value::Array(items),
            Self::Single(map) => Value::Object(map),
        }
    }

    /// Deserialize into a typed model.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_value())?)
    }
}

/// Result of a facade call.
///
/// Transport and remote failures are logged and captured here instead of
/// being returned as `Err`, which is reserved for configuration errors.
/// This keeps "the API returned an empty list" distinguishable from "the
/// request failed".
#[must_use]
#[derive(Debug)]
pub enum Outcome {
    /// The request succeeded.
    Success(Response),
    /// The request failed after dispatch.
    Failed {
        /// What went wrong.
        error: LibrariesError,
        /// Shape of the body the endpoint would have returned.
        cardinality: Cardinality,
    },
}

impl Outcome {
    /// Whether the request succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the request failed.
    pub fn is_failed(&self) -> bool {
        !self.is_success()
    }

    /// The response, if the request succeeded.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Success(response) => Some(response),
            Self::Failed { .. } => None,
        }
    }

    /// The failure, if the request failed.
    pub fn error(&self) -> Option<&LibrariesError> {
        match self {
            Self::Success(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    /// Convert into a plain `Result`.
    ///
    /// # Errors
    ///
    /// Returns the captured failure.
    pub fn into_result(self) -> Result<Response> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// The response, or an empty body of the endpoint's shape on failure.
    pub fn unwrap_or_empty(self) -> Response {
        match self {
            Self::Success(response) => response,
            Self::Failed { cardinality, .. } => Response::empty(cardinality),
        }
    }
}
