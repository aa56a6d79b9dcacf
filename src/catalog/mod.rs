//! Operation catalog.
//!
//! Every supported libraries.io action is a variant of [`SearchOperation`] or
//! [`SubscribeOperation`]. Each variant maps to a static [`OperationInfo`]
//! describing the named arguments it consumes, the URI segments it
//! contributes, its cardinality and the verbs it may be issued with. The
//! builder and session only ever consult this data, so a new operation is one
//! variant plus one table entry.

mod search;
mod subscribe;
mod verb;

use std::fmt;
use std::str::FromStr;

use crate::error::LibrariesError;

pub use search::{SearchFilter, SearchOperation, SearchQuery, SearchSort};
pub use subscribe::SubscribeOperation;
pub use verb::HttpVerb;

/// Named arguments an operation can consume as path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArgKey {
    /// Package manager, e.g. `pypi`.
    Platform,
    /// Package name.
    Project,
    /// Package version.
    Version,
    /// Repository host, e.g. `github`.
    Host,
    /// Repository owner.
    Owner,
    /// Repository name.
    Repo,
    /// User or organisation login.
    User,
}

impl ArgKey {
    /// All keys in declaration order.
    pub const ALL: [ArgKey; 7] = [
        ArgKey::Platform,
        ArgKey::Project,
        ArgKey::Version,
        ArgKey::Host,
        ArgKey::Owner,
        ArgKey::Repo,
        ArgKey::User,
    ];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgKey::Platform => "platform",
            ArgKey::Project => "project",
            ArgKey::Version => "version",
            ArgKey::Host => "host",
            ArgKey::Owner => "owner",
            ArgKey::Repo => "repo",
            ArgKey::User => "user",
        }
    }
}

impl fmt::Display for ArgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgKey {
    type Err = LibrariesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "name" => Ok(ArgKey::Project),
            "repository" => Ok(ArgKey::Repo),
            other => ArgKey::ALL
                .into_iter()
                .find(|k| k.as_str() == other)
                .ok_or_else(|| LibrariesError::UnknownKey {
                    kind: "argument",
                    value: s.to_string(),
                }),
        }
    }
}

/// Which base path an operation hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFamily {
    /// `<base>/...`: platforms, projects, repositories, users.
    Resource,
    /// `<base>/subscriptions/...`.
    Subscriptions,
}

impl EndpointFamily {
    /// Segments prepended to every path in this family.
    pub fn prefix(&self) -> &'static [&'static str] {
        match self {
            EndpointFamily::Resource => &[],
            EndpointFamily::Subscriptions => &["subscriptions"],
        }
    }
}

/// Whether an endpoint returns one resource or a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// A single mapping.
    Singleton,
    /// A page of mappings, driven by `page` / `per_page`.
    Collection,
}

/// Static description of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInfo {
    /// Catalog name, e.g. `project-dependencies`.
    pub name: &'static str,
    /// Base path family.
    pub family: EndpointFamily,
    /// Required named arguments, in path order.
    pub args: &'static [ArgKey],
    /// Literal segments appended after the arguments.
    pub tail: &'static [&'static str],
    /// Singleton or collection endpoint.
    pub cardinality: Cardinality,
    /// Verbs the endpoint accepts.
    pub verbs: &'static [HttpVerb],
}

impl OperationInfo {
    /// Whether `verb` may be used with this operation.
    pub fn allows(&self, verb: HttpVerb) -> bool {
        self.verbs.contains(&verb)
    }

    /// Whether the endpoint can be paginated.
    pub fn is_collection(&self) -> bool {
        self.cardinality == Cardinality::Collection
    }
}
