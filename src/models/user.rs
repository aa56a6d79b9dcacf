//! User and organisation model.

use serde::{Deserialize, Serialize};

/// A user or organisation on a repository host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Account name.
    pub login: String,

    /// "User" or "Organisation".
    #[serde(default)]
    pub user_type: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Employer.
    #[serde(default)]
    pub company: Option<String>,

    /// Website.
    #[serde(default)]
    pub blog: Option<String>,

    /// Location.
    #[serde(default)]
    pub location: Option<String>,

    /// Hosting service.
    #[serde(default)]
    pub host_type: Option<String>,
}
