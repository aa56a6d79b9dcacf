//! Subscription model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Project;

/// A release-notification subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Whether prerelease versions trigger notifications.
    #[serde(default)]
    pub include_prerelease: bool,

    /// When the subscription was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When it was last changed.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// The subscribed project.
    #[serde(default)]
    pub project: Option<Project>,
}

impl Subscription {
    /// `platform/name` of the subscribed project.
    pub fn target(&self) -> Option<String> {
        self.project
            .as_ref()
            .map(|p| format!("{}/{}", p.platform, p.name))
    }
}
