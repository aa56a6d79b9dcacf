//! MCP tool parameter types with JSON Schema support.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{SearchFilter, SearchSort};

/// Parameters for the `search` MCP tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Operation name, e.g. "project", "project-dependencies", "project-search",
    /// "repository", "user-repositories".
    pub operation: String,
    /// Named path arguments: platform, project, version, host, owner, repo, user.
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
    /// Page number (1-indexed).
    #[serde(default)]
    pub page: Option<i64>,
    /// Number of items per page (max 100).
    #[serde(default)]
    pub per_page: Option<i64>,
    /// Search text (project-search only).
    #[serde(default)]
    pub q: Option<String>,
    /// Sort key (project-search only).
    #[serde(default)]
    pub sort: Option<SearchSort>,
    /// Filters by facet (project-search only), e.g. {"licenses": ["MIT"]}.
    #[serde(default)]
    pub filters: BTreeMap<SearchFilter, Vec<String>>,
}

/// Subscription actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionAction {
    /// List current subscriptions.
    List,
    /// Subscribe to a project.
    Subscribe,
    /// Check whether a subscription exists.
    Check,
    /// Change a subscription's options.
    Update,
    /// Drop a subscription.
    Unsubscribe,
}

/// Parameters for the `subscription` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubscriptionParams {
    /// What to do.
    pub action: SubscriptionAction,
    /// Package manager (required except for list).
    #[serde(default)]
    pub platform: Option<String>,
    /// Package name (required except for list).
    #[serde(default)]
    pub project: Option<String>,
    /// Notify about prerelease versions (subscribe and update).
    #[serde(default)]
    pub include_prerelease: bool,
    /// Page number for list.
    #[serde(default)]
    pub page: Option<i64>,
    /// Items per page for list.
    #[serde(default)]
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_schema_generates() {
        let schema = schemars::schema_for!(SearchParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("operation"));
        assert!(json.contains("filters"));
    }

    #[test]
    fn search_params_deserialize_with_filters() {
        let params: SearchParams = serde_json::from_value(serde_json::json!({
            "operation": "project-search",
            "q": "grunt",
            "sort": "stars",
            "filters": {"licenses": ["MIT", "Apache-2.0"]}
        }))
        .unwrap();
        assert_eq!(params.sort, Some(SearchSort::Stars));
        assert_eq!(params.filters[&SearchFilter::Licenses].len(), 2);
        assert!(params.arguments.is_empty());
    }

    #[test]
    fn subscription_params_deserialize() {
        let params: SubscriptionParams = serde_json::from_value(serde_json::json!({
            "action": "check",
            "platform": "npm",
            "project": "left-pad"
        }))
        .unwrap();
        assert_eq!(params.action, SubscriptionAction::Check);
        assert!(!params.include_prerelease);
    }
}
