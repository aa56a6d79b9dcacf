//! Package manager model.

use serde::{Deserialize, Serialize};

/// A package manager supported by libraries.io.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Display name (e.g. "NPM").
    pub name: String,

    /// Number of packages indexed.
    #[serde(default)]
    pub project_count: u64,

    /// Package manager website.
    #[serde(default)]
    pub homepage: Option<String>,

    /// Colour used by libraries.io for this platform.
    #[serde(default)]
    pub color: Option<String>,

    /// Most common language of its packages.
    #[serde(default)]
    pub default_language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_deserialize() {
        let json = r##"{
            "name": "NPM",
            "project_count": 4079586,
            "homepage": "https://www.npmjs.com",
            "color": "#f1e05a",
            "default_language": "JavaScript"
        }"##;

        let platform: Platform = serde_json::from_str(json).unwrap();
        assert_eq!(platform.name, "NPM");
        assert_eq!(platform.project_count, 4_079_586);
        assert_eq!(platform.default_language.as_deref(), Some("JavaScript"));
    }

    #[test]
    fn test_platform_minimal() {
        let platform: Platform = serde_json::from_str(r#"{"name": "Go"}"#).unwrap();
        assert_eq!(platform.project_count, 0);
        assert!(platform.homepage.is_none());
    }
}
