//! URI and query-parameter construction.
//!
//! Pure functions turning an [`Operation`] plus its named [`Arguments`] into
//! a path relative to the API base URL, and merging family-specific options
//! into a request's [`RequestParameters`].

use std::collections::BTreeMap;

use crate::catalog::ArgKey;
use crate::error::{LibrariesError, Result};
use crate::params::RequestParameters;
use crate::traits::Operation;

/// Named path arguments for one call.
///
/// Positional values can be recorded (for instance from loosely-typed CLI
/// input) but are always rejected by [`build_uri`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    named: BTreeMap<ArgKey, String>,
    positional: Vec<String>,
}

impl Arguments {
    /// Empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named argument.
    #[must_use]
    pub fn with(mut self, key: ArgKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a named argument in place.
    pub fn insert(&mut self, key: ArgKey, value: impl Into<String>) {
        self.named.insert(key, value.into());
    }

    /// Record a positional argument.
    pub fn push_positional(&mut self, value: impl Into<String>) {
        self.positional.push(value.into());
    }

    /// Look up a named argument.
    pub fn get(&self, key: ArgKey) -> Option<&str> {
        self.named.get(&key).map(String::as_str)
    }

    /// Positional arguments recorded so far.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Parse `key=value` tokens; tokens without `=` become positional.
    ///
    /// # Errors
    ///
    /// Returns [`LibrariesError::UnknownKey`] for an unrecognised key.
    pub fn parse_pairs<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = Self::new();
        for token in tokens {
            let token = token.as_ref();
            match token.split_once('=') {
                Some((key, value)) => args.insert(key.parse()?, value),
                None => args.push_positional(token),
            }
        }
        Ok(args)
    }
}

/// Build the path for `op`, relative to the API base URL.
///
/// Arguments are percent-encoded and emitted in the order the operation
/// demands, followed by its literal tail segments.
///
/// # Errors
///
/// - [`LibrariesError::UnnamedArgument`] if any positional argument was given.
/// - [`LibrariesError::MissingArgument`] naming the first absent argument.
pub fn build_uri<O: Operation>(op: O, args: &Arguments) -> Result<String> {
    if let Some(first) = args.positional().first() {
        return Err(LibrariesError::UnnamedArgument(first.clone()));
    }

    let info = op.info();
    let mut segments: Vec<String> = info.family.prefix().iter().map(|s| s.to_string()).collect();

    for &key in info.args {
        let value = args
            .get(key)
            .filter(|v| !v.is_empty())
            .or_else(|| op.default_argument(key))
            .ok_or(LibrariesError::MissingArgument(key.as_str()))?;
        segments.push(urlencoding::encode(value).into_owned());
    }

    segments.extend(info.tail.iter().map(|s| s.to_string()));
    Ok(segments.join("/"))
}

/// Merge the operation-specific query options into `params`.
///
/// Only keys the caller supplied are touched; nothing is removed.
pub fn build_params<'a, O: Operation>(
    op: O,
    params: &'a mut RequestParameters,
    query: &O::Query,
) -> &'a mut RequestParameters {
    op.apply_params(params, query);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SearchOperation, SearchQuery, SubscribeOperation};

    fn decode_segments(path: &str) -> Vec<String> {
        path.split('/')
            .map(|s| urlencoding::decode(s).unwrap().into_owned())
            .collect()
    }

    #[test]
    fn test_project_dependencies_order() {
        let args = Arguments::new()
            .with(ArgKey::Platform, "pypi")
            .with(ArgKey::Project, "requests")
            .with(ArgKey::Version, "2.31.0");
        let path = build_uri(SearchOperation::ProjectDependencies, &args).unwrap();
        assert_eq!(path, "pypi/requests/2.31.0/dependencies");
    }

    #[test]
    fn test_missing_version_defaults_to_latest() {
        let args = Arguments::new()
            .with(ArgKey::Platform, "npm")
            .with(ArgKey::Project, "base62");
        let path = build_uri(SearchOperation::ProjectDependencies, &args).unwrap();
        assert_eq!(path, "npm/base62/latest/dependencies");

        let args = args.with(ArgKey::Version, "");
        let path = build_uri(SearchOperation::ProjectDependencies, &args).unwrap();
        assert_eq!(path, "npm/base62/latest/dependencies");
    }

    #[test]
    fn test_every_missing_argument_is_named() {
        for op in SearchOperation::ALL {
            let required = op.info().args;
            for (skip, &missing) in required.iter().enumerate() {
                if op.default_argument(missing).is_some() {
                    continue;
                }
                let mut args = Arguments::new();
                for (i, &key) in required.iter().enumerate() {
                    if i != skip {
                        args.insert(key, "x");
                    }
                }
                match build_uri(op, &args) {
                    Err(LibrariesError::MissingArgument(name)) => {
                        assert_eq!(name, missing.as_str(), "{op}")
                    }
                    other => panic!("{op}: expected missing argument, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_segments_are_percent_encoded_and_round_trip() {
        let args = Arguments::new()
            .with(ArgKey::Platform, "Maven")
            .with(ArgKey::Project, "org.apache/commons lang");
        let path = build_uri(SearchOperation::ProjectContributors, &args).unwrap();
        assert_eq!(path, "Maven/org.apache%2Fcommons%20lang/contributors");
        assert_eq!(
            decode_segments(&path),
            vec!["Maven", "org.apache/commons lang", "contributors"]
        );
    }

    #[test]
    fn test_user_and_repository_paths() {
        let args = Arguments::new()
            .with(ArgKey::Host, "github")
            .with(ArgKey::User, "andrew");
        assert_eq!(
            build_uri(SearchOperation::UserPackagesContributions, &args).unwrap(),
            "github/andrew/project-contributions"
        );
        assert_eq!(
            build_uri(SearchOperation::UserRepositoryContributions, &args).unwrap(),
            "github/andrew/repository-contributions"
        );

        let args = Arguments::new()
            .with(ArgKey::Host, "github")
            .with(ArgKey::Owner, "gruntjs")
            .with(ArgKey::Repo, "grunt");
        assert_eq!(
            build_uri(SearchOperation::RepositoryProjects, &args).unwrap(),
            "github/gruntjs/grunt/projects"
        );
    }

    #[test]
    fn test_argument_free_paths() {
        let args = Arguments::new();
        assert_eq!(build_uri(SearchOperation::Platforms, &args).unwrap(), "platforms");
        assert_eq!(build_uri(SearchOperation::ProjectSearch, &args).unwrap(), "search");
        assert_eq!(
            build_uri(SubscribeOperation::UserSubscriptions, &args).unwrap(),
            "subscriptions"
        );
    }

    #[test]
    fn test_subscription_paths() {
        let args = Arguments::new()
            .with(ArgKey::Platform, "NPM")
            .with(ArgKey::Project, "@babel/core");
        assert_eq!(
            build_uri(SubscribeOperation::UnsubscribeUserFromProject, &args).unwrap(),
            "subscriptions/NPM/%40babel%2Fcore"
        );
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        let mut args = Arguments::new();
        args.push_positional("pypi");
        let err = build_uri(SearchOperation::Platforms, &args).unwrap_err();
        assert!(matches!(err, LibrariesError::UnnamedArgument(v) if v == "pypi"));
    }

    #[test]
    fn test_parse_pairs() {
        let args = Arguments::parse_pairs(["platform=pypi", "name=flask", "oops"]).unwrap();
        assert_eq!(args.get(ArgKey::Platform), Some("pypi"));
        assert_eq!(args.get(ArgKey::Project), Some("flask"));
        assert_eq!(args.positional(), ["oops".to_string()]);

        assert!(Arguments::parse_pairs(["colour=red"]).is_err());
    }

    #[test]
    fn test_build_params_keeps_existing_keys() {
        let mut params = RequestParameters::new();
        params.set("api_key", "k").set("page", 2i64);
        build_params(
            SearchOperation::ProjectSearch,
            &mut params,
            &SearchQuery::text("cli"),
        );
        assert_eq!(params.len(), 3);
        assert!(params.contains("api_key"));
    }
}
