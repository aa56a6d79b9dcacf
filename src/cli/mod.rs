//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! librariesio binary.

use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use crate::{
    Arguments, LibrariesError, RequestOptions, SearchFilter, SearchOperation, SearchQuery,
    SearchSort,
};

/// libraries.io command-line interface.
#[derive(Parser, Debug)]
#[command(name = "librariesio", about = "libraries.io API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// API key (defaults to the LIBRARIES_API_KEY environment variable).
    #[arg(long, global = true, env = "LIBRARIES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a search operation.
    Search {
        /// Operation name (e.g. project, project-dependencies, project-search).
        operation: SearchOperation,

        /// Path arguments as key=value (platform, project, version, host, owner, repo, user).
        args: Vec<String>,

        /// Search text (project-search only).
        #[arg(long)]
        q: Option<String>,

        /// Sort key (project-search only).
        #[arg(long)]
        sort: Option<SearchSort>,

        /// Filter as facet=value, repeatable (project-search only).
        #[arg(long = "filter")]
        filters: Vec<FilterArg>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Manage release subscriptions.
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionCommand,
    },
}

/// Subscription subcommands.
#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    /// List current subscriptions.
    List {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Subscribe to a project.
    Add {
        /// Package manager.
        platform: String,
        /// Package name.
        project: String,
        /// Also notify about prerelease versions.
        #[arg(long)]
        include_prerelease: bool,
    },

    /// Change a subscription's options.
    Update {
        /// Package manager.
        platform: String,
        /// Package name.
        project: String,
        /// Also notify about prerelease versions.
        #[arg(long)]
        include_prerelease: bool,
    },

    /// Drop a subscription.
    Remove {
        /// Package manager.
        platform: String,
        /// Package name.
        project: String,
    },

    /// Check whether a subscription exists.
    Check {
        /// Package manager.
        platform: String,
        /// Package name.
        project: String,
    },
}

/// Pagination flags shared by list-style commands.
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Page number (1-indexed).
    #[arg(long)]
    pub page: Option<i64>,

    /// Number of items per page (max 100).
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Fetch every page from --page onwards.
    #[arg(long)]
    pub all: bool,
}

impl PagingArgs {
    /// Request options for these flags.
    pub fn options(&self) -> RequestOptions {
        RequestOptions {
            page: self.page,
            per_page: self.per_page,
            ..Default::default()
        }
    }
}

/// A `facet=value` search filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArg {
    /// Facet.
    pub filter: SearchFilter,
    /// Value to match.
    pub value: String,
}

impl FromStr for FilterArg {
    type Err = LibrariesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (filter, value) = s
            .split_once('=')
            .ok_or_else(|| LibrariesError::UnnamedArgument(s.to_string()))?;
        Ok(Self {
            filter: filter.parse()?,
            value: value.to_string(),
        })
    }
}

/// Build the search query from command-line flags.
pub fn search_query(q: Option<String>, sort: Option<SearchSort>, filters: &[FilterArg]) -> SearchQuery {
    let mut query = SearchQuery {
        q,
        sort,
        ..Default::default()
    };
    for f in filters {
        query = query.filter(f.filter, f.value.clone());
    }
    query
}

/// Parse `key=value` path arguments.
///
/// # Errors
///
/// Returns an error for an unknown key. Tokens without `=` are kept as
/// positional and rejected when the request is built.
pub fn parse_arguments(args: &[String]) -> crate::Result<Arguments> {
    Arguments::parse_pairs(args)
}
