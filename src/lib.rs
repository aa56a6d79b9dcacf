//! libraries.io API client library.
//!
//! A Rust client for the [libraries.io](https://libraries.io) search and
//! subscription API. Every endpoint is described by a catalog
//! [`Operation`]; a [`Session`] turns an operation plus its arguments into
//! a request, retries transient failures and decodes the JSON body.
//!
//! # Quick Start
//!
//! ```no_run
//! use librariesio::{PageOutcome, RequestOptions, Search, SearchQuery, SearchSort};
//!
//! #[tokio::main]
//! async fn main() -> librariesio::Result<()> {
//!     // Key from LIBRARIES_API_KEY
//!     let search = Search::from_env()?;
//!
//!     // One request
//!     let outcome = search.project("pypi", "requests", RequestOptions::default()).await?;
//!     println!("{:?}", outcome.response());
//!
//!     // Walk every page of a search
//!     let query = SearchQuery::text("http client").sort(SearchSort::Stars);
//!     let mut pages = search.project_search_pages(query, RequestOptions::default())?;
//!     while let PageOutcome::Page(page) = pages.next_page().await? {
//!         println!("{} results", page.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`SearchOperation`] / [`SubscribeOperation`] - the catalog of endpoints
//! - [`build_uri`] / [`build_params`] - request shape construction
//! - [`Session`] - key, retry policy and transport; [`Session::execute`]
//! - [`Search`] / [`Subscribe`] - typed single-shot facades returning [`Outcome`]
//! - [`Paginator`] - caller-paced iteration over collection endpoints
//!
//! # Configuration
//!
//! - `LIBRARIES_API_KEY` - API key, read when a request is made
//! - `LIBRARIES_API_URL` (optional) - Base URL (defaults to `https://libraries.io/api`)

mod api;
mod builder;
mod catalog;
mod error;
mod models;
mod pagination;
mod paginator;
mod params;
mod response;
mod retry;
mod session;
mod traits;

pub mod cli;
pub mod mcp;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use error::{LibrariesError, Result};
pub use session::{
    Call, Session, SessionBuilder, SessionKind, API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL,
    DEFAULT_TIMEOUT,
};
pub use retry::{RetryPolicy, STATUS_RETRY_VERBS};
pub use response::{Outcome, Response, DELETED_STATUS};

// Catalog and request construction
pub use builder::{build_params, build_uri, Arguments};
pub use catalog::{
    ArgKey, Cardinality, EndpointFamily, HttpVerb, OperationInfo, SearchFilter, SearchOperation,
    SearchQuery, SearchSort, SubscribeOperation,
};
pub use params::{ParamValue, RequestOptions, RequestParameters};
pub use traits::Operation;
pub use output::PrettyPrint;

// Pagination
pub use pagination::{fix_pages, Pagination, DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use paginator::{EndReason, PageOutcome, Paginator};

// Facades
pub use api::{Search, Subscribe};

// Re-export models
pub use models::{
    Dependency, Platform, Project, ProjectDependencies, Repository, SourceRank, Subscription,
    User, Version,
};
