//! libraries.io session.
//!
//! Owns the API key, the retry policy and the HTTP transport, and exposes a
//! single primitive, [`Session::execute`], which turns a [`Call`] into a
//! decoded [`Response`].

use std::env;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::builder::{build_params, build_uri, Arguments};
use crate::catalog::HttpVerb;
use crate::error::{LibrariesError, Result};
use crate::pagination::fix_pages_in;
use crate::params::{RequestOptions, RequestParameters, API_KEY, INCLUDE_PRERELEASE};
use crate::response::Response;
use crate::retry::RetryPolicy;
use crate::traits::Operation;

/// Production API root.
pub const DEFAULT_API_URL: &str = "https://libraries.io/api";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "LIBRARIES_API_KEY";
/// Environment variable overriding the API root.
pub const API_URL_ENV: &str = "LIBRARIES_API_URL";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("librariesio/", env!("CARGO_PKG_VERSION"));

/// What a session may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionKind {
    /// Usable by the `Search` and `Subscribe` facades.
    #[default]
    Standard,
    /// Owned by a [`crate::Paginator`]; rejected by the facades.
    IteratorOnly,
}

impl SessionKind {
    /// Name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Standard => "standard session",
            SessionKind::IteratorOnly => "iterator-only session",
        }
    }
}

/// One logical request: an operation, its verb and everything needed to
/// build the URL.
#[derive(Debug, Clone)]
pub struct Call<O: Operation> {
    /// Catalog operation.
    pub operation: O,
    /// HTTP verb; must be accepted by the operation.
    pub verb: HttpVerb,
    /// Named path arguments.
    pub arguments: Arguments,
    /// Operation-specific query options.
    pub query: O::Query,
    /// Pagination and transport options.
    pub options: RequestOptions,
}

impl<O: Operation> Call<O> {
    /// A call with no arguments and default options.
    pub fn new(operation: O, verb: HttpVerb) -> Self {
        Self {
            operation,
            verb,
            arguments: Arguments::new(),
            query: O::Query::default(),
            options: RequestOptions::default(),
        }
    }

    /// A GET call.
    pub fn get(operation: O) -> Self {
        Self::new(operation, HttpVerb::Get)
    }

    /// Replace the path arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Replace the query options.
    #[must_use]
    pub fn with_query(mut self, query: O::Query) -> Self {
        self.query = query;
        self
    }

    /// Replace the request options.
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// Builder for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    retry: RetryPolicy,
    timeout: Duration,
    kind: SessionKind,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: API_KEY_ENV.to_string(),
            base_url: DEFAULT_API_URL.to_string(),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            kind: SessionKind::Standard,
        }
    }
}

impl SessionBuilder {
    /// Builder whose API root honours `LIBRARIES_API_URL` when it is set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().base_url_from_env(API_URL_ENV)
    }

    fn base_url_from_env(mut self, var: &str) -> Self {
        if let Ok(url) = env::var(var) {
            self.base_url = url;
        }
        self
    }

    /// Use an explicit API key instead of the environment.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Read the key from a different environment variable.
    #[must_use]
    pub fn api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = name.into();
        self
    }

    /// Point the session at another API root.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Restrict the session to pagination.
    #[must_use]
    pub fn kind(mut self, kind: SessionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the transport cannot
    /// be created.
    pub fn build(self) -> Result<Session> {
        // Ensure base URL ends with / so joins keep the /api prefix
        let base_url = if self.base_url.ends_with('/') {
            self.base_url
        } else {
            format!("{}/", self.base_url)
        };
        let base_url = Url::parse(&base_url)?;
        let http = build_transport(self.timeout)?;

        Ok(Session {
            http: RwLock::new(http),
            base_url: Arc::new(base_url),
            api_key: self.api_key.filter(|k| !k.is_empty()),
            api_key_env: self.api_key_env,
            retry: self.retry,
            timeout: self.timeout,
            kind: self.kind,
        })
    }
}

fn build_transport(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .brotli(true)
        .gzip(true)
        .deflate(true)
        .timeout(timeout)
        .build()
        .map_err(LibrariesError::HttpError)
}

/// Authenticated connection to libraries.io.
///
/// The API key is resolved at request time, so a session can be created
/// before the key is available.
///
/// # Example
///
/// ```no_run
/// use librariesio::{Call, SearchOperation, Session};
///
/// # async fn example() -> librariesio::Result<()> {
/// let session = Session::from_env()?;
/// let platforms = session.execute(&Call::get(SearchOperation::Platforms)).await?;
/// println!("{} platforms", platforms.len());
/// # Ok(())
/// # }
/// ```
pub struct Session {
    http: RwLock<Client>,
    base_url: Arc<Url>,
    api_key: Option<String>,
    api_key_env: String,
    retry: RetryPolicy,
    timeout: Duration,
    kind: SessionKind,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("api_key_env", &self.api_key_env)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start configuring a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Create a session with an explicit key against the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a session configured from the environment.
    ///
    /// The key is read from `LIBRARIES_API_KEY` when a request is made;
    /// `LIBRARIES_API_URL` optionally overrides the API root.
    ///
    /// # Errors
    ///
    /// Returns an error if `LIBRARIES_API_URL` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        SessionBuilder::from_env().build()
    }

    /// API root requests are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// What this session may be used for.
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Current retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Replace the retry policy.
    pub fn set_retry_policy(&mut self, retry: RetryPolicy) {
        self.retry = retry;
    }

    /// Replace (or clear) the explicit API key.
    pub fn set_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key.filter(|k| !k.is_empty());
    }

    /// Name of the environment variable consulted for the key.
    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    /// The key requests will carry: the explicit one, else the environment.
    ///
    /// # Errors
    ///
    /// Returns [`LibrariesError::MissingApiKey`] if neither is set.
    pub fn resolve_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LibrariesError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            })
    }

    /// A pagination-only session sharing this one's key, retry policy and
    /// API root, with a fresh transport.
    pub(crate) fn iterator_session(&self) -> Result<Session> {
        let mut builder = Self::builder()
            .api_key_env(self.api_key_env.clone())
            .base_url(self.base_url.as_str())
            .retry_policy(self.retry.clone())
            .timeout(self.timeout)
            .kind(SessionKind::IteratorOnly);
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.clone());
        }
        builder.build()
    }

    /// Replace the transport with a new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be created.
    pub fn recreate(&self) -> Result<()> {
        let http = build_transport(self.timeout)?;
        *self.http.write().unwrap_or_else(PoisonError::into_inner) = http;
        tracing::debug!("recreated HTTP transport");
        Ok(())
    }

    fn transport(&self) -> Client {
        self.http.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Perform one logical request.
    ///
    /// Retryable failures are retried according to the session's policy.
    /// A DELETE answered with `204 No Content` yields
    /// `{"status": "success"}`.
    ///
    /// # Errors
    ///
    /// Configuration errors are returned before any request is made:
    /// [`LibrariesError::InvalidOperation`] for a verb the operation does not
    /// accept, [`LibrariesError::MissingApiKey`] and the argument errors of
    /// [`build_uri`]. Afterwards, non-success statuses become
    /// [`LibrariesError::Api`] and exhausted retries
    /// [`LibrariesError::RetriesExhausted`].
    #[tracing::instrument(skip(self, call), fields(operation = %call.operation, verb = %call.verb))]
    pub async fn execute<O: Operation>(&self, call: &Call<O>) -> Result<Response> {
        let op = call.operation;
        if !op.info().allows(call.verb) {
            return Err(LibrariesError::InvalidOperation {
                operation: op.to_string(),
                verb: call.verb.to_string(),
                reason: "verb not accepted by this operation",
            });
        }

        let api_key = self.resolve_key()?;
        let path = build_uri(op, &call.arguments)?;

        if call.options.force_recreate {
            self.recreate()?;
        }

        let mut params = RequestParameters::new();
        params.set(API_KEY, api_key);
        if call.options.include_prerelease || call.verb == HttpVerb::Post {
            params.set(INCLUDE_PRERELEASE, 1i64);
        }
        if call.verb == HttpVerb::Get
            && !fix_pages_in(&mut params, call.options.page, call.options.per_page)
        {
            tracing::debug!(
                "page {:?} / per_page {:?} out of range, clamped",
                call.options.page,
                call.options.per_page
            );
        }
        build_params(op, &mut params, &call.query);

        let mut url = self.base_url.join(&path)?;
        url.set_query(Some(&params.to_query_string()));

        let http = self.transport();
        let label = format!("{} {}", call.verb, path);
        let response = self
            .retry
            .send(&label, call.verb, || {
                http.request(call.verb.into(), url.clone()).send()
            })
            .await?;

        Self::read_body(call.verb, response).await
    }

    /// Check the status and decode the body.
    async fn read_body(verb: HttpVerb, response: reqwest::Response) -> Result<Response> {
        let status = response.status();

        if !status.is_success() {
            let message = Self::extract_error_message(response, status).await;
            return Err(LibrariesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        if verb == HttpVerb::Delete && status == StatusCode::NO_CONTENT && body.trim().is_empty() {
            return Ok(Response::deleted());
        }
        Response::from_body(&body)
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: reqwest::Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}
