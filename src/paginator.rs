//! Caller-paced iteration over collection endpoints.

use serde_json::Value;

use crate::catalog::HttpVerb;
use crate::error::{LibrariesError, Result};
use crate::pagination::DEFAULT_PAGE;
use crate::response::Response;
use crate::session::{Call, Session, SessionKind};
use crate::traits::Operation;

/// Why a [`Paginator`] stopped.
#[derive(Debug)]
pub enum EndReason {
    /// The server returned a page with no items.
    EmptyPage,
    /// A request failed; the error was logged.
    Failed(LibrariesError),
    /// The paginator had already stopped.
    Exhausted,
}

/// One step of a [`Paginator`].
#[derive(Debug)]
pub enum PageOutcome {
    /// A non-empty page.
    Page(Response),
    /// No more pages.
    End(EndReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready(u32),
    Exhausted,
}

/// Walks a GET collection call page by page.
///
/// The paginator owns an iterator-only [`Session`]; the page cursor starts
/// at `call.options.page` (default 1), advances by one after every
/// non-empty page and never goes back. Once it stops it stays stopped.
///
/// # Example
///
/// ```no_run
/// use librariesio::{Call, PageOutcome, Paginator, SearchOperation, SearchQuery, Session};
///
/// # async fn example() -> librariesio::Result<()> {
/// let session = Session::from_env()?;
/// let call = Call::get(SearchOperation::ProjectSearch).with_query(SearchQuery::text("http"));
/// let mut pages = Paginator::from_session(&session, call)?;
/// while let PageOutcome::Page(page) = pages.next_page().await? {
///     println!("{} results", page.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Paginator<O: Operation> {
    session: Session,
    call: Call<O>,
    state: State,
}

impl<O: Operation> Paginator<O> {
    /// Paginate `call` with a new session sharing `session`'s configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LibrariesError::InvalidOperation`] if the call is not a GET
    /// on a collection endpoint.
    pub fn from_session(session: &Session, call: Call<O>) -> Result<Self> {
        Self::validate(&call)?;
        Ok(Self::with_session(session.iterator_session()?, call))
    }

    /// Paginate `call` against the production API with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`LibrariesError::InvalidOperation`] if the call is not a GET
    /// on a collection endpoint.
    pub fn from_api_key(api_key: impl Into<String>, call: Call<O>) -> Result<Self> {
        Self::validate(&call)?;
        let session = Session::builder()
            .api_key(api_key)
            .kind(SessionKind::IteratorOnly)
            .build()?;
        Ok(Self::with_session(session, call))
    }

    fn with_session(session: Session, call: Call<O>) -> Self {
        let from_page = call
            .options
            .page
            .map_or(DEFAULT_PAGE, |p| p.clamp(1, i64::from(u32::MAX)) as u32);
        Self {
            session,
            call,
            state: State::Ready(from_page),
        }
    }

    fn validate(call: &Call<O>) -> Result<()> {
        let reason = if call.verb != HttpVerb::Get {
            "only GET calls can be paginated"
        } else if !call.operation.info().is_collection() {
            "operation does not return a collection"
        } else {
            return Ok(());
        };
        Err(LibrariesError::InvalidOperation {
            operation: call.operation.to_string(),
            verb: call.verb.to_string(),
            reason,
        })
    }

    /// Page the next request will fetch, or `None` once stopped.
    pub fn current_page(&self) -> Option<u32> {
        match self.state {
            State::Ready(page) => Some(page),
            State::Exhausted => None,
        }
    }

    /// Whether the paginator has stopped.
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// The session driving the requests.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch the next page.
    ///
    /// Request failures end the iteration with [`EndReason::Failed`].
    ///
    /// # Errors
    ///
    /// Configuration errors and [`LibrariesError::UnexpectedPayload`] are
    /// returned as `Err`; either also stops the paginator.
    #[tracing::instrument(skip(self), fields(operation = %self.call.operation))]
    pub async fn next_page(&mut self) -> Result<PageOutcome> {
        let page = match self.state {
            State::Ready(page) => page,
            State::Exhausted => return Ok(PageOutcome::End(EndReason::Exhausted)),
        };

        let mut call = self.call.clone();
        call.options.page = Some(i64::from(page));

        match self.session.execute(&call).await {
            Ok(response) if response.is_empty() => {
                tracing::debug!("page {} is empty, stopping", page);
                self.state = State::Exhausted;
                Ok(PageOutcome::End(EndReason::EmptyPage))
            }
            Ok(response) => {
                self.state = State::Ready(page.saturating_add(1));
                Ok(PageOutcome::Page(response))
            }
            Err(err @ LibrariesError::UnexpectedPayload(_)) => {
                self.state = State::Exhausted;
                Err(err)
            }
            Err(err) if err.is_configuration() => {
                self.state = State::Exhausted;
                Err(err)
            }
            Err(err) => {
                tracing::error!("{} failed on page {}: {}", self.call.operation, page, err);
                self.state = State::Exhausted;
                Ok(PageOutcome::End(EndReason::Failed(err)))
            }
        }
    }

    /// Drain every remaining page into one list of items.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the iteration, if any.
    pub async fn collect_items(mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            match self.next_page().await? {
                PageOutcome::Page(Response::Collection(page)) => items.extend(page),
                PageOutcome::Page(Response::Single(map)) => items.push(Value::Object(map)),
                PageOutcome::End(EndReason::Failed(err)) => return Err(err),
                PageOutcome::End(_) => return Ok(items),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SearchOperation, SubscribeOperation};
    use crate::params::RequestOptions;

    fn session() -> Session {
        Session::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:9/api")
            .build()
            .unwrap()
    }

    #[test]
    fn test_non_get_is_rejected() {
        let call = Call::new(SubscribeOperation::SubscribeUserToProject, HttpVerb::Post);
        let err = Paginator::from_session(&session(), call).unwrap_err();
        assert!(matches!(err, LibrariesError::InvalidOperation { .. }));
    }

    #[test]
    fn test_singleton_is_rejected() {
        let call = Call::get(SearchOperation::Project);
        let err = Paginator::from_api_key("k", call).unwrap_err();
        assert!(matches!(err, LibrariesError::InvalidOperation { reason, .. } if reason.contains("collection")));
    }

    #[test]
    fn test_starts_at_requested_page() {
        let call = Call::get(SearchOperation::ProjectSearch);
        let pages = Paginator::from_session(&session(), call).unwrap();
        assert_eq!(pages.current_page(), Some(1));
        assert_eq!(pages.session().kind(), SessionKind::IteratorOnly);

        let call = Call::get(SubscribeOperation::UserSubscriptions)
            .with_options(RequestOptions::default().page(4));
        let pages = Paginator::from_session(&session(), call).unwrap();
        assert_eq!(pages.current_page(), Some(4));

        let call = Call::get(SearchOperation::ProjectContributors)
            .with_options(RequestOptions::default().page(-2));
        let pages = Paginator::from_session(&session(), call).unwrap();
        assert_eq!(pages.current_page(), Some(1));
    }
}
