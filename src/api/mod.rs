//! Typed facades over the session: [`Search`] and [`Subscribe`].
//!
//! Each facade method binds its typed parameters to a [`Call`], runs it
//! once and reports the result as an [`Outcome`]. Configuration errors are
//! returned as `Err`; transport and remote failures are logged and captured
//! in [`Outcome::Failed`].

mod search;
mod subscribe;

pub use search::Search;
pub use subscribe::Subscribe;

use crate::catalog::HttpVerb;
use crate::error::{LibrariesError, Result};
use crate::paginator::Paginator;
use crate::response::Outcome;
use crate::session::{Call, Session, SessionKind};
use crate::traits::Operation;

/// Fail unless `session` may be driven by a facade.
pub(crate) fn ensure_standard(session: &Session) -> Result<()> {
    match session.kind() {
        SessionKind::Standard => Ok(()),
        kind => Err(LibrariesError::InvalidSessionClass {
            found: kind.as_str(),
        }),
    }
}

/// Execute `call` once, capturing post-dispatch failures.
pub(crate) async fn call_once<O: Operation>(session: &Session, call: Call<O>) -> Result<Outcome> {
    ensure_standard(session)?;

    match session.execute(&call).await {
        Ok(response) => Ok(Outcome::Success(response)),
        Err(err) if err.is_configuration() => Err(err),
        Err(err) => {
            if call.verb == HttpVerb::Delete
                && matches!(err, LibrariesError::RetriesExhausted { .. })
            {
                tracing::debug!(
                    "{} gave up retrying, subscription likely already absent: {}",
                    call.operation,
                    err
                );
            } else {
                tracing::error!("{} failed: {}", call.operation, err);
            }
            Ok(Outcome::Failed {
                error: err,
                cardinality: call.operation.info().cardinality,
            })
        }
    }
}

/// Paginate `call` on a session derived from `session`.
pub(crate) fn paginate<O: Operation>(session: &Session, call: Call<O>) -> Result<Paginator<O>> {
    ensure_standard(session)?;
    Paginator::from_session(session, call)
}
