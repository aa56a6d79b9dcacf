//! Release-notification subscriptions of the key's owner.

use crate::builder::Arguments;
use crate::catalog::{ArgKey, SubscribeOperation};
use crate::error::Result;
use crate::paginator::Paginator;
use crate::params::RequestOptions;
use crate::response::Outcome;
use crate::session::{Call, Session};

use super::{call_once, paginate};

fn subscription_call(op: SubscribeOperation, platform: &str, project: &str) -> Call<SubscribeOperation> {
    let args = Arguments::new()
        .with(ArgKey::Platform, platform)
        .with(ArgKey::Project, project);
    Call::new(op, op.verb()).with_arguments(args)
}

/// Subscribe facade over libraries.io.
#[derive(Debug)]
pub struct Subscribe {
    session: Session,
}

impl Subscribe {
    /// Create a facade with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_session(Session::new(api_key)?))
    }

    /// Create a facade configured from the environment.
    ///
    /// # Errors
    ///
    /// See [`Session::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_session(Session::from_env()?))
    }

    /// Wrap an existing session.
    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Packages the user is subscribed to.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn user_subscriptions(&self, options: RequestOptions) -> Result<Outcome> {
        let call = Call::get(SubscribeOperation::UserSubscriptions).with_options(options);
        call_once(&self.session, call).await
    }

    /// Paginated [`Subscribe::user_subscriptions`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn user_subscriptions_pages(&self, options: RequestOptions) -> Result<Paginator<SubscribeOperation>> {
        let call = Call::get(SubscribeOperation::UserSubscriptions).with_options(options);
        paginate(&self.session, call)
    }

    /// Subscribe to a project's releases.
    ///
    /// The request always carries `include_prerelease=1`; the server treats
    /// the flag loosely.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self))]
    pub async fn subscribe(&self, platform: &str, project: &str, include_prerelease: bool) -> Result<Outcome> {
        let call = subscription_call(SubscribeOperation::SubscribeUserToProject, platform, project)
            .with_options(RequestOptions::default().include_prerelease(include_prerelease));
        call_once(&self.session, call).await
    }

    /// Whether the user is subscribed to a project.
    ///
    /// Any failure, including a 404 for an unknown subscription, reads as
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self))]
    pub async fn check_if_subscribed(&self, platform: &str, project: &str) -> Result<bool> {
        let call = subscription_call(SubscribeOperation::CheckIfSubscribed, platform, project);
        let outcome = call_once(&self.session, call).await?;
        Ok(outcome.response().is_some_and(|r| !r.is_empty()))
    }

    /// Change the options of an existing subscription.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self))]
    pub async fn update_subscription(
        &self,
        platform: &str,
        project: &str,
        include_prerelease: bool,
    ) -> Result<Outcome> {
        let call = subscription_call(SubscribeOperation::UpdateSubscriptionToProject, platform, project)
            .with_options(RequestOptions::default().include_prerelease(include_prerelease));
        call_once(&self.session, call).await
    }

    /// Stop receiving release notifications for a project.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self))]
    pub async fn unsubscribe(&self, platform: &str, project: &str) -> Result<Outcome> {
        let call = subscription_call(SubscribeOperation::UnsubscribeUserFromProject, platform, project);
        call_once(&self.session, call).await
    }
}
