//! Subscribe catalog: release-notification subscriptions of the key's owner.

use std::fmt;
use std::str::FromStr;

use super::{ArgKey, Cardinality, EndpointFamily, HttpVerb, OperationInfo};
use crate::error::LibrariesError;
use crate::params::RequestParameters;
use crate::traits::Operation;

const PLATFORM_PROJECT: &[ArgKey] = &[ArgKey::Platform, ArgKey::Project];

const USER_SUBSCRIPTIONS: OperationInfo = OperationInfo {
    name: "user-subscriptions",
    family: EndpointFamily::Subscriptions,
    args: &[],
    tail: &[],
    cardinality: Cardinality::Collection,
    verbs: &[HttpVerb::Get],
};

const SUBSCRIBE_USER_TO_PROJECT: OperationInfo = OperationInfo {
    name: "subscribe-user-to-project",
    family: EndpointFamily::Subscriptions,
    args: PLATFORM_PROJECT,
    tail: &[],
    cardinality: Cardinality::Singleton,
    verbs: &[HttpVerb::Post],
};

const UNSUBSCRIBE_USER_FROM_PROJECT: OperationInfo = OperationInfo {
    name: "unsubscribe-user-from-project",
    family: EndpointFamily::Subscriptions,
    args: PLATFORM_PROJECT,
    tail: &[],
    cardinality: Cardinality::Singleton,
    verbs: &[HttpVerb::Delete],
};

const CHECK_IF_SUBSCRIBED: OperationInfo = OperationInfo {
    name: "check-if-subscribed",
    family: EndpointFamily::Subscriptions,
    args: PLATFORM_PROJECT,
    tail: &[],
    cardinality: Cardinality::Singleton,
    verbs: &[HttpVerb::Get],
};

const UPDATE_SUBSCRIPTION_TO_PROJECT: OperationInfo = OperationInfo {
    name: "update-subscription-to-project",
    family: EndpointFamily::Subscriptions,
    args: PLATFORM_PROJECT,
    tail: &[],
    cardinality: Cardinality::Singleton,
    verbs: &[HttpVerb::Put],
};

/// Subscription operations offered by libraries.io.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscribeOperation {
    /// List the packages the user is subscribed to.
    UserSubscriptions,
    /// Subscribe to a project's releases.
    SubscribeUserToProject,
    /// Drop a subscription.
    UnsubscribeUserFromProject,
    /// Check whether a subscription exists.
    CheckIfSubscribed,
    /// Change a subscription's options.
    UpdateSubscriptionToProject,
}

impl SubscribeOperation {
    /// Every subscribe operation.
    pub const ALL: [SubscribeOperation; 5] = [
        SubscribeOperation::UserSubscriptions,
        SubscribeOperation::SubscribeUserToProject,
        SubscribeOperation::UnsubscribeUserFromProject,
        SubscribeOperation::CheckIfSubscribed,
        SubscribeOperation::UpdateSubscriptionToProject,
    ];

    /// The verb this operation is issued with.
    pub fn verb(&self) -> HttpVerb {
        self.info().verbs[0]
    }
}

impl Operation for SubscribeOperation {
    type Query = ();

    fn info(&self) -> &'static OperationInfo {
        match self {
            SubscribeOperation::UserSubscriptions => &USER_SUBSCRIPTIONS,
            SubscribeOperation::SubscribeUserToProject => &SUBSCRIBE_USER_TO_PROJECT,
            SubscribeOperation::UnsubscribeUserFromProject => &UNSUBSCRIBE_USER_FROM_PROJECT,
            SubscribeOperation::CheckIfSubscribed => &CHECK_IF_SUBSCRIBED,
            SubscribeOperation::UpdateSubscriptionToProject => &UPDATE_SUBSCRIPTION_TO_PROJECT,
        }
    }

    // The subscriptions API has no operation-specific query parameters.
    fn apply_params(&self, _params: &mut RequestParameters, _query: &()) {}
}

impl fmt::Display for SubscribeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubscribeOperation {
    type Err = LibrariesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SubscribeOperation::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| LibrariesError::UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbs_match_api() {
        assert_eq!(SubscribeOperation::UserSubscriptions.verb(), HttpVerb::Get);
        assert_eq!(SubscribeOperation::SubscribeUserToProject.verb(), HttpVerb::Post);
        assert_eq!(SubscribeOperation::UnsubscribeUserFromProject.verb(), HttpVerb::Delete);
        assert_eq!(SubscribeOperation::CheckIfSubscribed.verb(), HttpVerb::Get);
        assert_eq!(SubscribeOperation::UpdateSubscriptionToProject.verb(), HttpVerb::Put);
    }

    #[test]
    fn test_only_listing_is_a_collection() {
        for op in SubscribeOperation::ALL {
            assert_eq!(
                op.info().is_collection(),
                op == SubscribeOperation::UserSubscriptions
            );
        }
    }

    #[test]
    fn test_params_pass_through() {
        let mut params = RequestParameters::new();
        params.set("page", 2i64);
        SubscribeOperation::UserSubscriptions.apply_params(&mut params, &());
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_parse_from_name() {
        assert_eq!(
            "check-if-subscribed".parse::<SubscribeOperation>().unwrap(),
            SubscribeOperation::CheckIfSubscribed
        );
        assert!("follow".parse::<SubscribeOperation>().is_err());
    }
}
