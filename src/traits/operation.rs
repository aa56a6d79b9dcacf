//! Operation trait shared by the search and subscribe catalogs.

use std::fmt;

use crate::catalog::{ArgKey, OperationInfo};
use crate::params::RequestParameters;

/// A catalog operation that the session knows how to dispatch.
///
/// Implemented by [`SearchOperation`](crate::SearchOperation) and
/// [`SubscribeOperation`](crate::SubscribeOperation). The session and
/// builder are generic over this trait, so both families share one request
/// path.
pub trait Operation: Copy + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Family-specific query options (search text, sort, filters).
    type Query: Default + Clone + fmt::Debug + Send + Sync;

    /// Static catalog entry for this operation.
    fn info(&self) -> &'static OperationInfo;

    /// Value substituted when an argument is absent or empty.
    ///
    /// Returning `None` makes the argument mandatory.
    fn default_argument(&self, _key: ArgKey) -> Option<&'static str> {
        None
    }

    /// Merge family-specific parameters into the request.
    ///
    /// Implementations only add the keys the caller supplied and never
    /// remove existing ones.
    fn apply_params(&self, params: &mut RequestParameters, query: &Self::Query);

    /// Catalog name of the operation.
    fn name(&self) -> &'static str {
        self.info().name
    }
}
