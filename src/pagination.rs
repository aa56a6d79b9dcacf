//! Pagination normalization for libraries.io list endpoints.

use serde::{Deserialize, Serialize};

use crate::params::{RequestParameters, PAGE, PER_PAGE};

/// First page; pages are 1-indexed.
pub const DEFAULT_PAGE: u32 = 1;
/// Items per page when the caller does not ask for a size.
pub const DEFAULT_PER_PAGE: u32 = 30;
/// Largest page size the API honours.
pub const MAX_PER_PAGE: u32 = 100;

/// A normalized `page` / `per_page` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Write the pair into request parameters.
    pub fn apply(&self, params: &mut RequestParameters) {
        params.set(PAGE, self.page).set(PER_PAGE, self.per_page);
    }
}

/// Clamp a requested page and page size into the range the API accepts.
///
/// Unset values take the defaults (page 1, 30 per page). The boolean is
/// `true` when the normalized values equal the requested ones; it is a
/// diagnostic only.
#[must_use]
pub fn fix_pages(page: Option<i64>, per_page: Option<i64>) -> (Pagination, bool) {
    let requested_page = page.unwrap_or(i64::from(DEFAULT_PAGE));
    let requested_per_page = per_page.unwrap_or(i64::from(DEFAULT_PER_PAGE));

    let page = requested_page.clamp(1, i64::from(u32::MAX));
    let per_page = requested_per_page.clamp(1, i64::from(MAX_PER_PAGE));

    let fixed = Pagination {
        page: page as u32,
        per_page: per_page as u32,
    };
    let in_range = page == requested_page && per_page == requested_per_page;
    (fixed, in_range)
}

/// Normalize pagination into `params`.
///
/// A `None` candidate keeps whatever the parameters already hold, falling
/// back to the defaults.
pub fn fix_pages_in(
    params: &mut RequestParameters,
    page: Option<i64>,
    per_page: Option<i64>,
) -> bool {
    let (fixed, in_range) = fix_pages(
        page.or_else(|| params.page()),
        per_page.or_else(|| params.per_page()),
    );
    fixed.apply(params);
    in_range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let (fixed, in_range) = fix_pages(None, None);
        assert_eq!(fixed, Pagination::default());
        assert_eq!(fixed.page, 1);
        assert_eq!(fixed.per_page, 30);
        assert!(in_range);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let (fixed, in_range) = fix_pages(Some(0), Some(500));
        assert_eq!(fixed, Pagination { page: 1, per_page: 100 });
        assert!(!in_range);

        let (fixed, in_range) = fix_pages(Some(-7), Some(0));
        assert_eq!(fixed, Pagination { page: 1, per_page: 1 });
        assert!(!in_range);
    }

    #[test]
    fn test_bounds_hold_and_fixing_is_idempotent() {
        for page in -3..=5 {
            for per_page in [-1, 0, 1, 2, 30, 99, 100, 101, 1000] {
                let (fixed, _) = fix_pages(Some(page), Some(per_page));
                assert!(fixed.page >= 1);
                assert!((1..=100).contains(&fixed.per_page));

                let (again, in_range) =
                    fix_pages(Some(i64::from(fixed.page)), Some(i64::from(fixed.per_page)));
                assert_eq!(again, fixed);
                assert!(in_range);
            }
        }
    }

    #[test]
    fn test_fix_in_params_keeps_prior_values() {
        let mut params = RequestParameters::new();
        params.set(PER_PAGE, 50i64);
        assert!(fix_pages_in(&mut params, Some(3), None));
        assert_eq!(params.page(), Some(3));
        assert_eq!(params.per_page(), Some(50));
    }
}
