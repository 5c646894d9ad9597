//! One operation per API action.
//!
//! Each operation validates its input, sends a single request through
//! [`crate::ApiClient`] and maps the response into an [`flowmart_core::Outcome`].
//! A validation failure returns before the transport is touched.

pub mod category;
pub mod product;
pub mod user;

pub use category::CategoryUseCases;
pub use product::ProductUseCases;
pub use user::{ProfileUpdate, UserUseCases};

use flowmart_core::{Outcome, ValidationError};
use log::debug;

/// Run a validator, logging the short-circuit when it fails.
pub(crate) fn guard(
    operation: &str,
    check: Result<(), ValidationError>,
) -> Outcome<()> {
    check.map_err(|e| {
        debug!("{} rejected before sending: {}", operation, e);
        e.into()
    })
}
