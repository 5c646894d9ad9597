//! The success/failure container returned by every operation.
//!
//! `Outcome` is an alias of [`std::result::Result`], so `?`, `match` and the
//! standard combinators all apply. [`OutcomeExt`] adds the chaining helpers
//! callers use to react to one branch without consuming the value.

use crate::errors::FlowMartError;

/// Result of a FlowMart operation. `Ok` is the success branch, `Err` the failure.
pub type Outcome<T, E = FlowMartError> = std::result::Result<T, E>;

/// Wrap `data` as a successful outcome.
pub fn success<T, E>(data: T) -> Outcome<T, E> {
    Ok(data)
}

/// Wrap `error` as a failed outcome.
pub fn failure<T, E>(error: impl Into<E>) -> Outcome<T, E> {
    Err(error.into())
}

pub trait OutcomeExt<T, E>: Sized {
    fn is_success(&self) -> bool;

    fn is_failure(&self) -> bool;

    /// Transform the success value; a failure passes through untouched.
    fn map_success<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U;

    /// Run `f` on the success value and hand back the same outcome.
    fn on_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&T);

    /// Run `f` on the error and hand back the same outcome.
    fn on_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&E);

    /// Drop the success payload, keeping only whether the call succeeded.
    fn into_empty(self) -> Outcome<(), E>;
}

impl<T, E> OutcomeExt<T, E> for Outcome<T, E> {
    fn is_success(&self) -> bool {
        self.is_ok()
    }

    fn is_failure(&self) -> bool {
        self.is_err()
    }

    fn map_success<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        self.map(f)
    }

    fn on_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Ok(data) = &self {
            f(data);
        }
        self
    }

    fn on_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Err(error) = &self {
            f(error);
        }
        self
    }

    fn into_empty(self) -> Outcome<(), E> {
        self.map(|_| ())
    }
}
