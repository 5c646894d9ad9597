//! # FlowMart Core
//!
//! Core domain logic for the FlowMart inventory client.
//!
//! This crate contains pure logic with no I/O dependencies:
//! - Domain models (categories, products, user accounts)
//! - The `Outcome` result type and its combinators
//! - The three-kind error taxonomy
//! - Input validators
//!
//! ## Design Principles
//!
//! - **Pure Functions**: validators and combinators have no side effects
//! - **Values, not panics**: every failure is representable as an error value
//! - **Dependency-Free**: no networking or persistence

pub mod errors;
pub mod models;
pub mod outcome;
pub mod validators;

// Re-export commonly used types
pub use errors::{ApiError, ErrorKind, FlowMartError, NetworkError, ValidationError};
pub use models::{Acknowledgement, Category, Product, Session, UserAccount};
pub use outcome::{failure, success, Outcome, OutcomeExt};
pub use validators::{is_email_valid, is_non_blank, is_password_strong, is_phone_valid};
