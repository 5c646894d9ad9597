//! # FlowMart API
//!
//! Async client for the FlowMart inventory service.
//!
//! Every operation runs the same pipeline: validate input locally, send one
//! authenticated request, decode the response envelope, and hand back an
//! [`Outcome`]. Start from [`FlowMart`]:
//!
//! ```no_run
//! use flowmart_api::{ClientConfig, FlowMart};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let flowmart = FlowMart::new(ClientConfig::default())?;
//! let session = flowmart.login("jane@flowmart.co.ke", "Passw0rd@").await?;
//! let categories = flowmart.list_categories().await?;
//! println!("{} has {} categories", session.user.name, categories.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
mod envelope;
pub mod errors;
pub mod sdk;
pub mod transport;
pub mod use_cases;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use config::{ClientConfig, Environment, Timeouts, DEFAULT_BASE_URL};
pub use credentials::{CredentialStore, InMemoryCredentialStore};
pub use errors::SdkError;
pub use sdk::FlowMart;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use use_cases::ProfileUpdate;

pub use flowmart_core::{
    Acknowledgement, ApiError, Category, ErrorKind, FlowMartError, NetworkError, Outcome,
    OutcomeExt, Product, Session, UserAccount, ValidationError,
};
