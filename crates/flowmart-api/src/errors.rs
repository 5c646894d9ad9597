use thiserror::Error;

/// Errors raised while assembling a [`crate::FlowMart`] instance.
///
/// Operation failures are never reported here; they travel inside
/// [`flowmart_core::Outcome`].
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Base URL '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SdkError>;
