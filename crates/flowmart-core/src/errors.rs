use thiserror::Error;

/// Message used when a failing response carries no readable error envelope.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred. Please try again later.";

/// Input rejected locally, before any request was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// No response was obtained (timeout, DNS failure, refused connection).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Network error: {message}")]
pub struct NetworkError {
    pub message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A response was received but its status or body signals failure.
///
/// `status_code` is the HTTP status, except for [`ApiError::CONTRACT_VIOLATION`]
/// which marks a successful response whose body did not carry the expected
/// payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("HTTP {status_code}: {message}")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    /// Sentinel status for 2xx responses with a missing or undecodable payload.
    pub const CONTRACT_VIOLATION: u16 = 0;

    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Error for a failing response whose body could not be understood.
    pub fn unknown(status_code: u16) -> Self {
        Self::new(status_code, UNKNOWN_ERROR_MESSAGE)
    }

    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::new(Self::CONTRACT_VIOLATION, message)
    }

    pub fn is_contract_violation(&self) -> bool {
        self.status_code == Self::CONTRACT_VIOLATION
    }

    /// 401 means the stored credential is missing, expired or revoked.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

/// Coarse classification of a [`FlowMartError`], in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Api,
}

/// Every failure an operation can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowMartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FlowMartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlowMartError::Validation(_) => ErrorKind::Validation,
            FlowMartError::Network(_) => ErrorKind::Network,
            FlowMartError::Api(_) => ErrorKind::Api,
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            FlowMartError::Validation(e) => &e.message,
            FlowMartError::Network(e) => &e.message,
            FlowMartError::Api(e) => &e.message,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            FlowMartError::Api(e) => Some(e.status_code),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FlowMartError::Api(e) if e.is_unauthorized())
    }

    /// Network failures may succeed on a later attempt; nothing else will
    /// without the caller changing something.
    pub fn is_retryable(&self) -> bool {
        match self {
            FlowMartError::Network(_) => true,
            FlowMartError::Api(e) => e.is_server_error(),
            FlowMartError::Validation(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("email", "Invalid email format");
        assert_eq!(err.to_string(), "Invalid email: Invalid email format");

        let err: FlowMartError = ApiError::new(404, "Category not found").into();
        assert_eq!(err.to_string(), "HTTP 404: Category not found");

        let err: FlowMartError = NetworkError::new("connection refused").into();
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_kind_and_accessors() {
        let err: FlowMartError = ApiError::unknown(401).into();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.message(), UNKNOWN_ERROR_MESSAGE);
        assert!(err.is_unauthorized());

        let err: FlowMartError = ValidationError::new("name", "Name cannot be blank").into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status_code(), None);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(FlowMartError::from(NetworkError::new("timeout")).is_retryable());
        assert!(FlowMartError::from(ApiError::unknown(503)).is_retryable());
        assert!(!FlowMartError::from(ApiError::unknown(422)).is_retryable());
    }

    #[test]
    fn test_contract_violation_sentinel() {
        let err = ApiError::contract_violation("missing data");
        assert!(err.is_contract_violation());
        assert!(!ApiError::unknown(500).is_contract_violation());
    }
}
