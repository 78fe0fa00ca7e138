//! Helper functions for creating specific error types

use super::types::GatewayError;

/// Helper functions for creating specific errors
#[allow(dead_code)]
impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn external<S: Into<String>>(message: S) -> Self {
        Self::External(message.into())
    }

    pub fn channel<S: Into<String>>(message: S) -> Self {
        Self::Channel(message.into())
    }

    pub fn scheduler<S: Into<String>>(message: S) -> Self {
        Self::Scheduler(message.into())
    }

    /// Whether retrying the same operation later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::Database(_)
                | GatewayError::HttpClient(_)
                | GatewayError::Io(_)
                | GatewayError::ServiceUnavailable(_)
        )
    }
}
