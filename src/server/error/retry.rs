use super::{proxy::ProxyError, Error};

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient backend or network errors)
    Retry,
    /// Failed permanently (bad request, missing record)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // Network errors - connection refused, reset or timed out
            Self::ReqwestError(err) => {
                if err.is_timeout() || err.is_connect() || err.is_request() {
                    ErrorRetryStrategy::Retry
                } else {
                    // Body decoding or builder errors won't resolve with retry
                    ErrorRetryStrategy::Fail
                }
            }

            Self::ProxyError(proxy_error) => match proxy_error {
                // Backend temporarily unavailable
                ProxyError::RemoteStatus { status, .. } if *status >= 500 => {
                    ErrorRetryStrategy::Retry
                }

                // 4xx responses, missing records and invalid input are permanent
                _ => ErrorRetryStrategy::Fail,
            },

            // Session errors - transient, could be Redis connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            // Configuration errors - permanent failures, won't resolve with retry
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,

            // Auth errors - the token won't become valid by retrying
            Self::AuthError(_) => ErrorRetryStrategy::Fail,

            // Records failing their schema - permanent failures
            Self::ValidationError(_) => ErrorRetryStrategy::Fail,
            Self::ReconcileError(_) => ErrorRetryStrategy::Fail,

            // Malformed backend bodies - permanent failures
            Self::SerdeJsonError(_) => ErrorRetryStrategy::Fail,

            // InternalError - permanent failures (internal error within Lotus's code)
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
