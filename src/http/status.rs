//! Classification of unsuccessful HTTP responses into user-facing errors.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Header GitHub uses to report the remaining request budget.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// An API request that came back with a non-success status.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 429, or HTTP 403 with an exhausted rate limit budget
    RateLimitExceeded(String),
    /// HTTP 401
    AuthenticationFailed(String),
    /// HTTP 404
    NotFound(String),
    /// HTTP 403 that is not a rate limit
    Forbidden(String),
    /// Any other 4xx
    ClientError(String),
    /// 5xx
    ServerError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::RateLimitExceeded(msg) => {
                write!(
                    f,
                    "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN environment variable.",
                    msg
                )
            }
            ApiError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}. Check your GITHUB_TOKEN.", msg)
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}. You may need authentication.", msg)
            }
            ApiError::ClientError(msg) => write!(f, "Request error: {}", msg),
            ApiError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Builds the error for a non-success `status`, or `None` when the status is a success.
    pub fn from_status(status: StatusCode, headers: &HeaderMap, url: &str) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        let error = match status {
            StatusCode::UNAUTHORIZED => {
                ApiError::AuthenticationFailed("Invalid or missing authentication token".to_string())
            }
            StatusCode::FORBIDDEN if rate_limit_exhausted(headers) => {
                ApiError::RateLimitExceeded("GitHub API rate limit exceeded".to_string())
            }
            StatusCode::FORBIDDEN => {
                ApiError::Forbidden("Access to this resource is forbidden".to_string())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                ApiError::RateLimitExceeded("Too many requests".to_string())
            }
            StatusCode::NOT_FOUND => ApiError::NotFound(url.to_string()),
            s if s.is_client_error() => ApiError::ClientError(format!("HTTP {}", s.as_u16())),
            s => ApiError::ServerError(format!("HTTP {}", s.as_u16())),
        };

        Some(error)
    }
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}
