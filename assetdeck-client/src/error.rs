/// Structured errors for backend requests.
///
/// The taxonomy the views care about: transport failure, non-2xx status,
/// malformed or missing JSON payload. Callers decide whether to surface
/// the error (dashboard) or log it and fall back to an empty set (every
/// other view).
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("request failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape the endpoint promises.
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The response decoded but the required `data` field was absent.
    #[error("no data in response from {endpoint}")]
    MissingData { endpoint: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        // Keep status bodies short enough to log.
        let body = if body.len() > 500 {
            format!("{}...", &body[..500])
        } else {
            body
        };
        Self::Status {
            endpoint: endpoint.into(),
            status,
            body,
        }
    }

    pub fn decode(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn missing_data(endpoint: impl Into<String>) -> Self {
        Self::MissingData {
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_endpoint_and_code() {
        let err = ApiError::status("/equipment", 500, "boom");
        let text = err.to_string();
        assert!(text.contains("/equipment"));
        assert!(text.contains("500"));
    }

    #[test]
    fn long_status_bodies_are_truncated() {
        let err = ApiError::status("/equipment", 500, "x".repeat(2000));
        match err {
            ApiError::Status { body, .. } => assert!(body.len() <= 503),
            _ => unreachable!(),
        }
    }
}
