use thiserror::Error;

/// Everything the remote quote APIs can throw at us
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure, including the request timing out
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The API answered with a well-formed but empty list
    #[error("No quotes returned from API")]
    EmptyResult,

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_http(&self) -> bool {
        matches!(self, ApiError::Http { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Parse(err.to_string());
        }

        if let Some(status) = err.status() {
            return ApiError::Http {
                status: status.as_u16(),
            };
        }

        // Timeouts, DNS, refused connections - all of it is "network" to the caller
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ApiError::Http { status: 503 }.to_string(),
            "HTTP error! status: 503"
        );
        assert_eq!(ApiError::EmptyResult.to_string(), "No quotes returned from API");
        assert!(ApiError::Network("timed out".into()).is_network());
        assert!(ApiError::Http { status: 404 }.is_http());
        assert!(!ApiError::EmptyResult.is_network());
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Parse(_)));
    }
}
