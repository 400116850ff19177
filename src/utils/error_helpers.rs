use crate::error::ApiError;

/// Map a transport-level reqwest error onto ApiError with endpoint context.
///
/// Timeouts and connection failures get their own variants so callers can
/// report "server unreachable" separately from HTTP failures.
pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: u64) -> ApiError {
    if error.is_timeout() {
        return ApiError::Timeout {
            timeout_secs,
            endpoint: endpoint.to_string(),
        };
    }

    if error.is_connect() || error.is_request() {
        return ApiError::Network {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        };
    }

    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Helper macro for standardizing map_err patterns
#[macro_export]
macro_rules! map_api_error {
    ($result:expr, $endpoint:expr, $timeout_secs:expr) => {
        $result.map_err(|e| {
            $crate::utils::error_helpers::convert_request_error(e, $endpoint, $timeout_secs)
        })
    };
}
