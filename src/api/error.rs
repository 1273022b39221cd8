use tracing::warn;

/// Error type shared by the HTTP collaborators (price data and messaging)
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited {
        retry_after: Option<u64>,
        message: String,
    },
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
    /// Body parsed but carried values that fail validation
    MalformedData(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited {
                retry_after: Some(secs),
                message,
            } => write!(f, "Rate Limited. Retry after {} s: {}", secs, message),
            ApiError::RateLimited {
                retry_after: None,
                message,
            } => write!(f, "Rate Limited: {}", message),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
            ApiError::MalformedData(msg) => write!(f, "Malformed Data: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Pull a human-readable message out of an error body.
///
/// Nasdaq nests it under `quandl_error`, Twilio puts it at the top level.
/// Falls back to the raw body.
pub(crate) fn error_message(body_text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body_text)
        .ok()
        .and_then(|json| {
            json.get("message")
                .or_else(|| json.pointer("/quandl_error/message"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body_text.to_string())
}

/// Map a non-success status and its body to an `ApiError`
pub(crate) fn classify_status(status: u16, retry_after: Option<u64>, body_text: &str) -> ApiError {
    let message = error_message(body_text);

    match status {
        400 => ApiError::BadRequest(message),
        401 => ApiError::Unauthorized(message),
        403 => ApiError::Forbidden(message),
        404 => ApiError::NotFound(message),
        429 => {
            warn!("Rate limited, retry after {:?} s", retry_after);
            ApiError::RateLimited {
                retry_after,
                message,
            }
        }
        500..=599 => {
            warn!("Server error {}: {}", status, message);
            ApiError::ServerError(status, message)
        }
        _ => ApiError::HttpError(status, message),
    }
}

/// Parse error response based on HTTP status code
pub(crate) async fn handle_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok());
    let body_text = response.text().await.unwrap_or_default();

    classify_status(status, retry_after, &body_text)
}
