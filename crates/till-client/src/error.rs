use serde::Deserialize;
use thiserror::Error;

/// Error taxonomy at the transport seam.
///
/// `ServerRejected` is a business refusal (insufficient stock and the like):
/// the server answered, with an `error` field explaining why. Everything
/// else that goes wrong on the wire is `RequestFailed`. Nothing here is
/// retried automatically; the user re-triggers manually.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server did not accept our credentials (HTTP 401).
    #[error("not authenticated")]
    Unauthenticated,

    /// Network failure or a non-2xx response without a server error field.
    #[error("request failed{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// The server refused the operation and said why.
    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("failed to decode server response: {0}")]
    Decode(#[from] std::io::Error),
}

/// The server's error body shape: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Map a `ureq` failure into the taxonomy.
    pub(crate) fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(401, _) => Self::Unauthenticated,
            ureq::Error::Status(status, response) => {
                match response.into_json::<ErrorBody>() {
                    Ok(body) => Self::ServerRejected {
                        status,
                        message: body.error,
                    },
                    // No error field: surface a generic fallback message.
                    Err(_) => Self::RequestFailed {
                        status: Some(status),
                        message: "server returned an error".to_string(),
                    },
                }
            }
            transport @ ureq::Error::Transport(_) => Self::RequestFailed {
                status: None,
                message: transport.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn request_failed_display_includes_status() {
        let err = ApiError::RequestFailed {
            status: Some(503),
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "request failed (HTTP 503): unavailable");

        let err = ApiError::RequestFailed {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn server_rejected_display_is_the_server_message() {
        let err = ApiError::ServerRejected {
            status: 409,
            message: "insufficient stock".to_string(),
        };
        assert_eq!(err.to_string(), "insufficient stock");
    }
}
