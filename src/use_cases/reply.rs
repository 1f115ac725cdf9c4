use serde_json::Value;

use crate::domain::entities::ApiResponse;
use crate::domain::errors::BingoApiError;

// Shown when the service rejected a call without an `error` field.
pub const UNKNOWN_ERROR: &str = "unknown error";

// A bingo service reply sorted into the three ways a flow reacts to it.
pub(crate) enum Reply {
    Accepted(Value),
    Rejected { body: Value, error: String },
    Unreachable(String),
}

impl From<Result<Value, BingoApiError>> for Reply {
    fn from(result: Result<Value, BingoApiError>) -> Self {
        match result {
            Ok(body) => Reply::Accepted(body),
            Err(BingoApiError::Upstream { message, body, .. }) => Reply::Rejected {
                body,
                error: message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            },
            Err(err) => Reply::Unreachable(err.to_string()),
        }
    }
}

impl Reply {
    pub(crate) fn to_response(&self, timestamp: String) -> ApiResponse {
        match self {
            Reply::Accepted(body) => ApiResponse::ok(body.clone(), timestamp),
            Reply::Rejected { body, error } => {
                ApiResponse::rejected(body.clone(), error.clone(), timestamp)
            }
            Reply::Unreachable(error) => ApiResponse::failed(error.clone(), timestamp),
        }
    }
}
