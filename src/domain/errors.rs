use serde_json::Value;
use thiserror::Error;

// Reasons a token was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token algorithm is not allowed")]
    DisallowedAlgorithm,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

// Failures of a call to the bingo service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BingoApiError {
    // DNS, connect, timeout. Carries the raw transport message.
    #[error("{0}")]
    Transport(String),
    // Non-2xx answer with a JSON body.
    #[error("bingo service returned {status}")]
    Upstream {
        status: u16,
        message: Option<String>,
        body: Value,
    },
    // Response body was not JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
}

// Local precondition failures. No network call is made when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("missing user data")]
    MissingUserData,
    #[error("missing purchase data")]
    MissingPurchaseData,
    #[error("purchase is disabled until a user is validated")]
    NotConnected,
    #[error("a request is already in flight")]
    Busy,
}
