use serde::Deserialize;

// Shared-secret header expected by the bingo-integration service.
pub const SSO_SECRET_HEADER: &str = "X-SSO-Secret";

pub const VALIDATE_USER_PATH: &str = "/validate-user";
pub const PURCHASE_CARDBOARD_PATH: &str = "/purchase-cardboard";

// Query parameter carrying the session token on the launch URL.
pub const TOKEN_QUERY_PARAM: &str = "token";

// Error envelope returned by the bingo service on non-2xx answers.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}
