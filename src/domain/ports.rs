use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::entities::{Claims, EligibilityRequest, PurchasePayload};
use crate::domain::errors::{BingoApiError, TokenError};

// Port for the external bingo-integration service.
// Use cases depend on this trait, not on the reqwest client.
#[async_trait]
pub trait BingoApi: Send + Sync {
    async fn validate_user(&self, req: &EligibilityRequest) -> Result<Value, BingoApiError>;
    async fn purchase_cardboard(&self, req: &PurchasePayload) -> Result<Value, BingoApiError>;
}

#[async_trait]
impl<T: BingoApi + ?Sized> BingoApi for Arc<T> {
    async fn validate_user(&self, req: &EligibilityRequest) -> Result<Value, BingoApiError> {
        (**self).validate_user(req).await
    }

    async fn purchase_cardboard(&self, req: &PurchasePayload) -> Result<Value, BingoApiError> {
        (**self).purchase_cardboard(req).await
    }
}

// Port for checking signed session tokens.
pub trait TokenVerifier: Send + Sync {
    // Signature, algorithm and expiry checked. The only way to trusted claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
    // Payload only, nothing checked. For inspection.
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;
}

impl<T: TokenVerifier + ?Sized> TokenVerifier for Arc<T> {
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        (**self).verify(token)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        (**self).decode(token)
    }
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now_epoch_millis(&self) -> u64 {
        (**self).now_epoch_millis()
    }
}
