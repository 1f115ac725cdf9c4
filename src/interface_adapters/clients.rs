use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::domain::entities::{EligibilityRequest, PurchasePayload};
use crate::domain::errors::BingoApiError;
use crate::domain::ports::BingoApi;
use crate::interface_adapters::protocol::{
    ErrorResponse, PURCHASE_CARDBOARD_PATH, SSO_SECRET_HEADER, VALIDATE_USER_PATH,
};

// Thin wrapper around reqwest for bingo-integration calls.
#[derive(Clone)]
pub struct BingoClient {
    http: Client,
    pub base_url: String,
    sso_secret: String,
}

impl BingoClient {
    pub fn new(
        base_url: impl Into<String>,
        sso_secret: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            sso_secret: sso_secret.into(),
        })
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<Value, BingoApiError> {
        // Compose the endpoint URL and POST the JSON payload with the shared secret.
        let url = format!("{}{path}", self.base_url);
        let res = self
            .http
            .post(url)
            .header(SSO_SECRET_HEADER, &self.sso_secret)
            .json(body)
            .send()
            .await
            .map_err(|err| BingoApiError::Transport(err.to_string()))?;
        let status = res.status();

        // Every answer is expected to carry JSON, success or not.
        let body = res
            .json::<Value>()
            .await
            .map_err(|err| BingoApiError::Decode(err.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_value::<ErrorResponse>(body.clone())
                .ok()
                .and_then(|payload| payload.error);
            tracing::debug!(%status, ?message, "bingo service returned an error.");
            return Err(BingoApiError::Upstream {
                status: status.as_u16(),
                message,
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl BingoApi for BingoClient {
    async fn validate_user(&self, req: &EligibilityRequest) -> Result<Value, BingoApiError> {
        self.post(VALIDATE_USER_PATH, req).await
    }

    async fn purchase_cardboard(&self, req: &PurchasePayload) -> Result<Value, BingoApiError> {
        self.post(PURCHASE_CARDBOARD_PATH, req).await
    }
}
