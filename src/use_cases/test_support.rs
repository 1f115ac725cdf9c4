use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::entities::{EligibilityRequest, PurchasePayload};
use crate::domain::errors::BingoApiError;
use crate::domain::ports::{BingoApi, Clock};

// 2025-06-01T12:30:05.120Z
pub(crate) const TEST_NOW_MILLIS: u64 = 1_748_781_005_120;

// Shared fixed time source for deterministic use-case tests.
#[derive(Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordedCall {
    Validate(EligibilityRequest),
    Purchase(PurchasePayload),
}

// Scripted bingo service that remembers every request it was given.
#[derive(Clone)]
pub(crate) struct RecordingApi {
    validate_reply: Result<Value, BingoApiError>,
    purchase_reply: Result<Value, BingoApiError>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingApi {
    pub(crate) fn new() -> Self {
        Self {
            validate_reply: Ok(json!({ "valid": true })),
            purchase_reply: Ok(json!({ "purchased": true })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn with_validate_reply(mut self, reply: Result<Value, BingoApiError>) -> Self {
        self.validate_reply = reply;
        self
    }

    pub(crate) fn with_purchase_reply(mut self, reply: Result<Value, BingoApiError>) -> Self {
        self.purchase_reply = reply;
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl BingoApi for RecordingApi {
    async fn validate_user(&self, req: &EligibilityRequest) -> Result<Value, BingoApiError> {
        let mut guard = self.calls.lock().expect("calls mutex poisoned");
        guard.push(RecordedCall::Validate(req.clone()));
        self.validate_reply.clone()
    }

    async fn purchase_cardboard(&self, req: &PurchasePayload) -> Result<Value, BingoApiError> {
        let mut guard = self.calls.lock().expect("calls mutex poisoned");
        guard.push(RecordedCall::Purchase(req.clone()));
        self.purchase_reply.clone()
    }
}
