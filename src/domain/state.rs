use crate::domain::activity_log::ActivityLog;
use crate::domain::entities::{ApiResponse, CardPurchase, EligibilityRequest};
use crate::domain::timestamp::clock_label;

// Everything the console shows. Owned by the console and handed to flows by `&mut`.
#[derive(Debug, Clone, Default)]
pub struct HarnessState {
    pub user: EligibilityRequest,
    pub purchase: CardPurchase,
    // Set once the bingo service accepted the user.
    pub connected: bool,
    // True while a request is outstanding.
    pub loading: bool,
    pub validation_result: Option<ApiResponse>,
    pub purchase_result: Option<ApiResponse>,
    pub log: ActivityLog,
}

impl HarnessState {
    pub fn new() -> Self {
        Self::default()
    }

    // Append to the activity log and mirror the event to tracing.
    pub fn record(&mut self, epoch_millis: u64, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(event = %message, "activity");
        self.log.push(clock_label(epoch_millis), message);
    }
}
