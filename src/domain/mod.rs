pub mod activity_log;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod state;
pub mod timestamp;

// Re-export the domain boundary types and ports.
pub use activity_log::{ACTIVITY_LOG_CAPACITY, ActivityLog, LogEntry};
pub use entities::{
    ApiResponse, CardPurchase, Claims, EligibilityRequest, PurchasePayload, normalize_draw_date,
};
pub use errors::{BingoApiError, FlowError, TokenError};
pub use ports::{BingoApi, Clock, TokenVerifier};
pub use state::HarnessState;
