use serde_json::Value;

use crate::domain::entities::ApiResponse;
use crate::domain::errors::FlowError;
use crate::domain::ports::{BingoApi, Clock};
use crate::domain::state::HarnessState;
use crate::domain::timestamp::iso_timestamp;
use crate::use_cases::reply::Reply;

// Eligibility check use case with injected dependencies.
pub struct ValidateUserUseCase<A, C> {
    pub api: A,
    pub clock: C,
}

impl<A, C> ValidateUserUseCase<A, C>
where
    A: BingoApi,
    C: Clock,
{
    #[tracing::instrument(
        name = "validate_user",
        skip_all,
        fields(username = %state.user.username, required_amount = state.user.required_amount)
    )]
    pub async fn execute(&self, state: &mut HarnessState) -> Result<ApiResponse, FlowError> {
        if !state.user.is_complete() {
            state.record(self.clock.now_epoch_millis(), "missing user data");
            return Err(FlowError::MissingUserData);
        }

        state.loading = true;
        let username = state.user.username.clone();
        state.record(
            self.clock.now_epoch_millis(),
            format!("validating user: {username}"),
        );

        let reply = Reply::from(self.api.validate_user(&state.user).await);
        let now = self.clock.now_epoch_millis();
        let response = reply.to_response(iso_timestamp(now));

        match reply {
            Reply::Accepted(body) => {
                // Seed the purchase form with the identity the service knows about.
                state.purchase.username = username.clone();
                state.purchase.user_id =
                    user_id_from(&body).unwrap_or_else(|| format!("user_{now}"));
                state.connected = true;
                state.record(now, format!("user validated: {username}"));
            }
            Reply::Rejected { error, .. } => {
                tracing::warn!(%error, "user validation rejected.");
                state.record(now, format!("user validation failed: {error}"));
            }
            Reply::Unreachable(error) => {
                tracing::error!(%error, "bingo service unreachable.");
                state.record(now, format!("network error: {error}"));
            }
        }

        state.validation_result = Some(response.clone());
        state.loading = false;
        Ok(response)
    }
}

// Empty strings and zero count as absent.
fn user_id_from(body: &Value) -> Option<String> {
    match body.get("userId")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) if id.as_f64().is_some_and(|n| n != 0.0) => Some(id.to_string()),
        _ => None,
    }
}
