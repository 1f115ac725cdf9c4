use crate::domain::entities::{ApiResponse, PurchasePayload};
use crate::domain::errors::FlowError;
use crate::domain::ports::{BingoApi, Clock};
use crate::domain::state::HarnessState;
use crate::domain::timestamp::iso_timestamp;
use crate::use_cases::reply::Reply;

// Card purchase use case with injected dependencies.
// Only checks the form; the connected gate belongs to the console.
pub struct PurchaseCardUseCase<A, C> {
    pub api: A,
    pub clock: C,
}

impl<A, C> PurchaseCardUseCase<A, C>
where
    A: BingoApi,
    C: Clock,
{
    #[tracing::instrument(
        name = "purchase_card",
        skip_all,
        fields(
            username = %state.purchase.username,
            card = state.purchase.numero_carton,
            draw = state.purchase.sorteo
        )
    )]
    pub async fn execute(&self, state: &mut HarnessState) -> Result<ApiResponse, FlowError> {
        if !state.purchase.is_complete() {
            state.record(self.clock.now_epoch_millis(), "missing purchase data");
            return Err(FlowError::MissingPurchaseData);
        }

        state.loading = true;
        let card = state.purchase.numero_carton;
        let now = self.clock.now_epoch_millis();
        state.record(
            now,
            format!("buying card {card} for {}", state.purchase.username),
        );

        let payload = PurchasePayload::new(&state.purchase, iso_timestamp(now));
        let reply = Reply::from(self.api.purchase_cardboard(&payload).await);
        let now = self.clock.now_epoch_millis();
        let response = reply.to_response(iso_timestamp(now));

        match reply {
            Reply::Accepted(_) => {
                state.record(now, format!("card purchased: #{card}"));
            }
            Reply::Rejected { error, .. } => {
                tracing::warn!(%error, "card purchase rejected.");
                state.record(now, format!("card purchase failed: {error}"));
            }
            Reply::Unreachable(error) => {
                tracing::error!(%error, "bingo service unreachable.");
                state.record(now, format!("network error: {error}"));
            }
        }

        state.purchase_result = Some(response.clone());
        state.loading = false;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CardPurchase;
    use crate::domain::errors::BingoApiError;
    use crate::use_cases::test_support::{FixedClock, RecordedCall, RecordingApi, TEST_NOW_MILLIS};
    use serde_json::json;

    fn ready_state() -> HarnessState {
        let mut state = HarnessState::new();
        state.connected = true;
        state.purchase = CardPurchase {
            user_id: "u1".to_string(),
            username: "ana".to_string(),
            numero_carton: 1234,
            sorteo: 5,
            fecha_sorteo: "2025-06-01".to_string(),
            monto: 15000,
            referencia_venta: "REF1".to_string(),
            nombre_archivo_pdf: "carton_1234.pdf".to_string(),
        };
        state
    }

    #[tokio::test]
    async fn when_purchase_is_sent_then_draw_date_is_compact_and_timestamp_is_attached() {
        let api = RecordingApi::new();
        let use_case = PurchaseCardUseCase {
            api: api.clone(),
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut state = ready_state();

        let response = use_case
            .execute(&mut state)
            .await
            .expect("expected purchase call to be made");

        assert!(response.success);
        let calls = api.calls();
        let [RecordedCall::Purchase(payload)] = calls.as_slice() else {
            panic!("expected exactly one purchase call, got {calls:?}");
        };
        assert_eq!(payload.purchase.fecha_sorteo, "20250601");
        assert_eq!(payload.purchase.user_id, "u1");
        assert_eq!(payload.timestamp, "2025-06-01T12:30:05.120Z");
        // The form keeps what the user typed.
        assert_eq!(state.purchase.fecha_sorteo, "2025-06-01");
        assert!(state.log.contains("card purchased: #1234"));
        assert_eq!(state.purchase_result, Some(response));
    }

    #[tokio::test]
    async fn when_draw_date_is_empty_then_it_is_sent_empty() {
        let api = RecordingApi::new();
        let use_case = PurchaseCardUseCase {
            api: api.clone(),
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut state = ready_state();
        state.purchase.fecha_sorteo.clear();

        use_case
            .execute(&mut state)
            .await
            .expect("expected purchase call to be made");

        let calls = api.calls();
        let [RecordedCall::Purchase(payload)] = calls.as_slice() else {
            panic!("expected exactly one purchase call, got {calls:?}");
        };
        assert_eq!(payload.purchase.fecha_sorteo, "");
    }

    #[tokio::test]
    async fn when_card_number_is_missing_then_no_call_is_made() {
        let api = RecordingApi::new();
        let use_case = PurchaseCardUseCase {
            api: api.clone(),
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut state = ready_state();
        state.purchase.numero_carton = 0;

        let result = use_case.execute(&mut state).await;

        assert_eq!(result, Err(FlowError::MissingPurchaseData));
        assert!(api.calls().is_empty());
        assert!(state.log.contains("missing purchase data"));
    }

    #[tokio::test]
    async fn when_session_is_not_connected_then_flow_still_only_checks_fields() {
        let api = RecordingApi::new();
        let use_case = PurchaseCardUseCase {
            api: api.clone(),
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut state = ready_state();
        state.connected = false;

        let result = use_case.execute(&mut state).await;

        assert!(result.is_ok());
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn when_service_rejects_purchase_then_error_is_recorded() {
        let api = RecordingApi::new().with_purchase_reply(Err(BingoApiError::Upstream {
            status: 409,
            message: Some("card already sold".to_string()),
            body: json!({ "error": "card already sold" }),
        }));
        let use_case = PurchaseCardUseCase {
            api,
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut state = ready_state();

        let response = use_case
            .execute(&mut state)
            .await
            .expect("expected purchase call to be made");

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("card already sold"));
        assert!(state.log.contains("card purchase failed: card already sold"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn when_response_is_not_json_then_it_is_reported_as_network_error() {
        let api = RecordingApi::new().with_purchase_reply(Err(BingoApiError::Decode(
            "expected value at line 1 column 1".to_string(),
        )));
        let use_case = PurchaseCardUseCase {
            api,
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut state = ready_state();

        let response = use_case
            .execute(&mut state)
            .await
            .expect("expected purchase call to be made");

        assert!(!response.success);
        assert!(state.log.contains("network error: invalid response body"));
    }
}
