use rand::Rng;

use crate::domain::ports::Clock;
use crate::domain::state::HarnessState;
use crate::domain::timestamp::calendar_date;

const MAX_CARD_NUMBER: u32 = 10_000;
const MAX_DRAW_NUMBER: u32 = 100;
const MIN_AMOUNT: u64 = 5_000;
const AMOUNT_SPREAD: u64 = 50_000;
// Draw dates land somewhere in the next 30 days.
const DRAW_WINDOW_MILLIS: u64 = 30 * 24 * 60 * 60 * 1000;

// Fills the purchase form with plausible data. Identity fields are left alone.
pub struct RandomPurchaseUseCase<C> {
    pub clock: C,
}

impl<C: Clock> RandomPurchaseUseCase<C> {
    pub fn execute<R: Rng>(&self, state: &mut HarnessState, rng: &mut R) {
        let now = self.clock.now_epoch_millis();
        let card = rng.gen_range(1..=MAX_CARD_NUMBER);
        let draw = rng.gen_range(1..=MAX_DRAW_NUMBER);
        let amount = MIN_AMOUNT + rng.gen_range(0..AMOUNT_SPREAD);
        let draw_at = now + rng.gen_range(0..DRAW_WINDOW_MILLIS);

        let purchase = &mut state.purchase;
        purchase.numero_carton = card;
        purchase.sorteo = draw;
        purchase.fecha_sorteo = calendar_date(draw_at);
        purchase.monto = amount;
        purchase.referencia_venta = format!("REF{now}");
        purchase.nombre_archivo_pdf = format!("carton_{card}_{now}.pdf");

        state.record(
            now,
            format!("random data generated: card #{card}, draw #{draw}"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FixedClock, TEST_NOW_MILLIS};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn when_generating_then_values_stay_in_range() {
        let use_case = RandomPurchaseUseCase {
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let mut state = HarnessState::new();
            use_case.execute(&mut state, &mut rng);

            let purchase = &state.purchase;
            assert!((1..=10_000).contains(&purchase.numero_carton));
            assert!((1..=100).contains(&purchase.sorteo));
            assert!((5_000..55_000).contains(&purchase.monto));
            // Window starts 2025-06-01 and spans 30 days.
            assert!(purchase.fecha_sorteo.as_str() >= "2025-06-01");
            assert!(purchase.fecha_sorteo.as_str() <= "2025-07-01");
            assert_eq!(purchase.fecha_sorteo.len(), 10);
        }
    }

    #[test]
    fn when_generating_then_reference_and_file_name_follow_card_and_clock() {
        let use_case = RandomPurchaseUseCase {
            clock: FixedClock(TEST_NOW_MILLIS),
        };
        let mut state = HarnessState::new();
        state.purchase.username = "ana".to_string();
        state.purchase.user_id = "u1".to_string();

        use_case.execute(&mut state, &mut StdRng::seed_from_u64(1));

        let purchase = &state.purchase;
        assert_eq!(purchase.referencia_venta, format!("REF{TEST_NOW_MILLIS}"));
        assert_eq!(
            purchase.nombre_archivo_pdf,
            format!("carton_{}_{TEST_NOW_MILLIS}.pdf", purchase.numero_carton)
        );
        assert_eq!(purchase.username, "ana");
        assert_eq!(purchase.user_id, "u1");
        assert!(state.log.contains("random data generated: card #"));
    }
}
