// Use cases layer: the harness flows, each driven by one console command.

pub mod purchase_card;
pub mod random_purchase;
pub mod reply;
pub mod session_bootstrap;
pub mod validate_user;

#[cfg(test)]
pub(crate) mod test_support;

pub use purchase_card::PurchaseCardUseCase;
pub use random_purchase::RandomPurchaseUseCase;
pub use reply::UNKNOWN_ERROR;
pub use session_bootstrap::{BootstrapOutcome, SessionBootstrapUseCase};
pub use validate_user::ValidateUserUseCase;
