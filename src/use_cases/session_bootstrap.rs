use crate::domain::errors::TokenError;
use crate::domain::ports::{Clock, TokenVerifier};
use crate::domain::state::HarnessState;

// What happened to the launch token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NoToken,
    Verified { username: Option<String> },
    Rejected(TokenError),
}

// Launch-time use case: trust the username claim only after verification.
pub struct SessionBootstrapUseCase<V, C> {
    pub verifier: V,
    pub clock: C,
}

impl<V, C> SessionBootstrapUseCase<V, C>
where
    V: TokenVerifier,
    C: Clock,
{
    #[tracing::instrument(name = "session_bootstrap", skip_all)]
    pub fn execute(&self, token: Option<&str>, state: &mut HarnessState) -> BootstrapOutcome {
        let now = self.clock.now_epoch_millis();
        let Some(token) = token.filter(|token| !token.is_empty()) else {
            state.record(now, "no token provided");
            return BootstrapOutcome::NoToken;
        };

        match self.verifier.verify(token) {
            Ok(claims) => {
                let username = claims.username().map(str::to_string);
                match &username {
                    Some(name) => {
                        state.user.username = name.clone();
                        state.record(now, format!("token verified for {name}"));
                    }
                    None => state.record(now, "token verified without a username claim"),
                }
                BootstrapOutcome::Verified { username }
            }
            Err(reason) => {
                // Unverified contents are only ever shown to the operator.
                tracing::debug!(claims = ?self.verifier.decode(token).ok(), "unverified token contents");
                tracing::warn!(%reason, "launch token rejected.");
                state.record(now, format!("token rejected: {reason}"));
                BootstrapOutcome::Rejected(reason)
            }
        }
    }
}
