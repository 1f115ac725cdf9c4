use std::fmt::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::entities::ApiResponse;
use crate::domain::errors::FlowError;
use crate::domain::ports::{BingoApi, Clock, TokenVerifier};
use crate::domain::state::HarnessState;
use crate::interface_adapters::commands::{ConsoleCommand, HELP_TEXT, parse_line};
use crate::use_cases::{
    BootstrapOutcome, PurchaseCardUseCase, RandomPurchaseUseCase, SessionBootstrapUseCase,
    ValidateUserUseCase,
};

const PROMPT: &str = "bingo> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Top-level view of the harness.
///
/// Owns the [`HarnessState`] and hands it to each flow; the ports are shared
/// trait objects so tests can swap in fakes.
pub struct Console {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    api: Arc<dyn BingoApi>,
    verifier: Arc<dyn TokenVerifier>,
    clock: Arc<dyn Clock>,
    state: HarnessState,
}

impl Console {
    pub fn new(
        api: Arc<dyn BingoApi>,
        verifier: Arc<dyn TokenVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            verifier,
            clock,
            state: HarnessState::new(),
        }
    }

    pub fn state(&self) -> &HarnessState {
        &self.state
    }

    pub fn bootstrap(&mut self, token: Option<&str>) -> BootstrapOutcome {
        let use_case = SessionBootstrapUseCase {
            verifier: self.verifier.clone(),
            clock: self.clock.clone(),
        };
        use_case.execute(token, &mut self.state)
    }

    // Run one command and return what should be printed.
    pub async fn handle(&mut self, command: ConsoleCommand) -> (Flow, String) {
        let output = match command {
            ConsoleCommand::Help => HELP_TEXT.to_string(),
            ConsoleCommand::User(username) => {
                self.state.user.username = username;
                format!("username: {}", self.state.user.username)
            }
            ConsoleCommand::Amount(amount) => {
                self.state.user.required_amount = amount;
                format!("required amount: {amount}")
            }
            ConsoleCommand::Validate => self.validate().await,
            ConsoleCommand::Set(edit) => {
                edit.apply(&mut self.state.purchase);
                render_purchase_form(&self.state)
            }
            ConsoleCommand::Random => {
                let use_case = RandomPurchaseUseCase {
                    clock: self.clock.clone(),
                };
                use_case.execute(&mut self.state, &mut rand::thread_rng());
                render_purchase_form(&self.state)
            }
            ConsoleCommand::Purchase => self.purchase().await,
            ConsoleCommand::Status => render_status(&self.state),
            ConsoleCommand::Log => render_log(&self.state),
            ConsoleCommand::ClearLog => {
                self.state.log.clear();
                "activity log cleared".to_string()
            }
            ConsoleCommand::Quit => return (Flow::Quit, "bye".to_string()),
        };

        (Flow::Continue, output)
    }

    async fn validate(&mut self) -> String {
        if self.state.loading {
            return FlowError::Busy.to_string();
        }
        let use_case = ValidateUserUseCase {
            api: self.api.clone(),
            clock: self.clock.clone(),
        };
        match use_case.execute(&mut self.state).await {
            Ok(response) => render_result("validation", &response, "user validated"),
            Err(err) => err.to_string(),
        }
    }

    async fn purchase(&mut self) -> String {
        // The purchase action stays disabled until a user is validated.
        if self.state.loading {
            return FlowError::Busy.to_string();
        }
        if !self.state.connected {
            return FlowError::NotConnected.to_string();
        }
        let use_case = PurchaseCardUseCase {
            api: self.api.clone(),
            clock: self.clock.clone(),
        };
        match use_case.execute(&mut self.state).await {
            Ok(response) => render_result("purchase", &response, "card purchased"),
            Err(err) => err.to_string(),
        }
    }

    /// Read commands line by line until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let flow = match parse_line(&line) {
                Ok(Some(command)) => {
                    let (flow, text) = self.handle(command).await;
                    output.write_all(format!("{text}\n").as_bytes()).await?;
                    flow
                }
                Ok(None) => Flow::Continue,
                Err(err) => {
                    output.write_all(format!("{err}\n").as_bytes()).await?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
        }

        output.flush().await
    }
}

fn render_result(label: &str, response: &ApiResponse, success_text: &str) -> String {
    if response.success {
        format!("ok: {success_text}")
    } else {
        format!(
            "{label} failed: {}",
            response.error.as_deref().unwrap_or_default()
        )
    }
}

fn render_purchase_form(state: &HarnessState) -> String {
    let p = &state.purchase;
    let mut out = String::new();
    let _ = writeln!(out, "purchase form:");
    let _ = writeln!(out, "  user-id    {}", p.user_id);
    let _ = writeln!(out, "  username   {}", p.username);
    let _ = writeln!(out, "  card       {}", p.numero_carton);
    let _ = writeln!(out, "  draw       {}", p.sorteo);
    let _ = writeln!(out, "  date       {}", p.fecha_sorteo);
    let _ = writeln!(out, "  amount     {}", p.monto);
    let _ = writeln!(out, "  reference  {}", p.referencia_venta);
    let _ = write!(out, "  pdf        {}", p.nombre_archivo_pdf);
    out
}

fn render_last(out: &mut String, label: &str, response: Option<&ApiResponse>) {
    match response {
        None => {
            let _ = writeln!(out, "last {label}: none");
        }
        Some(response) => {
            let outcome = if response.success {
                "ok".to_string()
            } else {
                format!("failed ({})", response.error.as_deref().unwrap_or_default())
            };
            let _ = writeln!(out, "last {label}: {outcome} at {}", response.timestamp);
            if let Some(data) = &response.data {
                let _ = writeln!(out, "  {data}");
            }
        }
    }
}

pub fn render_status(state: &HarnessState) -> String {
    let mut out = String::new();
    let connection = if state.connected {
        "connected"
    } else {
        "disconnected"
    };
    let _ = writeln!(out, "session: {connection}");
    let _ = writeln!(
        out,
        "user: {} (required amount {})",
        state.user.username, state.user.required_amount
    );
    render_last(&mut out, "validation", state.validation_result.as_ref());
    render_last(&mut out, "purchase", state.purchase_result.as_ref());
    out.push_str(&render_purchase_form(state));
    out
}

pub fn render_log(state: &HarnessState) -> String {
    if state.log.is_empty() {
        return "no activity recorded".to_string();
    }
    state
        .log
        .entries()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
