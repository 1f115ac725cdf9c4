use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::BufReader;

use crate::domain::entities::Claims;
use crate::domain::errors::TokenError;
use crate::domain::ports::{Clock, TokenVerifier};
use crate::frameworks::cli::{Cli, Command, InspectArgs, MintArgs, SessionArgs};
use crate::frameworks::config::{CONFIG_PATH_ENV, ConfigError, HarnessConfig};
use crate::interface_adapters::clients::BingoClient;
use crate::interface_adapters::commands::HELP_TEXT;
use crate::interface_adapters::console::Console;
use crate::interface_adapters::state::SystemClock;
use crate::interface_adapters::token::JwtTokenService;
use crate::use_cases::BootstrapOutcome;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout belongs to the console.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "harness failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<(), HarnessError> {
    let config_path = cli
        .config
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut config = HarnessConfig::load(config_path.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    config.warn_on_missing_secrets();

    let verifier = JwtTokenService::new(config.jwt_secret.clone(), config.algorithms()?);

    match cli
        .command
        .unwrap_or_else(|| Command::Session(SessionArgs::default()))
    {
        Command::Session(args) => run_session(&config, verifier, &args).await,
        Command::Mint(args) => mint(&verifier, args),
        Command::Inspect(args) => {
            inspect(&verifier, &args);
            Ok(())
        }
    }
}

async fn run_session(
    config: &HarnessConfig,
    verifier: JwtTokenService,
    args: &SessionArgs,
) -> Result<(), HarnessError> {
    let client = BingoClient::new(
        config.api_url.clone(),
        config.sso_secret.clone(),
        config.request_timeout(),
    )?;
    tracing::debug!(
        api_url = %client.base_url,
        algorithms = ?verifier.algorithms(),
        "bingo client configured."
    );

    let mut console = Console::new(Arc::new(client), Arc::new(verifier), Arc::new(SystemClock));
    match console.bootstrap(args.launch_token().as_deref()) {
        BootstrapOutcome::NoToken => println!("no launch token, enter the username by hand"),
        BootstrapOutcome::Verified { username: Some(name) } => println!("signed in as {name}"),
        BootstrapOutcome::Verified { username: None } => {
            println!("token verified but carries no username")
        }
        BootstrapOutcome::Rejected(reason) => println!("launch token rejected: {reason}"),
    }
    println!("{HELP_TEXT}");

    console
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}

fn mint(verifier: &JwtTokenService, args: MintArgs) -> Result<(), HarnessError> {
    let mut claims = Claims::new().with("username", args.username);
    for (key, value) in args.claims {
        claims = claims.with(key, value);
    }

    let now_secs = SystemClock.now_epoch_millis() / 1000;
    let token = verifier.issue(&claims, Duration::from_secs(args.ttl_secs), now_secs)?;
    println!("{token}");
    Ok(())
}

fn inspect(verifier: &JwtTokenService, args: &InspectArgs) {
    match verifier.decode(&args.token) {
        Ok(claims) => {
            let pretty = serde_json::to_string_pretty(&claims)
                .unwrap_or_else(|_| format!("{:?}", claims.0));
            println!("payload (unverified):\n{pretty}");
        }
        Err(reason) => println!("payload: {reason}"),
    }

    match verifier.verify(&args.token) {
        Ok(_) => println!("verification: ok"),
        Err(reason) => println!("verification: {reason}"),
    }
}
