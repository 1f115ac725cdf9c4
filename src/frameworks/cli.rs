use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::interface_adapters::page::token_from_page_url;
use crate::interface_adapters::token::DEFAULT_TOKEN_TTL;

#[derive(Debug, Parser)]
#[command(
    name = "bingo_harness",
    version,
    about = "Test harness for the bingo-integration API"
)]
pub struct Cli {
    /// TOML config file (also read from BINGO_HARNESS_CONFIG).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Overrides the configured API base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session (default).
    Session(SessionArgs),
    /// Sign a token with the configured secret, for local testing.
    Mint(MintArgs),
    /// Show a token's payload and whether it verifies.
    Inspect(InspectArgs),
}

#[derive(Debug, Default, Args)]
pub struct SessionArgs {
    /// Launch URL; the token is taken from its `token` query parameter.
    #[arg(long, conflicts_with = "token")]
    pub page_url: Option<String>,
    /// Raw launch token.
    #[arg(long)]
    pub token: Option<String>,
}

impl SessionArgs {
    pub fn launch_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| self.page_url.as_deref().and_then(token_from_page_url))
    }
}

#[derive(Debug, Args)]
pub struct MintArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL.as_secs())]
    pub ttl_secs: u64,
    /// Extra claim as key=value; JSON values are kept typed.
    #[arg(long = "claim", value_parser = parse_claim)]
    pub claims: Vec<(String, Value)>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    pub token: String,
}

fn parse_claim(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err("claim name must not be empty".to_string());
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
