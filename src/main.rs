use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    bingo_harness::run().await
}
