use std::error::Error as _;
use std::process::ExitCode;

use dotenv::dotenv;
use groq_ask::{CompletionRequester, GroqClient, LlmError};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(configuration = err.is_configuration(), "Run failed");
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), LlmError> {
    CompletionRequester::new()
        .run_with(
            |name| std::env::var(name),
            GroqClient::from_config,
            &mut std::io::stdout(),
        )
        .await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(err: &LlmError) {
    eprintln!("error: {err}");

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
