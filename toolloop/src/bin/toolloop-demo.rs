//! Asks the configured Ollama model one question through the tool loop.
//!
//! The query is taken from the command line; with no arguments the date
//! question is asked and its answer scored.

use std::process::ExitCode;

use toolloop::{AgentConfig, AgentTurnRequest, DATE_QUERY, build_ollama_agent, date_feedback};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let query = if args.is_empty() {
        DATE_QUERY.to_string()
    } else {
        args.join(" ")
    };

    let config = match AgentConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    let agent = match build_ollama_agent(&config) {
        Ok(agent) => agent,
        Err(err) => {
            tracing::error!(error = %err, "failed to build agent");
            return ExitCode::from(2);
        }
    };

    tracing::info!(model = %config.model, base_url = %config.base_url, "asking");
    match agent.run(AgentTurnRequest::new(query.clone())).await {
        Ok(outcome) => {
            println!("{}", outcome.answer);
            if query == DATE_QUERY {
                println!("{}", date_feedback(&outcome.answer));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "query failed");
            ExitCode::FAILURE
        }
    }
}
