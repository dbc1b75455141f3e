//! Chatrelay CLI and HTTP server entry point.
//!
//! Binary name: `crelay`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the appropriate command handler or starts the server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatrelay_infra::config::RelayConfig;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    chatrelay_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "crelay", &mut std::io::stdout());
        return Ok(());
    }

    let config = RelayConfig::from_env()?;
    let state = AppState::from_config(&config);

    let result = match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or(config.bind_addr);
            http::serve(state, addr).await
        }

        Commands::Ask {
            prompt,
            completion,
            max_tokens,
            json,
        } => cli::ask::run(&state, &prompt, completion, max_tokens, json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    chatrelay_observe::tracing_setup::shutdown_tracing();
    result
}
