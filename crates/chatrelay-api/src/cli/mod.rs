//! CLI argument definitions for `crelay`.

pub mod ask;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Webhook receiver and chat-completion relay.
#[derive(Debug, Parser)]
#[command(name = "crelay", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Export spans via the OpenTelemetry stdout exporter
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address override (defaults to CHATRELAY_BIND)
        #[arg(long)]
        bind: Option<std::net::SocketAddr>,
    },

    /// Run a one-shot prompt against the configured model
    Ask {
        /// The prompt text
        prompt: String,

        /// Use the completion-style endpoint instead of chat
        #[arg(long)]
        completion: bool,

        /// Output token budget
        #[arg(long, default_value_t = 256)]
        max_tokens: u32,

        /// Print the raw outcome payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
