//! One-shot prompt command.

use chatrelay_types::chat::{ChatOutcome, Role};

use crate::state::AppState;

/// Run a single prompt and print the outcome.
///
/// Without `--completion` the prompt is sent as a one-turn chat; with it,
/// the completion-style endpoint is used. A failure payload is printed (or
/// raised as an error in human mode) without any retry.
pub async fn run(
    state: &AppState,
    prompt: &str,
    completion: bool,
    max_tokens: u32,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = if completion {
        let client = state.new_client();
        client.chat_completion(prompt, max_tokens).await
    } else {
        let mut client = state.new_client();
        let message = client.message(Role::User, prompt);
        client.chat(&message, max_tokens).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        ChatOutcome::Reply(reply) => {
            println!("{}", reply.content);
            Ok(())
        }
        ChatOutcome::Failure(failure) => {
            anyhow::bail!("{}: {}", failure.error, failure.message)
        }
    }
}
