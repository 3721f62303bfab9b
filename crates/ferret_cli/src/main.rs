//! `ferret`: an interactive coding assistant.
//!
//! Reads questions from the terminal, lets a local model inspect one
//! sandboxed directory through read-only tools, and prints the answers.
//! The session ends on a quit word or at end of input.

mod config;

use anyhow::Context as _;
use clap::Parser;
use config::{AppConfig, Args};
use ferret_agent::{
    Conversation, History, IOProvider, OutputMessage, TerminalIO, ToolLoopResponder, UserIO,
};
use ferret_core::init_tracing;
use ferret_mcp::{HttpTransport, McpClient, register_mcp_tools};
use ferret_model_providers::ollama::{self, OllamaProvider};
use ferret_models::ModelRegistry;
use ferret_sandbox::{Sandbox, SandboxRoot, register_sandbox_tools};
use ferret_tools::ToolRegistry;
use std::path::Path;
use std::sync::Arc;

fn system_prompt(root: &Path) -> String {
    format!(
        "You are a helpful coding assistant. You can inspect the project at {root} \
         with read-only tools: list its files, read text files and list git commits. \
         Every path you pass to a tool must be absolute and inside {root}.",
        root = root.display()
    )
}

/// Adds the tools of the MCP server at `url` to `tools`.
async fn register_remote_tools(tools: &mut ToolRegistry, url: &str) -> anyhow::Result<Vec<String>> {
    let client = McpClient::connect(Arc::new(HttpTransport::new(url)))
        .await
        .with_context(|| format!("cannot connect to MCP server at {url}"))?;
    let added = register_mcp_tools(tools, Arc::new(client))
        .await
        .with_context(|| format!("cannot list tools of MCP server at {url}"))?;
    Ok(added)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let config = AppConfig::from_args(args, &cwd, std::env::var("RUST_LOG").ok())?;
    init_tracing(&config.tracing);

    let terminal = Arc::new(TerminalIO::new());
    if let Some(reason) = &config.sandbox.fallback_reason {
        terminal.send(OutputMessage::error(reason)).await?;
    }

    let sandbox = Sandbox::new(
        SandboxRoot::new(&config.sandbox.root).context("invalid sandbox root")?,
    );
    let mut tools = ToolRegistry::new().with_timeout(config.tool_timeout);
    register_sandbox_tools(&mut tools, &sandbox);
    if let Some(url) = &config.mcp_url {
        if let Err(err) = register_remote_tools(&mut tools, url).await {
            tracing::warn!(%url, error = %err, "MCP tools unavailable");
            terminal
                .send(OutputMessage::error(format!("Remote tools unavailable: {err:#}")))
                .await?;
        }
    }

    let mut models = ModelRegistry::new();
    models.register_llm_provider(
        ollama::PROVIDER_NAME,
        Arc::new(OllamaProvider::new(config.ollama_url.as_str())),
    );
    let llm = models
        .llm(&config.model)
        .with_context(|| format!("cannot use model '{}'", config.model))?;

    tracing::info!(
        sandbox = %sandbox.root().path().display(),
        model = %config.model,
        ollama = %config.ollama_url,
        tools = ?tools.names(),
        "starting session"
    );

    let responder = ToolLoopResponder::new(llm, Arc::new(tools))
        .with_temperature(config.temperature)
        .with_max_rounds(config.max_tool_rounds);
    let history = History::with_system_prompt(system_prompt(sandbox.root().path()));
    let mut conversation = Conversation::new(
        Arc::new(responder),
        UserIO::new(terminal.clone()),
        history,
    )
    .with_quit_words(config.quit_words.clone());

    let leave_with = config.quit_words.iter().collect::<Vec<_>>().join(", ");
    terminal
        .send(OutputMessage::notice(format!(
            "Sandbox: {}\nModel: {}\nType {leave_with} to leave.",
            sandbox.root().path().display(),
            config.model
        )))
        .await?;

    conversation.run().await.context("terminal I/O failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_the_root() {
        let prompt = system_prompt(Path::new("/home/me/project"));
        assert!(prompt.contains("/home/me/project"));
        assert!(prompt.contains("absolute"));
    }
}
