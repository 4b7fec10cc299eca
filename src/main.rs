//! Issue Agent - CLI entry point.
//!
//! Reads an issue payload from a JSON file, runs one issue-to-PR task, and
//! prints the structured outcome on stdout.

use issue_agent::{agent::Agent, config::Config, task::IssueTask};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issue_agent=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: issue-agent <issue.json>"))?;
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
    let task: IssueTask = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid issue file {}: {}", path, e))?;

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={} mcp_server={}",
        config.model, config.mcp_server_url
    );

    let agent = Agent::new(&config);
    let outcome = agent.run_issue_task(&task).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
