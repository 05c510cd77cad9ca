mod catalog;
mod config;
mod copy;
mod http;
mod llm;
mod matcher;
mod models;
mod pipeline;
mod printify;
mod throttle;

use config::AppConfig;
use pipeline::Pipeline;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(target = "museprint.run", "run aborted: {err}");
    }
}

async fn run() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    info!(
        target = "museprint.run",
        blueprints = ?config.blueprints,
        query = %config.catalog.search_query,
        "starting catalog run"
    );

    let pipeline = Pipeline::new(config);
    let summary = pipeline.run().await?;

    info!(
        target = "museprint.run",
        created = summary.created_count(),
        failed = summary.failed_count(),
        "run complete"
    );
    if let Ok(rendered) = serde_json::to_string_pretty(&summary) {
        println!("{rendered}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
