use anyhow::Result;
use credit_trends::{fetch::DatasetSource, fetch::UciRepository, pipeline, PipelineConfig};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let config = PipelineConfig::default();
    let source = DatasetSource::Uci(UciRepository::new(Client::new(), &config.api_url)?);

    // ─── 3) fetch → aggregate → export ───────────────────────────────
    let rows = pipeline::run(&config, &source).await?;

    info!(rows = rows.len(), "all done");
    Ok(())
}
