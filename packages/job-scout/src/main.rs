//! Job Scout
//!
//! Runs every configured query once, writes the report (a spreadsheet by
//! default) and hands it to the configured notifier.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use job_extraction::ai::GeneratorExt;
use job_extraction::{Pipeline, RunStamp, TavilyClient};
use job_scout::cli::Cli;
use job_scout::config::Config;
use job_scout::{build_generator, build_notifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Minimum spacing between model calls.
const GENERATION_INTERVAL: Duration = Duration::from_secs(1);

fn init_logging(json: bool) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,job_extraction=debug".into()),
    );

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    tracing::info!("Starting Job Scout");

    let config = Config::from_env().context("Failed to load configuration")?;
    let queries = cli.load_queries()?;

    tracing::info!(
        provider = config.llm.name(),
        model = config.llm.model(),
        queries = queries.len(),
        "Configuration loaded"
    );

    let tavily = TavilyClient::new(config.tavily_api_key.clone());
    let generator = build_generator(&config).rate_limited(GENERATION_INTERVAL);
    let pipeline = Pipeline::new(tavily.clone(), tavily, generator, cli.pipeline_config());

    let stamp = RunStamp::now();
    let results = pipeline.run(&queries, stamp).await;

    if results.is_empty() {
        tracing::warn!("No job postings found; writing an empty report");
    }

    let report_dir = cli.output_dir.clone().unwrap_or(config.report_dir.clone());
    let path = cli
        .report_format
        .sink(report_dir)
        .write(&results, &stamp.file_safe())
        .inspect_err(|e| tracing::error!("Failed to save job data: {}", e))
        .context("Failed to write report")?;

    let delivered = build_notifier(&config).notify(&path, &results).await;

    tracing::info!(
        run_id = %results.metadata().run_id,
        records = results.len(),
        failures = results.metadata().failures,
        delivered,
        report = %path.display(),
        "Job scraping completed"
    );

    Ok(())
}
