use anyhow::{Context, Result};
use inference_core::ExperimentConfig;
use inference_lab::charts::{self, SvgChartRenderer};
use inference_lab::config::LabConfig;
use inference_lab::{pipeline, report};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let config = LabConfig::load().context("Failed to load configuration")?;

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "inference_lab={0},inference_metrics={0}",
                    config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting inference lab");

    let experiment = ExperimentConfig::default();
    let report = pipeline::run(&experiment).context("Statistical pipeline failed")?;

    let written = charts::render_all(&report, &SvgChartRenderer, &config.output_dir)
        .with_context(|| format!("Failed to write charts to {:?}", config.output_dir))?;

    print!(
        "{}",
        report::render_summary(&report, &config.output_dir, &written)
    );

    tracing::info!(charts = written.len(), "Inference lab finished");
    Ok(())
}
