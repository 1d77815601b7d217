use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palette_validate::models::{AppConfig, ExecutionContext, OversizeSetting, StylingSource};
use palette_validate::services::{
    system_hostname, NullEmitter, ReportEmitter, SigeventEmitter, ValidationPipeline,
};

/// Exit status used for fatal errors
const FATAL_EXIT: u8 = 255;

/// Highest exit status a completed run reports, so it never reads as fatal
const MAX_ANOMALY_EXIT: u8 = FATAL_EXIT - 1;

#[derive(Parser)]
#[command(name = "palette-validate", version)]
#[command(about = "Validate a rendered raster's color table against its styling colormap")]
struct Cli {
    /// Colormap location: file path or URL
    #[arg(short, long)]
    colormap: String,

    /// Rendered raster to check
    #[arg(short, long)]
    input: PathBuf,

    /// Report endpoint (default: http://localhost:8100/sigevent/events/create)
    #[arg(short = 'u', long)]
    sigevent_url: Option<String>,

    /// YAML configuration file (or PALETTE_VALIDATE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Handling of colormaps with more than 256 entries
    #[arg(long, value_enum)]
    oversize: Option<OversizeSetting>,

    /// Log reports locally instead of sending them
    #[arg(long)]
    no_report: bool,

    /// Print out detailed log messages
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(rendered_only) => ExitCode::from(anomaly_exit(rendered_only)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(FATAL_EXIT)
        }
    }
}

fn anomaly_exit(rendered_only: usize) -> u8 {
    rendered_only.min(MAX_ANOMALY_EXIT as usize) as u8
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "palette_validate=debug"
    } else {
        "palette_validate=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Run one validation and return the number of rendered-only colors
async fn run(cli: Cli) -> anyhow::Result<usize> {
    let config_path = cli.config.or_else(|| {
        std::env::var("PALETTE_VALIDATE_CONFIG")
            .ok()
            .map(PathBuf::from)
    });
    let mut config = AppConfig::load(config_path.as_deref());
    if let Some(url) = cli.sigevent_url {
        config.sigevent_url = url;
    }
    if let Some(oversize) = cli.oversize {
        config.oversize_policy = oversize;
    }

    let emitter: Arc<dyn ReportEmitter> = if cli.no_report {
        Arc::new(NullEmitter)
    } else {
        Arc::new(SigeventEmitter::new(
            &config.sigevent_url,
            config.tags.clone(),
            Duration::from_secs(config.report_timeout_secs),
        )?)
    };

    let host = config.host.clone().unwrap_or_else(system_hostname);
    let ctx = ExecutionContext::new(StylingSource::parse(&cli.colormap), cli.input, host)
        .verbose(cli.verbose);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "palette-validate");

    let pipeline = ValidationPipeline::from_config(&config, emitter)?;
    let result = pipeline.run(&ctx).await?;

    println!("\n{}", result.summary());
    Ok(result.exit_status())
}
