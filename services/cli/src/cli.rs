use crate::commands::{run_batch, run_metrics, run_score, BatchArgs, MetricsArgs, ScoreArgs};
use clap::{Parser, Subcommand, ValueEnum};
use cvss_v3::config::{AppConfig, OutputFormat};
use cvss_v3::error::AppError;
use cvss_v3::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "CVSS v3.0 Calculator",
    about = "Compute CVSS v3.0 Base, Temporal and Environmental scores from vector strings",
    version
)]
pub(crate) struct Cli {
    /// Output format (overrides CVSS_OUTPUT)
    #[arg(long, global = true, value_enum)]
    pub(crate) format: Option<FormatArg>,
    /// Log filter such as `debug` or `cvss_v3=trace` (overrides CVSS_LOG_LEVEL)
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Score a single vector string
    Score(ScoreArgs),
    /// Score every vector in a CSV file with a `vector` column
    Batch(BatchArgs),
    /// List metric keys, option titles and weights
    Metrics(MetricsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if let Some(log_level) = cli.log_level {
        config.telemetry.log_level = log_level;
    }

    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, ?config.output.format, "configuration loaded");

    let format = config.output.format;
    match cli.command {
        Command::Score(args) => run_score(args, format),
        Command::Batch(args) => run_batch(args, format),
        Command::Metrics(args) => run_metrics(args, format),
    }
}
