use crate::render::{render_batch, render_metrics, render_report};
use clap::{Args, ValueEnum};
use cvss_v3::batch::{self, BatchScorer};
use cvss_v3::config::OutputFormat;
use cvss_v3::error::AppError;
use cvss_v3::scoring::{compute_all, MetricGroup, MetricRegistry, Selections};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Vector string, e.g. AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H
    pub(crate) vector: String,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with a `vector` column and an optional `id` column
    pub(crate) path: PathBuf,
    /// Exit with an error when any row fails to score
    #[arg(long)]
    pub(crate) strict: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MetricsArgs {
    /// Only list one metric group
    #[arg(long, value_enum)]
    pub(crate) group: Option<GroupArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum GroupArg {
    Base,
    Temporal,
    Environmental,
}

impl From<GroupArg> for MetricGroup {
    fn from(value: GroupArg) -> Self {
        match value {
            GroupArg::Base => MetricGroup::Base,
            GroupArg::Temporal => MetricGroup::Temporal,
            GroupArg::Environmental => MetricGroup::Environmental,
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs, format: OutputFormat) -> Result<(), AppError> {
    let selections = Selections::from_vector(&args.vector)?;
    let report = compute_all(&selections)?;
    print!("{}", render_report(&report, format)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs, format: OutputFormat) -> Result<(), AppError> {
    let BatchArgs { path, strict } = args;
    info!(path = %path.display(), "scoring vector file");

    let rows = BatchScorer::from_path(&path)?;
    print!("{}", render_batch(&rows, format)?);

    if strict {
        batch::ensure_all_scored(&rows)?;
    }

    Ok(())
}

pub(crate) fn run_metrics(args: MetricsArgs, format: OutputFormat) -> Result<(), AppError> {
    let groups: Vec<MetricGroup> = match args.group {
        Some(group) => vec![group.into()],
        None => MetricGroup::ordered().to_vec(),
    };

    let registries: Vec<&'static MetricRegistry> = groups
        .into_iter()
        .map(MetricRegistry::for_group)
        .collect();
    print!("{}", render_metrics(&registries, format)?);
    Ok(())
}
