//! Apply command implementation.
//!
//! Runs the full merge pipeline on local files: parse the current values,
//! validate the recommendation payload, apply the operations, then write the
//! merged values and print the change summary. Soft failures (skipped
//! operations) still produce output; fatal errors abort with no merged
//! document.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use helmwise_merge::{apply, parse_recommendations, render_summary, render_summary_json};

/// Output format for the change summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    /// One readable line per change or skip.
    Text,
    /// Pretty-printed JSON audit trail.
    Json,
}

/// Arguments for the apply command
#[derive(Debug)]
pub struct ApplyArgs {
    /// Current values file
    pub values: PathBuf,
    /// Recommendation payload file
    pub recommendations: PathBuf,
    /// Merged values destination; stdout when absent
    pub output: Option<PathBuf>,
    /// Summary format
    pub summary_format: SummaryFormat,
    /// Validate and report without writing merged values
    pub dry_run: bool,
}

pub fn execute(args: ApplyArgs) -> Result<()> {
    let values_text = fs::read_to_string(&args.values)
        .with_context(|| format!("failed to read {}", args.values.display()))?;
    let payload_text = fs::read_to_string(&args.recommendations)
        .with_context(|| format!("failed to read {}", args.recommendations.display()))?;

    let values_name = args.values.display().to_string();
    let document = helmwise_yaml::parse_file(&values_text, &values_name)?;
    let recommendation = parse_recommendations(&payload_text)?;
    debug!(
        operations = recommendation.operations.len(),
        "validated recommendation payload"
    );

    let result = apply(&document, &recommendation.operations)?;
    info!(
        changes = result.changes.len(),
        skipped = result.skipped.len(),
        "merge complete"
    );

    if let Some(analysis) = &recommendation.analysis {
        eprintln!("{analysis}");
        eprintln!();
    }

    let summary = match args.summary_format {
        SummaryFormat::Text => render_summary(&result.changes, &result.skipped),
        SummaryFormat::Json => render_summary_json(&result.changes, &result.skipped)?,
    };
    eprintln!("{summary}");

    if !args.dry_run {
        let rendered = result.document.render()?;
        match &args.output {
            Some(path) => fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => print!("{rendered}"),
        }
    }

    Ok(())
}
