//! Context command implementation.
//!
//! Assembles the analysis-context block the caller feeds to the reasoning
//! service: application and environment headers followed by the current
//! values, the operational-context report, and any Helm templates. The two
//! YAML inputs are parsed and re-rendered, which validates them and
//! normalizes their formatting before they leave the process. Templates are
//! Go template text, not YAML, and pass through verbatim.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Arguments for the context command
#[derive(Debug)]
pub struct ContextArgs {
    /// Application name
    pub app: String,
    /// Deployment environment
    pub environment: String,
    /// Current values file
    pub values: PathBuf,
    /// Operational context report file
    pub context: PathBuf,
    /// Helm template files appended to the block
    pub templates: Vec<PathBuf>,
}

pub fn execute(args: ContextArgs) -> Result<()> {
    let block = build_context(&args)?;
    print!("{block}");
    Ok(())
}

fn build_context(args: &ContextArgs) -> Result<String> {
    let values_text = fs::read_to_string(&args.values)
        .with_context(|| format!("failed to read {}", args.values.display()))?;
    let context_text = fs::read_to_string(&args.context)
        .with_context(|| format!("failed to read {}", args.context.display()))?;

    let values = helmwise_yaml::parse_file(&values_text, &args.values.display().to_string())?;
    let report = helmwise_yaml::parse_file(&context_text, &args.context.display().to_string())?;
    debug!(app = %args.app, environment = %args.environment, "inputs validated");

    let mut out = String::new();
    writeln!(out, "APPLICATION: {}", args.app)?;
    writeln!(out, "ENVIRONMENT: {}", args.environment)?;
    writeln!(out)?;
    writeln!(out, "CURRENT VALUES:")?;
    write!(out, "{}", values.render()?)?;
    writeln!(out)?;
    writeln!(out, "OPERATIONAL CONTEXT:")?;
    write!(out, "{}", report.render()?)?;

    if !args.templates.is_empty() {
        writeln!(out)?;
        writeln!(out, "HELM TEMPLATES:")?;
        for path in &args.templates {
            let template = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            out.push_str(&template);
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }

    Ok(out)
}
