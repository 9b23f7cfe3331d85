//! helmwise CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::apply::{ApplyArgs, SummaryFormat};
use commands::context::ContextArgs;

#[derive(Parser)]
#[command(name = "helmwise")]
#[command(version)]
#[command(about = "Deterministic Helm values optimizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a recommendation payload to a values file
    Apply {
        /// Current values file
        values: PathBuf,

        /// Recommendation payload file
        #[arg(short, long)]
        recommendations: PathBuf,

        /// Write merged values to FILE (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Change summary format
        #[arg(long, value_enum, default_value = "text")]
        summary_format: SummaryFormat,

        /// Validate and report without writing merged values
        #[arg(long)]
        dry_run: bool,
    },

    /// Assemble the analysis context block fed to the reasoning service
    Context {
        /// Application name
        #[arg(long)]
        app: String,

        /// Deployment environment
        #[arg(long)]
        environment: String,

        /// Current values file
        values: PathBuf,

        /// Operational context report file
        context: PathBuf,

        /// Helm template file to append; repeatable
        #[arg(long = "template", value_name = "FILE")]
        templates: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helmwise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            values,
            recommendations,
            output,
            summary_format,
            dry_run,
        } => commands::apply::execute(ApplyArgs {
            values,
            recommendations,
            output,
            summary_format,
            dry_run,
        }),
        Commands::Context {
            app,
            environment,
            values,
            context,
            templates,
        } => commands::context::execute(ContextArgs {
            app,
            environment,
            values,
            context,
            templates,
        }),
    }
}
