pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(
    name = "sheet-sync-cli",
    version,
    about = "Synchronize test-record workbooks through reviewable patch documents"
)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true)]
    pub compact: bool,

    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare a source workbook against a target workbook and write a patch
    /// document plus a generation report.
    Generate {
        /// Source workbook (authoritative content and ordering).
        #[arg(long)]
        source: PathBuf,
        /// Target workbook whose existing keys decide update vs insert.
        #[arg(long)]
        target: PathBuf,
        #[arg(long, default_value = "out/patch.yml")]
        out_patch: PathBuf,
        #[arg(long, default_value = "out/generate_report.md")]
        out_report: PathBuf,
        /// Sync profile YAML; defaults apply when omitted.
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Glossary YAML for the text rewriter.
        #[arg(long)]
        glossary: Option<PathBuf>,
        /// Fail when a new key has no insertion anchor instead of appending.
        #[arg(long)]
        strict: bool,
    },
    /// Apply a patch document to a copy of a workbook, renumber, and write a
    /// diff report.
    Apply {
        #[arg(long)]
        base: PathBuf,
        #[arg(long)]
        patch: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value = "out/diff_report.md")]
        report: PathBuf,
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Override the patch document's target sheet.
        #[arg(long)]
        sheet: Option<String>,
        /// Consecutive empty-key rows treated as end of data.
        #[arg(long)]
        end_empty_rows: Option<u32>,
        /// Apply in memory and write the report, but not the workbook.
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run_command(command: Commands) -> Result<Value> {
    match command {
        Commands::Generate {
            source,
            target,
            out_patch,
            out_report,
            profile,
            glossary,
            strict,
        } => commands::generate::run(commands::generate::GenerateParams {
            source,
            target,
            out_patch,
            out_report,
            profile,
            glossary,
            strict,
        }),
        Commands::Apply {
            base,
            patch,
            output,
            report,
            profile,
            sheet,
            end_empty_rows,
            dry_run,
        } => commands::apply::run(commands::apply::ApplyParams {
            base,
            patch,
            output,
            report,
            profile,
            sheet,
            end_empty_rows,
            dry_run,
        }),
    }
}
