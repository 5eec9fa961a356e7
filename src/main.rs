use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table as TerminalTable;
use tracing::debug;

mod aggregate;
mod anonymity;
mod challenges;
mod demux;
mod error;
mod export;
mod ingest;
mod models;
mod normalize;
mod pipeline;
mod report;
mod strategies;

use export::{ArtifactEncoder, CsvEncoder};
use pipeline::RunOutcome;

#[derive(Parser)]
#[command(name = "anchor-workplan")]
#[command(
    about = "Turns an anonymized 'Anchor' survey export into class and student work plans",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an export and show the per-student challenge counts
    Check {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Write the class challenge report
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "class-report.txt")]
        out: PathBuf,
        /// Write a JSON summary instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Export the normalized table or the manager summary
    Export {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, value_enum, default_value_t = View::Full)]
        view: View,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a personal work plan for one student
    Plan {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        student: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum View {
    Full,
    Manager,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("anchor_workplan=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let encoder = CsvEncoder;

    match cli.command {
        Commands::Check { csv } => {
            let outcome = load(&csv)?;
            println!(
                "Loaded {} students ({} anonymous ids, {} missing).",
                outcome.records.len(),
                outcome.clearance.anonymous,
                outcome.clearance.missing
            );

            let manager = report::manager_view(&outcome.summary);
            let mut table = TerminalTable::new();
            table.set_header(manager.headers.clone());
            for row in &manager.rows {
                table.add_row(row.clone());
            }
            println!("{table}");
        }
        Commands::Report { csv, out, json } => {
            let outcome = load(&csv)?;
            let body = if json {
                serde_json::to_vec_pretty(&report::summary_json(&outcome.summary))?
            } else {
                encoder.encode_report(&report::render_class_report(&outcome.summary))?
            };
            write_artifact(&out, &body)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { csv, view, out } => {
            let outcome = load(&csv)?;
            let (table, stem) = match view {
                View::Full => (
                    report::normalized_view(&outcome.records, &outcome.columns),
                    "plan",
                ),
                View::Manager => (report::manager_view(&outcome.summary), "manager"),
            };
            let out =
                out.unwrap_or_else(|| PathBuf::from(format!("{stem}.{}", encoder.extension())));
            write_artifact(&out, &encoder.encode_table(&table)?)?;
            println!("Exported {} rows to {}.", table.rows.len(), out.display());
        }
        Commands::Plan { csv, student, out } => {
            let outcome = load(&csv)?;
            let Some(record) = outcome.student(&student) else {
                bail!("student {student} is not in {}", csv.display());
            };
            let plan = report::render_student_plan(record, Utc::now().date_naive());
            let out = out.unwrap_or_else(|| PathBuf::from(format!("plan-{}.md", record.id)));
            write_artifact(&out, &encoder.encode_report(&plan)?)?;
            println!("Plan written to {}.", out.display());
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<RunOutcome> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let outcome = match pipeline::run(&bytes) {
        Ok(outcome) => outcome,
        Err(err) if err.is_anonymity_violation() => {
            return Err(err).context(
                "upload refused: replace student names with student numbers (up to 4 digits)",
            );
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("cannot build a work plan from {}", path.display()));
        }
    };
    debug!(run_id = %outcome.run_id, path = %path.display(), "export loaded");

    for warning in &outcome.warnings {
        eprintln!("Warning: {warning}");
    }
    Ok(outcome)
}

fn write_artifact(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
