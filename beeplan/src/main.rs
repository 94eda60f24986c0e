/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use beeplan::catalog::Catalog;
use beeplan::exchange;
use beeplan::report::ReportGenerator;
use beeplan::scheduler::Scheduler;

/// Exit status when the schedule still has conflicts.
const EXIT_CONFLICTS: i32 = 2;

// ── CLI argument definition ───────────────────────────────────────────────────

/// BeePlan weekly course timetable generator.
///
/// Example:
///   beeplan sample --out catalog.yaml
///   beeplan generate --data catalog.yaml --export-json schedule.json
///   beeplan validate --data catalog.yaml --schedule schedule.json
#[derive(Debug, Parser)]
#[command(
    name = "beeplan",
    about = "BeePlan course timetable generator and validator",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Place every course, validate and print the report.
    Generate {
        /// Catalog file (JSON, or YAML by `.yaml`/`.yml` extension).
        #[arg(short = 'd', long = "data")]
        data: PathBuf,

        /// Write the generated schedule as JSON.
        #[arg(long = "export-json")]
        export_json: Option<PathBuf>,

        /// Write the generated schedule as CSV.
        #[arg(long = "export-csv")]
        export_csv: Option<PathBuf>,

        /// Print only the conflict summary instead of the full report.
        #[arg(long, default_value_t = false)]
        summary: bool,
    },

    /// Re-validate a previously exported schedule against a catalog.
    Validate {
        /// Catalog file the schedule was built from.
        #[arg(short = 'd', long = "data")]
        data: PathBuf,

        /// Schedule JSON produced by `generate --export-json`.
        #[arg(short = 's', long = "schedule")]
        schedule: PathBuf,
    },

    /// Write the built-in sample catalog.
    Sample {
        /// Output path; `.yaml`/`.yml` writes YAML, anything else JSON.
        #[arg(short = 'o', long = "out")]
        out: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_CONFLICTS),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the resulting schedule is conflict-free.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Generate {
            data,
            export_json,
            export_csv,
            summary,
        } => {
            let mut scheduler = load_scheduler(&data)?;
            let valid = scheduler.generate_schedule();

            if let Some(path) = &export_json {
                exchange::export_json(&scheduler, path)?;
            }
            if let Some(path) = &export_csv {
                exchange::export_csv(&scheduler, path)?;
            }

            print_report(&scheduler, summary);
            Ok(valid)
        }

        Command::Validate { data, schedule } => {
            let mut scheduler = load_scheduler(&data)?;
            let imported = scheduler.import_schedule(&schedule)?;
            info!(
                imported = imported.imported,
                collisions = imported.collisions,
                skipped = imported.skipped,
                "Schedule loaded for validation"
            );

            print_report(&scheduler, false);
            Ok(scheduler.is_valid())
        }

        Command::Sample { out } => {
            Catalog::sample().save_to_file(&out)?;
            Ok(true)
        }
    }
}

fn load_scheduler(path: &Path) -> Result<Scheduler> {
    let catalog = Catalog::load_from_file(path)?;
    Scheduler::from_catalog(catalog)
        .with_context(|| format!("Invalid catalog: {}", path.display()))
}

fn print_report(scheduler: &Scheduler, summary_only: bool) {
    let report = ReportGenerator::new(scheduler);
    if summary_only {
        println!("{}", report.conflict_summary().trim_end());
    } else {
        println!("{}", report.generate_report());
    }
}
