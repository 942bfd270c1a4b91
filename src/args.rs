//! These structs provide the CLI interface for the gastro CLI.

use crate::commands::{Format, View};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// gastro: A command-line tool for evaluating restaurant operations data.
///
/// The purpose of this program is to read a daily operations spreadsheet
/// (one row per day with revenue, cost-of-goods, labor and guest figures),
/// derive the standard gastronomy KPIs for every day, and roll them up into
/// a monthly overview.
///
/// The input is a single sheet in xlsx or csv form. Required columns are
/// Datum, Umsatz_Speisen, Umsatz_Getraenke, EK_Speisen, EK_Getraenke,
/// Personal_Service, Personal_Kueche, Stunden and Gaeste; any other columns
/// are ignored.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Derive the full report: the per-day table (Tagesübersicht), the
    /// monthly rollup (Monatsübersicht), and any warnings about the input.
    Report(ReportArgs),
    /// Print the headline figures for the most recent day: total revenue,
    /// blended cost-of-goods percentage, labor-cost percentage, and the
    /// operating result.
    Summary(SummaryArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// Args for the `gastro report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The spreadsheet file to read (xlsx or csv).
    #[clap(long = "file", short = 'f')]
    file: PathBuf,

    /// The output format. With `csv` and `--view all`, the two tables are
    /// written as two csv sections separated by a blank line.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Which tables to include in the output.
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,
}

impl ReportArgs {
    pub fn new(file: impl Into<PathBuf>, format: Format, view: View) -> Self {
        Self {
            file: file.into(),
            format,
            view,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn view(&self) -> View {
        self.view
    }
}

/// Args for the `gastro summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// The spreadsheet file to read (xlsx or csv).
    #[clap(long = "file", short = 'f')]
    file: PathBuf,
}

impl SummaryArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}
