//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation/forecasting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{CategoryRanking, DataDomain};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "salesdash", version, about = "Retail sales dashboard, forecasting and inventory advisor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print summary metrics, breakdowns, forecasts and the inventory split.
    Report(ReportArgs),
    /// Ask a hosted language model for business suggestions.
    Advise(AdviseArgs),
    /// Write a synthetic sales CSV for a domain.
    Sample(SampleArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `salesdash report`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(DashboardArgs),
}

/// Options shared by the report and the TUI.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    /// Sales CSV. When omitted, an interactive picker lists CSV files below the current directory.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Dataset shape (selects required columns and defaults).
    #[arg(short = 'd', long, value_enum, default_value_t = DataDomain::Clothing)]
    pub domain: DataDomain,

    /// Top-N for product and category rankings (domain default when omitted).
    #[arg(long)]
    pub top: Option<usize>,

    /// Overall forecast horizon in days (domain default when omitted).
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Per-category forecast horizon in days (domain default when omitted).
    #[arg(long)]
    pub category_horizon: Option<usize>,

    /// How categories are chosen for their own forecasts (domain default when omitted).
    #[arg(long, value_enum)]
    pub categories: Option<CategoryRanking>,

    /// Minimum distinct dates before a series is forecast.
    #[arg(long, default_value_t = 30)]
    pub min_history: usize,

    /// Central coverage of the forecast interval, between 0 and 1.
    #[arg(long, default_value_t = 0.8)]
    pub interval_width: f64,

    /// Disable the daily seasonality component.
    #[arg(long)]
    pub no_daily_seasonality: bool,

    /// Force forecasting on (e.g. for the gift domain).
    #[arg(long, conflicts_with = "no_forecast")]
    pub forecast: bool,

    /// Skip forecasting.
    #[arg(long)]
    pub no_forecast: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub dashboard: DashboardArgs,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the overall forecast (`date,yhat,yhat_lower,yhat_upper`) to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_forecast: Option<PathBuf>,

    /// Export the inventory split to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_inventory: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AdviseArgs {
    /// Sales CSV. When omitted, an interactive picker lists CSV files below the current directory.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Dataset shape.
    #[arg(short = 'd', long, value_enum, default_value_t = DataDomain::Gift)]
    pub domain: DataDomain,

    /// Language model name (falls back to GEMINI_MODEL, then the built-in default).
    #[arg(long)]
    pub model: Option<String>,

    /// Also write the suggestions to this text file.
    #[arg(short = 'o', long, value_name = "TXT")]
    pub output: Option<PathBuf>,

    /// Print the prompt without calling the model.
    #[arg(long)]
    pub dry_run: bool,

    /// Run even for domains whose profile has advice turned off.
    #[arg(long)]
    pub force: bool,

    /// Top-N products in the summary (domain default when omitted).
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Dataset shape to generate.
    #[arg(short = 'd', long, value_enum, default_value_t = DataDomain::Clothing)]
    pub domain: DataDomain,

    /// Number of rows.
    #[arg(long, default_value_t = 2000)]
    pub rows: usize,

    /// Spread orders over this many days.
    #[arg(long, default_value_t = 120)]
    pub days: u32,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Last order date (YYYY-MM-DD); defaults to today.
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_parse() {
        let cli = Cli::parse_from([
            "salesdash",
            "report",
            "-f",
            "sales.csv",
            "--domain",
            "bakery",
            "--horizon",
            "60",
            "--no-plot",
            "--export-forecast",
            "out.csv",
        ]);
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.dashboard.domain, DataDomain::Bakery);
        assert_eq!(args.dashboard.horizon, Some(60));
        assert_eq!(args.dashboard.min_history, 30);
        assert!(args.no_plot);
        assert_eq!(args.export_forecast, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn forecast_flags_conflict() {
        let res = Cli::try_parse_from(["salesdash", "tui", "--forecast", "--no-forecast"]);
        assert!(res.is_err());
    }

    #[test]
    fn sample_parses_end_date() {
        let cli = Cli::parse_from(["salesdash", "sample", "-o", "x.csv", "--end-date", "2024-06-30"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.end_date, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(args.days, 120);
    }
}
