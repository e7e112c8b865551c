//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the input CSV (flag or interactive picker)
//! - runs the dashboard pipeline
//! - prints reports/plots
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::advisor::{GeminiClient, TextGenerator, advisory_file_name, build_prompt};
use crate::cli::{AdviseArgs, Command, DashboardArgs, ReportArgs, SampleArgs};
use crate::domain::{DataDomain, DomainProfile, ForecastSettings, RunConfig};
use crate::error::{AppError, PipelineError};
use crate::io::sample::{SampleConfig, write_sample_csv};
use crate::metrics::StoreSummary;

pub mod pipeline;

/// Entry point for the `salesdash` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();

    // We want `salesdash` and `salesdash -f sales.csv` to behave like `salesdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Advise(args) => handle_advise(args),
        Command::Sample(args) => handle_sample(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings from this crate).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sales_dash=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.dashboard)?;
    let path = resolve_csv(args.dashboard.file.as_ref(), args.dashboard.domain)?;
    let profile = config.domain.profile();

    let run = pipeline::run_file(&path, &config)?;

    println!("{}", crate::report::format_report(&run, profile));

    if !args.no_plot {
        let money = |v: f64| format!("{}{}", profile.currency, crate::report::fmt_thousands(v));
        if !run.summary.top_products.is_empty() {
            let title = format!("Top {} products by revenue", run.summary.top_products.len());
            println!("{}", crate::plot::render_bar_chart(&title, &run.summary.top_products, args.width, &money));
        }
        if !run.summary.category_revenue.is_empty() {
            let sorted = run.summary.category_revenue.sorted_desc();
            println!("{}", crate::plot::render_bar_chart("Revenue by category", &sorted, args.width, &money));
        }
        if let Some(f) = run.forecasts.as_ref().and_then(|fc| fc.overall.forecast()) {
            println!("{}", crate::plot::render_forecast_plot(f, args.width, args.height));
        }
    }

    // Optional exports.
    if let Some(path) = &args.export_forecast {
        let overall = run
            .forecasts
            .as_ref()
            .map(|fc| fc.overall.clone())
            .ok_or_else(|| AppError::new(2, "Forecasting is disabled; pass --forecast to export one."))?;
        let forecast = overall.into_result(pipeline::OVERALL_SLICE)?;
        crate::io::export::write_forecast_csv(path, &forecast)?;
        eprintln!("Wrote forecast to {}", path.display());
    }
    if let Some(path) = &args.export_inventory {
        let split = run.forecasts.as_ref().and_then(|fc| fc.inventory.as_ref()).ok_or_else(|| {
            AppError::new(3, crate::report::NO_CATEGORIES_FORECAST)
        })?;
        crate::io::export::write_inventory_csv(path, split)?;
        eprintln!("Wrote inventory split to {}", path.display());
    }

    Ok(())
}

fn handle_advise(args: AdviseArgs) -> Result<(), AppError> {
    let profile = args.domain.profile();
    ensure_advisory_enabled(profile, args.force)?;
    let path = resolve_csv(args.file.as_ref(), args.domain)?;
    let top_n = args.top.unwrap_or(profile.top_n);

    let table = crate::io::ingest::load_sales_csv(&path, args.domain)?;
    if table.records.is_empty() {
        return Err(PipelineError::runtime("no data rows").into());
    }
    let summary = StoreSummary::compute(&table, top_n);
    let prompt = build_prompt(profile, &summary);

    if args.dry_run {
        println!("{prompt}");
        return Ok(());
    }

    let client = GeminiClient::from_env(args.model.clone())?;
    let text = client.generate(&prompt)?;
    println!("{text}");

    if let Some(out) = &args.output {
        crate::io::export::write_text(out, &text)?;
        eprintln!("Wrote suggestions to {}", out.display());
    } else {
        eprintln!("Save with `-o {}`.", advisory_file_name(profile));
    }
    Ok(())
}

fn ensure_advisory_enabled(profile: &DomainProfile, force: bool) -> Result<(), AppError> {
    if profile.advisory || force {
        return Ok(());
    }
    Err(AppError::new(
        2,
        format!(
            "AI suggestions are off for the {} domain; pass --force to run anyway.",
            profile.title
        ),
    ))
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    if args.rows == 0 || args.days == 0 {
        return Err(AppError::new(2, "--rows and --days must be positive."));
    }
    let config = SampleConfig {
        domain: args.domain,
        rows: args.rows,
        days: args.days,
        seed: args.seed,
        end_date: args.end_date.unwrap_or_else(|| chrono::Local::now().date_naive()),
    };
    let n = write_sample_csv(&args.output, &config)?;
    println!("Wrote {n} rows to {}", args.output.display());
    Ok(())
}

fn handle_tui(args: DashboardArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let path = resolve_csv(args.file.as_ref(), args.domain)?;
    crate::tui::run(path, config)
}

fn resolve_csv(file: Option<&PathBuf>, domain: DataDomain) -> Result<PathBuf, AppError> {
    match file {
        Some(path) => crate::cli::picker::validate_csv_path(path),
        None => crate::cli::picker::prompt_for_csv_path(domain),
    }
}

/// Fold CLI flags over the domain profile defaults.
pub fn run_config_from_args(args: &DashboardArgs) -> Result<RunConfig, AppError> {
    if !(args.interval_width > 0.0 && args.interval_width < 1.0) {
        return Err(AppError::new(
            2,
            format!("--interval-width must be between 0 and 1 (got {}).", args.interval_width),
        ));
    }
    if args.min_history == 0 {
        return Err(AppError::new(2, "--min-history must be at least 1."));
    }

    let mut config = RunConfig::for_domain(args.domain);
    if let Some(top) = args.top {
        if top == 0 {
            return Err(AppError::new(2, "--top must be positive."));
        }
        config.top_n = top;
    }
    if args.forecast {
        config.forecast = true;
    }
    if args.no_forecast {
        config.forecast = false;
    }

    let horizon = args.horizon.unwrap_or(config.settings.horizon);
    let category_horizon = args.category_horizon.unwrap_or(config.category_horizon);
    if horizon == 0 || category_horizon == 0 {
        return Err(AppError::new(2, "Forecast horizons must be positive."));
    }

    config.settings = ForecastSettings {
        horizon,
        min_history: args.min_history,
        interval_width: args.interval_width,
        daily_seasonality: !args.no_daily_seasonality,
    };
    config.category_horizon = category_horizon;
    if let Some(ranking) = args.categories {
        config.category_ranking = ranking;
    }

    Ok(config)
}

/// Rewrite argv so `salesdash` defaults to `salesdash tui`.
///
/// Rules:
/// - `salesdash`                      -> `salesdash tui`
/// - `salesdash -f sales.csv ...`     -> `salesdash tui -f sales.csv ...`
/// - `salesdash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "advise" | "sample" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::CategoryRanking;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn dashboard(args: &[&str]) -> DashboardArgs {
        let mut full = vec!["salesdash", "tui"];
        full.extend_from_slice(args);
        match Cli::parse_from(full).command {
            Command::Tui(args) => args,
            other => panic!("expected tui, got {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_opens_the_tui() {
        assert_eq!(rewrite_args(argv(&["salesdash"])), argv(&["salesdash", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["salesdash", "-f", "x.csv"])),
            argv(&["salesdash", "tui", "-f", "x.csv"])
        );
        assert_eq!(
            rewrite_args(argv(&["salesdash", "report", "-f", "x.csv"])),
            argv(&["salesdash", "report", "-f", "x.csv"])
        );
        assert_eq!(rewrite_args(argv(&["salesdash", "--help"])), argv(&["salesdash", "--help"]));
    }

    #[test]
    fn profile_defaults_apply_without_flags() {
        let config = run_config_from_args(&dashboard(&["--domain", "bakery"])).unwrap();
        assert_eq!(config, RunConfig::for_domain(DataDomain::Bakery));
    }

    #[test]
    fn flags_override_profile_defaults() {
        let config = run_config_from_args(&dashboard(&[
            "--domain",
            "gift",
            "--forecast",
            "--horizon",
            "60",
            "--category-horizon",
            "14",
            "--categories",
            "all",
            "--no-daily-seasonality",
        ]))
        .unwrap();
        assert!(config.forecast);
        assert_eq!(config.settings.horizon, 60);
        assert_eq!(config.category_horizon, 14);
        assert_eq!(config.category_ranking, CategoryRanking::All);
        assert!(!config.settings.daily_seasonality);
    }

    #[test]
    fn invalid_interval_width_is_a_usage_error() {
        let err = run_config_from_args(&dashboard(&["--interval-width", "1.5"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn advise_is_refused_where_the_profile_turns_it_off() {
        for domain in [DataDomain::Segment, DataDomain::Bakery] {
            let err = ensure_advisory_enabled(domain.profile(), false).unwrap_err();
            assert_eq!(err.exit_code(), 2);
            assert!(ensure_advisory_enabled(domain.profile(), true).is_ok());
        }
        assert!(ensure_advisory_enabled(DataDomain::Gift.profile(), false).is_ok());
        assert!(ensure_advisory_enabled(DataDomain::Clothing.profile(), false).is_ok());
    }

    #[test]
    fn advise_refusal_runs_before_file_lookup() {
        let args = match Cli::parse_from(["salesdash", "advise", "-d", "bakery", "-f", "missing.csv", "--dry-run"]).command {
            Command::Advise(args) => args,
            other => panic!("expected advise, got {other:?}"),
        };
        let err = handle_advise(args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("--force"), "{err}");
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let err = run_config_from_args(&dashboard(&["--horizon", "0"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
