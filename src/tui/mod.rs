//! Ratatui-based terminal UI.
//!
//! The dashboard loads one CSV, runs the pipeline once, and presents the
//! results in tabs: headline metrics, ranked breakdowns, the overall forecast,
//! per-category forecasts and the inventory split.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Terminal,
};
use tracing::info;

use crate::app::pipeline::{ForecastReport, RunOutput};
use crate::domain::{DomainProfile, Forecast, RunConfig};
use crate::error::AppError;
use crate::forecast::ForecastOutcome;
use crate::metrics::Aggregate;
use crate::report::fmt_thousands;

mod plotters_chart;

use plotters_chart::ForecastPlottersChart;

/// Start the TUI on `path`.
///
/// The pipeline runs before the terminal is switched to raw mode, so load and
/// schema errors print like any other CLI error.
pub fn run(path: PathBuf, config: RunConfig) -> Result<(), AppError> {
    let output = crate::app::pipeline::run_file(&path, &config)?;
    info!(path = %path.display(), rows = output.table.records.len(), "dashboard loaded");

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(path, config, output);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Breakdowns,
    Forecast,
    Categories,
    Inventory,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Overview, Tab::Breakdowns, Tab::Forecast, Tab::Categories, Tab::Inventory];

    fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Breakdowns => "Breakdowns",
            Tab::Forecast => "Forecast",
            Tab::Categories => "Categories",
            Tab::Inventory => "Inventory",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

struct App {
    path: PathBuf,
    config: RunConfig,
    output: RunOutput,
    tab: Tab,
    /// Selected row on the Breakdowns and Categories tabs.
    selected: usize,
    export_dir: PathBuf,
    status: String,
}

impl App {
    fn new(path: PathBuf, config: RunConfig, output: RunOutput) -> Self {
        Self {
            path,
            config,
            output,
            tab: Tab::Overview,
            selected: 0,
            export_dir: PathBuf::from("."),
            status: "Ready.".to_string(),
        }
    }

    fn profile(&self) -> &'static DomainProfile {
        self.config.domain.profile()
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::Left | KeyCode::BackTab => self.switch_tab(self.tab.prev()),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let rows = self.selectable_rows();
                if self.selected + 1 < rows {
                    self.selected += 1;
                }
            }
            KeyCode::Char('e') => self.export_forecast(),
            _ => {}
        }
        false
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected = 0;
    }

    fn selectable_rows(&self) -> usize {
        match self.tab {
            Tab::Breakdowns => self.breakdowns().len(),
            Tab::Categories => self.forecasts().map(|fc| fc.categories.len()).unwrap_or(0),
            _ => 0,
        }
    }

    fn forecasts(&self) -> Option<&ForecastReport> {
        self.output.forecasts.as_ref()
    }

    fn breakdowns(&self) -> Vec<(String, &Aggregate)> {
        let s = &self.output.summary;
        let mut out = vec![
            (format!("Top {} products", s.top_products.len()), &s.top_products),
            ("Category revenue".to_string(), &s.category_revenue),
            ("Payment methods".to_string(), &s.payment_counts),
            ("Segment revenue".to_string(), &s.segment_revenue),
            ("Gender revenue".to_string(), &s.gender_revenue),
            ("Age group revenue".to_string(), &s.age.revenue),
            ("Weekday revenue".to_string(), &s.weekday_revenue),
            ("Monthly revenue".to_string(), &s.monthly_revenue),
        ];
        out.retain(|(_, agg)| !agg.is_empty());
        out
    }

    fn export_path(&self) -> PathBuf {
        self.export_dir
            .join(format!("{}_forecast.csv", self.profile().file_stem))
    }

    fn export_forecast(&mut self) {
        let Some(forecast) = self.forecasts().and_then(|fc| fc.overall.forecast()) else {
            self.status = "No overall forecast to export.".to_string();
            return;
        };
        let path = self.export_path();
        let status = match crate::io::export::write_forecast_csv(&path, forecast) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
        self.status = status;
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_tabs(frame, chunks[0]);
        match self.tab {
            Tab::Overview => self.draw_overview(frame, chunks[1]),
            Tab::Breakdowns => self.draw_breakdowns(frame, chunks[1]),
            Tab::Forecast => self.draw_forecast(frame, chunks[1]),
            Tab::Categories => self.draw_categories(frame, chunks[1]),
            Tab::Inventory => self.draw_inventory(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let file = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} | {file}", self.profile().title)),
            )
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn draw_overview(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let profile = self.profile();
        let s = &self.output.summary;
        let money = |v: f64| format!("{}{}", profile.currency, fmt_thousands(v));

        let mut lines = vec![
            metric_line("Total Revenue", money(s.total_revenue)),
            metric_line("Total Units Sold", fmt_thousands(s.total_units)),
            metric_line("Rows", s.row_count.to_string()),
            metric_line("Avg Monthly Revenue", money(s.average_monthly_revenue)),
        ];
        if let Some(r) = s.average_rating {
            lines.push(metric_line("Average Rating", format!("{r:.2}")));
        }
        if let Some((first, last)) = self.output.table.date_range() {
            lines.push(metric_line("Dates", format!("{first} .. {last}")));
        }
        lines.push(Line::raw(""));
        for l in crate::report::format_insights(&self.output.insights, profile).lines() {
            lines.push(Line::raw(l.to_string()));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Summary").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_breakdowns(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(0)])
            .split(area);

        let breakdowns = self.breakdowns();
        let rows: Vec<Row> = breakdowns.iter().map(|(name, _)| Row::new(vec![name.clone()])).collect();
        let table = Table::new(rows, [Constraint::Min(10)])
            .block(Block::default().title("Breakdown").borders(Borders::ALL))
            .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, chunks[0], &mut state);

        let Some((name, agg)) = breakdowns.get(self.selected) else {
            render_message(frame, chunks[1], "No breakdowns for this dataset.");
            return;
        };
        let currency = self.profile().currency;
        let is_count = std::ptr::eq(*agg, &self.output.summary.payment_counts);
        let fmt = |v: f64| {
            if is_count {
                format!("{v:.0}")
            } else {
                format!("{currency}{}", fmt_thousands(v))
            }
        };
        render_bar_chart(frame, chunks[1], name, agg, &fmt);
    }

    fn draw_forecast(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(fc) = self.forecasts() else {
            render_message(frame, area, "Forecasting is disabled for this run (use --forecast).");
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(area);

        let title = format!("Overall revenue forecast (next {} days)", fc.overall_horizon);
        match &fc.overall {
            ForecastOutcome::Forecast(f) => {
                self.draw_forecast_chart(frame, chunks[0], &title, f);
                let money = |v: f64| format!("{}{}", self.profile().currency, fmt_thousands(v));
                let lines = vec![
                    metric_line("Next 30 days", money(f.next_days_sum(30))),
                    metric_line(&format!("Next {} days", f.horizon), money(f.horizon_sum())),
                ];
                frame.render_widget(
                    Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL)),
                    chunks[1],
                );
            }
            other => render_message(frame, area, &outcome_text(other)),
        }
    }

    fn draw_categories(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(fc) = self.forecasts() else {
            render_message(frame, area, "Forecasting is disabled for this run (use --forecast).");
            return;
        };
        if fc.categories.is_empty() {
            render_message(frame, area, "No categories in this dataset.");
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(fc.categories.len().min(8) as u16 + 3), Constraint::Min(0)])
            .split(area);

        let currency = self.profile().currency;
        let rows: Vec<Row> = fc
            .category_revenue
            .iter()
            .zip(&fc.category_quantity)
            .map(|(rev, qty)| {
                let revenue = match rev.outcome.forecast() {
                    Some(f) => format!("{currency}{}", fmt_thousands(f.horizon_sum())),
                    None => "skipped".to_string(),
                };
                let quantity = match qty.outcome.forecast() {
                    Some(f) => fmt_thousands(f.horizon_sum()),
                    None => outcome_text(&qty.outcome),
                };
                Row::new(vec![Cell::from(rev.category.clone()), Cell::from(revenue), Cell::from(quantity)])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(25), Constraint::Percentage(45)])
            .header(
                Row::new(vec!["category", "revenue", "quantity"])
                    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
            )
            .block(
                Block::default()
                    .title(format!("Category forecasts (next {} days)", fc.category_horizon))
                    .borders(Borders::ALL),
            )
            .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, chunks[0], &mut state);

        let Some(selected) = fc.category_revenue.get(self.selected) else {
            return;
        };
        let title = format!("{} revenue", selected.category);
        match &selected.outcome {
            ForecastOutcome::Forecast(f) => self.draw_forecast_chart(frame, chunks[1], &title, f),
            other => render_message(frame, chunks[1], &outcome_text(other)),
        }
    }

    fn draw_inventory(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(fc) = self.forecasts() else {
            render_message(frame, area, "Forecasting is disabled for this run (use --forecast).");
            return;
        };
        let Some(split) = &fc.inventory else {
            render_message(frame, area, crate::report::NO_CATEGORIES_FORECAST);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let decimals = split.decimals as usize;
        let rows: Vec<Row> = split
            .shares
            .iter()
            .map(|s| {
                Row::new(vec![
                    s.category.clone(),
                    fmt_thousands(s.forecast_quantity),
                    format!("{:.*}%", decimals, s.percent),
                ])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)])
            .header(
                Row::new(vec!["category", "quantity", "share"])
                    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
            )
            .block(
                Block::default()
                    .title(format!("Inventory split (next {} days)", fc.category_horizon))
                    .borders(Borders::ALL),
            );
        frame.render_widget(table, chunks[0]);

        let agg = Aggregate::from_entries(
            split
                .shares
                .iter()
                .map(|s| crate::metrics::AggregateEntry {
                    key: s.category.clone(),
                    value: s.percent,
                })
                .collect(),
        );
        render_bar_chart(frame, chunks[1], "Share of forecast demand", &agg, &|v| format!("{v:.*}%", decimals));
    }

    fn draw_forecast_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, forecast: &Forecast) {
        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(series) = ChartSeries::from_forecast(forecast) else {
            render_message(frame, inner, "Nothing to plot.");
            return;
        };

        let widget = ForecastPlottersChart {
            yhat: &series.yhat,
            lower: &series.lower,
            upper: &series.upper,
            actual: &series.actual,
            horizon_start: series.horizon_start,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_origin: series.origin,
            x_label: "date",
            y_label: self.profile().currency.to_string(),
            fmt_y: fmt_thousands,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ tab  ↑/↓ select  e export forecast  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Plot-ready series for one forecast. X is days since the first date.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    origin: chrono::NaiveDate,
    yhat: Vec<(f64, f64)>,
    lower: Vec<(f64, f64)>,
    upper: Vec<(f64, f64)>,
    actual: Vec<(f64, f64)>,
    horizon_start: Option<f64>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl ChartSeries {
    fn from_forecast(forecast: &Forecast) -> Option<Self> {
        let origin = forecast.points.first()?.date;
        let x = |d: chrono::NaiveDate| (d - origin).num_days() as f64;

        let yhat: Vec<(f64, f64)> = forecast.points.iter().map(|p| (x(p.date), p.yhat)).collect();
        let lower: Vec<(f64, f64)> = forecast.points.iter().map(|p| (x(p.date), p.yhat_lower)).collect();
        let upper: Vec<(f64, f64)> = forecast.points.iter().map(|p| (x(p.date), p.yhat_upper)).collect();
        let actual: Vec<(f64, f64)> = forecast
            .points
            .iter()
            .filter_map(|p| p.actual.map(|a| (x(p.date), a)))
            .collect();
        let horizon_start = forecast.future().first().map(|p| x(p.date));

        let x_max = yhat.last().map(|&(t, _)| t).unwrap_or(0.0).max(1.0);

        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(_, y) in lower.iter().chain(&upper).chain(&actual).chain(&yhat) {
            if y.is_finite() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
            y_min = 0.0;
            y_max = y_max.max(1.0);
        }
        let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

        Some(Self {
            origin,
            yhat,
            lower,
            upper,
            actual,
            horizon_start,
            x_bounds: [0.0, x_max],
            y_bounds: [y_min - pad, y_max + pad],
        })
    }
}

fn metric_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<22}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ])
}

fn outcome_text(outcome: &ForecastOutcome) -> String {
    match outcome {
        ForecastOutcome::Forecast(f) => format!("{} rows", f.points.len()),
        ForecastOutcome::Skipped {
            distinct_dates,
            required,
        } => format!("Not enough data to forecast ({distinct_dates} dates, need {required})."),
        ForecastOutcome::Failed(message) => format!("Forecast failed: {message}"),
    }
}

fn render_message(frame: &mut ratatui::Frame<'_>, area: Rect, message: &str) {
    let p = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

/// Horizontal bars, one per aggregate entry; negative values draw as zero.
fn render_bar_chart(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, agg: &Aggregate, fmt: &dyn Fn(f64) -> String) {
    let bars: Vec<Bar> = agg
        .entries()
        .iter()
        .map(|e| {
            Bar::default()
                .label(Line::from(e.key.clone()))
                .value(e.value.max(0.0).round() as u64)
                .text_value(fmt(e.value))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::White))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataDomain, ForecastPoint, SalesRecord, SalesTable};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn output(days: i64) -> (RunConfig, RunOutput) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut records = Vec::new();
        for i in 0..days {
            for (cat, qty) in [("Shirts", 3.0), ("Hats", 1.0)] {
                let mut r = SalesRecord::new(records.len() + 2, start + chrono::Duration::days(i), qty, qty * 100.0);
                r.category = Some(cat.to_string());
                records.push(r);
            }
        }
        let table = SalesTable {
            domain: DataDomain::Segment,
            headers: Vec::new(),
            records,
        };
        let config = RunConfig::for_domain(DataDomain::Segment);
        let out = crate::app::pipeline::run_dashboard(table, &config).unwrap();
        (config, out)
    }

    fn app(days: i64) -> App {
        let (config, out) = output(days);
        App::new(PathBuf::from("sales.csv"), config, out)
    }

    #[test]
    fn tabs_cycle_in_both_directions() {
        let mut app = app(5);
        assert_eq!(app.tab, Tab::Overview);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.tab, Tab::Inventory);
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.tab, Tab::Breakdowns);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn selection_is_clamped_to_rows() {
        let mut app = app(40);
        app.switch_tab(Tab::Categories);
        for _ in 0..5 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn export_writes_overall_forecast() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(40);
        app.export_dir = dir.path().to_path_buf();
        app.handle_key(KeyCode::Char('e'));
        let path = app.export_path();
        assert!(app.status.starts_with("Wrote"), "{}", app.status);
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("date,yhat,yhat_lower,yhat_upper"));
    }

    #[test]
    fn export_without_forecast_reports_status() {
        let mut app = app(5);
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.status, "No overall forecast to export.");
    }

    #[test]
    fn text_tabs_render_without_panicking() {
        let mut app = app(5);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        for tab in [Tab::Overview, Tab::Breakdowns, Tab::Inventory] {
            app.switch_tab(tab);
            terminal.draw(|f| app.draw(f)).unwrap();
        }
    }

    #[test]
    fn chart_series_marks_the_horizon() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let p = |day, actual| ForecastPoint {
            date: d(day),
            yhat: 10.0,
            yhat_lower: 8.0,
            yhat_upper: 12.0,
            actual,
        };
        let forecast = Forecast {
            label: "x".into(),
            points: vec![p(1, Some(9.0)), p(3, Some(11.0)), p(4, None), p(5, None)],
            history_len: 2,
            horizon: 2,
            sigma: 1.0,
        };
        let s = ChartSeries::from_forecast(&forecast).unwrap();
        assert_eq!(s.origin, d(1));
        assert_eq!(s.actual, vec![(0.0, 9.0), (2.0, 11.0)]);
        assert_eq!(s.horizon_start, Some(3.0));
        assert_eq!(s.x_bounds, [0.0, 4.0]);
        assert!(s.y_bounds[0] < 8.0 && s.y_bounds[1] > 12.0);
    }
}
