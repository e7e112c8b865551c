//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Forecast plot elements:
//! - observed daily totals: `o`
//! - point estimate: `-` line
//! - interval bounds: `.` lines

use crate::domain::Forecast;
use crate::metrics::Aggregate;

/// Longest label kept in bar charts.
const MAX_LABEL: usize = 20;

/// Horizontal bar chart of an aggregate, in its current order.
///
/// Bars are scaled to the largest value; negative values draw no bar.
pub fn render_bar_chart(title: &str, agg: &Aggregate, width: usize, fmt: &dyn Fn(f64) -> String) -> String {
    let mut out = format!("{title}\n");
    if agg.is_empty() {
        return out;
    }

    let labels: Vec<String> = agg.keys().map(|k| clip(k, MAX_LABEL)).collect();
    let values: Vec<String> = agg.entries().iter().map(|e| fmt(e.value)).collect();
    let label_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let value_w = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);
    let bar_w = width.saturating_sub(label_w + value_w + 2).max(10);

    let max = agg.entries().iter().map(|e| e.value).fold(0.0_f64, f64::max);

    for ((label, value), e) in labels.iter().zip(&values).zip(agg.entries()) {
        let n = if max > 0.0 && e.value > 0.0 {
            ((e.value / max) * bar_w as f64).round() as usize
        } else {
            0
        };
        let bar = "#".repeat(n.min(bar_w));
        out.push_str(&format!("{label:<label_w$} {bar:<bar_w$} {value:>value_w$}\n"));
    }
    out
}

/// Line plot of one forecast: history and horizon on a shared date axis.
pub fn render_forecast_plot(forecast: &Forecast, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (forecast.points.first(), forecast.points.last()) else {
        return format!("Plot: {} | no data\n", forecast.label);
    };
    let t_min = 0.0;
    let t_max = ((last.date - first.date).num_days() as f64).max(1.0);
    let t = |p: &crate::domain::ForecastPoint| (p.date - first.date).num_days() as f64;

    let (y_min, y_max) = y_range(forecast).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Point estimate first so it wins over the bounds.
    let yhat: Vec<(f64, f64)> = forecast.points.iter().map(|p| (t(p), p.yhat)).collect();
    let lower: Vec<(f64, f64)> = forecast.points.iter().map(|p| (t(p), p.yhat_lower)).collect();
    let upper: Vec<(f64, f64)> = forecast.points.iter().map(|p| (t(p), p.yhat_upper)).collect();
    draw_curve(&mut grid, &yhat, '-', t_min, t_max, y_min, y_max);
    draw_curve(&mut grid, &lower, '.', t_min, t_max, y_min, y_max);
    draw_curve(&mut grid, &upper, '.', t_min, t_max, y_min, y_max);

    for p in &forecast.points {
        if let Some(actual) = p.actual {
            let x = map_x(t(p), t_min, t_max, width);
            let y = map_y(actual, y_min, y_max, height);
            grid[y][x] = 'o';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | {}..{} | y=[{y_min:.2}, {y_max:.2}]\n",
        forecast.label, first.date, last.date
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('.');
        out
    }
}

fn y_range(forecast: &Forecast) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in &forecast.points {
        for y in [p.yhat_lower, p.yhat_upper, p.yhat].into_iter().chain(p.actual) {
            if y.is_finite() {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    t_min: f64,
    t_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, ch),
            None => {
                if grid[yy][x] == ' ' {
                    grid[yy][x] = ch;
                }
            }
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastPoint;
    use crate::metrics::AggregateEntry;
    use chrono::NaiveDate;

    fn point(day: u32, yhat: f64, band: f64, actual: Option<f64>) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            yhat,
            yhat_lower: yhat - band,
            yhat_upper: yhat + band,
            actual,
        }
    }

    #[test]
    fn forecast_plot_golden_snapshot_small() {
        let forecast = Forecast {
            label: "overall revenue".to_string(),
            points: vec![point(1, 0.0, 0.0, Some(0.0)), point(10, 10.0, 0.0, None)],
            history_len: 1,
            horizon: 1,
            sigma: 0.0,
        };

        let txt = render_forecast_plot(&forecast, 10, 5);
        let expected = concat!(
            "Plot: overall revenue | 2024-01-01..2024-01-10 | y=[-0.50, 10.50]\n",
            "        --\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn forecast_plot_draws_bounds_and_actuals() {
        let points = (1..=20)
            .map(|d| point(d, 50.0, 20.0, (d <= 10).then_some(50.0 + if d % 2 == 0 { 5.0 } else { -5.0 })))
            .collect();
        let forecast = Forecast {
            label: "x".to_string(),
            points,
            history_len: 10,
            horizon: 10,
            sigma: 5.0,
        };
        let txt = render_forecast_plot(&forecast, 40, 12);
        assert!(txt.contains('o'));
        assert!(txt.contains('.'));
        assert!(txt.contains('-'));
        assert_eq!(txt.lines().count(), 13);
    }

    #[test]
    fn bar_chart_scales_to_largest_value() {
        let agg = Aggregate::from_entries(vec![
            AggregateEntry {
                key: "Shirts".into(),
                value: 10.0,
            },
            AggregateEntry {
                key: "Hats".into(),
                value: 5.0,
            },
        ]);
        let txt = render_bar_chart("Revenue", &agg, 30, &|v| format!("{v:.0}"));
        let expected = format!(
            "Revenue\nShirts {} 10\nHats   {}{}  5\n",
            "#".repeat(20),
            "#".repeat(10),
            " ".repeat(10)
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_forecast_has_no_grid() {
        let forecast = Forecast {
            label: "empty".to_string(),
            points: Vec::new(),
            history_len: 0,
            horizon: 0,
            sigma: 0.0,
        };
        assert_eq!(render_forecast_plot(&forecast, 10, 5), "Plot: empty | no data\n");
    }
}
