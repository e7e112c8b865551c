//! Plotters-powered forecast chart widget for Ratatui.
//!
//! Plotters gives us axis and label rendering for free; the output is drawn
//! into the Ratatui buffer through `plotters-ratatui-backend`.

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call. X values are
/// days since the first plotted date.
pub struct ForecastPlottersChart<'a> {
    /// Point estimate over history and horizon.
    pub yhat: &'a [(f64, f64)],
    pub lower: &'a [(f64, f64)],
    pub upper: &'a [(f64, f64)],
    /// Observed daily totals.
    pub actual: &'a [(f64, f64)],
    /// X position of the first future day, drawn as a vertical marker.
    pub horizon_start: Option<f64>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Date at `x = 0`; tick labels are printed as `MM-DD`.
    pub x_origin: NaiveDate,
    pub x_label: &'a str,
    pub y_label: String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for ForecastPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| {
                    (self.x_origin + Duration::days(v.round() as i64))
                        .format("%m-%d")
                        .to_string()
                })
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let band_color = RGBColor(128, 128, 128);
            let yhat_color = RGBColor(0, 255, 255); // cyan
            let actual_color = WHITE;
            let marker_color = RGBColor(255, 255, 0); // yellow

            chart.draw_series(LineSeries::new(self.lower.iter().copied(), &band_color))?;
            chart.draw_series(LineSeries::new(self.upper.iter().copied(), &band_color))?;

            if let Some(x) = self.horizon_start {
                chart.draw_series(LineSeries::new([(x, y0), (x, y1)], &marker_color))?;
            }

            chart.draw_series(LineSeries::new(self.yhat.iter().copied(), &yhat_color))?;

            // `Circle` radii are mis-scaled by the backend; pixels render as clean dots.
            chart.draw_series(
                self.actual
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), actual_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
