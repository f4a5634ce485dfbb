use chrono::{Duration, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::BucketColors;
use crate::data::aggregate::YearCounts;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Publication timeline (bar chart)
// ---------------------------------------------------------------------------

/// One bar per year present in `counts`.
pub fn timeline_chart(ui: &mut Ui, counts: &YearCounts) {
    if counts.is_empty() {
        ui.label("No dated entries to chart.");
        return;
    }

    let colors = BucketColors::new(counts);
    let bars: Vec<Bar> = counts
        .iter()
        .map(|(year, n)| {
            Bar::new(f64::from(year), n as f64)
                .name(year.to_string())
                .fill(colors.color_for(year))
                .width(0.7)
        })
        .collect();

    Plot::new("publication_timeline")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Entries")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Entries per year"));
        });
    ui.weak(format!("{} dated entries across {} years", counts.total(), counts.len()));
}

// ---------------------------------------------------------------------------
// Metric vs time (line chart)
// ---------------------------------------------------------------------------

/// Plot `(days since epoch, value)` points with date labels on the x axis.
pub fn metric_chart(ui: &mut Ui, name: &str, series: &[[f64; 2]]) {
    if series.is_empty() {
        ui.label("No records in the selected range.");
        return;
    }

    Plot::new("metric_vs_time")
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label(name)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .x_axis_formatter(|mark, _range| day_label(mark.value))
        .label_formatter(|_name, point| format!("{}\n{:.2}", day_label(point.x), point.y))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.to_vec()))
                    .name(name)
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series.to_vec()))
                    .radius(3.0)
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

/// Empty when `days` is not finite or lands outside the representable dates.
fn day_label(days: f64) -> String {
    if !days.is_finite() {
        return String::new();
    }
    Duration::try_days(days.round() as i64)
        .and_then(|offset| NaiveDate::default().checked_add_signed(offset))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_label_inverts_epoch_offset() {
        assert_eq!(day_label(19723.0), "2024-01-01");
        assert_eq!(day_label(0.0), "1970-01-01");
    }

    #[test]
    fn day_label_is_blank_far_outside_date_range() {
        assert_eq!(day_label(1.0e9), "");
        assert_eq!(day_label(-1.0e9), "");
        assert_eq!(day_label(1.0e300), "");
        assert_eq!(day_label(f64::NAN), "");
        assert_eq!(day_label(f64::INFINITY), "");
    }
}
