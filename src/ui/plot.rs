use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Revenue per day
// ---------------------------------------------------------------------------

/// Line chart of revenue per calendar day.
pub fn revenue_by_date_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("📅 Revenue per day");

    let points: Vec<[f64; 2]> = state
        .summary
        .revenue_by_date
        .iter()
        .map(|d| [days_since_epoch(d.date), d.revenue])
        .collect();

    Plot::new("revenue_by_date")
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label("Revenue")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            date_label(mark.value)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Revenue")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(3.0));
        });
}

fn days_since_epoch(date: NaiveDate) -> f64 {
    date.signed_duration_since(NaiveDate::default()).num_days() as f64
}

fn date_label(days: f64) -> String {
    DateTime::from_timestamp((days * 86_400.0).round() as i64, 0)
        .map(|dt| dt.date_naive().format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Status distribution
// ---------------------------------------------------------------------------

/// One bar per status, coloured like the side panel.
pub fn status_distribution_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("📊 Orders by status");

    let rows = &state.summary.status_distribution;
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let color = state
                .status_colors
                .as_ref()
                .map(|c| c.color_for(&row.status))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, row.count as f64)
                .name(&row.status)
                .fill(color)
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = rows.iter().map(|r| r.status.clone()).collect();

    Plot::new("status_distribution")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Orders"));
        });
}

// ---------------------------------------------------------------------------
// Top products
// ---------------------------------------------------------------------------

/// Horizontal bars, best seller on top.
pub fn top_products_plot(ui: &mut Ui, state: &AppState) {
    ui.strong(format!(
        "🏆 Top {} products by quantity",
        state.config.summary.top_products
    ));

    let rows = &state.summary.top_products;
    let n = rows.len();
    // Arguments run bottom-up, so the largest quantity gets the highest slot.
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Bar::new((n - 1 - i) as f64, row.quantity as f64)
                .name(&row.product)
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = rows.iter().rev().map(|r| r.product.clone()).collect();

    Plot::new("top_products")
        .height(CHART_HEIGHT)
        .y_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .color(Color32::from_rgb(238, 77, 45))
                    .name("Quantity"),
            );
        });
}

// ---------------------------------------------------------------------------
// Orders per region
// ---------------------------------------------------------------------------

/// Bar chart of orders per region code. Draws nothing when the source has no
/// region column.
pub fn region_plot(ui: &mut Ui, state: &AppState) {
    let Some(rows) = &state.summary.region_counts else {
        return;
    };
    ui.strong("🗺 Orders per state");

    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Bar::new(i as f64, row.orders as f64)
                .name(&row.region)
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = rows.iter().map(|r| r.region.clone()).collect();

    Plot::new("orders_per_region")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_GREEN).name("Orders"));
        });
}

/// Axis labels for bar charts whose arguments are 0, 1, 2, … category slots.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let slot = mark.value.round();
        if (mark.value - slot).abs() > f64::EPSILON || slot < 0.0 {
            return String::new();
        }
        labels.get(slot as usize).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips_days() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 26).unwrap();
        assert_eq!(date_label(days_since_epoch(date)), "26/08/2024");
    }
}
