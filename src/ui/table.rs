use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::format::format_currency;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// The filtered order lines, in dataset order.
pub fn orders_table(ui: &mut Ui, state: &AppState) {
    ui.strong("📋 Orders");

    let Some(view) = state.view() else {
        return;
    };
    if view.is_empty() {
        ui.label(RichText::new("No orders match the current filter.").weak());
        return;
    }

    let has_region = state.dataset.as_ref().is_some_and(|ds| ds.has_region);
    let columns = &state.config.columns;
    let symbol = state.config.currency_symbol.as_str();

    let mut headers = vec![
        columns.order_id.as_str(),
        columns.status.as_str(),
        columns.created_at.as_str(),
        columns.total_value.as_str(),
        columns.product.as_str(),
        columns.quantity.as_str(),
    ];
    if has_region {
        headers.push(columns.region.as_str());
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(420.0)
        .columns(Column::auto().at_least(60.0), headers.len() - 1)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in &headers {
                header.col(|ui| {
                    ui.strong(*name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let Some(rec) = view.get(row.index()) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(&rec.order_id);
                });
                row.col(|ui| {
                    ui.label(&rec.status);
                });
                row.col(|ui| {
                    ui.label(rec.created_at.to_string());
                });
                row.col(|ui| {
                    ui.label(format_currency(rec.total_value, symbol));
                });
                row.col(|ui| {
                    ui.label(&rec.product);
                });
                row.col(|ui| {
                    ui.label(rec.quantity.to_string());
                });
                if has_region {
                    row.col(|ui| {
                        ui.label(rec.region.as_deref().unwrap_or(""));
                    });
                }
            });
        });
}
