use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::format::format_currency;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – status filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let n_selected = state.selection.len();
    let n_total = dataset.statuses.len();
    ui.strong(format!("Order status  ({n_selected}/{n_total})"));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    let mut toggled: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for status in &dataset.statuses {
                let mut checked = state.selection.contains(status);

                let count = state.status_totals.get(status).copied().unwrap_or(0);
                let mut text = RichText::new(format!("{status}  ({count})"));
                if let Some(colors) = &state.status_colors {
                    text = text.color(colors.color_for(status));
                }

                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(status.clone());
                }
            }
        });

    // Recompute once, after the loop released its borrows.
    if let Some(status) = toggled {
        state.toggle_status(&status);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_reload = state.source.is_some();
            if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                // Errors are already reported through `status_message`.
                let _ = state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} order lines loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI strip
// ---------------------------------------------------------------------------

/// Five headline tiles across the top of the central panel.
pub fn kpi_strip(ui: &mut Ui, state: &AppState) {
    let kpis = &state.summary.kpis;
    let symbol = state.config.currency_symbol.as_str();

    let tiles = [
        ("📦 Total orders", kpis.total_orders.to_string()),
        ("✅ Completed", kpis.completed.to_string()),
        ("❌ Cancelled", kpis.cancelled.to_string()),
        ("💰 Revenue", format_currency(kpis.revenue, symbol)),
        ("🎯 Average ticket", format_currency(kpis.average_ticket, symbol)),
    ];

    ui.columns(tiles.len(), |columns: &mut [Ui]| {
        for (col, (label, value)) in columns.iter_mut().zip(tiles.iter()) {
            col.group(|ui: &mut Ui| {
                ui.label(RichText::new(*label).weak());
                ui.label(RichText::new(value).heading().strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open order export")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // Errors are already reported through `status_message`.
        let _ = state.open(&path);
    }
}
