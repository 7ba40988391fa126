use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OrderDashboardApp {
    pub state: AppState,
}

impl OrderDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for OrderDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: status filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open an order export to start  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::kpi_strip(ui, &self.state);
                    ui.separator();

                    plot::revenue_by_date_plot(ui, &self.state);
                    ui.separator();

                    ui.columns(2, |cols: &mut [Ui]| {
                        plot::status_distribution_plot(&mut cols[0], &self.state);
                        plot::top_products_plot(&mut cols[1], &self.state);
                    });
                    ui.separator();

                    table::orders_table(ui, &self.state);

                    if self.state.summary.region_counts.is_some() {
                        ui.separator();
                        plot::region_plot(ui, &self.state);
                    }
                });
        });
    }
}
