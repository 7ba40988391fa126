/// Presentation layer: egui panels, charts and the order table.
pub mod panels;
pub mod plot;
pub mod table;
