//! Reporting dashboard for e-commerce order exports.
//!
//! The [`data`] module holds the load → normalize → filter → aggregate
//! pipeline; everything else is the egui front end around it.

pub mod app;
pub mod cache;
pub mod color;
pub mod config;
pub mod data;
pub mod format;
pub mod state;
pub mod ui;
