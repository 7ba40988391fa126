use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::DatasetCache;
use crate::color::StatusColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::{status_distribution, summarize, Summary};
use crate::data::filter::{default_selection, filtered_indices, FilterSelection, FilteredView};
use crate::data::loader::{load_orders, LoadError};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Memo of the last loaded source.
    cache: DatasetCache,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Arc<Dataset>>,

    /// Selected order statuses.
    pub selection: FilterSelection,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// KPIs and chart tables for `visible_indices`.
    pub summary: Summary,

    /// Per-status colours for the side panel and distribution chart.
    pub status_colors: Option<StatusColors>,

    /// Order lines per status over the whole dataset, shown next to each checkbox.
    pub status_totals: HashMap<String, usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(config.cache_ttl()),
            config,
            source: None,
            dataset: None,
            selection: FilterSelection::new(),
            visible_indices: Vec::new(),
            summary: Summary::default(),
            status_colors: None,
            status_totals: HashMap::new(),
            status_message: None,
        }
    }

    /// Load `path` (through the cache) and make it the current dataset.
    /// On failure the previous dataset stays on screen and the error is shown.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        let result = self.cache.get_or_load(path, |p| {
            load_orders(p, &self.config.columns, self.config.sheet.as_deref())
        });
        match result {
            Ok(dataset) => {
                self.source = Some(path.to_path_buf());
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Drop the cached copy and read the current source again.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let Some(path) = self.source.clone() else {
            return Ok(());
        };
        self.cache.invalidate();
        self.open(&path)
    }

    /// Ingest a newly loaded dataset, select every status and recompute.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = default_selection(&dataset);
        self.status_colors = Some(StatusColors::new(&dataset.statuses));
        self.status_totals = status_distribution(&FilteredView::all(&dataset))
            .into_iter()
            .map(|s| (s.status, s.count))
            .collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.selection);
        let view = FilteredView::from_indices(ds, self.visible_indices.clone());
        self.summary = summarize(&view, ds.has_region, &self.config.summary);
        log::debug!(
            "{} of {} order lines visible for {} selected statuses",
            self.visible_indices.len(),
            ds.len(),
            self.selection.len()
        );
    }

    /// The currently visible records.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_deref()
            .map(|ds| FilteredView::from_indices(ds, self.visible_indices.clone()))
    }

    /// Toggle a single status in the selection.
    pub fn toggle_status(&mut self, status: &str) {
        if !self.selection.remove(status) {
            self.selection.insert(status.to_string());
        }
        self.refilter();
    }

    /// Select every observed status.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = default_selection(ds);
            self.refilter();
        }
    }

    /// Deselect every status.
    pub fn select_none(&mut self) {
        self.selection.clear();
        self.refilter();
    }
}
