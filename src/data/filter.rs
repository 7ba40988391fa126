use std::collections::BTreeSet;

use super::model::{Dataset, OrderRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which statuses are selected
// ---------------------------------------------------------------------------

/// Set of selected status values. An empty set selects nothing.
pub type FilterSelection = BTreeSet<String>;

/// Initialise a [`FilterSelection`] with every observed status (i.e., show everything).
pub fn default_selection(dataset: &Dataset) -> FilterSelection {
    dataset.statuses.iter().cloned().collect()
}

/// Return indices of records whose status is selected, in dataset order.
///
/// Statuses in `selection` that never occur in the dataset match nothing.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    if selection.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.contains(&rec.status))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – a borrowed, stable subsequence of the dataset
// ---------------------------------------------------------------------------

/// The records that passed the status filter. Never mutates the dataset.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Build a view from precomputed indices (e.g. cached in application state).
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    /// A view over every record.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self::from_indices(dataset, (0..dataset.len()).collect())
    }

    pub fn records(&self) -> impl Iterator<Item = &'a OrderRecord> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    pub fn get(&self, position: usize) -> Option<&'a OrderRecord> {
        self.indices
            .get(position)
            .map(|&i| &self.dataset.records[i])
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Apply the status filter.
pub fn filter_view<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    FilteredView::from_indices(dataset, filtered_indices(dataset, selection))
}
