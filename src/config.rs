use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::aggregate::SummaryOptions;
use crate::data::loader::ColumnNames;

/// Dashboard settings. Every field falls back to its default when absent, so
/// a config file only needs to mention what it overrides:
///
/// ```json
/// {
///   "columns": { "region": "Estado" },
///   "summary": { "top_products": 5 },
///   "cache_ttl_secs": 300
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub columns: ColumnNames,
    pub summary: SummaryOptions,
    /// Prefix for revenue and ticket figures.
    pub currency_symbol: String,
    /// Worksheet to read from spreadsheet sources; first sheet when unset.
    pub sheet: Option<String>,
    /// Reload the source after this many seconds even if it did not change.
    pub cache_ttl_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            summary: SummaryOptions::default(),
            currency_symbol: "R$".to_string(),
            sheet: None,
            cache_ttl_secs: None,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid dashboard config")
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }
}
