use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// CellValue – a single raw cell as read from the source
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, before any column-specific interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Native date/time cell (spreadsheets, Parquet timestamps).
    DateTime(NaiveDateTime),
    Empty,
}

impl CellValue {
    /// Whether the cell carries no usable content (empty or whitespace-only text).
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as text the way an identifier or label column expects it:
    /// integral floats lose their `.0`, blanks become an empty string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "<empty>"),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp – the order creation time, before and after normalization
// ---------------------------------------------------------------------------

/// Creation timestamp of an order line.
///
/// The loader stores [`Timestamp::Raw`]; the normalizer rewrites every row to
/// one of the other three variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    /// Cell as loaded, not yet normalized.
    Raw(CellValue),
    Parsed(NaiveDateTime),
    /// Present but unparseable. Keeps the original text for display.
    Unparsed(String),
    Missing,
}

impl Timestamp {
    pub fn parsed(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Parsed(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Raw(cell) => write!(f, "{cell}"),
            Timestamp::Parsed(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Timestamp::Unparsed(text) => write!(f, "{text} (?)"),
            Timestamp::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// OrderRecord – one row of the export
// ---------------------------------------------------------------------------

/// A single order line (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_id: String,
    pub status: String,
    pub created_at: Timestamp,
    /// Total order value, currency-denominated. Absent cells load as 0.
    pub total_value: f64,
    pub product: String,
    pub quantity: u64,
    /// Region / state code, `None` when the column is absent or the cell empty.
    pub region: Option<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded export
// ---------------------------------------------------------------------------

/// The full parsed dataset with its distinct status values.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All order lines, in source order.
    pub records: Vec<OrderRecord>,
    /// Distinct status values, in first-seen order.
    pub statuses: Vec<String>,
    /// Whether the source carried the region column at all.
    pub has_region: bool,
}

impl Dataset {
    /// Build the status index from the loaded records.
    pub fn from_records(records: Vec<OrderRecord>, has_region: bool) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut statuses = Vec::new();
        for rec in &records {
            if seen.insert(rec.status.as_str()) {
                statuses.push(rec.status.clone());
            }
        }
        Dataset {
            records,
            statuses,
            has_region,
        }
    }

    /// Number of order lines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
