use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Float32Type, Float64Type, Int32Type, Int64Type, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Dataset, OrderRecord, Timestamp};
use super::normalize::{excel_serial_to_datetime, normalize_dates};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal failure while turning a source file into a [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook contains no sheets")]
    EmptyWorkbook,

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {reason} (got '{value}')")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
        reason: &'static str,
    },

    #[error("malformed source: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Schema: exact-match column names
// ---------------------------------------------------------------------------

/// Header names the loader looks for. All but `region` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub order_id: String,
    pub status: String,
    pub created_at: String,
    pub total_value: String,
    pub product: String,
    pub quantity: String,
    pub region: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            order_id: "ID do pedido".to_string(),
            status: "Status do pedido".to_string(),
            created_at: "Data de criação do pedido".to_string(),
            total_value: "Valor Total".to_string(),
            product: "Nome do Produto".to_string(),
            quantity: "Quantidade".to_string(),
            region: "UF".to_string(),
        }
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// Header row plus raw cells, common to every source format.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize an order export. This is the unit the dataset cache memoizes.
pub fn load_orders(
    path: &Path,
    columns: &ColumnNames,
    sheet: Option<&str>,
) -> Result<Dataset, LoadError> {
    let mut dataset = load_file(path, columns, sheet)?;
    let report = normalize_dates(&mut dataset);
    log::info!(
        "Loaded {} order lines ({} statuses) from {}; dates: {} parsed, {} unparsed, {} missing",
        dataset.len(),
        dataset.statuses.len(),
        path.display(),
        report.parsed,
        report.unparsed,
        report.missing
    );
    Ok(dataset)
}

/// Load an order export from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first sheet, or `sheet` when given
/// * `.csv`     – header row followed by one order line per record
/// * `.json`    – `[{ "ID do pedido": ..., "Status do pedido": ..., ... }, ...]`
/// * `.parquet` – one column per field
///
/// Timestamps are left as [`Timestamp::Raw`]; see [`load_orders`].
pub fn load_file(
    path: &Path,
    columns: &ColumnNames,
    sheet: Option<&str>,
) -> Result<Dataset, LoadError> {
    std::fs::metadata(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_spreadsheet(path, sheet)?,
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    build_dataset(&table, columns)
}

/// Map a raw table onto [`OrderRecord`]s. All-or-nothing: the first bad cell aborts.
pub fn build_dataset(table: &RawTable, columns: &ColumnNames) -> Result<Dataset, LoadError> {
    let find = |name: &str| table.headers.iter().position(|h| h == name);
    let require = |name: &str| find(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

    let id_idx = require(&columns.order_id)?;
    let status_idx = require(&columns.status)?;
    let date_idx = require(&columns.created_at)?;
    let value_idx = require(&columns.total_value)?;
    let product_idx = require(&columns.product)?;
    let qty_idx = require(&columns.quantity)?;
    let region_idx = find(&columns.region);

    let mut records = Vec::with_capacity(table.rows.len());

    for (i, row) in table.rows.iter().enumerate() {
        if row.iter().all(CellValue::is_blank) {
            continue;
        }
        let row_no = i + 1;
        let cell = |j: usize| row.get(j).unwrap_or(&EMPTY);

        let total_value = parse_amount(cell(value_idx), row_no, &columns.total_value)?;
        let quantity = parse_quantity(cell(qty_idx), row_no, &columns.quantity)?;
        let region = region_idx
            .map(|j| cell(j).to_text())
            .filter(|r| !r.is_empty());

        records.push(OrderRecord {
            order_id: cell(id_idx).to_text(),
            status: cell(status_idx).to_text(),
            created_at: Timestamp::Raw(cell(date_idx).clone()),
            total_value,
            product: cell(product_idx).to_text(),
            quantity,
            region,
        });
    }

    Ok(Dataset::from_records(records, region_idx.is_some()))
}

// ---------------------------------------------------------------------------
// Numeric cells
// ---------------------------------------------------------------------------

fn parse_amount(cell: &CellValue, row: usize, column: &str) -> Result<f64, LoadError> {
    let invalid = |reason| LoadError::InvalidCell {
        row,
        column: column.to_string(),
        value: cell.to_text(),
        reason,
    };
    let value = match cell {
        CellValue::Number(n) => *n,
        c if c.is_blank() => return Ok(0.0),
        CellValue::Text(s) => parse_decimal(s).ok_or_else(|| invalid("not a number"))?,
        _ => return Err(invalid("not a number")),
    };
    if !value.is_finite() {
        return Err(invalid("not a finite number"));
    }
    Ok(value)
}

fn parse_quantity(cell: &CellValue, row: usize, column: &str) -> Result<u64, LoadError> {
    let value = parse_amount(cell, row, column)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(LoadError::InvalidCell {
            row,
            column: column.to_string(),
            value: cell.to_text(),
            reason: "quantity must be a whole number >= 0",
        });
    }
    Ok(value as u64)
}

/// Parse a decimal written `1234.56`, `1,234.56`, `1.234,56` or `12,5`.
///
/// When both separators appear the last one is the decimal mark. A single kind of
/// separator is digit grouping when it splits the number into a 1-3 digit lead
/// and groups of exactly three (`1.234`, `1,000,000`); otherwise it is the
/// decimal mark.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let s = text.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let normalized = match (digits.rfind(','), digits.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => digits.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => digits.replace(',', ""),
        (Some(_), None) => ungroup(digits, ','),
        (None, Some(_)) => ungroup(digits, '.'),
        (None, None) => digits.to_string(),
    };
    format!("{sign}{normalized}").parse().ok()
}

fn ungroup(digits: &str, sep: char) -> String {
    if is_digit_grouping(digits, sep) {
        digits.replace(sep, "")
    } else {
        digits.replace(sep, ".")
    }
}

fn is_digit_grouping(digits: &str, sep: char) -> bool {
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let mut groups = digits.split(sep);
    let lead_ok = groups.next().is_some_and(|lead| {
        (1..=3).contains(&lead.len()) && !lead.starts_with('0') && all_digits(lead)
    });
    lead_ok && groups.all(|g| g.len() == 3 && all_digits(g))
}

// ---------------------------------------------------------------------------
// Spreadsheet reader
// ---------------------------------------------------------------------------

fn read_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<RawTable, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound(wanted.to_string()))?,
        None => sheet_names.first().cloned().ok_or(LoadError::EmptyWorkbook)?,
    };

    let range = workbook.worksheet_range(&name)?;
    let mut rows = range.rows();

    let headers = rows
        .next()
        .map(|r| r.iter().map(|c| spreadsheet_cell(c).to_text()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|r| r.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match excel_serial_to_datetime(dt.as_f64()) {
            Some(parsed) => CellValue::DateTime(parsed),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one order line per record.
/// Every cell is read as text; numeric columns are parsed in [`build_dataset`].
fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|v| {
                    if v.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(v.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "ID do pedido": "2408260001", "Status do pedido": "CONCLUÍDO", "Valor Total": 59.9, ... },
///   ...
/// ]
/// ```
///
/// Numeric dates in that layout are epoch milliseconds; see
/// [`crate::data::normalize::parse_cell`].
fn read_json(path: &Path) -> Result<RawTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".to_string()))?;

    let mut headers: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {} is not a JSON object", i + 1)))?;
        for key in obj.keys() {
            if !positions.contains_key(key) {
                positions.insert(key.clone(), headers.len());
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            let mut row = vec![CellValue::Empty; headers.len()];
            for (key, val) in obj {
                if let Some(&j) = positions.get(key) {
                    row[j] = json_cell(val);
                }
            }
            row
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); timestamp and date columns become
/// native date/time cells.
fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue, LoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Empty);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => CellValue::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => {
            CellValue::Number(col.as_primitive::<Float32Type>().value(row) as f64)
        }
        DataType::Float64 => CellValue::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Date32 => {
            let days = col.as_primitive::<Date32Type>().value(row) as i64;
            datetime_cell(epoch_to_datetime(days * 86_400, TimeUnit::Second).map(|d| d.naive_utc()))
        }
        DataType::Timestamp(unit, tz) => {
            let value = match unit {
                TimeUnit::Second => col.as_primitive::<TimestampSecondType>().value(row),
                TimeUnit::Millisecond => col.as_primitive::<TimestampMillisecondType>().value(row),
                TimeUnit::Microsecond => col.as_primitive::<TimestampMicrosecondType>().value(row),
                TimeUnit::Nanosecond => col.as_primitive::<TimestampNanosecondType>().value(row),
            };
            let instant = epoch_to_datetime(value, *unit);
            datetime_cell(match tz {
                Some(tz) => instant.map(|utc| to_local(utc, tz)),
                None => instant.map(|utc| utc.naive_utc()),
            })
        }
        _ => CellValue::Text(array_value_to_string(col, row)?),
    };
    Ok(cell)
}

fn datetime_cell(dt: Option<NaiveDateTime>) -> CellValue {
    dt.map(CellValue::DateTime).unwrap_or(CellValue::Empty)
}

fn epoch_to_datetime(value: i64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let (secs, nanos) = match unit {
        TimeUnit::Second => (value, 0),
        TimeUnit::Millisecond => (value.div_euclid(1_000), value.rem_euclid(1_000) * 1_000_000),
        TimeUnit::Microsecond => (value.div_euclid(1_000_000), value.rem_euclid(1_000_000) * 1_000),
        TimeUnit::Nanosecond => (value.div_euclid(1_000_000_000), value.rem_euclid(1_000_000_000)),
    };
    DateTime::from_timestamp(secs, nanos as u32)
}

/// Wall-clock time of `utc` in the column's zone: a fixed offset (`-03:00`) or an
/// IANA name (`America/Sao_Paulo`). Unknown zones keep UTC.
fn to_local(utc: DateTime<Utc>, tz: &str) -> NaiveDateTime {
    if let Ok(offset) = tz.parse::<FixedOffset>() {
        return utc.with_timezone(&offset).naive_local();
    }
    match tz.parse::<Tz>() {
        Ok(zone) => utc.with_timezone(&zone).naive_local(),
        Err(_) => {
            log::debug!("unknown timestamp zone '{tz}', keeping UTC");
            utc.naive_utc()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table(rows: Vec<Vec<CellValue>>) -> RawTable {
        let cols = ColumnNames::default();
        RawTable {
            headers: vec![
                cols.order_id,
                cols.status,
                cols.created_at,
                cols.total_value,
                cols.product,
                cols.quantity,
            ],
            rows,
        }
    }

    fn row(id: &str, status: &str, value: CellValue, qty: CellValue) -> Vec<CellValue> {
        vec![text(id), text(status), text("2024-08-26 10:00"), value, text("Capa"), qty]
    }

    #[test]
    fn builds_records_in_source_order() {
        let t = table(vec![
            row("1", "CONCLUÍDO", CellValue::Number(10.0), CellValue::Number(2.0)),
            row("2", "CANCELADO", text("5,50"), text("1")),
        ]);
        let ds = build_dataset(&t, &ColumnNames::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].order_id, "1");
        assert_eq!(ds.records[1].total_value, 5.5);
        assert_eq!(ds.records[1].quantity, 1);
        assert!(!ds.has_region);
        assert_eq!(ds.records[0].region, None);
        assert!(matches!(ds.records[0].created_at, Timestamp::Raw(_)));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let mut t = table(vec![]);
        t.headers.retain(|h| h != "Quantidade");
        let err = build_dataset(&t, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Quantidade"));
    }

    #[test]
    fn bad_cell_aborts_whole_load() {
        let t = table(vec![
            row("1", "CONCLUÍDO", CellValue::Number(10.0), CellValue::Number(1.0)),
            row("2", "CONCLUÍDO", text("abc"), CellValue::Number(1.0)),
        ]);
        let err = build_dataset(&t, &ColumnNames::default()).unwrap_err();
        match err {
            LoadError::InvalidCell { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Valor Total");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_or_fractional_quantity_rejected() {
        for qty in [CellValue::Number(-1.0), CellValue::Number(1.5)] {
            let t = table(vec![row("1", "CONCLUÍDO", CellValue::Number(1.0), qty)]);
            assert!(matches!(
                build_dataset(&t, &ColumnNames::default()),
                Err(LoadError::InvalidCell { .. })
            ));
        }
    }

    #[test]
    fn empty_numeric_cells_become_zero_and_blank_rows_skipped() {
        let t = table(vec![
            row("1", "CONCLUÍDO", CellValue::Empty, text("")),
            vec![CellValue::Empty; 6],
        ]);
        let ds = build_dataset(&t, &ColumnNames::default()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].total_value, 0.0);
        assert_eq!(ds.records[0].quantity, 0);
    }

    #[test]
    fn region_column_is_optional_per_cell() {
        let mut t = table(vec![
            row("1", "CONCLUÍDO", CellValue::Number(1.0), CellValue::Number(1.0)),
            row("2", "CONCLUÍDO", CellValue::Number(1.0), CellValue::Number(1.0)),
        ]);
        t.headers.push("UF".to_string());
        t.rows[0].push(text("SP"));
        t.rows[1].push(CellValue::Empty);
        let ds = build_dataset(&t, &ColumnNames::default()).unwrap();
        assert!(ds.has_region);
        assert_eq!(ds.records[0].region.as_deref(), Some("SP"));
        assert_eq!(ds.records[1].region, None);
    }

    #[test]
    fn decimal_comma_variants() {
        assert_eq!(parse_decimal("1234.56"), Some(1234.56));
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal("1,234.56"), Some(1234.56));
        assert_eq!(parse_decimal("R$"), None);
    }

    #[test]
    fn lone_separator_before_three_digits_is_grouping() {
        assert_eq!(parse_decimal("1.234"), Some(1234.0));
        assert_eq!(parse_decimal("1,234"), Some(1234.0));
        assert_eq!(parse_decimal("1.000"), Some(1000.0));
        assert_eq!(parse_decimal("1.234.567"), Some(1_234_567.0));
        assert_eq!(parse_decimal("-2.500"), Some(-2500.0));
        // Not a grouping pattern: the separator is the decimal mark.
        assert_eq!(parse_decimal("0.125"), Some(0.125));
        assert_eq!(parse_decimal("1234.567"), Some(1234.567));
        assert_eq!(parse_decimal("59.90"), Some(59.9));
        assert_eq!(parse_decimal("12,50"), Some(12.5));
        assert_eq!(parse_decimal("1.2.3"), None);
    }

    #[test]
    fn grouped_quantity_text_loads() {
        let t = table(vec![row("1", "CONCLUÍDO", text("1.234"), text("1.000"))]);
        let ds = build_dataset(&t, &ColumnNames::default()).unwrap();
        assert_eq!(ds.records[0].total_value, 1234.0);
        assert_eq!(ds.records[0].quantity, 1000);
    }

    #[test]
    fn epoch_conversion_handles_units() {
        let dt = epoch_to_datetime(1_724_666_400_000, TimeUnit::Millisecond).unwrap();
        assert_eq!(dt.naive_utc().to_string(), "2024-08-26 10:00:00");
        let dt = epoch_to_datetime(-1, TimeUnit::Second).unwrap();
        assert_eq!(dt.naive_utc().to_string(), "1969-12-31 23:59:59");
    }

    #[test]
    fn zoned_timestamps_use_local_wall_clock() {
        // 2024-08-27T01:00Z
        let utc = epoch_to_datetime(1_724_720_400, TimeUnit::Second).unwrap();
        assert_eq!(to_local(utc, "-03:00").to_string(), "2024-08-26 22:00:00");
        assert_eq!(to_local(utc, "America/Sao_Paulo").to_string(), "2024-08-26 22:00:00");
        assert_eq!(to_local(utc, "UTC").to_string(), "2024-08-27 01:00:00");
        assert_eq!(to_local(utc, "Nowhere/Special").to_string(), "2024-08-27 01:00:00");
    }
}
