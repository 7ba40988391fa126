use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use super::model::{CellValue, Dataset, Timestamp};

/// Date-time layouts tried in order. ISO first, then the day-first layouts
/// typical of Brazilian marketplace exports.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];

/// Largest serial a spreadsheet can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.999_999;

/// Outcome counts of a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub parsed: usize,
    pub unparsed: usize,
    pub missing: usize,
}

/// Rewrite every raw creation timestamp in place. Never fails: cells that do
/// not parse become [`Timestamp::Unparsed`] and the row is kept.
pub fn normalize_dates(dataset: &mut Dataset) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for (i, rec) in dataset.records.iter_mut().enumerate() {
        if let Timestamp::Raw(cell) = &rec.created_at {
            rec.created_at = parse_cell(cell);
        }
        match &rec.created_at {
            Timestamp::Parsed(_) => report.parsed += 1,
            Timestamp::Unparsed(text) => {
                report.unparsed += 1;
                log::debug!("row {}: unparseable creation date '{text}'", i + 1);
            }
            Timestamp::Missing | Timestamp::Raw(_) => report.missing += 1,
        }
    }

    if report.unparsed > 0 {
        log::warn!(
            "{} of {} rows have an unparseable creation date; they are excluded from date charts",
            report.unparsed,
            dataset.len()
        );
    }
    report
}

/// Interpret one raw cell as a timestamp.
pub fn parse_cell(cell: &CellValue) -> Timestamp {
    match cell {
        CellValue::DateTime(dt) => Timestamp::Parsed(*dt),
        CellValue::Number(n) => match numeric_to_datetime(*n) {
            Some(dt) => Timestamp::Parsed(dt),
            None => Timestamp::Unparsed(cell.to_text()),
        },
        c if c.is_blank() => Timestamp::Missing,
        CellValue::Text(s) => match parse_datetime_text(s) {
            Some(dt) => Timestamp::Parsed(dt),
            None => Timestamp::Unparsed(s.trim().to_string()),
        },
        other => Timestamp::Unparsed(other.to_text()),
    }
}

/// Tolerant text parsing: RFC 3339, then the known date-time layouts, then date-only
/// layouts (midnight).
pub fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// A number in the date column: a spreadsheet serial when it fits the serial
/// range, otherwise epoch milliseconds (the JSON record exports write dates that way).
fn numeric_to_datetime(n: f64) -> Option<NaiveDateTime> {
    if let Some(dt) = excel_serial_to_datetime(n) {
        return Some(dt);
    }
    if !n.is_finite() || n.fract() != 0.0 || n.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(n as i64).map(|dt| dt.naive_utc())
}

/// Convert a spreadsheet serial (days since 1899-12-30, fraction = time of day).
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::days(days) + Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::order;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_common_export_layouts() {
        let expected = ymd_hms(2024, 8, 26, 10, 15, 0);
        for text in [
            "2024-08-26 10:15",
            "2024-08-26 10:15:00",
            "2024-08-26T10:15:00",
            "2024-08-26T10:15:00.000",
            "26/08/2024 10:15",
            "26/08/2024 10:15:00",
            "2024/08/26 10:15",
            " 2024-08-26 10:15 ",
        ] {
            assert_eq!(parse_datetime_text(text), Some(expected), "{text}");
        }
        assert_eq!(
            parse_datetime_text("2024-08-26T10:15:00-03:00"),
            Some(expected)
        );
        assert_eq!(
            parse_datetime_text("26/08/2024"),
            Some(ymd_hms(2024, 8, 26, 0, 0, 0))
        );
    }

    #[test]
    fn garbage_is_not_a_date() {
        assert_eq!(parse_datetime_text("ontem"), None);
        assert_eq!(parse_datetime_text("2024-13-45"), None);
        assert_eq!(parse_datetime_text("31/02/2024"), None);
    }

    #[test]
    fn excel_serials() {
        assert_eq!(
            excel_serial_to_datetime(45530.0),
            Some(ymd_hms(2024, 8, 26, 0, 0, 0))
        );
        assert_eq!(
            excel_serial_to_datetime(45530.5),
            Some(ymd_hms(2024, 8, 26, 12, 0, 0))
        );
        assert_eq!(excel_serial_to_datetime(-1.0), None);
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn large_numbers_are_epoch_millis() {
        assert_eq!(
            parse_cell(&CellValue::Number(1_724_667_300_000.0)),
            Timestamp::Parsed(ymd_hms(2024, 8, 26, 10, 15, 0))
        );
        assert_eq!(
            parse_cell(&CellValue::Number(45530.5)),
            Timestamp::Parsed(ymd_hms(2024, 8, 26, 12, 0, 0))
        );
        assert!(matches!(
            parse_cell(&CellValue::Number(1e13 + 0.5)),
            Timestamp::Unparsed(_)
        ));
    }

    #[test]
    fn normalization_keeps_rows_and_marks_sentinels() {
        let mut ds = Dataset::from_records(
            vec![
                crate::data::model::OrderRecord {
                    created_at: Timestamp::Raw(CellValue::Text("2024-08-26 10:15".into())),
                    ..order("CONCLUÍDO", 10.0)
                },
                crate::data::model::OrderRecord {
                    created_at: Timestamp::Raw(CellValue::Text("not a date".into())),
                    ..order("CONCLUÍDO", 20.0)
                },
                crate::data::model::OrderRecord {
                    created_at: Timestamp::Raw(CellValue::Empty),
                    ..order("CANCELADO", 30.0)
                },
            ],
            false,
        );

        let report = normalize_dates(&mut ds);

        assert_eq!(
            report,
            NormalizeReport {
                parsed: 1,
                unparsed: 1,
                missing: 1
            }
        );
        assert_eq!(ds.len(), 3);
        assert!(matches!(ds.records[0].created_at, Timestamp::Parsed(_)));
        assert_eq!(
            ds.records[1].created_at,
            Timestamp::Unparsed("not a date".to_string())
        );
        assert_eq!(ds.records[2].created_at, Timestamp::Missing);
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let mut ds = Dataset::from_records(
            vec![crate::data::model::OrderRecord {
                created_at: Timestamp::Raw(CellValue::Text("xx".into())),
                ..order("CONCLUÍDO", 1.0)
            }],
            false,
        );
        let first = normalize_dates(&mut ds);
        let second = normalize_dates(&mut ds);
        assert_eq!(first, second);
    }
}
