//! Turns a `RawSheet` into normalized day records.
//!
//! The only fatal conditions live here: a sheet with no data rows, a missing
//! date column, or a date column in which not a single cell parses. Every
//! other defect degrades gracefully: missing numeric columns are synthesized
//! as zeros with a warning, and unparsable numeric cells become `0.0`.

use crate::model::{Cell, Column, DayRecord, RawSheet};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// A fatal defect in the uploaded sheet. Processing cannot continue.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("the sheet contains no data rows")]
    EmptySheet,

    #[error("the required date column 'Datum' is missing")]
    MissingDateColumn,

    #[error("no cell in the 'Datum' column holds a parsable date")]
    NoParsableDates,
}

/// A non-fatal defect: a required numeric column was absent and has been
/// filled with zeros. Collected and surfaced alongside the output, never
/// thrown.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Warning {
    pub column: Column,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column '{}' is missing and was filled with zeros",
            self.column
        )
    }
}

/// The normalizer's output: one record per raw row, in input order, plus any
/// warnings about synthesized columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub days: Vec<DayRecord>,
    pub warnings: Vec<Warning>,
}

/// Normalizes the raw table: canonicalizes headers, guarantees every required
/// column, coerces cell types, and parses dates.
///
/// Row order is preserved and no rows are dropped. A row whose date cell does
/// not parse keeps a `None` date; it will show up in the per-day output but
/// cannot be grouped into a month.
pub fn normalize(sheet: &RawSheet) -> Result<Normalized, ValidationError> {
    if sheet.is_empty() {
        return Err(ValidationError::EmptySheet);
    }

    let index: HashMap<Column, usize> = sheet
        .headers()
        .iter()
        .enumerate()
        .filter_map(|(ix, header)| Column::from_header(header).map(|column| (column, ix)))
        .collect();

    if !index.contains_key(&Column::Datum) {
        return Err(ValidationError::MissingDateColumn);
    }

    let warnings: Vec<Warning> = Column::NUMERIC
        .iter()
        .filter(|column| !index.contains_key(*column))
        .map(|&column| Warning { column })
        .collect();
    for warning in &warnings {
        warn!("{warning}");
    }

    let days: Vec<DayRecord> = sheet
        .rows()
        .iter()
        .enumerate()
        .map(|(row_ix, row)| DayRecord {
            datum: date_value(&index, row, row_ix),
            umsatz_speisen: numeric_value(&index, row, Column::UmsatzSpeisen, row_ix),
            umsatz_getraenke: numeric_value(&index, row, Column::UmsatzGetraenke, row_ix),
            ek_speisen: numeric_value(&index, row, Column::EkSpeisen, row_ix),
            ek_getraenke: numeric_value(&index, row, Column::EkGetraenke, row_ix),
            personal_service: numeric_value(&index, row, Column::PersonalService, row_ix),
            personal_kueche: numeric_value(&index, row, Column::PersonalKueche, row_ix),
            stunden: numeric_value(&index, row, Column::Stunden, row_ix),
            gaeste: numeric_value(&index, row, Column::Gaeste, row_ix),
        })
        .collect();

    if days.iter().all(|day| day.datum.is_none()) {
        return Err(ValidationError::NoParsableDates);
    }

    Ok(Normalized { days, warnings })
}

fn date_value(index: &HashMap<Column, usize>, row: &[Cell], row_ix: usize) -> Option<NaiveDate> {
    let cell = index.get(&Column::Datum).and_then(|&ix| row.get(ix))?;
    let parsed = cell.as_date();
    if parsed.is_none() && !cell.is_empty() {
        debug!("row {}: date cell {cell:?} did not parse", row_ix + 2);
    }
    parsed
}

fn numeric_value(
    index: &HashMap<Column, usize>,
    row: &[Cell],
    column: Column,
    row_ix: usize,
) -> f64 {
    let cell = match index.get(&column).and_then(|&ix| row.get(ix)) {
        Some(cell) => cell,
        // Synthesized column, or a row shorter than the header row.
        None => return 0.0,
    };
    match cell.as_number() {
        Some(value) => value,
        None => {
            if !cell.is_empty() {
                debug!(
                    "row {}: cell {cell:?} in column '{column}' did not parse; using 0.0",
                    row_ix + 2
                );
            }
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{full_sheet, CANONICAL_HEADERS};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_clean_sheet() {
        let sheet = full_sheet(vec![
            vec!["2024-03-01", "100", "50", "30", "10", "20", "10", "8", "40"],
            vec!["2024-03-02", "200", "80", "60", "20", "25", "15", "9", "70"],
        ]);
        let normalized = normalize(&sheet).unwrap();
        assert!(normalized.warnings.is_empty());
        assert_eq!(normalized.days.len(), 2);

        let first = &normalized.days[0];
        assert_eq!(first.datum, Some(date(2024, 3, 1)));
        assert_eq!(first.umsatz_speisen, 100.0);
        assert_eq!(first.gaeste, 40.0);
    }

    #[test]
    fn test_normalize_messy_headers() {
        let sheet = RawSheet::from_text_rows(vec![
            vec![
                " Datum ",
                "Umsatz Speisen",
                "Umsatz Getraenke",
                "EK Speisen",
                "EK Getraenke",
                "Personal Service",
                "Personal Kueche",
                " Stunden",
                "Gaeste ",
            ],
            vec!["2024-03-01", "100", "50", "30", "10", "20", "10", "8", "40"],
        ]);
        let normalized = normalize(&sheet).unwrap();
        assert!(normalized.warnings.is_empty());
        assert_eq!(normalized.days[0].umsatz_getraenke, 50.0);
        assert_eq!(normalized.days[0].personal_kueche, 10.0);
    }

    #[test]
    fn test_normalize_unparsable_numeric_cells_become_zero() {
        let sheet = full_sheet(vec![vec![
            "2024-03-01",
            "abc",
            "",
            "30",
            "n/a",
            "20",
            "10",
            "8",
            "40",
        ]]);
        let normalized = normalize(&sheet).unwrap();
        let day = &normalized.days[0];
        assert_eq!(day.umsatz_speisen, 0.0);
        assert_eq!(day.umsatz_getraenke, 0.0);
        assert_eq!(day.ek_speisen, 30.0);
        assert_eq!(day.ek_getraenke, 0.0);
        assert!(normalized.warnings.is_empty());
    }

    #[test]
    fn test_normalize_missing_numeric_column_warns_once() {
        let headers: Vec<&str> = CANONICAL_HEADERS
            .iter()
            .copied()
            .filter(|h| *h != "Gaeste")
            .collect();
        let sheet = RawSheet::from_text_rows(vec![
            headers,
            vec!["2024-03-01", "100", "50", "30", "10", "20", "10", "8"],
            vec!["2024-03-02", "200", "80", "60", "20", "25", "15", "9"],
        ]);
        let normalized = normalize(&sheet).unwrap();
        assert_eq!(
            normalized.warnings,
            vec![Warning {
                column: Column::Gaeste
            }]
        );
        assert!(normalized.days.iter().all(|day| day.gaeste == 0.0));
    }

    #[test]
    fn test_normalize_empty_sheet_is_fatal() {
        let sheet = RawSheet::from_text_rows(vec![CANONICAL_HEADERS.to_vec()]);
        assert_eq!(normalize(&sheet), Err(ValidationError::EmptySheet));
    }

    #[test]
    fn test_normalize_missing_date_column_is_fatal() {
        let sheet = RawSheet::from_text_rows(vec![
            vec!["Umsatz_Speisen", "Umsatz_Getraenke"],
            vec!["100", "50"],
        ]);
        assert_eq!(normalize(&sheet), Err(ValidationError::MissingDateColumn));
    }

    #[test]
    fn test_normalize_all_dates_unparsable_is_fatal() {
        let sheet = full_sheet(vec![
            vec!["gestern", "100", "50", "30", "10", "20", "10", "8", "40"],
            vec!["", "200", "80", "60", "20", "25", "15", "9", "70"],
        ]);
        assert_eq!(normalize(&sheet), Err(ValidationError::NoParsableDates));
    }

    #[test]
    fn test_normalize_keeps_null_date_rows() {
        let sheet = full_sheet(vec![
            vec!["2024-03-01", "100", "50", "30", "10", "20", "10", "8", "40"],
            vec!["kaputt", "200", "80", "60", "20", "25", "15", "9", "70"],
        ]);
        let normalized = normalize(&sheet).unwrap();
        assert_eq!(normalized.days.len(), 2);
        assert_eq!(normalized.days[1].datum, None);
        assert_eq!(normalized.days[1].umsatz_speisen, 200.0);
    }

    #[test]
    fn test_normalize_german_formats() {
        let sheet = full_sheet(vec![vec![
            "01.03.2024",
            "1.234,56",
            "50,5",
            "30",
            "10",
            "20",
            "10",
            "8",
            "40",
        ]]);
        let normalized = normalize(&sheet).unwrap();
        let day = &normalized.days[0];
        assert_eq!(day.datum, Some(date(2024, 3, 1)));
        assert_eq!(day.umsatz_speisen, 1234.56);
        assert_eq!(day.umsatz_getraenke, 50.5);
    }

    #[test]
    fn test_normalize_short_rows() {
        let sheet = full_sheet(vec![vec!["2024-03-01", "100"]]);
        let normalized = normalize(&sheet).unwrap();
        let day = &normalized.days[0];
        assert_eq!(day.umsatz_speisen, 100.0);
        assert_eq!(day.gaeste, 0.0);
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::MissingDateColumn.to_string(),
            "the required date column 'Datum' is missing"
        );
        assert_eq!(
            ValidationError::EmptySheet.to_string(),
            "the sheet contains no data rows"
        );
    }
}
