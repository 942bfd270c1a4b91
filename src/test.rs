//! Shared test utilities for building raw sheets and records.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{DayRecord, RawSheet};
use chrono::NaiveDate;

/// The canonical header row, in its canonical order.
pub(crate) const CANONICAL_HEADERS: [&str; 9] = [
    "Datum",
    "Umsatz_Speisen",
    "Umsatz_Getraenke",
    "EK_Speisen",
    "EK_Getraenke",
    "Personal_Service",
    "Personal_Kueche",
    "Stunden",
    "Gaeste",
];

/// Builds a raw sheet with the canonical header row and the given data rows.
pub(crate) fn full_sheet(rows: Vec<Vec<&str>>) -> RawSheet {
    let mut data = vec![CANONICAL_HEADERS.to_vec()];
    data.extend(rows);
    RawSheet::from_text_rows(data)
}

/// Builds a normalized day record. `values` follows the canonical numeric
/// column order: Umsatz_Speisen, Umsatz_Getraenke, EK_Speisen, EK_Getraenke,
/// Personal_Service, Personal_Kueche, Stunden, Gaeste.
pub(crate) fn day_record(date: &str, values: [f64; 8]) -> DayRecord {
    DayRecord {
        datum: Some(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test dates must be ISO formatted"),
        ),
        umsatz_speisen: values[0],
        umsatz_getraenke: values[1],
        ek_speisen: values[2],
        ek_getraenke: values[3],
        personal_service: values[4],
        personal_kueche: values[5],
        stunden: values[6],
        gaeste: values[7],
    }
}
