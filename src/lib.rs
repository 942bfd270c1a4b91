//! Derives daily and monthly restaurant KPIs from an operations spreadsheet.
//!
//! The data flows strictly forward through three stages: a raw table is
//! normalized ([`normalize`]), the normalized rows get their derived KPI
//! columns ([`compute`]), and the enriched rows are rolled up per calendar
//! month ([`aggregate`]). [`Auswertung::from_sheet`] runs all three.
//!
//! ```
//! use gastro_auswertung::{Auswertung, RawSheet};
//!
//! let sheet = RawSheet::from_text_rows(vec![
//!     vec!["Datum", "Umsatz_Speisen", "Umsatz_Getraenke", "EK_Speisen", "EK_Getraenke",
//!          "Personal_Service", "Personal_Kueche", "Stunden", "Gaeste"],
//!     vec!["2024-03-01", "100", "50", "30", "10", "20", "10", "8", "40"],
//! ]);
//!
//! let auswertung = Auswertung::from_sheet(&sheet).unwrap();
//! assert_eq!(auswertung.days[0].kpis.gesamtumsatz, 150.0);
//! assert_eq!(auswertung.months[0].totals.betriebsergebnis, 80.0);
//! ```

pub mod args;
pub mod commands;
mod error;
pub mod import;
mod kpi;
mod model;
mod monthly;
mod normalize;
mod report;
#[cfg(test)]
mod test;
mod utils;

pub use error::{Error, Result};
pub use kpi::{compute, DayKpis, DayReport};
pub use model::{Cell, Column, DayRecord, Month, RawSheet};
pub use monthly::{aggregate, MonthlySummary, Totals};
pub use normalize::{normalize, Normalized, ValidationError, Warning};
pub use report::{Auswertung, DaySummary};
