use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a single normalized row of the daily operations sheet.
///
/// Every canonical column is present with its semantic type: numeric cells
/// have been coerced to `f64` (unparsable cells became `0.0`) and the date has
/// been coerced to a calendar date, with `None` standing in for a cell that
/// could not be parsed.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(rename = "Datum")]
    pub datum: Option<NaiveDate>,
    #[serde(rename = "Umsatz_Speisen")]
    pub umsatz_speisen: f64,
    #[serde(rename = "Umsatz_Getraenke")]
    pub umsatz_getraenke: f64,
    #[serde(rename = "EK_Speisen")]
    pub ek_speisen: f64,
    #[serde(rename = "EK_Getraenke")]
    pub ek_getraenke: f64,
    #[serde(rename = "Personal_Service")]
    pub personal_service: f64,
    #[serde(rename = "Personal_Kueche")]
    pub personal_kueche: f64,
    #[serde(rename = "Stunden")]
    pub stunden: f64,
    #[serde(rename = "Gaeste")]
    pub gaeste: f64,
}

impl DayRecord {
    /// A copy with every numeric field rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        use crate::utils::round2;
        Self {
            datum: self.datum,
            umsatz_speisen: round2(self.umsatz_speisen),
            umsatz_getraenke: round2(self.umsatz_getraenke),
            ek_speisen: round2(self.ek_speisen),
            ek_getraenke: round2(self.ek_getraenke),
            personal_service: round2(self.personal_service),
            personal_kueche: round2(self.personal_kueche),
            stunden: round2(self.stunden),
            gaeste: round2(self.gaeste),
        }
    }
}
