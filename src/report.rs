//! Runs the full derivation pipeline and carries its results.

use crate::kpi::{self, DayReport};
use crate::model::RawSheet;
use crate::monthly::{self, MonthlySummary};
use crate::normalize::{self, Normalized, ValidationError, Warning};
use crate::utils::round2;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The complete result of one pipeline run: the enriched per-day rows
/// (Tagesübersicht), the monthly rollup (Monatsübersicht), and any non-fatal
/// warnings gathered along the way.
///
/// Everything is rebuilt from scratch on every run; nothing persists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Auswertung {
    pub days: Vec<DayReport>,
    pub months: Vec<MonthlySummary>,
    pub warnings: Vec<Warning>,
}

impl Auswertung {
    /// Runs normalization, KPI derivation, and monthly aggregation over the
    /// raw sheet, in that order. The only failures are the normalizer's.
    pub fn from_sheet(sheet: &RawSheet) -> Result<Self, ValidationError> {
        let Normalized { days, warnings } = normalize::normalize(sheet)?;
        let days = kpi::compute(days);
        let months = monthly::aggregate(&days);
        debug!(
            "derived {} day rows and {} month rows",
            days.len(),
            months.len()
        );
        Ok(Self {
            days,
            months,
            warnings,
        })
    }

    /// Headline figures for the most recent row. "Most recent" means the last
    /// row in upload order, not the latest date: these sheets get one row
    /// appended per day, so the last row is normally the newest.
    pub fn latest_summary(&self) -> Option<DaySummary> {
        self.days.last().map(DaySummary::for_report)
    }

    /// A copy with every numeric value rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        Self {
            days: self.days.iter().map(DayReport::rounded).collect(),
            months: self.months.iter().map(MonthlySummary::rounded).collect(),
            warnings: self.warnings.clone(),
        }
    }
}

/// The four headline figures shown for the most recent day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(rename = "Datum")]
    pub datum: Option<NaiveDate>,
    #[serde(rename = "Gesamtumsatz")]
    pub gesamtumsatz: f64,
    /// Blended cost-of-goods percentage across Speisen and Getraenke.
    #[serde(rename = "Wareneinsatz_%")]
    pub wareneinsatz_pct: f64,
    #[serde(rename = "Personalkosten_%")]
    pub personalkosten_pct: f64,
    #[serde(rename = "Betriebsergebnis")]
    pub betriebsergebnis: f64,
}

impl DaySummary {
    pub fn for_report(row: &DayReport) -> Self {
        let ek_gesamt = row.day.ek_speisen + row.day.ek_getraenke;
        let wareneinsatz_pct = if row.kpis.gesamtumsatz > 0.0 {
            ek_gesamt / row.kpis.gesamtumsatz * 100.0
        } else {
            0.0
        };
        Self {
            datum: row.day.datum,
            gesamtumsatz: row.kpis.gesamtumsatz,
            wareneinsatz_pct,
            personalkosten_pct: row.kpis.personalkosten_pct,
            betriebsergebnis: row.kpis.betriebsergebnis,
        }
    }

    /// A copy with every numeric value rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        Self {
            datum: self.datum,
            gesamtumsatz: round2(self.gesamtumsatz),
            wareneinsatz_pct: round2(self.wareneinsatz_pct),
            personalkosten_pct: round2(self.personalkosten_pct),
            betriebsergebnis: round2(self.betriebsergebnis),
        }
    }
}
