//! Derives the per-day KPI columns from normalized records.
//!
//! Every formula is a pure function of its own row, and every division is
//! guarded: a denominator of exactly zero (or less) routes to `0.0`, never to
//! a division attempt.

use crate::model::DayRecord;
use serde::{Deserialize, Serialize};

/// The derived KPI columns for one day.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayKpis {
    #[serde(rename = "Gesamtumsatz")]
    pub gesamtumsatz: f64,
    #[serde(rename = "Wareneinsatz_Speisen")]
    pub wareneinsatz_speisen: f64,
    #[serde(rename = "Wareneinsatz_Getraenke")]
    pub wareneinsatz_getraenke: f64,
    #[serde(rename = "Wareneinsatz_%_Speisen")]
    pub wareneinsatz_pct_speisen: f64,
    #[serde(rename = "Wareneinsatz_%_Getraenke")]
    pub wareneinsatz_pct_getraenke: f64,
    #[serde(rename = "Personal_Gesamt")]
    pub personal_gesamt: f64,
    #[serde(rename = "Personalkosten_%")]
    pub personalkosten_pct: f64,
    #[serde(rename = "Umsatz_pro_Stunde")]
    pub umsatz_pro_stunde: f64,
    #[serde(rename = "Umsatz_pro_Gast")]
    pub umsatz_pro_gast: f64,
    #[serde(rename = "Deckungsbeitrag")]
    pub deckungsbeitrag: f64,
    #[serde(rename = "Betriebsergebnis")]
    pub betriebsergebnis: f64,
}

impl DayKpis {
    /// Evaluates the KPI formulas for one day. Field order matters: later
    /// figures build on earlier ones.
    pub fn for_day(day: &DayRecord) -> Self {
        let gesamtumsatz = day.umsatz_speisen + day.umsatz_getraenke;
        let wareneinsatz_speisen = day.umsatz_speisen - day.ek_speisen;
        let wareneinsatz_getraenke = day.umsatz_getraenke - day.ek_getraenke;
        let wareneinsatz_pct_speisen = pct(day.ek_speisen, day.umsatz_speisen);
        let wareneinsatz_pct_getraenke = pct(day.ek_getraenke, day.umsatz_getraenke);
        let personal_gesamt = day.personal_service + day.personal_kueche;
        let personalkosten_pct = pct(personal_gesamt, gesamtumsatz);
        let umsatz_pro_stunde = ratio(gesamtumsatz, day.stunden);
        let umsatz_pro_gast = ratio(gesamtumsatz, day.gaeste);
        // Deckungsbeitrag sums the two Wareneinsatz margins; labor comes off
        // in Betriebsergebnis, not here.
        let deckungsbeitrag = wareneinsatz_speisen + wareneinsatz_getraenke;
        let betriebsergebnis = deckungsbeitrag - personal_gesamt;

        Self {
            gesamtumsatz,
            wareneinsatz_speisen,
            wareneinsatz_getraenke,
            wareneinsatz_pct_speisen,
            wareneinsatz_pct_getraenke,
            personal_gesamt,
            personalkosten_pct,
            umsatz_pro_stunde,
            umsatz_pro_gast,
            deckungsbeitrag,
            betriebsergebnis,
        }
    }

    /// A copy with every field rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        use crate::utils::round2;
        Self {
            gesamtumsatz: round2(self.gesamtumsatz),
            wareneinsatz_speisen: round2(self.wareneinsatz_speisen),
            wareneinsatz_getraenke: round2(self.wareneinsatz_getraenke),
            wareneinsatz_pct_speisen: round2(self.wareneinsatz_pct_speisen),
            wareneinsatz_pct_getraenke: round2(self.wareneinsatz_pct_getraenke),
            personal_gesamt: round2(self.personal_gesamt),
            personalkosten_pct: round2(self.personalkosten_pct),
            umsatz_pro_stunde: round2(self.umsatz_pro_stunde),
            umsatz_pro_gast: round2(self.umsatz_pro_gast),
            deckungsbeitrag: round2(self.deckungsbeitrag),
            betriebsergebnis: round2(self.betriebsergebnis),
        }
    }
}

/// A normalized day together with its derived KPIs. This is one row of the
/// Tagesübersicht.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    #[serde(flatten)]
    pub day: DayRecord,
    #[serde(flatten)]
    pub kpis: DayKpis,
}

impl DayReport {
    /// A copy with every numeric field rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        Self {
            day: self.day.rounded(),
            kpis: self.kpis.rounded(),
        }
    }
}

/// Computes the derived columns for every row. Pure and total: rows are
/// independent of one another and no input can make this fail.
pub fn compute(days: Vec<DayRecord>) -> Vec<DayReport> {
    days.into_iter()
        .map(|day| DayReport {
            kpis: DayKpis::for_day(&day),
            day,
        })
        .collect()
}

/// `numerator / denominator * 100`, guarded against a non-positive denominator.
fn pct(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// `numerator / denominator`, guarded against a non-positive denominator.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
