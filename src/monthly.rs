//! Rolls the enriched per-day rows up into one summary row per calendar month.

use crate::kpi::DayReport;
use crate::model::Month;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The summed numeric columns of one month: every canonical input column and
/// every derived column.
///
/// The derived sums are sums of the already-computed per-row values. A ratio
/// column such as `Wareneinsatz_%_Speisen` is therefore the sum of the daily
/// percentages, never a percentage recomputed from monthly totals.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
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

impl Totals {
    fn add(&mut self, row: &DayReport) {
        self.umsatz_speisen += row.day.umsatz_speisen;
        self.umsatz_getraenke += row.day.umsatz_getraenke;
        self.ek_speisen += row.day.ek_speisen;
        self.ek_getraenke += row.day.ek_getraenke;
        self.personal_service += row.day.personal_service;
        self.personal_kueche += row.day.personal_kueche;
        self.stunden += row.day.stunden;
        self.gaeste += row.day.gaeste;
        self.gesamtumsatz += row.kpis.gesamtumsatz;
        self.wareneinsatz_speisen += row.kpis.wareneinsatz_speisen;
        self.wareneinsatz_getraenke += row.kpis.wareneinsatz_getraenke;
        self.wareneinsatz_pct_speisen += row.kpis.wareneinsatz_pct_speisen;
        self.wareneinsatz_pct_getraenke += row.kpis.wareneinsatz_pct_getraenke;
        self.personal_gesamt += row.kpis.personal_gesamt;
        self.personalkosten_pct += row.kpis.personalkosten_pct;
        self.umsatz_pro_stunde += row.kpis.umsatz_pro_stunde;
        self.umsatz_pro_gast += row.kpis.umsatz_pro_gast;
        self.deckungsbeitrag += row.kpis.deckungsbeitrag;
        self.betriebsergebnis += row.kpis.betriebsergebnis;
    }

    /// A copy with every field rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        use crate::utils::round2;
        Self {
            umsatz_speisen: round2(self.umsatz_speisen),
            umsatz_getraenke: round2(self.umsatz_getraenke),
            ek_speisen: round2(self.ek_speisen),
            ek_getraenke: round2(self.ek_getraenke),
            personal_service: round2(self.personal_service),
            personal_kueche: round2(self.personal_kueche),
            stunden: round2(self.stunden),
            gaeste: round2(self.gaeste),
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

/// One row of the Monatsübersicht.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    #[serde(rename = "Monat")]
    pub monat: Month,
    #[serde(flatten)]
    pub totals: Totals,
}

impl MonthlySummary {
    /// A copy with every numeric field rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        Self {
            monat: self.monat,
            totals: self.totals.rounded(),
        }
    }
}

/// Groups the enriched rows by calendar month and sums every numeric column.
///
/// Rows with no parsable date contribute to no bucket. Months appear only
/// when at least one row falls in them, ordered ascending.
pub fn aggregate(days: &[DayReport]) -> Vec<MonthlySummary> {
    let mut groups: BTreeMap<Month, Totals> = BTreeMap::new();
    for row in days {
        if let Some(date) = row.day.datum {
            groups.entry(Month::of(date)).or_default().add(row);
        }
    }
    groups
        .into_iter()
        .map(|(monat, totals)| MonthlySummary { monat, totals })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::compute;
    use crate::test::day_record;

    fn reports(rows: Vec<(&str, [f64; 8])>) -> Vec<DayReport> {
        compute(
            rows.into_iter()
                .map(|(date, values)| day_record(date, values))
                .collect(),
        )
    }

    #[test]
    fn test_same_month_rows_sum() {
        // Two days with Gesamtumsatz 100 each.
        let rows = reports(vec![
            ("2024-03-01", [60.0, 40.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ("2024-03-15", [70.0, 30.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ]);
        let months = aggregate(&rows);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].monat.to_string(), "2024-03");
        assert_eq!(months[0].totals.gesamtumsatz, 200.0);
        assert_eq!(months[0].totals.umsatz_speisen, 130.0);
    }

    #[test]
    fn test_months_ordered_ascending() {
        let rows = reports(vec![
            ("2024-02-10", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ("2023-12-31", [2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ("2024-01-01", [3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ]);
        let months = aggregate(&rows);
        let keys: Vec<String> = months.iter().map(|m| m.monat.to_string()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_ratio_columns_sum_daily_values() {
        // Day 1: 30% Wareneinsatz Speisen. Day 2: 50%. The monthly figure is
        // the sum of the daily percentages (80), not the blended percentage
        // over monthly totals ((30+100)/(100+200)*100 ≈ 43.3).
        let rows = reports(vec![
            ("2024-03-01", [100.0, 0.0, 30.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ("2024-03-02", [200.0, 0.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ]);
        let months = aggregate(&rows);
        assert_eq!(months[0].totals.wareneinsatz_pct_speisen, 80.0);

        let blended = months[0].totals.ek_speisen / months[0].totals.umsatz_speisen * 100.0;
        assert_ne!(months[0].totals.wareneinsatz_pct_speisen, blended);
    }

    #[test]
    fn test_null_date_rows_excluded_from_months() {
        let mut rows = reports(vec![(
            "2024-03-01",
            [100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        )]);
        let mut orphan = rows[0].clone();
        orphan.day.datum = None;
        rows.push(orphan);

        let months = aggregate(&rows);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].totals.umsatz_speisen, 100.0);
    }

    #[test]
    fn test_no_rows_no_months() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_year_boundary_groups_separately() {
        let rows = reports(vec![
            ("2023-03-01", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ("2024-03-01", [2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ]);
        let months = aggregate(&rows);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].monat.year(), 2023);
        assert_eq!(months[1].monat.year(), 2024);
    }

    #[test]
    fn test_monthly_summary_serialization() {
        let rows = reports(vec![(
            "2024-03-01",
            [100.0, 50.0, 30.0, 10.0, 20.0, 10.0, 8.0, 40.0],
        )]);
        let months = aggregate(&rows);
        let json = serde_json::to_value(&months[0]).unwrap();
        assert_eq!(json["Monat"], "2024-03");
        assert_eq!(json["Gesamtumsatz"], 150.0);
        assert_eq!(json["Wareneinsatz_%_Speisen"], 30.0);
    }
}
