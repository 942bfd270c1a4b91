//! The `report` command: run the pipeline over one file and render the
//! per-day table, the monthly rollup, and any warnings.

use crate::args::ReportArgs;
use crate::commands::{Format, Out, View};
use crate::import;
use crate::kpi::DayReport;
use crate::monthly::MonthlySummary;
use crate::report::Auswertung;
use crate::utils::{fmt_date, fmt_num};
use crate::Result;

/// The column order of the Tagesübersicht: the canonical input columns
/// followed by the derived columns in derivation order.
const DAY_HEADERS: [&str; 20] = [
    "Datum",
    "Umsatz_Speisen",
    "Umsatz_Getraenke",
    "EK_Speisen",
    "EK_Getraenke",
    "Personal_Service",
    "Personal_Kueche",
    "Stunden",
    "Gaeste",
    "Gesamtumsatz",
    "Wareneinsatz_Speisen",
    "Wareneinsatz_Getraenke",
    "Wareneinsatz_%_Speisen",
    "Wareneinsatz_%_Getraenke",
    "Personal_Gesamt",
    "Personalkosten_%",
    "Umsatz_pro_Stunde",
    "Umsatz_pro_Gast",
    "Deckungsbeitrag",
    "Betriebsergebnis",
];

const MONTH_HEADERS: [&str; 20] = [
    "Monat",
    "Umsatz_Speisen",
    "Umsatz_Getraenke",
    "EK_Speisen",
    "EK_Getraenke",
    "Personal_Service",
    "Personal_Kueche",
    "Stunden",
    "Gaeste",
    "Gesamtumsatz",
    "Wareneinsatz_Speisen",
    "Wareneinsatz_Getraenke",
    "Wareneinsatz_%_Speisen",
    "Wareneinsatz_%_Getraenke",
    "Personal_Gesamt",
    "Personalkosten_%",
    "Umsatz_pro_Stunde",
    "Umsatz_pro_Gast",
    "Deckungsbeitrag",
    "Betriebsergebnis",
];

/// Reads the file, runs the pipeline, and renders the result in the requested
/// format. Warnings ride along in the rendered message and in the structure.
pub fn report(args: &ReportArgs) -> Result<Out<Auswertung>> {
    let sheet = import::read_sheet(args.file())?;
    let auswertung = Auswertung::from_sheet(&sheet)?;
    let rounded = auswertung.rounded();

    let message = match args.format() {
        Format::Table => render_tables(&auswertung, args.view()),
        Format::Csv => render_csv(&auswertung, args.view())?,
        Format::Json => render_json(&rounded, args.view())?,
    };

    Ok(Out::new(message, rounded))
}

fn day_row(row: &DayReport, num: fn(f64) -> String) -> Vec<String> {
    vec![
        fmt_date(row.day.datum),
        num(row.day.umsatz_speisen),
        num(row.day.umsatz_getraenke),
        num(row.day.ek_speisen),
        num(row.day.ek_getraenke),
        num(row.day.personal_service),
        num(row.day.personal_kueche),
        num(row.day.stunden),
        num(row.day.gaeste),
        num(row.kpis.gesamtumsatz),
        num(row.kpis.wareneinsatz_speisen),
        num(row.kpis.wareneinsatz_getraenke),
        num(row.kpis.wareneinsatz_pct_speisen),
        num(row.kpis.wareneinsatz_pct_getraenke),
        num(row.kpis.personal_gesamt),
        num(row.kpis.personalkosten_pct),
        num(row.kpis.umsatz_pro_stunde),
        num(row.kpis.umsatz_pro_gast),
        num(row.kpis.deckungsbeitrag),
        num(row.kpis.betriebsergebnis),
    ]
}

fn month_row(row: &MonthlySummary, num: fn(f64) -> String) -> Vec<String> {
    vec![
        row.monat.to_string(),
        num(row.totals.umsatz_speisen),
        num(row.totals.umsatz_getraenke),
        num(row.totals.ek_speisen),
        num(row.totals.ek_getraenke),
        num(row.totals.personal_service),
        num(row.totals.personal_kueche),
        num(row.totals.stunden),
        num(row.totals.gaeste),
        num(row.totals.gesamtumsatz),
        num(row.totals.wareneinsatz_speisen),
        num(row.totals.wareneinsatz_getraenke),
        num(row.totals.wareneinsatz_pct_speisen),
        num(row.totals.wareneinsatz_pct_getraenke),
        num(row.totals.personal_gesamt),
        num(row.totals.personalkosten_pct),
        num(row.totals.umsatz_pro_stunde),
        num(row.totals.umsatz_pro_gast),
        num(row.totals.deckungsbeitrag),
        num(row.totals.betriebsergebnis),
    ]
}

fn render_tables(auswertung: &Auswertung, view: View) -> String {
    let mut sections = Vec::new();

    if matches!(view, View::All | View::Days) {
        let rows: Vec<Vec<String>> = auswertung
            .days
            .iter()
            .map(|row| day_row(row, fmt_num))
            .collect();
        sections.push(format!(
            "Tagesübersicht\n\n{}",
            markdown_table(&DAY_HEADERS, &rows)
        ));
    }

    if matches!(view, View::All | View::Months) {
        let rows: Vec<Vec<String>> = auswertung
            .months
            .iter()
            .map(|row| month_row(row, fmt_num))
            .collect();
        sections.push(format!(
            "Monatsübersicht\n\n{}",
            markdown_table(&MONTH_HEADERS, &rows)
        ));
    }

    if !auswertung.warnings.is_empty() {
        let lines: Vec<String> = auswertung
            .warnings
            .iter()
            .map(|w| format!("- {w}"))
            .collect();
        sections.push(format!("Warnings\n\n{}", lines.join("\n")));
    }

    sections.join("\n\n")
}

fn render_csv(auswertung: &Auswertung, view: View) -> Result<String> {
    fn plain(value: f64) -> String {
        format!("{value:.2}")
    }

    let mut sections = Vec::new();

    if matches!(view, View::All | View::Days) {
        let rows: Vec<Vec<String>> = auswertung
            .days
            .iter()
            .map(|row| day_row(row, plain))
            .collect();
        sections.push(csv_section(&DAY_HEADERS, &rows)?);
    }

    if matches!(view, View::All | View::Months) {
        let rows: Vec<Vec<String>> = auswertung
            .months
            .iter()
            .map(|row| month_row(row, plain))
            .collect();
        sections.push(csv_section(&MONTH_HEADERS, &rows)?);
    }

    Ok(sections.join("\n"))
}

fn render_json(rounded: &Auswertung, view: View) -> Result<String> {
    let value = match view {
        View::All => serde_json::to_value(rounded)?,
        View::Days => serde_json::to_value(&rounded.days)?,
        View::Months => serde_json::to_value(&rounded.months)?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn csv_section(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buffer)?)
}

/// Renders a markdown table with padded columns: the first column is
/// left-aligned (dates and month keys), the rest are right-aligned numbers.
fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ix, cell) in row.iter().enumerate() {
            if cell.len() > widths[ix] {
                widths[ix] = cell.len();
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header_cells: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(ix, h)| pad(h, widths[ix], ix == 0))
        .collect();
    lines.push(format!("| {} |", header_cells.join(" | ")));

    let separator_cells: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(format!("| {} |", separator_cells.join(" | ")));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(ix, cell)| pad(cell, widths[ix], ix == 0))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.join("\n")
}

fn pad(text: &str, width: usize, left_align: bool) -> String {
    if left_align {
        format!("{text:<width$}")
    } else {
        format!("{text:>width$}")
    }
}
