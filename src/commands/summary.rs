//! The `summary` command: the four headline figures for the most recent day.

use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::import;
use crate::report::{Auswertung, DaySummary};
use crate::utils::{fmt_date, fmt_num};
use crate::Result;
use anyhow::Context;

/// Reads the file, runs the pipeline, and prints the headline figures for the
/// most recent row (last in upload order).
pub fn summary(args: &SummaryArgs) -> Result<Out<DaySummary>> {
    let sheet = import::read_sheet(args.file())?;
    let auswertung = Auswertung::from_sheet(&sheet)?;
    let latest = auswertung
        .latest_summary()
        .context("the report contains no rows")?
        .rounded();

    let message = format!(
        "{}: Gesamtumsatz {} | Wareneinsatz {}% | Personalkosten {}% | Betriebsergebnis {}",
        fmt_date(latest.datum),
        fmt_num(latest.gesamtumsatz),
        fmt_num(latest.wareneinsatz_pct),
        fmt_num(latest.personalkosten_pct),
        fmt_num(latest.betriebsergebnis),
    );

    Ok(Out::new(message, latest))
}
