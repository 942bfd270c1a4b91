//! Reads a spreadsheet file into a `RawSheet`.
//!
//! This is the outermost shell of the program. Only the first worksheet of an
//! xlsx workbook is read; csv files are read in full. Anything that goes
//! wrong here (unreadable file, unsupported extension, corrupt workbook) is
//! an ordinary error surfaced as a single message; the typed validation
//! errors belong to the normalizer, not to file reading.

use crate::model::{Cell, RawSheet};
use crate::Result;
use anyhow::{bail, Context};
use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

/// Reads the file at `path`, dispatching on its extension (`xlsx`/`xls`/`ods`
/// via calamine, `csv` via the csv reader).
pub fn read_sheet(path: &Path) -> Result<RawSheet> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_workbook(path),
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("unable to open file {}", path.display()))?;
            from_csv_reader(file)
        }
        other => bail!(
            "unsupported file extension '{other}' for {}; expected xlsx or csv",
            path.display()
        ),
    }
}

/// Reads an xlsx workbook supplied as bytes, e.g. from an upload.
pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<RawSheet> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("unable to read the xlsx data")?;
    first_worksheet(&mut workbook)
}

fn read_workbook(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("unable to open workbook {}", path.display()))?;
    first_worksheet(&mut workbook)
}

fn first_worksheet<RS, R>(workbook: &mut R) -> Result<RawSheet>
where
    RS: Read + std::io::Seek,
    R: Reader<RS>,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    let sheet_names = workbook.sheet_names().to_vec();
    let name = match sheet_names.first() {
        Some(name) => name.clone(),
        None => bail!("the workbook contains no sheets"),
    };
    debug!("reading worksheet '{name}' (first of {})", sheet_names.len());
    let range = workbook
        .worksheet_range(&name)
        .with_context(|| format!("unable to read worksheet '{name}'"))?;
    Ok(sheet_from_range(&range))
}

fn sheet_from_range(range: &Range<Data>) -> RawSheet {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => Vec::new(),
    };
    let data = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    RawSheet::new(headers, data)
}

fn header_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => format!("{other}"),
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Cell::Date(datetime.date()),
            None => Cell::Empty,
        },
        Data::DateTimeIso(s) => match iso_date(s) {
            Some(date) => Cell::Date(date),
            None => Cell::from(s.as_str()),
        },
        Data::DurationIso(s) => Cell::from(s.as_str()),
        Data::Error(_) => Cell::Empty,
    }
}

fn iso_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split('T').next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Reads csv data into a `RawSheet`. All cells arrive as text; coercion
/// happens later, in normalization.
pub fn from_csv_reader<R: Read>(reader: R) -> Result<RawSheet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("unable to read the csv header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (ix, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("error reading csv record at line {}", ix + 2))?;
        rows.push(record.iter().map(Cell::from).collect());
    }

    Ok(RawSheet::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_read_csv_file() {
        let csv_content = "\
Datum,Umsatz_Speisen,Umsatz_Getraenke
2024-03-01,100,50
2024-03-02,200,80
";
        let file = create_test_csv(csv_content);
        let sheet = read_sheet(file.path()).unwrap();
        assert_eq!(
            sheet.headers(),
            &["Datum", "Umsatz_Speisen", "Umsatz_Getraenke"]
        );
        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(sheet.rows()[0][1], Cell::Text("100".to_string()));
    }

    #[test]
    fn test_read_csv_blank_cells() {
        let csv_content = "\
Datum,Umsatz_Speisen
2024-03-01,
";
        let file = create_test_csv(csv_content);
        let sheet = read_sheet(file.path()).unwrap();
        assert_eq!(sheet.rows()[0][1], Cell::Empty);
    }

    #[test]
    fn test_read_csv_ragged_rows() {
        let csv_content = "\
Datum,Umsatz_Speisen,Umsatz_Getraenke
2024-03-01,100
";
        let file = create_test_csv(csv_content);
        let sheet = read_sheet(file.path()).unwrap();
        assert_eq!(sheet.rows()[0].len(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = read_sheet(Path::new("betrieb.pdf"));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unsupported file extension"));
    }

    #[test]
    fn test_bad_xlsx_bytes() {
        assert!(from_xlsx_bytes(b"this is not a workbook").is_err());
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(cell_from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Number(1.0));
        assert_eq!(
            cell_from_data(&Data::String("hi".to_string())),
            Cell::Text("hi".to_string())
        );
        assert_eq!(
            cell_from_data(&Data::String("  ".to_string())),
            Cell::Empty
        );
    }

    #[test]
    fn test_iso_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(iso_date("2024-03-01"), Some(expected));
        assert_eq!(iso_date("2024-03-01T00:00:00"), Some(expected));
        assert_eq!(iso_date("foo"), None);
    }
}
