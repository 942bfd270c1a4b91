//! The untyped table as it arrives from a spreadsheet reader.
//!
//! Nothing is guaranteed about a `RawSheet`: headers may carry stray
//! whitespace, numeric columns may hold text, and the date column may be
//! garbage. All cleanup happens later, in normalization.

use chrono::NaiveDate;

/// A single untyped spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    /// A real date cell. Only xlsx input produces these; csv input is text-only.
    Date(NaiveDate),
}

impl Cell {
    /// Best-effort numeric reading of the cell. Returns `None` when the cell
    /// holds nothing that can be read as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => parse_number(s),
            Cell::Empty | Cell::Date(_) => None,
        }
    }

    /// Best-effort date reading of the cell. Text is tried against the ISO,
    /// German dotted, and day-first slash formats.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Text(s) => parse_date(s),
            Cell::Empty | Cell::Number(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl<S: Into<String>> From<S> for Cell {
    /// Builds a cell the way a text-only reader (csv) would: blank becomes
    /// `Empty`, everything else is `Text`.
    fn from(value: S) -> Self {
        let s = value.into();
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

/// Parses a number out of free-form spreadsheet text.
///
/// Accepts currency symbols, surrounding whitespace, and both German
/// (`1.234,56`) and English (`1,234.56`) separator conventions. The decimal
/// separator is taken to be whichever of `,` and `.` appears last.
fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalized.parse::<f64>().ok()
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    // Date-time text like "2024-03-01 00:00:00" should still parse as a date.
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// An ordered, headered table of untyped cells, as supplied by a reader.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RawSheet {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Builds a sheet from text rows where the first row is the header row.
    /// This is the shape that csv readers (and tests) produce.
    pub fn from_text_rows<S, R>(data: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        let mut rows = data.into_iter();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.into_iter().map(|s| s.into()).collect(),
            None => Vec::new(),
        };
        let rows = rows
            .map(|row| row.into_iter().map(Cell::from).collect())
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// True when the sheet has no data rows (the header row does not count).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
