use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the known columns of the daily operations sheet.
///
/// `Datum` is the date column; all others are numeric. Header lookup goes
/// through [`Column::from_header`], which canonicalizes the raw header text
/// first, so `" Umsatz Speisen "` still resolves to `UmsatzSpeisen`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "Datum")]
    Datum,
    #[serde(rename = "Umsatz_Speisen")]
    UmsatzSpeisen,
    #[serde(rename = "Umsatz_Getraenke")]
    UmsatzGetraenke,
    #[serde(rename = "EK_Speisen")]
    EkSpeisen,
    #[serde(rename = "EK_Getraenke")]
    EkGetraenke,
    #[serde(rename = "Personal_Service")]
    PersonalService,
    #[serde(rename = "Personal_Kueche")]
    PersonalKueche,
    #[serde(rename = "Stunden")]
    Stunden,
    #[serde(rename = "Gaeste")]
    Gaeste,
}

serde_plain::derive_display_from_serialize!(Column);
serde_plain::derive_fromstr_from_deserialize!(Column);

impl Column {
    /// The numeric columns, i.e. every required column except `Datum`.
    pub const NUMERIC: [Column; 8] = [
        Column::UmsatzSpeisen,
        Column::UmsatzGetraenke,
        Column::EkSpeisen,
        Column::EkGetraenke,
        Column::PersonalService,
        Column::PersonalKueche,
        Column::Stunden,
        Column::Gaeste,
    ];

    /// Resolves a raw header to a known column, if the canonicalized header
    /// matches one. Unknown headers are simply not ours to interpret.
    pub fn from_header(header: impl AsRef<str>) -> Option<Column> {
        Column::from_str(&canonicalize(header.as_ref())).ok()
    }
}

/// Canonicalizes a raw header: trims surrounding whitespace and replaces
/// internal spaces with underscores, e.g. `" Umsatz Speisen "` ->
/// `"Umsatz_Speisen"`.
pub(crate) fn canonicalize(header: &str) -> String {
    header.trim().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize(" Umsatz Speisen "), "Umsatz_Speisen");
        assert_eq!(canonicalize("Datum"), "Datum");
        assert_eq!(canonicalize("  Stunden"), "Stunden");
    }

    #[test]
    fn test_from_header_exact() {
        assert_eq!(Column::from_header("EK_Speisen"), Some(Column::EkSpeisen));
        assert_eq!(Column::from_header("Datum"), Some(Column::Datum));
    }

    #[test]
    fn test_from_header_messy() {
        assert_eq!(
            Column::from_header("  Umsatz Getraenke "),
            Some(Column::UmsatzGetraenke)
        );
        assert_eq!(
            Column::from_header("Personal Kueche"),
            Some(Column::PersonalKueche)
        );
    }

    #[test]
    fn test_from_header_unknown() {
        assert_eq!(Column::from_header("Trinkgeld"), None);
        assert_eq!(Column::from_header(""), None);
        // Casing must match; only whitespace is forgiven.
        assert_eq!(Column::from_header("datum"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Column::UmsatzSpeisen.to_string(), "Umsatz_Speisen");
        assert_eq!(Column::Gaeste.to_string(), "Gaeste");
    }

    #[test]
    fn test_numeric_excludes_datum() {
        assert_eq!(Column::NUMERIC.len(), 8);
        assert!(!Column::NUMERIC.contains(&Column::Datum));
    }
}
