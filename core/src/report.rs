use crate::error::{DvhError, Result};
use std::path::Path;
use std::str::FromStr;

/// Block-introducer keywords, matched case-insensitively as line prefixes.
///
/// Exports use either the Portuguese or the English keyword depending on
/// the planning-system locale.
const STRUCTURE_PREFIXES: [&str; 2] = ["estrutura:", "structure:"];

/// Literal column markers that together identify a dose/volume table header
const RELATIVE_DOSE_MARKER: &str = "Dose relativa [%]";
const STRUCTURE_VOLUME_MARKER: &str = "Volume da estrutura";

/// In-memory DVH report
///
/// An ordered sequence of text lines, immutable once loaded. Every
/// extraction query performs its own pass over the lines, so a single
/// report can serve any number of independent queries.
#[derive(Debug, Clone)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    /// Loads a report from a text file
    ///
    /// # Errors
    ///
    /// Returns [`DvhError::Io`] if the file cannot be read and
    /// [`DvhError::EmptyReport`] if it contains no non-blank line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Report> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Iterates over the report's lines, trimmed
    ///
    /// Restartable: each call starts a fresh pass from the first line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.trim())
    }
}

impl FromStr for Report {
    type Err = DvhError;

    fn from_str(text: &str) -> Result<Report> {
        if text.lines().all(|line| line.trim().is_empty()) {
            return Err(DvhError::EmptyReport);
        }
        Ok(Report {
            lines: text.lines().map(|line| line.to_string()).collect(),
        })
    }
}

/// One row of a structure's dose/volume table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DoseVolumeRow {
    /// Absolute dose in cGy
    pub dose_cgy: f64,
    /// Dose relative to prescription, in percent
    pub relative_dose_pct: f64,
    /// Structure volume receiving at least this dose, in cm³
    pub volume_cm3: f64,
}

impl DoseVolumeRow {
    /// Parses a table line of exactly three whitespace-separated numbers
    ///
    /// Any other token count, or any unparsable token, yields `None` so
    /// that separator and annotation lines inside a table are skipped.
    pub fn parse(line: &str) -> Option<DoseVolumeRow> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            return None;
        }
        Some(DoseVolumeRow {
            dose_cgy: parse_number(tokens[0])?,
            relative_dose_pct: parse_number(tokens[1])?,
            volume_cm3: parse_number(tokens[2])?,
        })
    }
}

/// Classifies a line as a structure-block header
///
/// Matches the case-insensitive prefixes `estrutura:` and `structure:`
/// and returns the trimmed remainder as the structure's display name.
pub fn structure_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    for prefix in STRUCTURE_PREFIXES {
        if let Some(head) = trimmed.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return Some(trimmed[prefix.len()..].trim());
            }
        }
    }
    None
}

/// Checks whether a line is the two-column table header marker
///
/// A table header must carry both the relative-dose and the
/// structure-volume column labels; either alone is not enough.
pub fn is_table_header(line: &str) -> bool {
    line.contains(RELATIVE_DOSE_MARKER) && line.contains(STRUCTURE_VOLUME_MARKER)
}

/// Parses a numeric token, accepting comma or dot decimal separators
///
/// The comma→dot normalization runs before every parse; exports mix both
/// conventions depending on the planning-system locale.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("1234,5", 1234.5)]
    #[case("1234.5", 1234.5)]
    #[case(" 0,03 ", 0.03)]
    #[case("42", 42.0)]
    #[case("-1,25", -1.25)]
    fn test_parse_number_comma_dot_equivalence(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_number(input), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("12,3,4")]
    #[case("1 2")]
    fn test_parse_number_rejects_malformed(#[case] input: &str) {
        assert_eq!(parse_number(input), None);
    }

    #[test]
    fn test_structure_header() {
        assert_eq!(structure_header("Estrutura: PTV"), Some("PTV"));
        assert_eq!(structure_header("structure:  Body "), Some("Body"));
        assert_eq!(structure_header("ESTRUTURA:Overlap"), Some("Overlap"));
        assert_eq!(structure_header("Dose máx [cGy]: 2100"), None);
        assert_eq!(structure_header(""), None);
    }

    #[test]
    fn test_is_table_header() {
        assert!(is_table_header(
            "Dose [cGy]   Dose relativa [%]   Volume da estrutura [cm³]"
        ));
        assert!(!is_table_header("Dose relativa [%]"));
        assert!(!is_table_header("Volume da estrutura [cm³]"));
        assert!(!is_table_header("1000 80 8,0"));
    }

    #[test]
    fn test_row_parse() {
        let row = DoseVolumeRow::parse("1000,0  80,5  8.25").unwrap();
        assert_eq!(row.dose_cgy, 1000.0);
        assert_eq!(row.relative_dose_pct, 80.5);
        assert_eq!(row.volume_cm3, 8.25);

        // wrong token counts and non-numeric tokens are skipped
        assert_eq!(DoseVolumeRow::parse("1000 80"), None);
        assert_eq!(DoseVolumeRow::parse("1000 80 8,0 extra"), None);
        assert_eq!(DoseVolumeRow::parse("1000 n/a 8,0"), None);
    }

    #[test]
    fn test_empty_report_rejected() {
        assert!(matches!(
            "".parse::<Report>(),
            Err(DvhError::EmptyReport)
        ));
        assert!(matches!(
            "\n   \n\t\n".parse::<Report>(),
            Err(DvhError::EmptyReport)
        ));
    }

    #[test]
    fn test_lines_are_trimmed_and_restartable() {
        let report: Report = "  a  \n b\n".parse().unwrap();
        assert_eq!(report.lines().collect::<Vec<_>>(), vec!["a", "b"]);
        // second pass starts over
        assert_eq!(report.lines().count(), 2);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Paciente: Teste").unwrap();
        writeln!(file, "ID: 123").unwrap();
        let report = Report::from_file(file.path()).unwrap();
        assert_eq!(report.lines().count(), 2);
    }
}
