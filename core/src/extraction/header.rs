use crate::report::{parse_number, Report};

/// Sentinels reported when the identifying header lines are missing
pub const NAME_NOT_FOUND: &str = "name not found";
pub const ID_NOT_FOUND: &str = "id not found";

/// Patient identification pulled from the report header
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PatientInfo {
    pub name: String,
    pub id: String,
}

/// Extracts patient name and ID from the first two report lines
///
/// Each line optionally carries a `Label: value` prefix; when a colon is
/// present the value is everything after the first colon, trimmed,
/// otherwise the whole trimmed line is taken. Absent or blank lines
/// yield the fixed sentinels.
pub fn patient_info(report: &Report) -> PatientInfo {
    let mut lines = report.lines();
    let name = header_value(lines.next()).unwrap_or_else(|| NAME_NOT_FOUND.to_string());
    let id = header_value(lines.next()).unwrap_or_else(|| ID_NOT_FOUND.to_string());
    PatientInfo { name, id }
}

fn header_value(line: Option<&str>) -> Option<String> {
    let line = line?;
    let value = line.split_once(':').map(|(_, rest)| rest).unwrap_or(line).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extracts the prescription dose from the keyed header field
///
/// The first line whose trimmed lowercase form starts with `dose total`
/// decides; its value after the first colon is decimal-normalized and
/// parsed. An unparsable value yields `None` rather than continuing the
/// scan.
pub fn prescription_dose(report: &Report) -> Option<f64> {
    for line in report.lines() {
        if line.to_lowercase().starts_with("dose total") {
            let value = line.split_once(':').map(|(_, rest)| rest).unwrap_or(line);
            return parse_number(value);
        }
    }
    None
}
