use crate::report::{parse_number, structure_header, Report};

// Scalar field keys as they appear in the export, matched as
// case-insensitive line prefixes. The bracketed unit that follows the
// key in some export variants ("Volume [cm³]: ...") is covered by the
// prefix match.
pub const FIELD_VOLUME: &str = "volume";
pub const FIELD_MAX_DOSE: &str = "dose máx";
pub const FIELD_MIN_DOSE: &str = "dose mín";
pub const FIELD_MEAN_DOSE: &str = "dose média";
pub const FIELD_STD_DEV: &str = "std";

/// Extracts a scalar field from a named structure block
///
/// # Algorithm
///
/// 1. Scan lines, toggling an in-block flag on every structure header:
///    on when the header's name equals `structure` (case-insensitive,
///    trimmed), off on any other header.
/// 2. Inside the block, the first line whose lowercase form starts with
///    `key` is split on its first colon and the remainder parsed after
///    decimal normalization.
/// 3. A matching line whose value does not parse is skipped and the scan
///    continues; a later duplicate of the same key may still succeed.
///
/// Returns `None` when the structure never appears or no matching line
/// yields a number. Scalar fields are read independently of the block's
/// dose/volume table; a block may carry only one or the other.
pub fn extract_scalar(report: &Report, structure: &str, key: &str) -> Option<f64> {
    let target = structure.trim().to_lowercase();
    let key_lower = key.to_lowercase();
    let mut in_block = false;

    for line in report.lines() {
        if let Some(name) = structure_header(line) {
            in_block = name.to_lowercase() == target;
            continue;
        }
        if !in_block {
            continue;
        }
        if line.to_lowercase().starts_with(&key_lower) {
            let value = line.split_once(':').map(|(_, rest)| rest).unwrap_or(line);
            if let Some(parsed) = parse_number(value) {
                return Some(parsed);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(text: &str) -> Report {
        text.parse().unwrap()
    }

    const SAMPLE: &str = "\
Paciente: Fulano
ID: 42

Estrutura: PTV
Volume [cm³]: 12,5
Dose máx [cGy]: 2100,0
Dose mín [cGy]: 1802.5
Dose média [cGy]: 1980,3
STD [cGy]: 55,1

Estrutura: Body
Volume [cm³]: 4188.79
Dose máx [cGy]: 2150,0
";

    #[test]
    fn test_extract_scalar_basic() {
        let r = report(SAMPLE);
        assert_eq!(extract_scalar(&r, "PTV", FIELD_VOLUME), Some(12.5));
        assert_eq!(extract_scalar(&r, "ptv", FIELD_MAX_DOSE), Some(2100.0));
        assert_eq!(extract_scalar(&r, "PTV", FIELD_MIN_DOSE), Some(1802.5));
        assert_eq!(extract_scalar(&r, "PTV", FIELD_MEAN_DOSE), Some(1980.3));
        assert_eq!(extract_scalar(&r, "PTV", FIELD_STD_DEV), Some(55.1));
    }

    #[test]
    fn test_correct_block_selected() {
        let r = report(SAMPLE);
        // Body's max dose must not leak into a PTV query or vice versa
        assert_eq!(extract_scalar(&r, "Body", FIELD_MAX_DOSE), Some(2150.0));
        assert_eq!(extract_scalar(&r, "Body", FIELD_VOLUME), Some(4188.79));
    }

    #[test]
    fn test_missing_structure_is_none() {
        let r = report(SAMPLE);
        assert_eq!(extract_scalar(&r, "Lung", FIELD_VOLUME), None);
    }

    #[test]
    fn test_missing_field_is_none() {
        let r = report(SAMPLE);
        assert_eq!(extract_scalar(&r, "Body", FIELD_STD_DEV), None);
    }

    #[test]
    fn test_malformed_value_keeps_scanning() {
        let r = report(
            "Estrutura: PTV\n\
             Volume [cm³]: pendente\n\
             Volume [cm³]: 9,75\n",
        );
        assert_eq!(extract_scalar(&r, "PTV", FIELD_VOLUME), Some(9.75));
    }

    #[test]
    fn test_first_matching_block_wins() {
        let r = report(
            "Estrutura: PTV\n\
             Volume [cm³]: 10,0\n\
             Estrutura: PTV\n\
             Volume [cm³]: 99,0\n",
        );
        assert_eq!(extract_scalar(&r, "PTV", FIELD_VOLUME), Some(10.0));
    }

    #[test]
    fn test_field_outside_block_ignored() {
        let r = report(
            "Volume [cm³]: 7,0\n\
             Estrutura: PTV\n\
             Dose máx [cGy]: 2000\n",
        );
        assert_eq!(extract_scalar(&r, "PTV", FIELD_VOLUME), None);
    }
}
