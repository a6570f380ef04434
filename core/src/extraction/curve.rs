use crate::report::{is_table_header, structure_header, DoseVolumeRow, Report};

/// Tolerance for tolerance-matched absolute-dose lookups, in cGy
///
/// Table doses are typically pre-rounded to the query grid by the
/// planning system; the tolerance absorbs the residual rounding noise.
pub const DOSE_MATCH_TOLERANCE_CGY: f64 = 0.05;

/// Which dose column of the table drives a curve query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoseAxis {
    /// Dose relative to prescription, in percent (isodose-level queries)
    Relative,
    /// Absolute dose in cGy
    Absolute,
}

impl DoseAxis {
    fn dose_of(&self, row: &DoseVolumeRow) -> f64 {
        match self {
            DoseAxis::Relative => row.relative_dose_pct,
            DoseAxis::Absolute => row.dose_cgy,
        }
    }
}

/// Collects the dose/volume table rows of a named structure block
///
/// Rows are accumulated only after the two-column table-header marker
/// has been seen inside the matched block; the marker flag resets on
/// every structure header, so a name mismatch pauses collection until
/// the name matches again. Non-row lines inside a table are skipped.
fn collect_rows(report: &Report, structure: &str) -> Vec<DoseVolumeRow> {
    let target = structure.trim().to_lowercase();
    let mut in_block = false;
    let mut in_table = false;
    let mut rows = Vec::new();

    for line in report.lines() {
        if let Some(name) = structure_header(line) {
            in_block = name.to_lowercase() == target;
            in_table = false;
            continue;
        }
        if !in_block {
            continue;
        }
        if is_table_header(line) {
            in_table = true;
            continue;
        }
        if !in_table {
            continue;
        }
        if let Some(row) = DoseVolumeRow::parse(line) {
            rows.push(row);
        }
    }

    rows
}

/// Volume receiving at least the target dose ("V at dose ≥ X")
///
/// Scans the structure's rows in file order. An exact dose match on the
/// chosen axis returns that row's volume immediately; otherwise the
/// volume of the row with the smallest dose strictly above the target
/// is returned. `None` when no row reaches the target. Under the
/// cumulative-DVH convention this is the volume covered by the tightest
/// upper bound on dose.
pub fn volume_at_dose(
    report: &Report,
    structure: &str,
    axis: DoseAxis,
    target: f64,
) -> Option<f64> {
    let mut best_volume = None;
    let mut best_gap = f64::INFINITY;

    for row in collect_rows(report, structure) {
        let dose = axis.dose_of(&row);
        if dose == target {
            return Some(row.volume_cm3);
        }
        if dose > target {
            let gap = dose - target;
            if gap < best_gap {
                best_gap = gap;
                best_volume = Some(row.volume_cm3);
            }
        }
    }

    best_volume
}

/// Dose covering a fraction of a reference volume (the Dx% query)
///
/// Computes `target = pct * reference_volume` and, among rows whose
/// volume is at most the target, returns the absolute dose of the row
/// with the LARGEST such volume. When the target is smaller than every
/// tabulated volume, falls back to the dose of the globally smallest
/// volume. An empty curve yields `None`.
///
/// Note the deliberate asymmetry with [`volume_at_dose`]: this query
/// approaches from below on the volume axis while that one approaches
/// from above on the dose axis; both follow the cumulative-DVH reading.
pub fn dose_at_volume_fraction(
    report: &Report,
    structure: &str,
    reference_volume: f64,
    pct: f64,
) -> Option<f64> {
    let rows = collect_rows(report, structure);
    if rows.is_empty() {
        return None;
    }
    let target = reference_volume * pct;

    let mut best: Option<&DoseVolumeRow> = None;
    let mut smallest: Option<&DoseVolumeRow> = None;
    for row in &rows {
        if row.volume_cm3 <= target {
            match best {
                Some(b) if b.volume_cm3 >= row.volume_cm3 => {}
                _ => best = Some(row),
            }
        }
        match smallest {
            Some(s) if s.volume_cm3 <= row.volume_cm3 => {}
            _ => smallest = Some(row),
        }
    }

    best.or(smallest).map(|row| row.dose_cgy)
}

/// Volume at a table row whose absolute dose matches a fixed target
/// within a small tolerance
///
/// Used for fixed-grid organ queries such as V20Gy, where the export
/// is expected to carry a row at (or rounded near) the query dose.
/// Nearest-above semantics do not apply here: a row outside the
/// tolerance window is never accepted.
pub fn volume_at_exact_dose(
    report: &Report,
    structure: &str,
    target_cgy: f64,
    tolerance: f64,
) -> Option<f64> {
    collect_rows(report, structure)
        .into_iter()
        .find(|row| (row.dose_cgy - target_cgy).abs() <= tolerance)
        .map(|row| row.volume_cm3)
}
