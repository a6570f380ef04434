use crate::extraction::{
    extract_scalar, volume_at_dose, volume_at_exact_dose, DoseAxis, DOSE_MATCH_TOLERANCE_CGY,
    FIELD_VOLUME,
};
use crate::report::Report;
use crate::types::Fractionation;

/// One absolute-dose volume query and its outcome
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DoseVolumeFigure {
    /// Queried dose level, in Gy
    pub dose_gy: f64,
    /// Volume receiving at least that dose, in cm³; `None` when the
    /// curve never reaches the level
    pub volume_cm3: Option<f64>,
}

/// Radionecrosis-risk volumes for one fraction schedule
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct NecrosisVolumes {
    pub fractionation: Fractionation,
    pub lower: DoseVolumeFigure,
    pub upper: DoseVolumeFigure,
}

/// Queries the two radionecrosis-risk volumes for a schedule
///
/// The dose pair depends on the schedule ({10,12} Gy for a single
/// fraction, {18,20} for three, {25,30} for five) and both queries run
/// against the risk structure's DVH table with nearest-above semantics.
pub fn necrosis_volumes(
    report: &Report,
    organ: &str,
    fractionation: Fractionation,
) -> NecrosisVolumes {
    let (lower_gy, upper_gy) = fractionation.dose_pair_gy();
    NecrosisVolumes {
        fractionation,
        lower: figure_at(report, organ, lower_gy),
        upper: figure_at(report, organ, upper_gy),
    }
}

fn figure_at(report: &Report, organ: &str, dose_gy: f64) -> DoseVolumeFigure {
    DoseVolumeFigure {
        dose_gy,
        volume_cm3: volume_at_dose(report, organ, DoseAxis::Absolute, dose_gy * 100.0),
    }
}

/// Percentage of the lung volume receiving at least 20 Gy
///
/// The 20 Gy row is tolerance-matched (±0.05 cGy) against the lung's
/// table; the denominator is the lung's scalar volume field, read
/// outside the table. Either side missing, or a zero total volume,
/// yields `None`.
pub fn lung_v20(report: &Report, lung: &str) -> Option<f64> {
    let total = extract_scalar(report, lung, FIELD_VOLUME)?;
    if total == 0.0 {
        return None;
    }
    let at_20gy = volume_at_exact_dose(report, lung, 2000.0, DOSE_MATCH_TOLERANCE_CGY)?;
    Some(at_20gy / total * 100.0)
}
