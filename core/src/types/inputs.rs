use crate::extraction::{
    dose_at_volume_fraction, extract_scalar, prescription_dose, volume_at_dose, DoseAxis,
    FIELD_MAX_DOSE, FIELD_MEAN_DOSE, FIELD_MIN_DOSE, FIELD_STD_DEV, FIELD_VOLUME,
};
use crate::report::Report;
use crate::types::StructureAliases;
use std::collections::BTreeMap;

/// Every extracted value the metric engine consumes, all optional
///
/// Doses are in cGy, volumes in cm³. A field is `None` when its
/// structure, scalar line or table row was absent or unparsable;
/// absence propagates to the metrics that need the value and nowhere
/// else. Nothing here is ever zero-filled.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MetricInputs {
    pub prescription_dose: Option<f64>,
    /// Max dose in the risk structure (body or declared risk organ)
    pub risk_max_dose: Option<f64>,
    pub ptv_max_dose: Option<f64>,
    pub ptv_min_dose: Option<f64>,
    pub ptv_mean_dose: Option<f64>,
    pub ptv_dose_std: Option<f64>,
    pub iso50_mean_dose: Option<f64>,
    pub ptv_volume: Option<f64>,
    pub overlap_volume: Option<f64>,
    pub iso100_volume: Option<f64>,
    pub iso50_volume: Option<f64>,
    /// Dose covering 2% / 5% / 95% / 98% of the PTV volume
    pub d2: Option<f64>,
    pub d5: Option<f64>,
    pub d95: Option<f64>,
    pub d98: Option<f64>,
}

impl MetricInputs {
    /// Gathers every input from a report under the declared aliases
    ///
    /// Isodose volumes are relative-dose curve queries against the body
    /// contour (the structure whose table spans the whole plan); the
    /// 50%-isodose mean dose is a scalar field of the iso50 structure.
    /// The Dx% queries need the PTV volume as reference and stay `None`
    /// without it.
    pub fn collect(report: &Report, aliases: &StructureAliases) -> MetricInputs {
        let ptv = aliases.ptv.as_str();
        let body = aliases.body.as_str();

        let ptv_volume = extract_scalar(report, ptv, FIELD_VOLUME);
        let dx = |pct: f64| {
            ptv_volume.and_then(|volume| dose_at_volume_fraction(report, ptv, volume, pct))
        };

        MetricInputs {
            prescription_dose: prescription_dose(report),
            risk_max_dose: extract_scalar(report, aliases.risk_structure(), FIELD_MAX_DOSE),
            ptv_max_dose: extract_scalar(report, ptv, FIELD_MAX_DOSE),
            ptv_min_dose: extract_scalar(report, ptv, FIELD_MIN_DOSE),
            ptv_mean_dose: extract_scalar(report, ptv, FIELD_MEAN_DOSE),
            ptv_dose_std: extract_scalar(report, ptv, FIELD_STD_DEV),
            iso50_mean_dose: extract_scalar(report, &aliases.iso50, FIELD_MEAN_DOSE),
            overlap_volume: extract_scalar(report, &aliases.overlap, FIELD_VOLUME),
            iso100_volume: volume_at_dose(report, body, DoseAxis::Relative, 100.0),
            iso50_volume: volume_at_dose(report, body, DoseAxis::Relative, 50.0),
            d2: dx(0.02),
            d5: dx(0.05),
            d95: dx(0.95),
            d98: dx(0.98),
            ptv_volume,
        }
    }

    /// Raw-value map under stable names, for presentation and persistence
    pub fn to_map(&self) -> BTreeMap<&'static str, Option<f64>> {
        BTreeMap::from([
            ("prescription_dose_cgy", self.prescription_dose),
            ("risk_max_dose_cgy", self.risk_max_dose),
            ("ptv_max_dose_cgy", self.ptv_max_dose),
            ("ptv_min_dose_cgy", self.ptv_min_dose),
            ("ptv_mean_dose_cgy", self.ptv_mean_dose),
            ("ptv_dose_std_cgy", self.ptv_dose_std),
            ("iso50_mean_dose_cgy", self.iso50_mean_dose),
            ("ptv_volume_cm3", self.ptv_volume),
            ("overlap_volume_cm3", self.overlap_volume),
            ("iso100_volume_cm3", self.iso100_volume),
            ("iso50_volume_cm3", self.iso50_volume),
            ("d2_cgy", self.d2),
            ("d5_cgy", self.d5),
            ("d95_cgy", self.d95),
            ("d98_cgy", self.d98),
        ])
    }
}
