use crate::types::MetricInputs;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Radius of the sphere enclosing a given volume
///
/// `r = (3V / 4π)^(1/3)`, used by the gradient index that compares
/// isodose shells through their equal-volume sphere radii.
pub fn effective_radius(volume_cm3: f64) -> f64 {
    (3.0 * volume_cm3 / (4.0 * PI)).cbrt()
}

/// The plan-quality indices, each independently optional
///
/// Every index is a guarded ratio or difference over [`MetricInputs`]:
/// a missing or zero denominator makes that one index `None` without
/// affecting any other. Computation never fails.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MetricReport {
    /// V(100% isodose) / V(PTV)
    pub ci1: Option<f64>,
    /// V(overlap) / V(100% isodose)
    pub ci2: Option<f64>,
    /// V(overlap) / V(PTV)
    pub ci3: Option<f64>,
    /// Paddick conformity index, CI2 × CI3
    pub ci4: Option<f64>,
    /// V(50% isodose) / V(100% isodose)
    pub gi1: Option<f64>,
    /// effectiveRadius(50% isodose) / effectiveRadius(100% isodose)
    pub gi2: Option<f64>,
    /// V(50% isodose) / V(PTV)
    pub gi3: Option<f64>,
    /// Dmax(PTV) / Dmin(PTV)
    pub hi1: Option<f64>,
    /// Dmax(PTV) / prescription dose
    pub hi2: Option<f64>,
    /// (D2 − D98) / prescription dose
    pub hi3: Option<f64>,
    /// (D5 − D95) / prescription dose
    pub hi4: Option<f64>,
    /// S-index: stdDev(PTV) / prescription dose, in percent
    pub hi5: Option<f64>,
    /// meanDose(PTV) / prescription dose, in percent
    pub mean_dose_pct: Option<f64>,
    /// Efficiency index: (meanDose × V)(PTV) / (meanDose × V)(50% isodose)
    pub gn: Option<f64>,
}

/// Ratio guarded by presence and a nonzero denominator
fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

impl MetricReport {
    /// Computes every index from the collected inputs
    pub fn compute(inputs: &MetricInputs) -> MetricReport {
        let rx = inputs.prescription_dose;

        let ci2 = ratio(inputs.overlap_volume, inputs.iso100_volume);
        let ci3 = ratio(inputs.overlap_volume, inputs.ptv_volume);

        MetricReport {
            ci1: ratio(inputs.iso100_volume, inputs.ptv_volume),
            ci2,
            ci3,
            ci4: match (ci2, ci3) {
                (Some(a), Some(b)) => Some(a * b),
                _ => None,
            },
            gi1: ratio(inputs.iso50_volume, inputs.iso100_volume),
            gi2: ratio(
                inputs.iso50_volume.map(effective_radius),
                inputs.iso100_volume.map(effective_radius),
            ),
            gi3: ratio(inputs.iso50_volume, inputs.ptv_volume),
            hi1: ratio(inputs.ptv_max_dose, inputs.ptv_min_dose),
            hi2: ratio(inputs.ptv_max_dose, rx),
            hi3: ratio(difference(inputs.d2, inputs.d98), rx),
            hi4: ratio(difference(inputs.d5, inputs.d95), rx),
            hi5: ratio(inputs.ptv_dose_std, rx).map(|v| v * 100.0),
            mean_dose_pct: ratio(inputs.ptv_mean_dose, rx).map(|v| v * 100.0),
            gn: ratio(
                product(inputs.ptv_mean_dose, inputs.ptv_volume),
                product(inputs.iso50_mean_dose, inputs.iso50_volume),
            ),
        }
    }

    /// Metric map under stable names, for presentation and persistence
    pub fn to_map(&self) -> BTreeMap<&'static str, Option<f64>> {
        BTreeMap::from([
            ("CI1", self.ci1),
            ("CI2", self.ci2),
            ("CI3", self.ci3),
            ("CI4", self.ci4),
            ("GI1", self.gi1),
            ("GI2", self.gi2),
            ("GI3", self.gi3),
            ("HI1", self.hi1),
            ("HI2", self.hi2),
            ("HI3", self.hi3),
            ("HI4", self.hi4),
            ("HI5", self.hi5),
            ("MeanDosePct", self.mean_dose_pct),
            ("Gn", self.gn),
        ])
    }
}

fn difference(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a - b),
        _ => None,
    }
}

fn product(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a * b),
        _ => None,
    }
}
