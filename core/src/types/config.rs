use crate::error::{DvhError, Result};

/// User-declared structure names for one report
///
/// Reports name structures however the planning team configured them, so
/// the caller declares the aliases up front and every extractor call
/// receives them explicitly. Matching is case-insensitive and exact.
///
/// # Example
///
/// ```
/// use dvhmetrics_core::StructureAliases;
///
/// let aliases = StructureAliases::default()
///     .with_ptv("PTV_cranio")
///     .with_risk_organ("Encefalo");
///
/// assert_eq!(aliases.ptv, "PTV_cranio");
/// assert_eq!(aliases.risk_structure(), "Encefalo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureAliases {
    /// Planning target volume
    pub ptv: String,
    /// External/body contour, which carries the plan-wide DVH table
    pub body: String,
    /// Intersection of the PTV with the 100% isodose
    pub overlap: String,
    /// Structure delineating the 50% isodose (mean-dose source for Gn)
    pub iso50: String,
    /// Risk organ for site-specific figures (encephalon, lungs);
    /// falls back to the body contour when not declared
    pub risk_organ: Option<String>,
}

impl Default for StructureAliases {
    fn default() -> Self {
        Self {
            ptv: "ptv".to_string(),
            body: "body".to_string(),
            overlap: "overlap".to_string(),
            iso50: "iso50".to_string(),
            risk_organ: None,
        }
    }
}

impl StructureAliases {
    pub fn with_ptv(mut self, name: impl Into<String>) -> Self {
        self.ptv = name.into();
        self
    }

    pub fn with_body(mut self, name: impl Into<String>) -> Self {
        self.body = name.into();
        self
    }

    pub fn with_overlap(mut self, name: impl Into<String>) -> Self {
        self.overlap = name.into();
        self
    }

    pub fn with_iso50(mut self, name: impl Into<String>) -> Self {
        self.iso50 = name.into();
        self
    }

    pub fn with_risk_organ(mut self, name: impl Into<String>) -> Self {
        self.risk_organ = Some(name.into());
        self
    }

    /// Structure queried for site-specific dose-volume figures
    pub fn risk_structure(&self) -> &str {
        self.risk_organ.as_deref().unwrap_or(&self.body)
    }
}

/// Supported stereotactic fraction schedules
///
/// Each schedule pairs with the two absolute-dose levels whose enclosed
/// volumes flag radionecrosis risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Fractionation {
    Single,
    Three,
    Five,
}

impl Fractionation {
    /// Maps a raw fraction count to a schedule
    ///
    /// # Errors
    ///
    /// Counts outside {1, 3, 5} are a configuration error, reported as
    /// [`DvhError::InvalidFractionCount`] and never as missing data.
    pub fn from_count(count: u32) -> Result<Fractionation> {
        match count {
            1 => Ok(Fractionation::Single),
            3 => Ok(Fractionation::Three),
            5 => Ok(Fractionation::Five),
            other => Err(DvhError::InvalidFractionCount(other)),
        }
    }

    /// Number of treatment sessions
    pub fn count(&self) -> u32 {
        match self {
            Fractionation::Single => 1,
            Fractionation::Three => 3,
            Fractionation::Five => 5,
        }
    }

    /// The two radionecrosis-risk dose levels for this schedule, in Gy
    pub fn dose_pair_gy(&self) -> (f64, f64) {
        match self {
            Fractionation::Single => (10.0, 12.0),
            Fractionation::Three => (18.0, 20.0),
            Fractionation::Five => (25.0, 30.0),
        }
    }
}

/// Treatment site, selecting which dose-volume figures are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum TreatmentSite {
    /// Cranial radiosurgery: radionecrosis-risk volumes per schedule
    Cranial(Fractionation),
    /// Lung treatment: V20Gy of the lung structure
    Lung,
}

/// Full configuration for one analysis run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct AnalysisConfig {
    pub aliases: StructureAliases,
    pub site: TreatmentSite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractionation_from_count() {
        assert_eq!(Fractionation::from_count(1).unwrap(), Fractionation::Single);
        assert_eq!(Fractionation::from_count(3).unwrap(), Fractionation::Three);
        assert_eq!(Fractionation::from_count(5).unwrap(), Fractionation::Five);
    }

    #[test]
    fn test_fractionation_rejects_other_counts() {
        for count in [0, 2, 4, 6, 10] {
            assert!(matches!(
                Fractionation::from_count(count),
                Err(DvhError::InvalidFractionCount(c)) if c == count
            ));
        }
    }

    #[test]
    fn test_dose_pairs() {
        assert_eq!(Fractionation::Single.dose_pair_gy(), (10.0, 12.0));
        assert_eq!(Fractionation::Three.dose_pair_gy(), (18.0, 20.0));
        assert_eq!(Fractionation::Five.dose_pair_gy(), (25.0, 30.0));
    }

    #[test]
    fn test_risk_structure_falls_back_to_body() {
        let aliases = StructureAliases::default();
        assert_eq!(aliases.risk_structure(), "body");
        let aliases = aliases.with_risk_organ("Encefalo");
        assert_eq!(aliases.risk_structure(), "Encefalo");
    }
}
