use crate::extraction::{patient_info, PatientInfo};
use crate::metrics::{lung_v20, necrosis_volumes, MetricReport, NecrosisVolumes};
use crate::report::Report;
use crate::types::{AnalysisConfig, MetricInputs, TreatmentSite};

/// Main analyzer for DVH reports
///
/// Drives the header, scalar and curve extractors under a declared
/// configuration and assembles the full metric set. Missing structures
/// and malformed values degrade individual outputs to "not computed";
/// nothing here fails an otherwise readable report.
///
/// # Example
///
/// ```
/// use dvhmetrics_core::{
///     AnalysisConfig, DvhAnalyzer, Fractionation, Report, StructureAliases, TreatmentSite,
/// };
///
/// let text = "\
/// Paciente: Maria Souza
/// ID: 1234
/// Dose total [cGy]: 2000
/// Estrutura: PTV
/// Volume [cm³]: 10,0
/// Estrutura: Overlap
/// Volume [cm³]: 8,5
/// Estrutura: Body
/// Dose [cGy]   Dose relativa [%]   Volume da estrutura [cm³]
/// 1000 50 30,0
/// 2000 100 11,0
/// ";
/// let report: Report = text.parse().unwrap();
/// let config = AnalysisConfig {
///     aliases: StructureAliases::default(),
///     site: TreatmentSite::Cranial(Fractionation::Single),
/// };
///
/// let analysis = DvhAnalyzer::analyze(&report, &config);
/// assert_eq!(analysis.patient.name, "Maria Souza");
/// assert_eq!(analysis.metrics.ci1, Some(1.1));
/// ```
pub struct DvhAnalyzer;

impl DvhAnalyzer {
    /// Runs the full analysis of one report
    pub fn analyze(report: &Report, config: &AnalysisConfig) -> DvhAnalysis {
        let inputs = MetricInputs::collect(report, &config.aliases);
        let metrics = MetricReport::compute(&inputs);
        let dose_volumes = match config.site {
            TreatmentSite::Cranial(fractionation) => DoseVolumeReport::Necrosis(
                necrosis_volumes(report, config.aliases.risk_structure(), fractionation),
            ),
            TreatmentSite::Lung => DoseVolumeReport::LungV20 {
                percent: lung_v20(report, config.aliases.risk_structure()),
            },
        };

        DvhAnalysis {
            patient: patient_info(report),
            inputs,
            metrics,
            dose_volumes,
        }
    }
}

/// Complete result of one analysis run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DvhAnalysis {
    /// Patient identification from the report header
    pub patient: PatientInfo,

    /// Every raw extracted value, for presentation and persistence
    pub inputs: MetricInputs,

    /// The computed quality indices
    pub metrics: MetricReport,

    /// Site-specific dose-volume figures
    pub dose_volumes: DoseVolumeReport,
}

/// Site-specific dose-volume figures
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum DoseVolumeReport {
    /// Radionecrosis-risk volumes (cranial treatments)
    Necrosis(NecrosisVolumes),
    /// Lung volume fraction receiving at least 20 Gy
    LungV20 { percent: Option<f64> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fractionation, StructureAliases};

    const SAMPLE: &str = "\
Paciente: Fulano de Tal
ID: 99
Dose total [cGy]: 2000
Estrutura: PTV
Volume [cm³]: 10,0
Dose máx [cGy]: 2100
Dose mín [cGy]: 1800
Dose média [cGy]: 1980
STD [cGy]: 50
Estrutura: Overlap
Volume [cm³]: 8,5
Estrutura: Encefalo
Dose [cGy]   Dose relativa [%]   Volume da estrutura [cm³]
1000 50 22,0
1200 60 18,5
Estrutura: Body
Dose [cGy]   Dose relativa [%]   Volume da estrutura [cm³]
1000 50 30,0
2000 100 11,0
";

    fn config(site: TreatmentSite) -> AnalysisConfig {
        AnalysisConfig {
            aliases: StructureAliases::default().with_risk_organ("Encefalo"),
            site,
        }
    }

    #[test]
    fn test_analyze_cranial() {
        let report: Report = SAMPLE.parse().unwrap();
        let analysis = DvhAnalyzer::analyze(
            &report,
            &config(TreatmentSite::Cranial(Fractionation::Single)),
        );

        assert_eq!(analysis.patient.name, "Fulano de Tal");
        assert_eq!(analysis.patient.id, "99");
        assert_eq!(analysis.inputs.prescription_dose, Some(2000.0));
        assert_eq!(analysis.metrics.ci1, Some(1.1));
        assert_eq!(analysis.metrics.hi2, Some(2100.0 / 2000.0));

        match analysis.dose_volumes {
            DoseVolumeReport::Necrosis(figures) => {
                assert_eq!(figures.lower.volume_cm3, Some(22.0));
                assert_eq!(figures.upper.volume_cm3, Some(18.5));
            }
            _ => panic!("expected necrosis figures for a cranial site"),
        }
    }

    #[test]
    fn test_analyze_lung_site() {
        let report: Report = "\
Paciente: X
ID: 1
Estrutura: Pulmões
Volume [cm³]: 1000,0
Dose [cGy]   Dose relativa [%]   Volume da estrutura [cm³]
2000,0 100 250,0
"
        .parse()
        .unwrap();
        let config = AnalysisConfig {
            aliases: StructureAliases::default().with_risk_organ("Pulmões"),
            site: TreatmentSite::Lung,
        };
        let analysis = DvhAnalyzer::analyze(&report, &config);
        match analysis.dose_volumes {
            DoseVolumeReport::LungV20 { percent } => {
                assert_eq!(percent, Some(25.0));
            }
            _ => panic!("expected V20Gy for a lung site"),
        }
    }

    #[test]
    fn test_analyze_degrades_without_structures() {
        let report: Report = "Paciente: X\nID: 1\n".parse().unwrap();
        let analysis = DvhAnalyzer::analyze(
            &report,
            &config(TreatmentSite::Cranial(Fractionation::Three)),
        );
        assert_eq!(analysis.metrics, MetricReport::default());
        match analysis.dose_volumes {
            DoseVolumeReport::Necrosis(figures) => {
                assert_eq!(figures.lower.volume_cm3, None);
                assert_eq!(figures.upper.volume_cm3, None);
            }
            _ => panic!("expected necrosis figures for a cranial site"),
        }
    }
}
