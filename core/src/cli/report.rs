use crate::api::{DoseVolumeReport, DvhAnalysis};
use std::fmt;

/// Text report formatter for an analysis result
pub struct TextReport<'a> {
    analysis: &'a DvhAnalysis,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(analysis: &'a DvhAnalysis) -> Self {
        Self { analysis }
    }
}

fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "not computed".to_string(),
    }
}

fn fmt_quantity(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.2} {}", v, unit),
        None => "not found".to_string(),
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.analysis;

        writeln!(f, "DVH Analysis")?;
        writeln!(f, "============")?;
        writeln!(f)?;
        writeln!(f, "Patient:        {}", analysis.patient.name)?;
        writeln!(f, "Patient ID:     {}", analysis.patient.id)?;
        writeln!(f)?;

        writeln!(f, "Quality Indices")?;
        writeln!(f, "---------------")?;
        for (name, value) in analysis.metrics.to_map() {
            writeln!(f, "{:<12} {}", name, fmt_metric(value))?;
        }
        writeln!(f)?;

        match &analysis.dose_volumes {
            DoseVolumeReport::Necrosis(figures) => {
                writeln!(
                    f,
                    "Radionecrosis-Risk Volumes ({} fraction(s))",
                    figures.fractionation.count()
                )?;
                writeln!(f, "------------------------------------------")?;
                for figure in [figures.lower, figures.upper] {
                    writeln!(
                        f,
                        "V{}Gy:          {}",
                        figure.dose_gy,
                        fmt_quantity(figure.volume_cm3, "cm³")
                    )?;
                }
            }
            DoseVolumeReport::LungV20 { percent } => {
                writeln!(f, "Lung Overdose")?;
                writeln!(f, "-------------")?;
                writeln!(f, "V20Gy:          {}", fmt_quantity(*percent, "%"))?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Collected Values")?;
        writeln!(f, "----------------")?;
        for (name, value) in analysis.inputs.to_map() {
            let unit = if name.ends_with("_cm3") { "cm³" } else { "cGy" };
            writeln!(f, "{:<24} {}", name, fmt_quantity(value, unit))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DvhAnalyzer;
    use crate::report::Report;
    use crate::types::{AnalysisConfig, Fractionation, StructureAliases, TreatmentSite};

    #[test]
    fn test_text_report_format() {
        let report: Report = "\
Paciente: Maria Souza
ID: 1234
Dose total [cGy]: 2000
Estrutura: PTV
Volume [cm³]: 10,0
Dose máx [cGy]: 2100
Estrutura: Body
Dose [cGy]   Dose relativa [%]   Volume da estrutura [cm³]
1000 50 30,0
2000 100 11,0
"
        .parse()
        .unwrap();
        let config = AnalysisConfig {
            aliases: StructureAliases::default(),
            site: TreatmentSite::Cranial(Fractionation::Single),
        };
        let analysis = DvhAnalyzer::analyze(&report, &config);
        let output = format!("{}", TextReport::new(&analysis));

        assert!(output.contains("Patient:        Maria Souza"));
        assert!(output.contains("Patient ID:     1234"));
        assert!(output.contains("CI1          1.1000"));
        assert!(output.contains("HI2          1.0500"));
        // overlap structure absent: its metrics degrade, not the report
        assert!(output.contains("CI2          not computed"));
        assert!(output.contains("Radionecrosis-Risk Volumes (1 fraction(s))"));
        assert!(output.contains("V10Gy"));
        assert!(output.contains("V12Gy"));
        assert!(output.contains("ptv_volume_cm3           10.00 cm³"));
    }
}
