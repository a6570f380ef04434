pub mod report;

use crate::error::Result;
use crate::types::{AnalysisConfig, Fractionation, StructureAliases, TreatmentSite};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dvhmetrics
#[derive(Parser, Debug)]
#[command(name = "dvhmetrics")]
#[command(about = "DVH text-report parsing and plan-quality metrics")]
#[command(version)]
pub struct Cli {
    /// Path to the DVH text export
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Treatment site
    #[arg(short, long, default_value = "cranial")]
    pub site: SiteArg,

    /// Number of treatment fractions (cranial sites: 1, 3 or 5)
    #[arg(long, default_value_t = 1)]
    pub fractions: u32,

    /// Structure name of the planning target volume in the report
    #[arg(long, default_value = "ptv")]
    pub ptv: String,

    /// Structure name of the body/external contour
    #[arg(long, default_value = "body")]
    pub body: String,

    /// Structure name of the PTV ∩ 100%-isodose overlap
    #[arg(long, default_value = "overlap")]
    pub overlap: String,

    /// Structure name of the 50%-isodose structure
    #[arg(long, default_value = "iso50")]
    pub iso50: String,

    /// Structure name of the risk organ (encephalon, lungs);
    /// defaults to the body contour
    #[arg(long)]
    pub organ: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Treatment site options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SiteArg {
    /// Cranial radiosurgery (radionecrosis-risk volumes)
    Cranial,
    /// Lung treatment (V20Gy)
    Lung,
}

impl Cli {
    /// Builds the analysis configuration from the parsed arguments
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DvhError::InvalidFractionCount`] for a
    /// cranial site with a fraction count outside {1, 3, 5}.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut aliases = StructureAliases::default()
            .with_ptv(&self.ptv)
            .with_body(&self.body)
            .with_overlap(&self.overlap)
            .with_iso50(&self.iso50);
        if let Some(organ) = &self.organ {
            aliases = aliases.with_risk_organ(organ);
        }

        let site = match self.site {
            SiteArg::Cranial => TreatmentSite::Cranial(Fractionation::from_count(self.fractions)?),
            SiteArg::Lung => TreatmentSite::Lung,
        };

        Ok(AnalysisConfig { aliases, site })
    }
}
