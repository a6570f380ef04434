//! Core type definitions for DVH analysis
//!
//! - [`StructureAliases`]: user-declared structure names threaded through every extractor call
//! - [`TreatmentSite`]: selector for the site-specific dose-volume figures
//! - [`Fractionation`]: supported fraction schedules and their radionecrosis dose pairs
//! - [`AnalysisConfig`]: the full configuration bundle for one analysis
//! - [`MetricInputs`]: every extracted scalar/curve value, all optional

mod config;
mod inputs;

pub use config::{AnalysisConfig, Fractionation, StructureAliases, TreatmentSite};
pub use inputs::MetricInputs;
