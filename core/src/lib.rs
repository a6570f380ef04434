pub mod api;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod metrics;
pub mod report;
pub mod types;

pub use api::{DoseVolumeReport, DvhAnalysis, DvhAnalyzer};
pub use cli::report::TextReport;
pub use error::{DvhError, Result};
pub use extraction::{DoseAxis, PatientInfo};
pub use metrics::{DoseVolumeFigure, MetricReport, NecrosisVolumes};
pub use report::{DoseVolumeRow, Report};
pub use types::*;
