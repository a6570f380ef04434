pub mod dose_volume;
pub mod indices;

pub use dose_volume::{lung_v20, necrosis_volumes, DoseVolumeFigure, NecrosisVolumes};
pub use indices::{effective_radius, MetricReport};
