pub mod curve;
pub mod header;
pub mod scalar;

pub use curve::{
    dose_at_volume_fraction, volume_at_dose, volume_at_exact_dose, DoseAxis,
    DOSE_MATCH_TOLERANCE_CGY,
};
pub use header::{patient_info, prescription_dose, PatientInfo};
pub use scalar::{extract_scalar, FIELD_MAX_DOSE, FIELD_MEAN_DOSE, FIELD_MIN_DOSE, FIELD_STD_DEV, FIELD_VOLUME};
