pub mod fix;
pub mod run;

pub use fix::{GpsFix, Photo};
pub use run::{ProfilePoint, RunRecord, RunSummary};
