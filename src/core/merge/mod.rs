mod copier;
mod options;
mod report;

pub use copier::merge_datasets;
pub use options::{LabelCollision, MergeOptions};
pub use report::MergeReport;
