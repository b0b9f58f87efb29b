mod options;

pub use options::{ExportOptions, TrainOptions, EXPORT_OPTIONS_FILE, TRAIN_OPTIONS_FILE};
