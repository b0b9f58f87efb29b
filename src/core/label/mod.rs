mod normalizer;

pub use normalizer::{normalize_label_content, normalize_line, MERGED_CLASS_INDEX};

/// Extension of YOLO label files.
pub const LABEL_EXTENSION: &str = "txt";
