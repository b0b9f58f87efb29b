mod layout;
mod split;

pub use layout::{ensure_structure, required_dirs};
pub use split::{DatasetSplit, IMAGES_DIR, LABELS_DIR};
