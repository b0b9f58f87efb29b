use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::split::DatasetSplit;
use crate::error::{MergeError, MergeResult};

/// The six `<split>/{images,labels}` directories of a merged dataset.
pub fn required_dirs(root: &Path) -> Vec<PathBuf> {
    DatasetSplit::all()
        .iter()
        .flat_map(|split| [split.images_dir(root), split.labels_dir(root)])
        .collect()
}

/// Make sure every split directory exists under `root`.
///
/// Existing directories and any unrelated content are left untouched, so this
/// can be called on a fresh path or on the output of a previous run.
pub fn ensure_structure(root: &Path) -> MergeResult<()> {
    if root.exists() {
        info!("'{}' folder already exists. Ensuring subfolders exist...", root.display());
    } else {
        info!("'{}' folder not found. Creating full structure...", root.display());
    }

    for dir in required_dirs(root) {
        fs::create_dir_all(&dir).map_err(|e| MergeError::io(&dir, e))?;
        debug!("Ensured {:?}", dir);
    }

    Ok(())
}
