//! `data.yaml` describing the merged dataset for the trainer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::core::dataset::DatasetSplit;
use crate::core::label::MERGED_CLASS_INDEX;
use crate::error::{MergeError, MergeResult};

/// File name of the descriptor inside the output root.
pub const DESCRIPTOR_FILE: &str = "data.yaml";
/// Name of the single class every annotation is collapsed into.
pub const DEFAULT_CLASS_NAME: &str = "landingpad";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Number of object classes
    pub nc: u32,
    /// Class index -> class name
    pub names: BTreeMap<u32, String>,
    /// Dataset root, split paths are relative to it
    pub path: String,
    pub train: String,
    pub val: String,
    pub test: String,
}

impl DatasetDescriptor {
    /// Descriptor for a dataset where everything is one class.
    pub fn single_class(root: impl Into<String>, class_name: impl Into<String>) -> Self {
        let mut names = BTreeMap::new();
        names.insert(MERGED_CLASS_INDEX, class_name.into());
        Self {
            nc: 1,
            names,
            path: root.into(),
            train: DatasetSplit::Train.relative_images(),
            val: DatasetSplit::Valid.relative_images(),
            test: DatasetSplit::Test.relative_images(),
        }
    }

    /// Serialize to `path`, creating parent directories and replacing any
    /// existing file.
    pub fn write(&self, path: &Path) -> MergeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MergeError::io(parent, e))?;
        }

        let yaml = serde_yaml::to_string(self).map_err(|source| MergeError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, yaml).map_err(|e| MergeError::io(path, e))?;

        info!("Dataset descriptor written to {:?}", path);
        Ok(())
    }

    pub fn load(path: &Path) -> MergeResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| MergeError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| MergeError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
