use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::descriptor::{DEFAULT_CLASS_NAME, DESCRIPTOR_FILE};
use crate::core::label::MERGED_CLASS_INDEX;
use crate::core::merge::{LabelCollision, MergeOptions};
use crate::error::{MergeError, MergeResult};

/// Persistent merge settings, optionally loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    /// Folder whose subdirectories are the source datasets
    pub input_root: PathBuf,

    /// Folder the merged dataset is written to
    pub output_root: PathBuf,

    /// Name of the single class in the descriptor
    pub class_name: String,

    /// `path` value written to the descriptor; defaults to the output folder name
    pub descriptor_root: Option<String>,

    /// How label file name clashes are handled
    pub label_collision: LabelCollision,

    /// Log what would happen without writing anything
    pub dry_run: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("combine_datasets/input_datasets"),
            output_root: PathBuf::from("combine_datasets/dataset"),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            descriptor_root: None,
            label_collision: LabelCollision::default(),
            dry_run: false,
        }
    }
}

impl MergeSettings {
    /// Default location of the settings file in the user's config directory
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "combine-datasets")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from an explicit file. Unlike [`MergeSettings::load`], a
    /// missing or broken file is an error here.
    pub fn load_from(path: &Path) -> MergeResult<Self> {
        info!("Loading settings from: {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| MergeError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|source| MergeError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from the default location, or return defaults if the
    /// file doesn't exist or is corrupted
    pub fn load() -> Self {
        let Some(config_path) = Self::get_config_path() else {
            warn!("Could not determine config directory. Using defaults.");
            return Self::default();
        };

        if !config_path.exists() {
            info!("No settings file found. Using defaults.");
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(settings) => {
                info!("Successfully loaded settings");
                settings
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> MergeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MergeError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| MergeError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| MergeError::io(path, e))?;
        info!("Settings saved to: {:?}", path);
        Ok(())
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.output_root.join(DESCRIPTOR_FILE)
    }

    /// `path` entry of the descriptor
    pub fn descriptor_root(&self) -> String {
        self.descriptor_root.clone().unwrap_or_else(|| {
            self.output_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.output_root.to_string_lossy().into_owned())
        })
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            class_index: MERGED_CLASS_INDEX,
            label_collision: self.label_collision,
            dry_run: self.dry_run,
        }
    }
}
