//! Option documents for the external trainer and exporter.
//!
//! Nothing here trains or exports a model; these structs only capture the
//! parameters the detection library is invoked with, so they can be written
//! next to the merged dataset and passed to it as a config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{MergeError, MergeResult};

pub const TRAIN_OPTIONS_FILE: &str = "train.yaml";
pub const EXPORT_OPTIONS_FILE: &str = "export.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainOptions {
    /// Starting weights
    pub model: String,
    /// Dataset descriptor
    pub data: String,
    pub epochs: u32,
    pub imgsz: u32,
    pub batch: u32,
    /// GPU index or `cpu`
    pub device: String,
    pub project: String,
    pub name: String,
    pub plots: bool,
    pub resume: bool,
    /// Early stopping patience in epochs
    pub patience: u32,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            model: "yolo11n.pt".to_string(),
            data: "dataset/data.yaml".to_string(),
            epochs: 200,
            imgsz: 640,
            batch: 16,
            device: "0".to_string(),
            project: "landingpad_detection_results".to_string(),
            name: "landingpad_detection".to_string(),
            plots: true,
            resume: true,
            patience: 30,
        }
    }
}

impl TrainOptions {
    pub fn validate(&self) -> MergeResult<()> {
        for (key, value) in [("epochs", self.epochs), ("imgsz", self.imgsz), ("batch", self.batch)] {
            if value == 0 {
                return Err(MergeError::InvalidOption(format!("{} must be positive", key)));
            }
        }
        Ok(())
    }

    pub fn write_yaml(&self, path: &Path) -> MergeResult<()> {
        self.validate()?;
        write_yaml(self, path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Trained weights to export
    pub model: String,
    /// Target format name
    pub format: String,
    pub imgsz: u32,
    /// Dataset descriptor used for calibration
    pub data: String,
    pub int8: bool,
    /// Share of the dataset used for INT8 calibration
    pub fraction: f32,
    pub device: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            model: "best.pt".to_string(),
            format: "imx".to_string(),
            imgsz: 640,
            data: "dataset/data.yaml".to_string(),
            int8: true,
            fraction: 0.2,
            device: "0".to_string(),
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> MergeResult<()> {
        if self.imgsz == 0 {
            return Err(MergeError::InvalidOption("imgsz must be positive".to_string()));
        }
        if !(self.fraction > 0.0 && self.fraction <= 1.0) {
            return Err(MergeError::InvalidOption(format!(
                "fraction must be in (0, 1], got {}",
                self.fraction
            )));
        }
        Ok(())
    }

    pub fn write_yaml(&self, path: &Path) -> MergeResult<()> {
        self.validate()?;
        write_yaml(self, path)
    }
}

fn write_yaml<T: Serialize>(options: &T, path: &Path) -> MergeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MergeError::io(parent, e))?;
    }
    let yaml = serde_yaml::to_string(options).map_err(|source| MergeError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, yaml).map_err(|e| MergeError::io(path, e))?;
    info!("Options written to {:?}", path);
    Ok(())
}
