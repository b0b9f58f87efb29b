use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::label::MERGED_CLASS_INDEX;

/// What to do when a label file's name is already taken in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LabelCollision {
    /// Name the label after the image it belongs to, so a renamed `a_1.jpg`
    /// gets `a_1.txt`; labels without a copied image get their own suffix.
    #[default]
    FollowImage,
    /// Write under the original name and replace whatever is there.
    Overwrite,
}

impl LabelCollision {
    pub fn as_str(&self) -> &str {
        match self {
            LabelCollision::FollowImage => "follow-image",
            LabelCollision::Overwrite => "overwrite",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Class index written as the first token of every label line
    pub class_index: u32,
    pub label_collision: LabelCollision,
    /// Plan and log without touching the filesystem
    pub dry_run: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            class_index: MERGED_CLASS_INDEX,
            label_collision: LabelCollision::default(),
            dry_run: false,
        }
    }
}
