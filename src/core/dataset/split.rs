use std::path::{Path, PathBuf};

/// Subfolder holding the image files of a split.
pub const IMAGES_DIR: &str = "images";
/// Subfolder holding the label files of a split.
pub const LABELS_DIR: &str = "labels";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Test,
    Valid,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test => "test",
            DatasetSplit::Valid => "valid",
        }
    }

    /// All splits in processing order.
    pub fn all() -> [DatasetSplit; 3] {
        [DatasetSplit::Train, DatasetSplit::Test, DatasetSplit::Valid]
    }

    /// `<root>/<split>/images`
    pub fn images_dir(&self, root: &Path) -> PathBuf {
        root.join(self.as_str()).join(IMAGES_DIR)
    }

    /// `<root>/<split>/labels`
    pub fn labels_dir(&self, root: &Path) -> PathBuf {
        root.join(self.as_str()).join(LABELS_DIR)
    }

    /// Image directory relative to the dataset root, as the trainer expects it.
    pub fn relative_images(&self) -> String {
        format!("{}/{}", self.as_str(), IMAGES_DIR)
    }
}

impl std::fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_order() {
        let all = DatasetSplit::all();
        let names: Vec<&str> = all.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["train", "test", "valid"]);
    }

    #[test]
    fn test_split_dirs() {
        let root = Path::new("out");
        assert_eq!(
            DatasetSplit::Valid.images_dir(root),
            Path::new("out").join("valid").join("images")
        );
        assert_eq!(
            DatasetSplit::Train.labels_dir(root),
            Path::new("out").join("train").join("labels")
        );
        assert_eq!(DatasetSplit::Test.relative_images(), "test/images");
    }
}
