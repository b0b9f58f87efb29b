/// Counters collected while merging, logged as the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Source datasets found under the input root
    pub datasets: usize,
    pub images_copied: usize,
    /// Images written under a suffixed name because the original was taken
    pub images_renamed: usize,
    pub labels_written: usize,
    /// Labels written under a name other than their source name
    pub labels_renamed: usize,
    /// `<split>/images` or `<split>/labels` folders missing from a source
    pub skipped_folders: usize,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.images_copied == 0 && self.labels_written == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(MergeReport::default().is_empty());
        let skipped_only = MergeReport {
            datasets: 1,
            skipped_folders: 6,
            ..Default::default()
        };
        assert!(skipped_only.is_empty());
        let copied = MergeReport {
            images_copied: 1,
            ..Default::default()
        };
        assert!(!copied.is_empty());
    }
}
