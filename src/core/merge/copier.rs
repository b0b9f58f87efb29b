//! Copies source datasets into the merged layout.
//!
//! Each subdirectory of the input root is one source dataset with the usual
//! `<split>/images` + `<split>/labels` folders. Images are copied as-is,
//! labels are rewritten so every annotation uses the merged class index.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use super::options::{LabelCollision, MergeOptions};
use super::report::MergeReport;
use crate::core::dataset::DatasetSplit;
use crate::core::label::LABEL_EXTENSION;
use crate::core::operations::{
    copy_preserving_times, existing_names, has_extension, list_files, list_subdirs,
    resolve_collision, resolve_stem_collision, split_file_name, write_normalized_label,
};
use crate::error::{MergeError, MergeResult};

/// Source stem -> stem the image was written under, for one source split.
type StemMap = HashMap<String, String>;

/// Names taken in one output split, on disk or planned earlier in this run.
///
/// Seeded once from disk before any copying, so a dry run sees the same
/// clashes a real run would.
#[derive(Debug, Default)]
struct TargetNames {
    images: HashSet<String>,
    labels: HashSet<String>,
    /// Stems of everything in `images` and `labels`
    stems: HashSet<String>,
}

impl TargetNames {
    fn from_disk(output_root: &Path, split: DatasetSplit) -> MergeResult<Self> {
        let mut names = Self::default();
        for name in existing_names(&split.images_dir(output_root))? {
            names.claim_image(name);
        }
        for name in existing_names(&split.labels_dir(output_root))? {
            names.claim_label(name);
        }
        Ok(names)
    }

    fn claim_image(&mut self, name: String) {
        self.stems.insert(split_file_name(&name).0.to_string());
        self.images.insert(name);
    }

    fn claim_label(&mut self, name: String) {
        self.stems.insert(split_file_name(&name).0.to_string());
        self.labels.insert(name);
    }
}

/// Merge every dataset found under `input_root` into `output_root`.
///
/// A missing input root or one without subdirectories is not an error: it is
/// logged and an empty report comes back. Any I/O failure aborts the merge;
/// files written up to that point stay where they are.
#[instrument(skip_all, name = "merge_datasets")]
pub fn merge_datasets(
    input_root: &Path,
    output_root: &Path,
    options: &MergeOptions,
) -> MergeResult<MergeReport> {
    let mut report = MergeReport::default();

    if !input_root.exists() {
        warn!("Input folder '{}' does not exist.", input_root.display());
        return Ok(report);
    }

    let datasets = list_subdirs(input_root)?;
    if datasets.is_empty() {
        warn!(
            "No subfolders found in '{}'. Nothing to copy.",
            input_root.display()
        );
        return Ok(report);
    }

    info!("Found {} dataset(s): {:?}", datasets.len(), datasets);
    report.datasets = datasets.len();

    let mut targets = HashMap::new();
    for split in DatasetSplit::all() {
        targets.insert(split, TargetNames::from_disk(output_root, split)?);
    }

    for name in &datasets {
        let source = input_root.join(name);
        for split in DatasetSplit::all() {
            let names = targets.entry(split).or_default();
            let stems = copy_images(&source, name, split, output_root, options, names, &mut report)?;
            copy_labels(&source, name, split, output_root, options, &stems, names, &mut report)?;
        }
    }

    if options.dry_run {
        info!("Dry run finished, nothing was written.");
    } else {
        info!("All available images and labels copied successfully.");
    }
    info!(
        "Summary: {} image(s) ({} renamed), {} label file(s) ({} renamed), {} folder(s) skipped",
        report.images_copied,
        report.images_renamed,
        report.labels_written,
        report.labels_renamed,
        report.skipped_folders
    );

    Ok(report)
}

fn prepare_target(dir: &Path, options: &MergeOptions) -> MergeResult<()> {
    if !options.dry_run {
        fs::create_dir_all(dir).map_err(|e| MergeError::io(dir, e))?;
    }
    Ok(())
}

fn file_name_of(path: &Path) -> MergeResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| MergeError::InvalidFileName(path.to_path_buf()))
}

/// Final name of an image. `follow-image` keeps stems unique across both
/// output folders so every image can own its label name.
fn image_destination(name: &str, policy: LabelCollision, names: &TargetNames) -> String {
    match policy {
        LabelCollision::FollowImage => resolve_stem_collision(name, &names.stems),
        LabelCollision::Overwrite => resolve_collision(name, &names.images),
    }
}

fn copy_images(
    source: &Path,
    dataset: &str,
    split: DatasetSplit,
    output_root: &Path,
    options: &MergeOptions,
    names: &mut TargetNames,
    report: &mut MergeReport,
) -> MergeResult<StemMap> {
    let mut stems = StemMap::new();
    let images_path = split.images_dir(source);
    if !images_path.is_dir() {
        warn!("No '{}/images' folder in {}", split, dataset);
        report.skipped_folders += 1;
        return Ok(stems);
    }

    let target = split.images_dir(output_root);
    prepare_target(&target, options)?;

    let images = list_files(&images_path, |_| true)?;

    for src in &images {
        let name = file_name_of(src)?;
        let final_name = image_destination(&name, options.label_collision, names);
        if final_name != name {
            debug!("'{}' already taken, copying as '{}'", name, final_name);
            report.images_renamed += 1;
        }

        let source_stem = split_file_name(&name).0.to_string();
        let final_stem = split_file_name(&final_name).0.to_string();
        stems.entry(source_stem).or_insert(final_stem);

        if !options.dry_run {
            copy_preserving_times(src, &target.join(&final_name))?;
        }
        names.claim_image(final_name);
        report.images_copied += 1;
    }

    info!(
        "Copied {} image(s) from {}/{}/images -> {}/images",
        images.len(),
        dataset,
        split,
        split
    );
    Ok(stems)
}

/// Final name of a label. Under `follow-image` a label takes the stem its
/// image was written under; a label without an image in the same source
/// split gets a stem of its own.
fn label_destination(
    name: &str,
    policy: LabelCollision,
    stems: &StemMap,
    names: &TargetNames,
) -> String {
    match policy {
        LabelCollision::Overwrite => name.to_string(),
        LabelCollision::FollowImage => {
            let (stem, ext) = split_file_name(name);
            match stems.get(stem) {
                Some(image_stem) => format!("{}{}", image_stem, ext),
                None => resolve_stem_collision(name, &names.stems),
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn copy_labels(
    source: &Path,
    dataset: &str,
    split: DatasetSplit,
    output_root: &Path,
    options: &MergeOptions,
    stems: &StemMap,
    names: &mut TargetNames,
    report: &mut MergeReport,
) -> MergeResult<()> {
    let labels_path = split.labels_dir(source);
    if !labels_path.is_dir() {
        warn!("No '{}/labels' folder in {}", split, dataset);
        report.skipped_folders += 1;
        return Ok(());
    }

    let target = split.labels_dir(output_root);
    prepare_target(&target, options)?;

    let labels: Vec<PathBuf> = list_files(&labels_path, |p| has_extension(p, LABEL_EXTENSION))?;

    for src in &labels {
        let name = file_name_of(src)?;
        let final_name = label_destination(&name, options.label_collision, stems, names);
        if final_name != name {
            debug!("Label '{}' written as '{}'", name, final_name);
            report.labels_renamed += 1;
        } else if names.labels.contains(&name) {
            debug!("Overwriting existing label '{}'", name);
        }

        if !options.dry_run {
            write_normalized_label(src, &target.join(&final_name), options.class_index)?;
        }
        names.claim_label(final_name);
        report.labels_written += 1;
    }

    info!(
        "Processed {} label file(s) from {}/{}/labels -> {}/labels",
        labels.len(),
        dataset,
        split,
        split
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(images: &[&str], labels: &[&str]) -> TargetNames {
        let mut names = TargetNames::default();
        for name in images {
            names.claim_image(name.to_string());
        }
        for name in labels {
            names.claim_label(name.to_string());
        }
        names
    }

    #[test]
    fn test_label_follows_renamed_image() {
        let mut stems = StemMap::new();
        stems.insert("a".to_string(), "a_1".to_string());
        let names = taken(&["a.jpg", "a_1.jpg"], &["a.txt"]);

        assert_eq!(
            label_destination("a.txt", LabelCollision::FollowImage, &stems, &names),
            "a_1.txt"
        );
        assert_eq!(
            label_destination("a.txt", LabelCollision::Overwrite, &stems, &names),
            "a.txt"
        );
    }

    #[test]
    fn test_orphan_label_gets_suffix() {
        let names = taken(&[], &["b.txt"]);
        assert_eq!(
            label_destination("b.txt", LabelCollision::FollowImage, &StemMap::new(), &names),
            "b_1.txt"
        );
    }

    #[test]
    fn test_image_stem_clash_across_extensions() {
        let names = taken(&["a.jpg"], &["a.txt"]);
        assert_eq!(
            image_destination("a.png", LabelCollision::FollowImage, &names),
            "a_1.png"
        );
        assert_eq!(
            image_destination("a.png", LabelCollision::Overwrite, &names),
            "a.png"
        );
    }

    #[test]
    fn test_orphan_label_blocks_image_stem() {
        let names = taken(&[], &["c.txt"]);
        assert_eq!(
            image_destination("c.jpg", LabelCollision::FollowImage, &names),
            "c_1.jpg"
        );
    }
}
