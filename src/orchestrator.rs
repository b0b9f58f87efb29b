use std::path::Path;
use tracing::{info, instrument};

use crate::config::MergeSettings;
use crate::core::dataset::{ensure_structure, DatasetSplit};
use crate::core::descriptor::{DatasetDescriptor, DESCRIPTOR_FILE};
use crate::core::label::LABEL_EXTENSION;
use crate::core::operations::{has_extension, list_files};
use crate::core::merge::{merge_datasets, MergeReport};
use crate::error::MergeResult;

/// Full merge run: output structure, then copying, then the descriptor.
///
/// The steps run once each, in that order. Missing input folders are logged by
/// the copier and do not stop the run; I/O errors do.
#[instrument(skip_all, name = "run")]
pub fn run(settings: &MergeSettings) -> MergeResult<MergeReport> {
    let options = settings.merge_options();
    let descriptor = DatasetDescriptor::single_class(settings.descriptor_root(), &settings.class_name);
    let descriptor_path = settings.descriptor_path();

    if options.dry_run {
        info!("Dry run: skipping creation of {:?}", settings.output_root);
    } else {
        ensure_structure(&settings.output_root)?;
    }

    let report = merge_datasets(&settings.input_root, &settings.output_root, &options)?;

    if options.dry_run {
        info!("Dry run: would write descriptor to {:?}", descriptor_path);
    } else {
        descriptor.write(&descriptor_path)?;
    }

    Ok(report)
}

/// File counts of one split of a merged dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub split: DatasetSplit,
    pub images: usize,
    pub labels: usize,
}

/// Read back a merged dataset: its descriptor and per-split file counts.
/// Missing split folders count as empty.
pub fn inspect(root: &Path) -> MergeResult<(DatasetDescriptor, Vec<SplitSummary>)> {
    let descriptor = DatasetDescriptor::load(&root.join(DESCRIPTOR_FILE))?;

    let mut summaries = Vec::new();
    for split in DatasetSplit::all() {
        summaries.push(SplitSummary {
            split,
            images: count_files(&split.images_dir(root), |_| true)?,
            labels: count_files(&split.labels_dir(root), |p| has_extension(p, LABEL_EXTENSION))?,
        });
    }

    Ok((descriptor, summaries))
}

fn count_files<F>(dir: &Path, filter: F) -> MergeResult<usize>
where
    F: Fn(&Path) -> bool,
{
    if !dir.is_dir() {
        return Ok(0);
    }
    Ok(list_files(dir, filter)?.len())
}
