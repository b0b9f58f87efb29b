use std::fs;

use combine_datasets::core::dataset::DatasetSplit;
use combine_datasets::orchestrator::inspect;
use combine_datasets::{run, MergeError, MergeSettings};

#[test]
fn inspect_counts_merged_files() {
    let temp = tempfile::tempdir().unwrap();
    let settings = MergeSettings {
        input_root: temp.path().join("in"),
        output_root: temp.path().join("merged"),
        ..Default::default()
    };
    let images = settings.input_root.join("pads/valid/images");
    let labels = settings.input_root.join("pads/valid/labels");
    fs::create_dir_all(&images).unwrap();
    fs::create_dir_all(&labels).unwrap();
    fs::write(images.join("1.jpg"), b"1").unwrap();
    fs::write(images.join("2.jpg"), b"2").unwrap();
    fs::write(labels.join("1.txt"), "0 0.1 0.1 0.1 0.1").unwrap();

    run(&settings).unwrap();
    let (descriptor, summaries) = inspect(&settings.output_root).unwrap();

    assert_eq!(descriptor.path, "merged");
    let valid = summaries
        .iter()
        .find(|s| s.split == DatasetSplit::Valid)
        .unwrap();
    assert_eq!((valid.images, valid.labels), (2, 1));
    let train = summaries
        .iter()
        .find(|s| s.split == DatasetSplit::Train)
        .unwrap();
    assert_eq!((train.images, train.labels), (0, 0));
}

#[test]
fn inspect_without_descriptor_fails() {
    let temp = tempfile::tempdir().unwrap();
    assert!(matches!(
        inspect(temp.path()),
        Err(MergeError::Io { .. })
    ));
}
