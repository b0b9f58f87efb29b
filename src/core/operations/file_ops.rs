use std::collections::HashSet;
use std::fs::{self, FileTimes, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::label::normalize_label_content;
use crate::error::{MergeError, MergeResult};

/// Regular files directly inside `dir`, sorted by path.
///
/// `filter` sees each candidate path and decides whether to keep it.
pub fn list_files<F>(dir: &Path, filter: F) -> MergeResult<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MergeError::io(dir, e))? {
        let path = entry.map_err(|e| MergeError::io(dir, e))?.path();
        if path.is_file() && filter(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Sorted names of the subdirectories of `dir`. A name that is not valid
/// UTF-8 is an error.
pub fn list_subdirs(dir: &Path) -> MergeResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MergeError::io(dir, e))? {
        let path = entry.map_err(|e| MergeError::io(dir, e))?.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| MergeError::InvalidFileName(path.clone()))?;
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Names of every entry already present in `dir`. A missing directory is empty.
pub fn existing_names(dir: &Path) -> MergeResult<HashSet<String>> {
    if !dir.exists() {
        return Ok(HashSet::new());
    }
    let mut names = HashSet::new();
    for entry in fs::read_dir(dir).map_err(|e| MergeError::io(dir, e))? {
        let entry = entry.map_err(|e| MergeError::io(dir, e))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Whether `path` has the given extension (case-sensitive, without the dot).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Copy `src` to `dest` byte for byte, then carry over the access and
/// modification times.
///
/// Failing to restore the timestamps only logs a warning; the copy itself is
/// what counts.
pub fn copy_preserving_times(src: &Path, dest: &Path) -> MergeResult<()> {
    debug!("Copying {:?} -> {:?}", src, dest);
    fs::copy(src, dest).map_err(|e| MergeError::io(src, e))?;

    if let Err(e) = copy_times(src, dest) {
        warn!("Copied {:?} but could not preserve timestamps: {}", dest, e);
    }
    Ok(())
}

fn copy_times(src: &Path, dest: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    OpenOptions::new().write(true).open(dest)?.set_times(times)
}

/// Read a label file, collapse every class index to `class_index` and write
/// the result to `dest`, replacing anything already there.
pub fn write_normalized_label(src: &Path, dest: &Path, class_index: u32) -> MergeResult<()> {
    let content = fs::read_to_string(src).map_err(|e| MergeError::io(src, e))?;
    let normalized = normalize_label_content(&content, class_index);
    fs::write(dest, normalized).map_err(|e| MergeError::io(dest, e))?;
    debug!("Wrote normalized label {:?}", dest);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_files_filters_and_sorts() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("b.txt"), "").unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::write(temp.path().join("c.json"), "").unwrap();
        fs::create_dir(temp.path().join("d.txt")).unwrap();

        let files = list_files(temp.path(), |p| has_extension(p, "txt")).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_list_subdirs_sorted_dirs_only() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("roboflow")).unwrap();
        fs::create_dir(temp.path().join("kaggle")).unwrap();
        fs::write(temp.path().join("README.md"), "").unwrap();

        assert_eq!(list_subdirs(temp.path()).unwrap(), vec!["kaggle", "roboflow"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_subdirs_rejects_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join(OsStr::from_bytes(b"bad\xff"))).unwrap();

        assert!(matches!(
            list_subdirs(temp.path()),
            Err(MergeError::InvalidFileName(_))
        ));
    }

    #[test]
    fn test_existing_names_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        assert!(existing_names(&temp.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_copy_preserves_modified_time() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src.jpg");
        let dest = temp.path().join("dest.jpg");
        fs::write(&src, b"\xff\xd8\xff").unwrap();

        let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        OpenOptions::new()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(old)
            .unwrap();

        copy_preserving_times(&src, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"\xff\xd8\xff");
        assert_eq!(fs::metadata(&dest).unwrap().modified().unwrap(), old);
    }

    #[test]
    fn test_copy_missing_source_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = copy_preserving_times(&temp.path().join("gone.jpg"), &temp.path().join("x.jpg"))
            .unwrap_err();
        assert!(matches!(err, MergeError::Io { .. }));
    }
}
