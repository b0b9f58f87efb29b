use std::collections::HashSet;

/// Split a filename into stem and extension (extension keeps its dot).
///
/// Leading dots belong to the stem, so `.hidden` has no extension.
pub fn split_file_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].chars().all(|c| c == '.') => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Name for the `n`-th duplicate of `name`: `photo.jpg` -> `photo_2.jpg`.
pub fn suffixed_name(name: &str, n: usize) -> String {
    let (stem, ext) = split_file_name(name);
    format!("{}_{}{}", stem, n, ext)
}

/// Pick a filename that does not clash with `existing`.
///
/// Returns `desired` when it is free, otherwise `<stem>_<n><ext>` with the
/// smallest `n >= 1` not already taken.
pub fn resolve_collision(desired: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(desired) {
        return desired.to_string();
    }

    (1..)
        .map(|n| suffixed_name(desired, n))
        .find(|candidate| !existing.contains(candidate))
        .unwrap_or_else(|| desired.to_string())
}

/// Like [`resolve_collision`], but a clash is any taken stem, whatever its
/// extension: with `a` taken, `a.png` becomes `a_1.png`.
pub fn resolve_stem_collision(desired: &str, taken_stems: &HashSet<String>) -> String {
    let (stem, _) = split_file_name(desired);
    if !taken_stems.contains(stem) {
        return desired.to_string();
    }

    (1..)
        .map(|n| suffixed_name(desired, n))
        .find(|candidate| !taken_stems.contains(split_file_name(candidate).0))
        .unwrap_or_else(|| desired.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_free_name_kept() {
        assert_eq!(resolve_collision("a.jpg", &names(&["b.jpg"])), "a.jpg");
    }

    #[test]
    fn test_first_suffix() {
        assert_eq!(resolve_collision("a.jpg", &names(&["a.jpg"])), "a_1.jpg");
    }

    #[test]
    fn test_minimal_unused_suffix() {
        let existing = names(&["a.jpg", "a_1.jpg", "a_2.jpg", "a_4.jpg"]);
        assert_eq!(resolve_collision("a.jpg", &existing), "a_3.jpg");
    }

    #[test]
    fn test_suffix_before_last_extension() {
        assert_eq!(
            resolve_collision("scan.rf.abc.jpeg", &names(&["scan.rf.abc.jpeg"])),
            "scan.rf.abc_1.jpeg"
        );
    }

    #[test]
    fn test_names_without_extension() {
        assert_eq!(resolve_collision("README", &names(&["README"])), "README_1");
        assert_eq!(resolve_collision(".hidden", &names(&[".hidden"])), ".hidden_1");
    }

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("a.txt"), ("a", ".txt"));
        assert_eq!(split_file_name("a"), ("a", ""));
        assert_eq!(split_file_name("..a"), ("..a", ""));
    }

    #[test]
    fn test_stem_clash_across_extensions() {
        let stems = names(&["a", "a_1"]);
        assert_eq!(resolve_stem_collision("a.png", &stems), "a_2.png");
        assert_eq!(resolve_stem_collision("b.png", &stems), "b.png");
    }
}
