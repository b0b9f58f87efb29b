mod collision;
mod file_ops;

pub use collision::{resolve_collision, resolve_stem_collision, split_file_name, suffixed_name};
pub use file_ops::{
    copy_preserving_times, existing_names, has_extension, list_files, list_subdirs,
    write_normalized_label,
};
