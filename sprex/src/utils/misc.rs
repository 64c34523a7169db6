use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::err;

pub const SPRITE_EXTENSION: &str = "sprite";

/// Recursively collects .sprite files under `root`. Files whose name contains
/// `skip_if_contains` (case-insensitive) are dropped before any work starts.
pub fn find_sprite_files(
    root: &Path,
    skip_if_contains: Option<&str>,
) -> eyre::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return err!("input folder `{}` is not a folder", root.display());
    }

    let skip = skip_if_contains.map(|skip| skip.to_lowercase());

    let res = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension().is_some()
                && path
                    .extension()
                    .unwrap()
                    .eq_ignore_ascii_case(SPRITE_EXTENSION)
        })
        .filter(|path| {
            let Some(skip) = &skip else {
                return true;
            };

            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(true, |name| !name.to_lowercase().contains(skip))
        })
        .collect();

    Ok(res)
}

/// Re-roots `file`'s parent folder from `input_root` to `output_root` so the
/// output tree mirrors the input tree.
pub fn rebase_parent(input_root: &Path, output_root: &Path, file: &Path) -> eyre::Result<PathBuf> {
    let rel = file.strip_prefix(input_root)?;

    Ok(match rel.parent() {
        Some(parent) => output_root.join(parent),
        None => output_root.to_path_buf(),
    })
}

#[macro_export]
macro_rules! err {
    ($e: ident) => {{
        use eyre::eyre;

        Err(eyre!($e))
    }};

    ($format_string: literal) => {{
        use eyre::eyre;

        Err(eyre!($format_string))
    }};

    ($($arg:tt)*) => {{
        use eyre::eyre;

        Err(eyre!($($arg)*))
    }};
}
