//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Path of `path` relative to `base`, ignoring `.` components on both sides.
///
/// Falls back to the file name when `path` does not live under `base`, so
/// output placement always produces *some* target.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use weft::utils::relative_to;
///
/// assert_eq!(
///     relative_to(Path::new("proj/src/app.ts"), Path::new("proj/./")),
///     Path::new("src/app.ts")
/// );
/// assert_eq!(
///     relative_to(Path::new("/elsewhere/x.ts"), Path::new("proj")),
///     Path::new("x.ts")
/// );
/// ```
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let normalize = |p: &Path| -> PathBuf {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };

    let path = normalize(path);
    let base = normalize(base);
    match path.strip_prefix(&base) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.clone()),
    }
}
