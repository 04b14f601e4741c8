use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{assets::source::SourceKind, foundation::error::SheetResult};

/// Regular files directly inside `dir` with a supported input extension, sorted by path.
pub fn discover_inputs(dir: &Path) -> SheetResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(SourceKind::from_extension)
            .is_some();
        if supported {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// `path` if nothing exists there, else the first free `stem(N).ext` for N = 1, 2, ...
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1u32;
    loop {
        let candidate = path.with_file_name(format!("{stem}({counter}){ext}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Move `file` into `dir` under a collision-free name and return the new path.
///
/// Falls back to copy + remove when a rename is not possible (e.g. across filesystems).
pub fn move_into_dir(file: &Path, dir: &Path) -> SheetResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create directory '{}'", dir.display()))?;

    let file_name = file
        .file_name()
        .with_context(|| format!("'{}' has no file name", file.display()))?;
    let target = unique_path(&dir.join(file_name));

    if std::fs::rename(file, &target).is_err() {
        std::fs::copy(file, &target).with_context(|| {
            format!("copy '{}' to '{}'", file.display(), target.display())
        })?;
        std::fs::remove_file(file).with_context(|| format!("remove '{}'", file.display()))?;
    }

    tracing::info!(from = %file.display(), to = %target.display(), "moved original");
    Ok(target)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/fs.rs"]
mod tests;
