use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::error::{SheetError, SheetResult};

/// Destination for finished sprite sheets.
///
/// `write_sheet` receives the contract file name (see [`crate::sheet_file_name`]) and returns
/// where the sheet ended up. Implementations must be shareable across batch workers.
pub trait SheetSink: Send + Sync {
    /// Persist one sheet. Either the whole sheet is stored or an error is returned.
    fn write_sheet(&self, file_name: &str, sheet: &RgbaImage) -> SheetResult<PathBuf>;
}

/// Writes lossless RGBA PNG files into a directory.
#[derive(Clone, Debug)]
pub struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    /// Create a sink writing into `dir` (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SheetSink for PngDirSink {
    fn write_sheet(&self, file_name: &str, sheet: &RgbaImage) -> SheetResult<PathBuf> {
        let out_path = self.dir.join(file_name);
        ensure_parent_dir(&out_path)?;

        sheet
            .save_with_format(&out_path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", out_path.display()))?;

        tracing::info!(path = %out_path.display(), "wrote sprite sheet");
        Ok(out_path)
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemorySheetSink {
    sheets: Mutex<Vec<(String, RgbaImage)>>,
}

impl InMemorySheetSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the captured `(file name, sheet)` pairs in write order.
    pub fn take(&self) -> Vec<(String, RgbaImage)> {
        match self.sheets.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl SheetSink for InMemorySheetSink {
    fn write_sheet(&self, file_name: &str, sheet: &RgbaImage) -> SheetResult<PathBuf> {
        let mut guard = self
            .sheets
            .lock()
            .map_err(|_| SheetError::validation("in-memory sheet sink lock poisoned"))?;
        guard.push((file_name.to_string(), sheet.clone()));
        Ok(PathBuf::from(file_name))
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> SheetResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
