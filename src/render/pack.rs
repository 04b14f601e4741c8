use image::{Rgba, RgbaImage, imageops};

use crate::foundation::{
    core::SheetLayout,
    error::{SheetError, SheetResult},
};

/// Lay `frames` out row-major on a transparent `layout.canvas_size()` square canvas.
///
/// Each frame is resized (Lanczos3, aspect ratio ignored) to the cell size and written over the
/// destination cell without blending. Cells past `frames.len()` stay fully transparent.
pub fn pack(frames: &[RgbaImage], layout: &SheetLayout) -> SheetResult<RgbaImage> {
    layout.validate()?;
    if frames.len() > layout.capacity() {
        return Err(SheetError::input(format!(
            "{} frames do not fit a {}x{} sheet ({} cells)",
            frames.len(),
            layout.grid,
            layout.grid,
            layout.capacity()
        )));
    }

    let side = layout.canvas_size();
    let mut canvas = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));

    for (idx, frame) in frames.iter().enumerate() {
        let (x, y) = layout.cell_origin(idx);
        let cell = fit_cell(frame, layout.cell_size);
        imageops::replace(&mut canvas, &cell, i64::from(x), i64::from(y));
    }

    Ok(canvas)
}

/// Resize a copy of `frame` to a `cell_size` square.
pub fn fit_cell(frame: &RgbaImage, cell_size: u32) -> RgbaImage {
    imageops::resize(frame, cell_size, cell_size, imageops::FilterType::Lanczos3)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pack.rs"]
mod tests;
