//! Rasterized snapshots of a mounted graphic, for previews and the `frames` command.

use crate::foundation::core::FRAME_INTERVAL;
use crate::foundation::error::{AnimapperError, AnimapperResult};
use crate::host::{Page, WidgetId};

const MAX_DIM: u32 = 16_384;

/// Serialize the graphic mounted by `widget` in its current state.
pub fn snapshot_svg(page: &Page, widget: WidgetId) -> AnimapperResult<String> {
    let w = page
        .widget(widget)
        .ok_or_else(|| AnimapperError::validation(format!("unknown widget {widget:?}")))?;
    let root = w
        .graphic_root()
        .ok_or_else(|| AnimapperError::validation("widget has no mounted graphic"))?;
    Ok(page.document().subtree_to_string(root))
}

/// Render SVG text at `scale` into straight-alpha RGBA8.
pub fn rasterize_svg(svg: &str, scale: f32) -> AnimapperResult<image::RgbaImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(AnimapperError::validation("scale must be finite and > 0"));
    }
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| AnimapperError::render(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let width = to_px(size.width() * scale)?;
    let height = to_px(size.height() * scale)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AnimapperError::render("failed to allocate pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut rgba = pixmap.take();
    demultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| AnimapperError::render("pixmap size does not match image size"))
}

/// Rasterize the widget's graphic now and after each of `ticks` animation ticks.
pub fn render_ticks(
    page: &mut Page,
    widget: WidgetId,
    ticks: u32,
    scale: f32,
) -> AnimapperResult<Vec<image::RgbaImage>> {
    let mut out = Vec::with_capacity(ticks as usize + 1);
    out.push(rasterize_svg(&snapshot_svg(page, widget)?, scale)?);
    for _ in 0..ticks {
        page.advance(FRAME_INTERVAL.0);
        out.push(rasterize_svg(&snapshot_svg(page, widget)?, scale)?);
    }
    Ok(out)
}

fn to_px(v: f32) -> AnimapperResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(AnimapperError::render("svg has invalid width/height"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(AnimapperError::render(format!(
            "raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px)
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/render.rs"]
mod tests;
