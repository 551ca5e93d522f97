use crate::foundation::core::{Affine, BezPath, Rgba8};
use crate::foundation::error::{PenumbraError, PenumbraResult};
use crate::pixel::buffer::{Channels, PixelBuffer};

/// Winding rule used when filling a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Non-zero winding.
    #[default]
    NonZero,
    /// Even-odd; a sub-path enclosing the shape inverts it.
    EvenOdd,
}

impl FillRule {
    fn to_cpu(self) -> vello_cpu::peniko::Fill {
        match self {
            Self::NonZero => vello_cpu::peniko::Fill::NonZero,
            Self::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
        }
    }
}

fn dims_u16(width: u32, height: u32) -> PenumbraResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PenumbraError::raster(format!("raster width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PenumbraError::raster(format!("raster height {height} exceeds u16")))?;
    if w == 0 || h == 0 {
        return Err(PenumbraError::raster("raster target has zero area"));
    }
    Ok((w, h))
}

fn render_path(
    path: &BezPath,
    fill: FillRule,
    transform: Affine,
    color: Rgba8,
    width: u32,
    height: u32,
) -> PenumbraResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(width, height)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_fill_rule(fill.to_cpu());
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&bezpath_to_cpu(path));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

/// Rasterize `path` under `transform` into a fresh one-channel coverage mask.
pub fn fill_alpha_mask(
    path: &BezPath,
    fill: FillRule,
    transform: Affine,
    width: u32,
    height: u32,
) -> PenumbraResult<PixelBuffer> {
    let pixmap = render_path(path, fill, transform, Rgba8::WHITE, width, height)?;
    let mut mask = PixelBuffer::new(width, height, Channels::One);
    for (dst, px) in mask
        .data_mut()
        .iter_mut()
        .zip(pixmap.data_as_u8_slice().chunks_exact(4))
    {
        *dst = px[3];
    }
    Ok(mask)
}

/// Rasterize `path` filled with `color` into a fresh premultiplied RGBA buffer.
pub fn fill_rgba(
    path: &BezPath,
    fill: FillRule,
    transform: Affine,
    color: Rgba8,
    width: u32,
    height: u32,
) -> PenumbraResult<PixelBuffer> {
    let pixmap = render_path(path, fill, transform, color, width, height)?;
    PixelBuffer::from_raw(
        width,
        height,
        Channels::Four,
        width as usize * 4,
        pixmap.data_as_u8_slice().to_vec(),
    )
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/fill.rs"]
mod tests;
