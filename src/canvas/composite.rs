use crate::foundation::core::{Affine, IntRect, Point, Rect, Rgba8};
use crate::foundation::error::{PenumbraError, PenumbraResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};
use crate::pixel::buffer::{Channels, PixelBuffer};

pub(crate) type PremulRgba8 = [u8; 4];

pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> PenumbraResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PenumbraError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn bounds_of(buffer: &PixelBuffer) -> IntRect {
    IntRect::new(0, 0, buffer.width() as i32, buffer.height() as i32)
}

/// Sample `mask` stretched over `rect` (nearest neighbour) at pixel `(x, y)` inside `rect`.
fn mask_sample(mask: &PixelBuffer, rect: IntRect, x: i32, y: i32) -> u8 {
    let (mw, mh) = (mask.width() as i64, mask.height() as i64);
    let sx = (i64::from(x - rect.x0) * mw / i64::from(rect.width())).clamp(0, mw - 1);
    let sy = (i64::from(y - rect.y0) * mh / i64::from(rect.height())).clamp(0, mh - 1);
    mask.get(sx as u32, sy as u32, 0)
}

/// Paint `color` through a coverage `mask` placed over `rect` of `dst`.
pub(crate) fn tint_mask_over(dst: &mut PixelBuffer, mask: &PixelBuffer, rect: IntRect, color: Rgba8) {
    debug_assert_eq!(dst.channels(), Channels::Four);
    let clip = rect.intersect(bounds_of(dst));
    if clip.is_empty() || mask.is_empty() || color.a == 0 {
        return;
    }
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            let m = mask_sample(mask, rect, x, y);
            if m == 0 {
                continue;
            }
            let a = mul_div255_u8(u16::from(m), u16::from(color.a));
            let a16 = u16::from(a);
            let src = [
                mul_div255_u8(u16::from(color.r), a16),
                mul_div255_u8(u16::from(color.g), a16),
                mul_div255_u8(u16::from(color.b), a16),
                a,
            ];
            let p = dst.pixel(x as u32, y as u32);
            let out = over([p[0], p[1], p[2], p[3]], src);
            dst.set_pixel(x as u32, y as u32, &out);
        }
    }
}

/// Set every pixel of `rect` (clipped) in a one-channel `layer` to `value`.
pub(crate) fn fill_alpha_rect(layer: &mut PixelBuffer, rect: IntRect, value: u8) {
    let clip = rect.intersect(bounds_of(layer));
    if clip.is_empty() {
        return;
    }
    for y in clip.y0..clip.y1 {
        layer.row_mut(y as u32)[clip.x0 as usize..clip.x1 as usize].fill(value);
    }
}

/// Source-over of a coverage `mask` placed over `rect` onto a one-channel `layer`.
pub(crate) fn alpha_over(layer: &mut PixelBuffer, mask: &PixelBuffer, rect: IntRect) {
    let clip = rect.intersect(bounds_of(layer));
    if clip.is_empty() || mask.is_empty() {
        return;
    }
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            let m = mask_sample(mask, rect, x, y);
            let l = layer.get(x as u32, y as u32, 0);
            let out = add_sat_u8(m, mul_div255_u8(u16::from(l), 255 - u16::from(m)));
            layer.set(x as u32, y as u32, 0, out);
        }
    }
}

/// Multiply a one-channel `layer` by a same-sized `clip` mask.
pub(crate) fn multiply_alpha(layer: &mut PixelBuffer, clip: &PixelBuffer) -> PenumbraResult<()> {
    if (layer.width(), layer.height()) != (clip.width(), clip.height()) {
        return Err(PenumbraError::validation(
            "multiply_alpha expects equally sized masks",
        ));
    }
    for y in 0..layer.height() {
        let src = clip.row(y);
        for (l, &c) in layer.row_mut(y).iter_mut().zip(src) {
            *l = mul_div255_u8(u16::from(*l), u16::from(c));
        }
    }
    Ok(())
}

/// Source-over `src` onto `dst` with its top-left corner at `(dx, dy)`.
pub(crate) fn blit_over(dst: &mut PixelBuffer, src: &PixelBuffer, dx: i32, dy: i32) {
    let placed = IntRect::from_origin_size(dx, dy, src.width() as i32, src.height() as i32);
    let clip = placed.intersect(bounds_of(dst));
    if clip.is_empty() {
        return;
    }
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            let s = src.pixel((x - dx) as u32, (y - dy) as u32);
            if s[3] == 0 {
                continue;
            }
            let d = dst.pixel(x as u32, y as u32);
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            dst.set_pixel(x as u32, y as u32, &out);
        }
    }
}

/// Source-over `src` onto `dst` through an arbitrary affine map from source to destination pixels.
///
/// Each destination pixel center is mapped back into the source and sampled nearest-neighbour.
pub(crate) fn draw_transformed_over(dst: &mut PixelBuffer, src: &PixelBuffer, device: Affine) {
    if src.is_empty() || device.determinant().abs() < 1e-12 {
        return;
    }
    let src_rect = Rect::new(0.0, 0.0, f64::from(src.width()), f64::from(src.height()));
    let clip = IntRect::containing(device.transform_rect_bbox(src_rect)).intersect(bounds_of(dst));
    if clip.is_empty() {
        return;
    }
    let inverse = device.inverse();
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            let p = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let (sx, sy) = (p.x.floor(), p.y.floor());
            if sx < 0.0 || sy < 0.0 || sx >= src_rect.x1 || sy >= src_rect.y1 {
                continue;
            }
            let s = src.pixel(sx as u32, sy as u32);
            if s[3] == 0 {
                continue;
            }
            let d = dst.pixel(x as u32, y as u32);
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            dst.set_pixel(x as u32, y as u32, &out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/composite.rs"]
mod tests;
