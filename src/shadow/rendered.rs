use crate::blur;
use crate::foundation::core::{Affine, BezPath, IntRect, Rect, Rgba8};
use crate::foundation::math::{SCALE_EPSILON, approx_eq, is_integral, scale_round};
use crate::pixel::buffer::PixelBuffer;
use crate::raster::fill::{FillRule, fill_alpha_mask};
use crate::raster::path::{bounds, scale_to_fit, with_enclosing_rect};
use crate::shadow::spec::{ShadowKind, ShadowSpec};

/// Largest blur radius in device pixels; matches the rasterizer's size limit.
const MAX_DEVICE_RADIUS: i32 = u16::MAX as i32;

/// Extra pixels around the path in an inner shadow's canvas.
pub const DEFAULT_INNER_PAD_PX: i32 = 1;

/// One shadow spec together with its last rendered alpha mask.
///
/// All `scaled_*` values are device pixels relative to the origin of the path the mask was
/// rendered for.
#[derive(Clone, Debug)]
pub struct RenderedShadow {
    spec: ShadowSpec,
    inner_pad_px: i32,
    mask: Option<PixelBuffer>,
    scale: f64,
    scaled_radius: i32,
    scaled_spread: i32,
    scaled_offset: (i32, i32),
    path_bounds: Rect,
    scaled_path_bounds: IntRect,
    canvas: IntRect,
}

impl RenderedShadow {
    /// Wrap `spec`; nothing is rendered until [`render`](Self::render).
    pub fn new(spec: ShadowSpec) -> Self {
        let scaled_offset = spec.offset;
        Self {
            spec,
            inner_pad_px: DEFAULT_INNER_PAD_PX,
            mask: None,
            scale: 1.0,
            scaled_radius: 0,
            scaled_spread: 0,
            scaled_offset,
            path_bounds: Rect::ZERO,
            scaled_path_bounds: IntRect::default(),
            canvas: IntRect::default(),
        }
    }

    /// Use `px` pixels of padding around inner-shadow canvases.
    pub fn with_inner_pad(mut self, px: i32) -> Self {
        self.inner_pad_px = px.max(0);
        self
    }

    /// The spec being rendered.
    pub fn spec(&self) -> &ShadowSpec {
        &self.spec
    }

    /// Last rendered mask, `None` when the shadow is invisible.
    pub fn mask(&self) -> Option<&PixelBuffer> {
        self.mask.as_ref()
    }

    /// Scale of the last render (1 for low-quality specs).
    pub fn render_scale(&self) -> f64 {
        self.scale
    }

    /// Radius in device pixels.
    pub fn scaled_radius(&self) -> i32 {
        self.scaled_radius
    }

    /// Spread in device pixels.
    pub fn scaled_spread(&self) -> i32 {
        self.scaled_spread
    }

    /// Offset in device pixels.
    pub fn scaled_offset(&self) -> (i32, i32) {
        self.scaled_offset
    }

    /// Where the mask lands, offset included.
    pub fn scaled_bounds(&self) -> IntRect {
        self.canvas
            .translated(self.scaled_offset.0, self.scaled_offset.1)
    }

    /// Integer container of the scaled path bounds.
    pub fn scaled_path_bounds(&self) -> IntRect {
        self.scaled_path_bounds
    }

    /// Rasterize and blur the mask for an origin-stripped `path` at device `scale`.
    #[tracing::instrument(
        level = "trace",
        skip(self, path),
        fields(kind = ?self.spec.kind(), radius = self.spec.radius)
    )]
    pub fn render(&mut self, path: &BezPath, scale: f64) -> Option<&PixelBuffer> {
        let s = if self.spec.low_quality { 1.0 } else { scale };
        let radius = i32::try_from(self.spec.radius).unwrap_or(i32::MAX);
        self.scale = s;
        self.scaled_radius = scale_round(radius, s);
        self.scaled_spread = scale_round(self.spec.spread, s);
        self.scaled_offset = self.scale_offset(self.spec.offset);
        self.path_bounds = bounds(path);
        self.scaled_path_bounds = IntRect::containing(self.path_bounds.scale_from_origin(s));

        let pad = match self.spec.kind() {
            ShadowKind::Drop => self.scaled_radius.saturating_add(self.scaled_spread),
            ShadowKind::Inner => self.inner_pad_px,
        };
        let mut canvas = self.scaled_path_bounds.expanded(pad);
        if !is_integral(s) {
            canvas = canvas.expanded(1);
        }
        self.canvas = canvas;

        self.mask = self.rasterize(path);
        self.mask.as_ref()
    }

    fn rasterize(&self, path: &BezPath) -> Option<PixelBuffer> {
        if self.scaled_radius <= 0 {
            tracing::trace!("zero radius, no mask");
            return None;
        }
        if self.scaled_radius > MAX_DEVICE_RADIUS {
            tracing::warn!(radius = self.scaled_radius, "blur radius too large, no mask");
            return None;
        }
        if self.canvas.is_empty() {
            tracing::debug!(canvas = ?self.canvas, "empty shadow canvas, no mask");
            return None;
        }

        let mut shape = path.clone();
        if self.spec.spread != 0 {
            let grow = match self.spec.kind() {
                ShadowKind::Drop => f64::from(self.spec.spread),
                ShadowKind::Inner => -f64::from(self.spec.spread),
            };
            let target = self.path_bounds.inflate(grow, grow);
            if target.width() <= 0.0 || target.height() <= 0.0 {
                tracing::warn!(
                    spread = self.spec.spread,
                    width = self.path_bounds.width(),
                    height = self.path_bounds.height(),
                    "spread collapses the path, no mask"
                );
                return None;
            }
            shape = scale_to_fit(&shape, target);
        }

        let s = self.scale;
        let fill = match self.spec.kind() {
            ShadowKind::Drop => FillRule::NonZero,
            ShadowKind::Inner => {
                let enclosing = self
                    .canvas
                    .to_rect()
                    .scale_from_origin(1.0 / s)
                    .inflate(1.0, 1.0)
                    .union(bounds(&shape).inflate(1.0, 1.0));
                shape = with_enclosing_rect(&shape, enclosing);
                FillRule::EvenOdd
            }
        };

        let transform = Affine::translate((-f64::from(self.canvas.x0), -f64::from(self.canvas.y0)))
            * Affine::scale(s);
        let mut mask = match fill_alpha_mask(
            &shape,
            fill,
            transform,
            self.canvas.width() as u32,
            self.canvas.height() as u32,
        ) {
            Ok(mask) => mask,
            Err(err) => {
                tracing::warn!(%err, "failed to rasterize shadow shape");
                return None;
            }
        };
        blur::single_channel(&mut mask, self.scaled_radius as u32);
        Some(mask)
    }

    fn scale_offset(&self, offset: (i32, i32)) -> (i32, i32) {
        (
            scale_round(offset.0, self.scale),
            scale_round(offset.1, self.scale),
        )
    }

    /// Placement at `composite_scale`, stretched when this shadow rendered at another scale.
    pub(crate) fn placement(&self, composite_scale: f64) -> IntRect {
        let placed = self.scaled_bounds();
        if approx_eq(self.scale, composite_scale, SCALE_EPSILON) {
            return placed;
        }
        IntRect::containing(
            placed
                .to_rect()
                .scale_from_origin(composite_scale / self.scale),
        )
    }

    /// Path bounds at `composite_scale`.
    pub(crate) fn path_bounds_at(&self, composite_scale: f64) -> IntRect {
        IntRect::containing(self.path_bounds.scale_from_origin(composite_scale))
    }

    pub(crate) fn update_radius(&mut self, radius: u32) -> bool {
        if self.spec.radius == radius {
            return false;
        }
        self.spec.radius = radius;
        true
    }

    pub(crate) fn update_spread(&mut self, spread: i32) -> bool {
        if self.spec.spread == spread {
            return false;
        }
        self.spec.spread = spread;
        true
    }

    pub(crate) fn update_offset(&mut self, x: i32, y: i32) -> bool {
        if self.spec.offset == (x, y) {
            return false;
        }
        self.spec.offset = (x, y);
        self.scaled_offset = self.scale_offset((x, y));
        true
    }

    pub(crate) fn update_color(&mut self, color: Rgba8) -> bool {
        if self.spec.color == color {
            return false;
        }
        self.spec.color = color;
        true
    }

    pub(crate) fn update_opacity(&mut self, opacity: f32) -> bool {
        let color = self.spec.color.with_opacity(opacity);
        self.update_color(color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shadow/rendered.rs"]
mod tests;
