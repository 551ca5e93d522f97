use kurbo::Stroke;
use smallvec::SmallVec;

use crate::canvas::RenderTarget;
use crate::canvas::composite::{alpha_over, fill_alpha_rect, multiply_alpha, tint_mask_over};
use crate::foundation::core::{Affine, BezPath, IntRect, Point, Rgba8, Vec2};
use crate::foundation::math::{SCALE_EPSILON, approx_eq};
use crate::pixel::buffer::PixelBuffer;
use crate::raster::fill::{FillRule, fill_alpha_mask};
use crate::raster::path::{is_degenerate, stroke_outline};
use crate::shadow::fingerprint::PathFingerprint;
use crate::shadow::rendered::{DEFAULT_INNER_PAD_PX, RenderedShadow};
use crate::shadow::spec::{ShadowKind, ShadowSpec};

/// Flattening tolerance for stroke outlines, in device pixels.
const STROKE_TOLERANCE_PX: f64 = 0.1;

/// Tuning knobs for [`CachedShadows`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheOpts {
    /// Largest size or outline difference under which two paths count as the same geometry.
    pub path_tolerance: f64,
    /// Nearest-point probes used when comparing paths.
    pub probe_count: usize,
    /// Padding around inner-shadow canvases, in device pixels.
    pub inner_pad_px: i32,
}

impl Default for CacheOpts {
    fn default() -> Self {
        Self {
            path_tolerance: 1e-5,
            probe_count: 2,
            inner_pad_px: DEFAULT_INNER_PAD_PX,
        }
    }
}

/// Counters describing how much work the cache has done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Times every shadow mask was re-rasterized and re-blurred.
    pub recalculations: u64,
    /// Times the composite image was rebuilt from existing masks.
    pub recomposites: u64,
    /// Times the composite was drawn onto a target.
    pub draws: u64,
}

/// A list of shadows for one path, cached across frames.
///
/// Masks are only rebuilt when the geometry, radius, spread, device scale or stroke change; a
/// color, opacity or offset change only rebuilds the composite; moving the path only moves where
/// the composite is drawn.
#[derive(Clone, Debug)]
pub struct CachedShadows {
    kind: ShadowKind,
    opts: CacheOpts,
    shadows: SmallVec<[RenderedShadow; 2]>,
    fingerprint: Option<PathFingerprint>,
    origin: Point,
    stroke: Option<Stroke>,
    scale: f64,
    composite: Option<PixelBuffer>,
    composite_position: (i32, i32),
    needs_recalculate: bool,
    needs_recomposite: bool,
    stats: CacheStats,
}

impl Default for CachedShadows {
    fn default() -> Self {
        Self::with_kind(ShadowKind::Drop, std::iter::empty(), CacheOpts::default())
    }
}

impl CachedShadows {
    /// Cache for `specs`, each keeping the kind it was created with.
    pub fn new(specs: impl IntoIterator<Item = ShadowSpec>) -> Self {
        let mut out = Self::default();
        out.push_all(specs);
        out
    }

    /// Drop-shadow cache; every spec is treated as a drop shadow.
    pub fn drop_shadow(specs: impl IntoIterator<Item = ShadowSpec>) -> Self {
        Self::with_kind(ShadowKind::Drop, specs, CacheOpts::default())
    }

    /// Inner-shadow cache; every spec is treated as an inner shadow.
    pub fn inner_shadow(specs: impl IntoIterator<Item = ShadowSpec>) -> Self {
        Self::with_kind(ShadowKind::Inner, specs, CacheOpts::default())
    }

    /// Cache of one kind with explicit options.
    pub fn with_kind(
        kind: ShadowKind,
        specs: impl IntoIterator<Item = ShadowSpec>,
        opts: CacheOpts,
    ) -> Self {
        let mut out = Self {
            kind,
            opts,
            shadows: SmallVec::new(),
            fingerprint: None,
            origin: Point::ZERO,
            stroke: None,
            scale: 1.0,
            composite: None,
            composite_position: (0, 0),
            needs_recalculate: true,
            needs_recomposite: true,
            stats: CacheStats::default(),
        };
        out.push_all(specs.into_iter().map(|s| s.into_kind(kind)));
        out
    }

    fn push_all(&mut self, specs: impl IntoIterator<Item = ShadowSpec>) {
        for spec in specs {
            self.push(spec);
        }
    }

    /// Append a shadow; masks are rebuilt on the next render.
    pub fn push(&mut self, spec: ShadowSpec) {
        self.shadows
            .push(RenderedShadow::new(spec).with_inner_pad(self.opts.inner_pad_px));
        self.needs_recalculate = true;
    }

    /// Number of shadows.
    pub fn len(&self) -> usize {
        self.shadows.len()
    }

    /// `true` when there are no shadows.
    pub fn is_empty(&self) -> bool {
        self.shadows.is_empty()
    }

    /// Kind used for shadows added through setters on an empty cache.
    pub fn kind(&self) -> ShadowKind {
        self.kind
    }

    /// Shadow at `index`.
    pub fn shadow(&self, index: usize) -> Option<&RenderedShadow> {
        self.shadows.get(index)
    }

    /// `true` when masks will be rebuilt on the next render.
    pub fn needs_recalculate(&self) -> bool {
        self.needs_recalculate
    }

    /// `true` when the composite will be rebuilt on the next render.
    pub fn needs_recomposite(&self) -> bool {
        self.needs_recomposite
    }

    /// Fingerprint of the last rendered path.
    pub fn fingerprint(&self) -> Option<&PathFingerprint> {
        self.fingerprint.as_ref()
    }

    /// Last composite image, premultiplied RGBA in device pixels.
    pub fn composite(&self) -> Option<&PixelBuffer> {
        self.composite.as_ref()
    }

    /// Position of the composite relative to the path origin, in device pixels.
    pub fn composite_position(&self) -> (i32, i32) {
        self.composite_position
    }

    /// Device scale of the last render.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Work counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn shadow_for_update(&mut self, index: usize) -> Option<&mut RenderedShadow> {
        if index == 0 && self.shadows.is_empty() {
            self.push(ShadowSpec::of_kind(self.kind));
        }
        self.shadows.get_mut(index)
    }

    /// Set the blur radius of shadow `index`.
    pub fn set_radius(&mut self, index: usize, radius: u32) -> &mut Self {
        if let Some(shadow) = self.shadow_for_update(index)
            && shadow.update_radius(radius)
        {
            self.needs_recalculate = true;
        }
        self
    }

    /// Set the spread of shadow `index`.
    pub fn set_spread(&mut self, index: usize, spread: i32) -> &mut Self {
        if let Some(shadow) = self.shadow_for_update(index)
            && shadow.update_spread(spread)
        {
            self.needs_recalculate = true;
        }
        self
    }

    /// Set the offset of shadow `index`.
    pub fn set_offset(&mut self, index: usize, x: i32, y: i32) -> &mut Self {
        if let Some(shadow) = self.shadow_for_update(index)
            && shadow.update_offset(x, y)
        {
            self.needs_recomposite = true;
        }
        self
    }

    /// Set the color (including alpha) of shadow `index`.
    pub fn set_color(&mut self, index: usize, color: Rgba8) -> &mut Self {
        if let Some(shadow) = self.shadow_for_update(index)
            && shadow.update_color(color)
        {
            self.needs_recomposite = true;
        }
        self
    }

    /// Set the opacity (color alpha) of shadow `index`.
    pub fn set_opacity(&mut self, index: usize, opacity: f32) -> &mut Self {
        if let Some(shadow) = self.shadow_for_update(index)
            && shadow.update_opacity(opacity)
        {
            self.needs_recomposite = true;
        }
        self
    }

    /// Draw the shadows of `path` onto `target`.
    ///
    /// With `low_quality` the shadows are rendered at scale 1 and stretched to the target.
    pub fn render<T: RenderTarget + ?Sized>(
        &mut self,
        target: &mut T,
        path: &BezPath,
        low_quality: bool,
    ) {
        if self.shadows.is_empty() || is_degenerate(path) {
            return;
        }
        self.update_scale(target, low_quality);
        if self.stroke.take().is_some() {
            self.needs_recalculate = true;
        }
        self.update_path(path);
        self.render_internal(target);
    }

    /// Draw the shadows of `path` stroked with `style` onto `target`.
    pub fn render_stroked<T: RenderTarget + ?Sized>(
        &mut self,
        target: &mut T,
        path: &BezPath,
        style: &Stroke,
        low_quality: bool,
    ) {
        if self.shadows.is_empty() {
            return;
        }
        self.update_scale(target, low_quality);
        if !self.stroke.as_ref().is_some_and(|prev| same_stroke(prev, style)) {
            tracing::debug!("stroke style changed");
            self.stroke = Some(style.clone());
            self.needs_recalculate = true;
        }
        let outline = stroke_outline(path, style, STROKE_TOLERANCE_PX / self.scale);
        if is_degenerate(&outline) {
            return;
        }
        self.update_path(&outline);
        self.render_internal(target);
    }

    fn update_scale<T: RenderTarget + ?Sized>(&mut self, target: &T, low_quality: bool) {
        let mut scale = if low_quality {
            1.0
        } else {
            target.physical_pixel_scale()
        };
        if !scale.is_finite() || scale <= 0.0 {
            tracing::warn!(scale, "unusable device scale, rendering at 1");
            scale = 1.0;
        }
        if !approx_eq(self.scale, scale, SCALE_EPSILON) {
            tracing::debug!(from = self.scale, to = scale, "device scale changed");
            self.scale = scale;
            self.needs_recalculate = true;
        }
    }

    fn update_path(&mut self, path: &BezPath) {
        let next = PathFingerprint::new(path);
        let same_geometry = self.fingerprint.as_ref().is_some_and(|prev| {
            prev.approx_eq(&next, self.opts.path_tolerance, self.opts.probe_count)
        });
        self.origin = next.origin();
        if !same_geometry {
            tracing::trace!("path geometry changed");
            self.needs_recalculate = true;
            self.fingerprint = Some(next);
        }
    }

    fn render_internal<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        if self.needs_recalculate {
            self.recalculate();
        }
        if self.needs_recomposite {
            self.recomposite();
        }
        self.draw(target);
    }

    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(shadows = self.shadows.len(), scale = self.scale)
    )]
    fn recalculate(&mut self) {
        let Some(fingerprint) = self.fingerprint.as_ref() else {
            return;
        };
        for shadow in &mut self.shadows {
            shadow.render(fingerprint.path(), self.scale);
        }
        self.stats.recalculations += 1;
        self.needs_recalculate = false;
        self.needs_recomposite = true;
    }

    #[tracing::instrument(level = "debug", skip(self), fields(shadows = self.shadows.len()))]
    fn recomposite(&mut self) {
        self.needs_recomposite = false;
        self.stats.recomposites += 1;

        let s = self.scale;
        let area = self
            .shadows
            .iter()
            .filter(|shadow| shadow.mask().is_some())
            .map(|shadow| match shadow.spec().kind() {
                ShadowKind::Drop => shadow.placement(s),
                ShadowKind::Inner => shadow.path_bounds_at(s),
            })
            .fold(IntRect::default(), IntRect::union);
        if area.is_empty() {
            tracing::trace!("no visible shadows");
            self.composite = None;
            return;
        }

        let (ax, ay) = area.origin();
        let (w, h) = (area.width() as u32, area.height() as u32);
        let mut image = PixelBuffer::rgba(w, h);
        let mut clip: Option<PixelBuffer> = None;

        for shadow in &self.shadows {
            let Some(mask) = shadow.mask() else {
                continue;
            };
            let color = shadow.spec().color;
            let placed = shadow.placement(s).translated(-ax, -ay);
            match shadow.spec().kind() {
                ShadowKind::Drop => tint_mask_over(&mut image, mask, placed, color),
                ShadowKind::Inner => {
                    if clip.is_none() {
                        clip = self.path_clip(area);
                    }
                    let Some(clip) = clip.as_ref() else {
                        continue;
                    };
                    let path_rect = shadow.path_bounds_at(s).translated(-ax, -ay);
                    let mut layer = PixelBuffer::single_channel(w, h);
                    for strip in border_strips(path_rect, placed) {
                        fill_alpha_rect(&mut layer, strip, 255);
                    }
                    alpha_over(&mut layer, mask, placed);
                    if let Err(err) = multiply_alpha(&mut layer, clip) {
                        tracing::warn!(%err, "skipping inner shadow");
                        continue;
                    }
                    let full = IntRect::new(0, 0, w as i32, h as i32);
                    tint_mask_over(&mut image, &layer, full, color);
                }
            }
        }

        self.composite = Some(image);
        self.composite_position = (ax, ay);
    }

    /// Coverage of the scaled path over `area`, used to keep inner shadows inside the path.
    fn path_clip(&self, area: IntRect) -> Option<PixelBuffer> {
        let fingerprint = self.fingerprint.as_ref()?;
        let transform = Affine::translate((-f64::from(area.x0), -f64::from(area.y0)))
            * Affine::scale(self.scale);
        match fill_alpha_mask(
            fingerprint.path(),
            FillRule::NonZero,
            transform,
            area.width() as u32,
            area.height() as u32,
        ) {
            Ok(mask) => Some(mask),
            Err(err) => {
                tracing::warn!(%err, "failed to rasterize inner shadow clip");
                None
            }
        }
    }

    fn draw<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        let Some(image) = self.composite.as_ref() else {
            return;
        };
        let (cx, cy) = self.composite_position;
        let position =
            Vec2::new(f64::from(cx), f64::from(cy)) + self.origin.to_vec2() * self.scale;
        target.draw_image_transformed(
            image,
            Affine::scale(1.0 / self.scale) * Affine::translate(position),
        );
        self.stats.draws += 1;
    }
}

fn same_stroke(a: &Stroke, b: &Stroke) -> bool {
    a.width == b.width
        && a.join == b.join
        && a.miter_limit == b.miter_limit
        && a.start_cap == b.start_cap
        && a.end_cap == b.end_cap
        && a.dash_pattern == b.dash_pattern
        && a.dash_offset == b.dash_offset
}

/// Parts of `path` not covered by the shadow `mask` rect, which an offset inner shadow leaves
/// fully shadowed: top, left, bottom and right.
fn border_strips(path: IntRect, mask: IntRect) -> [IntRect; 4] {
    [
        IntRect::new(path.x0, path.y0, path.x1, mask.y0),
        IntRect::new(path.x0, path.y0, mask.x0, path.y1),
        IntRect::new(path.x0, mask.y1, path.x1, path.y1),
        IntRect::new(mask.x1, path.y0, path.x1, path.y1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/shadow/cache.rs"]
mod tests;
