use std::sync::Arc;

use crate::blur;
use crate::pixel::buffer::{Channels, PixelBuffer};

/// Blurred copy of a shared image, recomputed only when the image or radius changes.
///
/// Change detection is by identity: passing a different `Arc` re-blurs, passing the same `Arc`
/// returns the cached result. Mutating the pixels behind an `Arc` that has already been rendered
/// is not detected; call [`update`](Self::update) after doing so.
#[derive(Clone, Debug)]
pub struct CachedBlur {
    radius: u32,
    source: Option<Arc<PixelBuffer>>,
    blurred: PixelBuffer,
    needs_redraw: bool,
}

impl CachedBlur {
    /// Empty cache blurring with `radius`.
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            source: None,
            blurred: PixelBuffer::new(0, 0, Channels::Four),
            needs_redraw: true,
        }
    }

    /// Current radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Blur a copy of `source` unconditionally and remember `source`.
    pub fn update(&mut self, source: Arc<PixelBuffer>) -> &PixelBuffer {
        let mut copy = PixelBuffer::clone(&source);
        blur::blur_in_place(&mut copy, self.radius);
        tracing::trace!(
            width = copy.width(),
            height = copy.height(),
            radius = self.radius,
            "blurred source"
        );
        self.blurred = copy;
        self.source = Some(source);
        self.needs_redraw = false;
        &self.blurred
    }

    /// Blurred `source`, reusing the last result when `source` is the same `Arc` and the radius is
    /// unchanged.
    pub fn render(&mut self, source: &Arc<PixelBuffer>) -> &PixelBuffer {
        let same_source = self
            .source
            .as_ref()
            .is_some_and(|prev| Arc::ptr_eq(prev, source));
        if self.needs_redraw || !same_source {
            return self.update(Arc::clone(source));
        }
        &self.blurred
    }

    /// Last blurred image, if any source has been rendered.
    pub fn render_cached(&self) -> Option<&PixelBuffer> {
        self.source.as_ref().map(|_| &self.blurred)
    }

    /// Change the radius; the next [`render`](Self::render) re-blurs.
    pub fn set_radius(&mut self, radius: u32) {
        if self.radius != radius {
            self.radius = radius;
            self.needs_redraw = true;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cached_blur.rs"]
mod tests;
