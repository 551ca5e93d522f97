use crate::canvas::RenderTarget;
use crate::foundation::core::{BezPath, Rgba8};
use crate::shadow::cache::CachedShadows;

/// A filled path with its own drop and inner shadow caches.
#[derive(Clone, Debug)]
pub struct PathWithShadows {
    /// Geometry, in logical coordinates.
    pub path: BezPath,
    /// Fill color of the path.
    pub color: Rgba8,
    /// Shadows drawn beneath the path.
    pub drop_shadow: CachedShadows,
    /// Shadows drawn over the path, clipped to it.
    pub inner_shadow: CachedShadows,
}

impl Default for PathWithShadows {
    fn default() -> Self {
        Self::new(BezPath::new())
    }
}

impl PathWithShadows {
    /// Black `path` without shadows; configure them through the two caches' setters.
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            color: Rgba8::BLACK,
            drop_shadow: CachedShadows::drop_shadow([]),
            inner_shadow: CachedShadows::inner_shadow([]),
        }
    }

    /// Draw drop shadows, the path, then inner shadows.
    pub fn render<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        self.drop_shadow.render(target, &self.path, false);
        target.fill_path(&self.path, self.color);
        self.inner_shadow.render(target, &self.path, false);
    }
}
