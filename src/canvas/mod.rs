//! Drawing surfaces shadows are rendered onto.

use crate::foundation::core::{Affine, BezPath, Rgba8};
use crate::pixel::buffer::PixelBuffer;

pub(crate) mod composite;
pub(crate) mod cpu;

pub use cpu::CpuCanvas;

/// A 2D drawing context working in logical coordinates.
///
/// Logical units map to device pixels through [`physical_pixel_scale`](Self::physical_pixel_scale);
/// shadows are rasterized at that scale and drawn back with a compensating transform.
pub trait RenderTarget {
    /// Device pixels per logical unit.
    fn physical_pixel_scale(&self) -> f64;

    /// Composite a premultiplied RGBA `image` (source-over), mapping image pixels to logical
    /// space through `transform`.
    fn draw_image_transformed(&mut self, image: &PixelBuffer, transform: Affine);

    /// Fill `path`, given in logical coordinates, with a solid color.
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);
}
