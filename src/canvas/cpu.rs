use std::path::Path;

use crate::canvas::RenderTarget;
use crate::canvas::composite::{blit_over, draw_transformed_over, over_in_place};
use crate::foundation::core::{Affine, BezPath, Rgba8};
use crate::foundation::error::{PenumbraError, PenumbraResult};
use crate::pixel::buffer::PixelBuffer;
use crate::raster::fill::{FillRule, fill_rgba};

/// In-memory premultiplied RGBA canvas with a device pixel scale.
#[derive(Clone, Debug)]
pub struct CpuCanvas {
    buffer: PixelBuffer,
    scale: f64,
}

impl CpuCanvas {
    /// Transparent canvas covering `logical_width x logical_height` units at `scale` device
    /// pixels per unit.
    pub fn new(logical_width: u32, logical_height: u32, scale: f64) -> PenumbraResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PenumbraError::validation(format!(
                "canvas scale must be finite and > 0, got {scale}"
            )));
        }
        let width = (f64::from(logical_width) * scale).ceil() as u32;
        let height = (f64::from(logical_height) * scale).ceil() as u32;
        Ok(Self {
            buffer: PixelBuffer::rgba(width, height),
            scale,
        })
    }

    /// Device pixels per logical unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Width in device pixels.
    pub fn device_width(&self) -> u32 {
        self.buffer.width()
    }

    /// Height in device pixels.
    pub fn device_height(&self) -> u32 {
        self.buffer.height()
    }

    /// Overwrite every pixel with `color`.
    pub fn fill_all(&mut self, color: Rgba8) {
        self.buffer.fill(&color.premultiplied());
    }

    /// Straight color of the device pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        self.buffer.color_at(x, y)
    }

    /// Premultiplied backing pixels.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Consume the canvas and return its pixels.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// Write the canvas out as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> PenumbraResult<()> {
        let path = path.as_ref();
        self.buffer
            .to_dynamic_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| {
                PenumbraError::Other(anyhow::Error::new(e).context(format!("write {}", path.display())))
            })
    }
}

/// Rounded offset when `device` is a pure translation.
fn integer_translation(device: Affine) -> Option<(i32, i32)> {
    let [a, b, c, d, e, f] = device.as_coeffs();
    let eps = 1e-9;
    if (a - 1.0).abs() < eps && (d - 1.0).abs() < eps && b.abs() < eps && c.abs() < eps {
        Some((e.round() as i32, f.round() as i32))
    } else {
        None
    }
}

impl RenderTarget for CpuCanvas {
    fn physical_pixel_scale(&self) -> f64 {
        self.scale
    }

    fn draw_image_transformed(&mut self, image: &PixelBuffer, transform: Affine) {
        let device = Affine::scale(self.scale) * transform;
        match integer_translation(device) {
            Some((dx, dy)) => blit_over(&mut self.buffer, image, dx, dy),
            None => draw_transformed_over(&mut self.buffer, image, device),
        }
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        // vello_cpu renders into a fresh buffer, so fill a temp layer and premul-over it.
        let layer = match fill_rgba(
            path,
            FillRule::NonZero,
            Affine::scale(self.scale),
            color,
            self.buffer.width(),
            self.buffer.height(),
        ) {
            Ok(layer) => layer,
            Err(err) => {
                tracing::warn!(%err, "skipping path fill");
                return;
            }
        };
        if let Err(err) = over_in_place(self.buffer.data_mut(), layer.data()) {
            tracing::warn!(%err, "skipping path fill");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/cpu.rs"]
mod tests;
