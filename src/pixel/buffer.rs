use crate::foundation::core::Rgba8;
use crate::foundation::error::{PenumbraError, PenumbraResult};
use crate::foundation::math::mul_div255_u8;

/// Channel layout of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    /// One 8-bit coverage/alpha sample per pixel.
    One,
    /// Four interleaved 8-bit samples per pixel, premultiplied RGBA.
    Four,
}

impl Channels {
    /// Bytes per pixel.
    pub const fn count(self) -> usize {
        match self {
            Self::One => 1,
            Self::Four => 4,
        }
    }
}

/// Owned 2D grid of 8-bit pixels with an explicit row stride.
///
/// Rows start every `stride` bytes; bytes past `width * channels` in a row are padding and are
/// never read by the blur or compositing code.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    stride: usize,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Zero-filled buffer with a tight stride.
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        let stride = width as usize * channels.count();
        Self {
            width,
            height,
            channels,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    /// Zero-filled single-channel mask.
    pub fn single_channel(width: u32, height: u32) -> Self {
        Self::new(width, height, Channels::One)
    }

    /// Zero-filled (transparent) premultiplied RGBA buffer.
    pub fn rgba(width: u32, height: u32) -> Self {
        Self::new(width, height, Channels::Four)
    }

    /// Zero-filled buffer with padded rows.
    pub fn with_stride(
        width: u32,
        height: u32,
        channels: Channels,
        stride: usize,
    ) -> PenumbraResult<Self> {
        let data = vec![0; stride * height as usize];
        Self::from_raw(width, height, channels, stride, data)
    }

    /// Wrap existing bytes, validating stride and length.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: Channels,
        stride: usize,
        data: Vec<u8>,
    ) -> PenumbraResult<Self> {
        let row_bytes = width as usize * channels.count();
        if stride < row_bytes {
            return Err(PenumbraError::validation(format!(
                "stride {stride} is smaller than a {width}px row ({row_bytes} bytes)"
            )));
        }
        if data.len() != stride * height as usize {
            return Err(PenumbraError::validation(format!(
                "pixel data has {} bytes, expected {}",
                data.len(),
                stride * height as usize
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `true` when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw bytes including row padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes including row padding.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn row_bytes(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    /// Pixel bytes of row `y`, without padding.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Pixel bytes of row `y`, without padding.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let len = self.row_bytes();
        &mut self.data[start..start + len]
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        y as usize * self.stride + x as usize * self.channels.count()
    }

    /// One sample.
    pub fn get(&self, x: u32, y: u32, channel: usize) -> u8 {
        debug_assert!(channel < self.channels.count());
        self.data[self.offset(x, y) + channel]
    }

    /// Overwrite one sample.
    pub fn set(&mut self, x: u32, y: u32, channel: usize, value: u8) {
        debug_assert!(channel < self.channels.count());
        let i = self.offset(x, y) + channel;
        self.data[i] = value;
    }

    /// All samples of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = self.offset(x, y);
        &self.data[i..i + self.channels.count()]
    }

    /// Overwrite all samples of one pixel.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: &[u8]) {
        let i = self.offset(x, y);
        let n = self.channels.count();
        self.data[i..i + n].copy_from_slice(&px[..n]);
    }

    /// Set every pixel to `px` (padding untouched).
    pub fn fill(&mut self, px: &[u8]) {
        let n = self.channels.count();
        for y in 0..self.height {
            for dst in self.row_mut(y).chunks_exact_mut(n) {
                dst.copy_from_slice(&px[..n]);
            }
        }
    }

    /// Straight color of an RGBA pixel, or a grey level for a mask.
    pub fn color_at(&self, x: u32, y: u32) -> Rgba8 {
        match self.channels {
            Channels::One => {
                let v = self.get(x, y, 0);
                Rgba8::opaque(v, v, v)
            }
            Channels::Four => {
                let p = self.pixel(x, y);
                Rgba8::from_premultiplied([p[0], p[1], p[2], p[3]])
            }
        }
    }

    /// New tightly packed buffer with rows and columns swapped.
    pub fn transpose(&self) -> Self {
        let mut out = Self::new(self.height, self.width, self.channels);
        self.transpose_into(&mut out);
        out
    }

    /// Write the transpose of `self` into `dst`, which must be `height x width`.
    pub fn transpose_into(&self, dst: &mut Self) {
        debug_assert_eq!((dst.width, dst.height), (self.height, self.width));
        debug_assert_eq!(dst.channels, self.channels);
        let n = self.channels.count();
        for y in 0..self.height {
            let row = self.row(y);
            for (x, px) in row.chunks_exact(n).enumerate() {
                let i = x * dst.stride + y as usize * n;
                dst.data[i..i + n].copy_from_slice(px);
            }
        }
    }

    /// Export as an `image` crate buffer (masks as `Luma8`, RGBA unpremultiplied).
    pub fn to_dynamic_image(&self) -> image::DynamicImage {
        match self.channels {
            Channels::One => {
                let mut out = image::GrayImage::new(self.width, self.height);
                for (y, row) in out.rows_mut().enumerate() {
                    for (dst, &v) in row.zip(self.row(y as u32)) {
                        dst.0 = [v];
                    }
                }
                image::DynamicImage::ImageLuma8(out)
            }
            Channels::Four => {
                let mut out = image::RgbaImage::new(self.width, self.height);
                for (y, row) in out.rows_mut().enumerate() {
                    for (dst, px) in row.zip(self.row(y as u32).chunks_exact(4)) {
                        let c = Rgba8::from_premultiplied([px[0], px[1], px[2], px[3]]);
                        dst.0 = [c.r, c.g, c.b, c.a];
                    }
                }
                image::DynamicImage::ImageRgba8(out)
            }
        }
    }

    /// Import a straight-alpha `image` buffer as premultiplied RGBA.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let mut out = Self::rgba(img.width(), img.height());
        for (dst, src) in out.data.chunks_exact_mut(4).zip(img.pixels()) {
            let [r, g, b, a] = src.0;
            let a16 = u16::from(a);
            dst.copy_from_slice(&[
                mul_div255_u8(u16::from(r), a16),
                mul_div255_u8(u16::from(g), a16),
                mul_div255_u8(u16::from(b), a16),
                a,
            ]);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/buffer.rs"]
mod tests;
