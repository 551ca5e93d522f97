use rayon::prelude::*;

use crate::blur::BlurStrategy;
use crate::blur::prefix_sum::{LineScratch, PrefixSum};
use crate::blur::tables::StackDivisor;
use crate::pixel::buffer::PixelBuffer;

/// Prefix-sum stack blur with rows spread over the rayon pool.
///
/// The vertical pass runs as a horizontal pass over the transposed buffer so that every line is
/// contiguous. Buffers smaller than [`min_parallel_pixels`](Self::min_parallel_pixels) fall back
/// to [`PrefixSum`]; both produce identical output.
#[derive(Clone, Copy, Debug)]
pub struct RowParallel {
    /// Pixel count below which the single-threaded path is used.
    pub min_parallel_pixels: usize,
}

impl RowParallel {
    /// Default fallback threshold (a 64x64 buffer).
    pub const DEFAULT_MIN_PARALLEL_PIXELS: usize = 64 * 64;
}

impl Default for RowParallel {
    fn default() -> Self {
        Self {
            min_parallel_pixels: Self::DEFAULT_MIN_PARALLEL_PIXELS,
        }
    }
}

impl BlurStrategy for RowParallel {
    fn name(&self) -> &'static str {
        "row_parallel"
    }

    fn blur(&self, buffer: &mut PixelBuffer, radius: u32) {
        if radius == 0 || buffer.is_empty() {
            return;
        }
        let pixels = buffer.width() as usize * buffer.height() as usize;
        if pixels < self.min_parallel_pixels {
            PrefixSum.blur(buffer, radius);
            return;
        }

        rows_parallel(buffer, radius);
        let mut transposed = buffer.transpose();
        rows_parallel(&mut transposed, radius);
        transposed.transpose_into(buffer);
    }
}

fn rows_parallel(buffer: &mut PixelBuffer, radius: u32) {
    let channels = buffer.channels().count();
    let width = buffer.width() as usize;
    let stride = buffer.stride();
    let divisor = StackDivisor::for_radius(radius);
    buffer
        .data_mut()
        .par_chunks_mut(stride)
        .for_each_init(LineScratch::new, |scratch, row| {
            for c in 0..channels {
                scratch.blur_line(row, c, channels, width, radius as usize, divisor);
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/blur/parallel.rs"]
mod tests;
