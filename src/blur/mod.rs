//! Stack blur over 8-bit pixel buffers.
//!
//! Every strategy computes the same triangular-kernel blur: a horizontal pass followed by a
//! vertical pass, edges clamped to the nearest pixel, results normalized by `(radius + 1)^2`.
//! [`strategy`] picks the implementation once per process.

use std::sync::OnceLock;

use crate::foundation::error::{PenumbraError, PenumbraResult};
use crate::pixel::buffer::{Channels, PixelBuffer};

pub(crate) mod direct;
pub(crate) mod kernel;
pub(crate) mod parallel;
pub(crate) mod prefix_sum;
pub(crate) mod tables;

pub use direct::Convolution;
pub use kernel::BlurKernel;
pub use parallel::RowParallel;
pub use prefix_sum::PrefixSum;

/// A stack-blur implementation.
///
/// Implementations blur every channel of the buffer in place and leave it unchanged for radius 0.
/// Outputs of different strategies agree to within one level per sample.
pub trait BlurStrategy: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Blur `buffer` in place.
    fn blur(&self, buffer: &mut PixelBuffer, radius: u32);
}

static PREFIX_SUM: PrefixSum = PrefixSum;
static ROW_PARALLEL: RowParallel = RowParallel {
    min_parallel_pixels: RowParallel::DEFAULT_MIN_PARALLEL_PIXELS,
};

/// The process-wide strategy, chosen on first use from the available parallelism.
pub fn strategy() -> &'static dyn BlurStrategy {
    static ACTIVE: OnceLock<&'static dyn BlurStrategy> = OnceLock::new();
    *ACTIVE.get_or_init(|| {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let chosen: &'static dyn BlurStrategy = if threads > 1 {
            &ROW_PARALLEL
        } else {
            &PREFIX_SUM
        };
        tracing::debug!(strategy = chosen.name(), threads, "selected blur strategy");
        chosen
    })
}

/// Blur a one-channel mask in place. Four-channel buffers are left untouched.
pub fn single_channel(buffer: &mut PixelBuffer, radius: u32) {
    if buffer.channels() != Channels::One {
        tracing::warn!(channels = ?buffer.channels(), "single_channel blur on a multi-channel buffer");
        return;
    }
    strategy().blur(buffer, radius);
}

/// Blur a premultiplied RGBA buffer in place, all four channels independently.
/// One-channel buffers are left untouched.
pub fn four_channel(buffer: &mut PixelBuffer, radius: u32) {
    if buffer.channels() != Channels::Four {
        tracing::warn!(channels = ?buffer.channels(), "four_channel blur on a one-channel buffer");
        return;
    }
    strategy().blur(buffer, radius);
}

/// Blur a premultiplied RGBA `src` into `dst`, leaving `src` untouched.
///
/// `dst` must have the same dimensions and layout; its stride may differ.
pub fn four_channel_into(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    radius: u32,
) -> PenumbraResult<()> {
    if src.channels() != Channels::Four || dst.channels() != Channels::Four {
        return Err(PenumbraError::validation(
            "four_channel_into expects four-channel buffers",
        ));
    }
    if (src.width(), src.height()) != (dst.width(), dst.height()) {
        return Err(PenumbraError::validation(format!(
            "four_channel_into size mismatch: {}x{} vs {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    for y in 0..src.height() {
        dst.row_mut(y).copy_from_slice(src.row(y));
    }
    strategy().blur(dst, radius);
    Ok(())
}

/// Blur any buffer in place, whatever its channel layout.
pub fn blur_in_place(buffer: &mut PixelBuffer, radius: u32) {
    strategy().blur(buffer, radius);
}

#[cfg(test)]
#[path = "../../tests/unit/blur/mod.rs"]
mod tests;
