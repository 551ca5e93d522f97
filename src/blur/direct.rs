use crate::blur::BlurStrategy;
use crate::blur::kernel::BlurKernel;
use crate::blur::tables::StackDivisor;
use crate::pixel::buffer::PixelBuffer;

/// Reference strategy: explicit convolution with the triangular kernel.
///
/// Quadratic in the radius. It shares the integer weights and divisor of the fast strategies,
/// so it is the oracle they are checked against.
#[derive(Clone, Copy, Debug, Default)]
pub struct Convolution;

impl Convolution {
    fn convolve_line(
        src: &[u8],
        dst: &mut [u8],
        start: usize,
        step: usize,
        len: usize,
        kernel: &BlurKernel,
        divisor: StackDivisor,
    ) {
        let r = kernel.radius() as i64;
        let last = len as i64 - 1;
        for i in 0..len {
            let mut sum = 0u64;
            for tap in 0..kernel.len() {
                let j = (i as i64 + tap as i64 - r).clamp(0, last) as usize;
                sum += kernel.integer_weight(tap) * u64::from(src[start + j * step]);
            }
            dst[start + i * step] = divisor.apply(sum);
        }
    }
}

impl BlurStrategy for Convolution {
    fn name(&self) -> &'static str {
        "convolution"
    }

    fn blur(&self, buffer: &mut PixelBuffer, radius: u32) {
        if radius == 0 || buffer.is_empty() {
            return;
        }
        let kernel = BlurKernel::for_radius(radius);
        let divisor = StackDivisor::for_radius(radius);
        let channels = buffer.channels().count();
        let (width, height) = (buffer.width() as usize, buffer.height() as usize);
        let stride = buffer.stride();

        let src = buffer.data().to_vec();
        let mut tmp = src.clone();
        for y in 0..height {
            for c in 0..channels {
                let start = y * stride + c;
                Self::convolve_line(&src, &mut tmp, start, channels, width, &kernel, divisor);
            }
        }

        let dst = buffer.data_mut();
        for x in 0..width {
            for c in 0..channels {
                let start = x * channels + c;
                Self::convolve_line(&tmp, dst, start, stride, height, &kernel, divisor);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blur/direct.rs"]
mod tests;
