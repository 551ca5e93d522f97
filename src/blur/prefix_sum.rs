use crate::blur::BlurStrategy;
use crate::blur::tables::StackDivisor;
use crate::pixel::buffer::PixelBuffer;

/// Reusable scratch for blurring one line at a time.
///
/// A line is `len` samples spaced `step` bytes apart starting at `start`, which covers a channel
/// of an interleaved row as well as a column of a strided buffer.
#[derive(Debug, Default)]
pub(crate) struct LineScratch {
    sums: Vec<u64>,
}

impl LineScratch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stack-blur one line in place.
    ///
    /// The line is padded with `radius` copies of its first sample and `radius + 1` copies of its
    /// last. Over that padded line `P` holds exclusive running sums and `S` the running sums of
    /// `P`; the triangular window around sample `i` is then
    /// `S[i + 2r + 2] + S[i] - 2 * S[i + r + 1]`.
    pub(crate) fn blur_line(
        &mut self,
        data: &mut [u8],
        start: usize,
        step: usize,
        len: usize,
        radius: usize,
        divisor: StackDivisor,
    ) {
        if len == 0 || radius == 0 {
            return;
        }
        let at = |i: usize| start + i * step;
        let n = len + 2 * radius + 2;
        let first = u64::from(data[at(0)]);
        let last = u64::from(data[at(len - 1)]);

        let sums = &mut self.sums;
        sums.clear();
        sums.resize(n, 0);

        for i in 1..=radius {
            sums[i] = sums[i - 1] + first;
        }
        for i in radius + 1..len + radius {
            sums[i] = sums[i - 1] + u64::from(data[at(i - radius - 1)]);
        }
        for i in len + radius..n {
            sums[i] = sums[i - 1] + last;
        }

        // Second-order pass in place: S[i] = S[i - 1] + P[i - 1].
        let mut prev = sums[0];
        sums[0] = 0;
        for i in 1..n {
            let p = sums[i];
            sums[i] = sums[i - 1] + prev;
            prev = p;
        }

        for i in 0..len {
            let window = sums[i + 2 * radius + 2] + sums[i] - 2 * sums[i + radius + 1];
            data[at(i)] = divisor.apply(window);
        }
    }
}

/// Blur every row, channel by channel.
pub(crate) fn horizontal_pass(buffer: &mut PixelBuffer, radius: u32, scratch: &mut LineScratch) {
    let channels = buffer.channels().count();
    let width = buffer.width() as usize;
    let divisor = StackDivisor::for_radius(radius);
    for y in 0..buffer.height() {
        let row = buffer.row_mut(y);
        for c in 0..channels {
            scratch.blur_line(row, c, channels, width, radius as usize, divisor);
        }
    }
}

/// Blur every column in place by striding through rows.
pub(crate) fn vertical_pass(buffer: &mut PixelBuffer, radius: u32, scratch: &mut LineScratch) {
    let channels = buffer.channels().count();
    let (width, height) = (buffer.width() as usize, buffer.height() as usize);
    let stride = buffer.stride();
    let divisor = StackDivisor::for_radius(radius);
    let data = buffer.data_mut();
    for x in 0..width {
        for c in 0..channels {
            scratch.blur_line(
                data,
                x * channels + c,
                stride,
                height,
                radius as usize,
                divisor,
            );
        }
    }
}

/// Single-threaded two-pass prefix-sum stack blur.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrefixSum;

impl BlurStrategy for PrefixSum {
    fn name(&self) -> &'static str {
        "prefix_sum"
    }

    fn blur(&self, buffer: &mut PixelBuffer, radius: u32) {
        if radius == 0 || buffer.is_empty() {
            return;
        }
        let mut scratch = LineScratch::new();
        horizontal_pass(buffer, radius, &mut scratch);
        vertical_pass(buffer, radius, &mut scratch);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blur/prefix_sum.rs"]
mod tests;
