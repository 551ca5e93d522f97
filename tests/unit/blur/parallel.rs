use super::*;
use crate::pixel::buffer::Channels;

fn gradient(width: u32, height: u32, channels: Channels) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height, channels);
    for y in 0..height {
        for (i, v) in buffer.row_mut(y).iter_mut().enumerate() {
            *v = ((i as u32 * 37 + y * 101) % 256) as u8;
        }
    }
    buffer
}

#[test]
fn matches_single_threaded_output() {
    let always = RowParallel {
        min_parallel_pixels: 0,
    };
    for channels in [Channels::One, Channels::Four] {
        for radius in [1u32, 4, 9, 30] {
            let mut a = gradient(37, 23, channels);
            let mut b = a.clone();
            always.blur(&mut a, radius);
            PrefixSum.blur(&mut b, radius);
            assert_eq!(a, b, "radius {radius}, {channels:?}");
        }
    }
}

#[test]
fn padded_buffers_round_trip_through_transpose() {
    let always = RowParallel {
        min_parallel_pixels: 0,
    };
    let mut padded = PixelBuffer::with_stride(9, 6, Channels::One, 16).unwrap();
    let tight = gradient(9, 6, Channels::One);
    for y in 0..6 {
        padded.row_mut(y).copy_from_slice(tight.row(y));
    }
    let mut expected = tight.clone();
    PrefixSum.blur(&mut expected, 3);
    always.blur(&mut padded, 3);
    for y in 0..6 {
        assert_eq!(padded.row(y), expected.row(y));
    }
}

#[test]
fn small_buffers_fall_back() {
    let strategy = RowParallel::default();
    let mut a = gradient(8, 8, Channels::Four);
    let mut b = a.clone();
    strategy.blur(&mut a, 2);
    PrefixSum.blur(&mut b, 2);
    assert_eq!(a, b);
}
