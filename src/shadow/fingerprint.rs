use smallvec::SmallVec;
use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::math::approx_eq;
use crate::raster::path::{bounds, nearest_point, strip_origin};

const XXH3_SEED: u64 = 0x5d1a_3c0f_9e27_b461;

/// Bounds are quantized to this step before seeding probe points, so paths whose sizes differ by
/// float noise probe at the same places.
const PROBE_QUANTUM: f64 = 1e-3;

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn finish(self) -> u128 {
        self.inner.digest128()
    }
}

/// Origin-stripped copy of a path, compared approximately to detect geometry changes.
///
/// Two paths that differ only by a translation have equal fingerprints.
#[derive(Clone, Debug)]
pub struct PathFingerprint {
    path: BezPath,
    origin: Point,
    bounds: Rect,
}

impl PathFingerprint {
    /// Strip `path` to its bounds origin and record what was removed.
    pub fn new(path: &BezPath) -> Self {
        let (path, origin) = strip_origin(path);
        let bounds = bounds(&path);
        Self {
            path,
            origin,
            bounds,
        }
    }

    /// The path translated so its bounds start at `(0, 0)`.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Top-left of the original path's bounds.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Bounds of [`path`](Self::path).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Approximate geometric equality, ignoring position.
    ///
    /// Paths match when they have the same number of elements, their sizes agree within
    /// `tolerance`, and for `probes` pseudo-random points derived from the bounds the nearest
    /// points on both outlines agree within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64, probes: usize) -> bool {
        if self.path.elements().len() != other.path.elements().len() {
            return false;
        }
        if !approx_eq(self.bounds.width(), other.bounds.width(), tolerance)
            || !approx_eq(self.bounds.height(), other.bounds.height(), tolerance)
        {
            return false;
        }
        for p in probe_points(self.bounds, probes) {
            match (nearest_point(&self.path, p), nearest_point(&other.path, p)) {
                (Some(a), Some(b)) if (a - b).hypot() <= tolerance => {}
                (None, None) => {}
                _ => return false,
            }
        }
        true
    }
}

fn probe_points(bounds: Rect, count: usize) -> SmallVec<[Point; 4]> {
    let quantize = |v: f64| (v / PROBE_QUANTUM).round() as i64;
    (0..count)
        .map(|i| {
            let mut h = StableHasher::new();
            h.write_i64(quantize(bounds.width()));
            h.write_i64(quantize(bounds.height()));
            h.write_u32(i as u32);
            let digest = h.finish();
            let u = f64::from(digest as u32) / f64::from(u32::MAX);
            let v = f64::from((digest >> 32) as u32) / f64::from(u32::MAX);
            Point::new(
                bounds.x0 + u * bounds.width(),
                bounds.y0 + v * bounds.height(),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/shadow/fingerprint.rs"]
mod tests;
