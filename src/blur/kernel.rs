use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::blur::tables::MAX_TABLE_RADIUS;

/// Triangular stack-blur kernel of `2 * radius + 1` taps.
///
/// Tap `i` has integer weight `radius + 1 - |i - radius|`; the weights sum to `(radius + 1)^2`.
/// [`weights`](Self::weights) exposes the same kernel normalized to `f32` for callers driving
/// their own convolution.
#[derive(Clone, Debug, PartialEq)]
pub struct BlurKernel {
    radius: u32,
    weights: Vec<f32>,
}

impl BlurKernel {
    /// Shared kernel for `radius`; kernels up to the table limit are built once and reused.
    pub fn for_radius(radius: u32) -> Arc<Self> {
        if radius > MAX_TABLE_RADIUS {
            return Arc::new(Self::build(radius));
        }
        static CACHE: OnceLock<Mutex<HashMap<u32, Arc<BlurKernel>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut guard = match cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(
            guard
                .entry(radius)
                .or_insert_with(|| Arc::new(Self::build(radius))),
        )
    }

    fn build(radius: u32) -> Self {
        let divisor = Self::divisor_for(radius) as f32;
        let weights = (0..Self::taps_for(radius))
            .map(|i| Self::weight_for(radius, i) as f32 / divisor)
            .collect();
        Self { radius, weights }
    }

    fn taps_for(radius: u32) -> usize {
        2 * radius as usize + 1
    }

    fn weight_for(radius: u32, tap: usize) -> u64 {
        let r = radius as i64;
        (r + 1 - (tap as i64 - r).abs()) as u64
    }

    fn divisor_for(radius: u32) -> u64 {
        let side = u64::from(radius) + 1;
        side * side
    }

    /// Radius the kernel was built for.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false`: even radius 0 has a single unit tap.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Normalized weights, summing to 1.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Unnormalized integer weight of `tap`.
    pub fn integer_weight(&self, tap: usize) -> u64 {
        Self::weight_for(self.radius, tap)
    }

    /// Sum of the integer weights, `(radius + 1)^2`.
    pub fn divisor(&self) -> u64 {
        Self::divisor_for(self.radius)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blur/kernel.rs"]
mod tests;
