pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Tolerance used when deciding whether a device scale is a whole number.
pub(crate) const SCALE_EPSILON: f64 = 1e-6;

pub(crate) fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

pub(crate) fn is_integral(v: f64) -> bool {
    approx_eq(v, v.round(), SCALE_EPSILON)
}

/// `floor`, except values within float noise of an integer snap to it.
pub(crate) fn floor_snapped(v: f64) -> f64 {
    if is_integral(v) { v.round() } else { v.floor() }
}

/// `ceil`, except values within float noise of an integer snap to it.
pub(crate) fn ceil_snapped(v: f64) -> f64 {
    if is_integral(v) { v.round() } else { v.ceil() }
}

/// Scale a logical length to whole device pixels.
pub(crate) fn scale_round(v: i32, scale: f64) -> i32 {
    (f64::from(v) * scale).round() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
