use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u8(1, 127), 0);
    assert_eq!(mul_div255_u8(1, 128), 1);
}

#[test]
fn snapping_absorbs_float_noise() {
    assert_eq!(floor_snapped(2.999_999_999), 3.0);
    assert_eq!(ceil_snapped(3.000_000_001), 3.0);
    assert_eq!(floor_snapped(2.5), 2.0);
    assert_eq!(ceil_snapped(2.5), 3.0);
}

#[test]
fn integral_scales() {
    assert!(is_integral(1.0));
    assert!(is_integral(2.0 + 1e-9));
    assert!(!is_integral(1.5));
    assert_eq!(scale_round(2, 1.5), 3);
    assert_eq!(scale_round(3, 1.5), 5);
    assert_eq!(scale_round(-2, 2.0), -4);
}
