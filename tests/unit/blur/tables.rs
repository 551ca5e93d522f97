use super::*;

#[test]
fn uniform_runs_map_back_to_themselves() {
    for radius in 0..=MAX_TABLE_RADIUS + 3 {
        let d = StackDivisor::for_radius(radius);
        let side = u64::from(radius) + 1;
        for v in [0u64, 1, 17, 128, 254, 255] {
            assert_eq!(u64::from(d.apply(v * side * side)), v, "radius {radius}, value {v}");
        }
    }
}

#[test]
fn table_tracks_exact_division() {
    for radius in [1u32, 2, 3, 7, 15, 40, 100, 254] {
        let d = StackDivisor::for_radius(radius);
        let div = (u64::from(radius) + 1).pow(2);
        for sum in (0..=255 * div).step_by(radius as usize + 7) {
            let exact = sum / div;
            let got = u64::from(d.apply(sum));
            assert!(got.abs_diff(exact) <= 1, "radius {radius}, sum {sum}");
        }
    }
}

#[test]
fn large_radii_use_exact_division() {
    assert_eq!(
        StackDivisor::for_radius(255),
        StackDivisor::Exact { div: 256 * 256 }
    );
    assert!(matches!(
        StackDivisor::for_radius(MAX_TABLE_RADIUS),
        StackDivisor::Table { .. }
    ));
}
