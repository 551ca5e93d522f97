use super::*;

#[test]
fn weights_are_triangular_and_normalized() {
    let k = BlurKernel::for_radius(3);
    assert_eq!(k.len(), 7);
    assert_eq!(k.divisor(), 16);
    let ints: Vec<u64> = (0..k.len()).map(|i| k.integer_weight(i)).collect();
    assert_eq!(ints, [1, 2, 3, 4, 3, 2, 1]);
    let total: f32 = k.weights().iter().sum();
    assert!((total - 1.0).abs() < 1e-5);
    assert!((k.weights()[3] - 0.25).abs() < 1e-6);
}

#[test]
fn radius_zero_is_a_unit_tap() {
    let k = BlurKernel::for_radius(0);
    assert_eq!(k.weights(), &[1.0]);
    assert!(!k.is_empty());
}

#[test]
fn kernels_are_shared_per_radius() {
    let a = BlurKernel::for_radius(12);
    let b = BlurKernel::for_radius(12);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(BlurKernel::for_radius(400).len(), 801);
}
