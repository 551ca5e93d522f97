use super::*;
use crate::foundation::core::Rect;
use kurbo::Shape;

fn rect_path(x: f64, y: f64, w: f64, h: f64) -> BezPath {
    Rect::new(x, y, x + w, y + h).to_path(0.1)
}

#[test]
fn pixel_aligned_rect_fills_exactly_its_pixels() {
    let mask = fill_alpha_mask(
        &rect_path(1.0, 1.0, 3.0, 3.0),
        FillRule::NonZero,
        Affine::IDENTITY,
        5,
        5,
    )
    .unwrap();
    for y in 0..5 {
        for x in 0..5 {
            let inside = (1..4).contains(&x) && (1..4).contains(&y);
            let v = mask.get(x, y, 0);
            if inside {
                assert!(v >= 250, "({x}, {y}) = {v}");
            } else {
                assert!(v <= 5, "({x}, {y}) = {v}");
            }
        }
    }
}

#[test]
fn transform_is_applied() {
    let mask = fill_alpha_mask(
        &rect_path(0.0, 0.0, 1.0, 1.0),
        FillRule::NonZero,
        Affine::translate((2.0, 1.0)) * Affine::scale(2.0),
        6,
        6,
    )
    .unwrap();
    assert!(mask.get(2, 1, 0) >= 250);
    assert!(mask.get(3, 2, 0) >= 250);
    assert!(mask.get(4, 1, 0) <= 5);
    assert!(mask.get(1, 1, 0) <= 5);
}

#[test]
fn even_odd_with_enclosing_rect_inverts() {
    let path = crate::raster::path::with_enclosing_rect(
        &rect_path(1.0, 1.0, 3.0, 3.0),
        Rect::new(-1.0, -1.0, 6.0, 6.0),
    );
    let mask = fill_alpha_mask(&path, FillRule::EvenOdd, Affine::IDENTITY, 5, 5).unwrap();
    assert!(mask.get(2, 2, 0) <= 5);
    assert!(mask.get(0, 0, 0) >= 250);
    assert!(mask.get(4, 2, 0) >= 250);
}

#[test]
fn rgba_fill_is_premultiplied() {
    let out = fill_rgba(
        &rect_path(0.0, 0.0, 2.0, 2.0),
        FillRule::NonZero,
        Affine::IDENTITY,
        Rgba8::new(255, 0, 0, 128),
        3,
        3,
    )
    .unwrap();
    let px = out.pixel(0, 0);
    assert!(px[0].abs_diff(128) <= 2 && px[1] == 0 && px[3].abs_diff(128) <= 2);
    assert_eq!(out.pixel(2, 2), &[0, 0, 0, 0]);
}

#[test]
fn unusable_sizes_are_errors() {
    let path = rect_path(0.0, 0.0, 1.0, 1.0);
    let err = fill_alpha_mask(&path, FillRule::NonZero, Affine::IDENTITY, 0, 4).unwrap_err();
    assert!(matches!(err, PenumbraError::Raster(_)));
    assert!(fill_alpha_mask(&path, FillRule::NonZero, Affine::IDENTITY, 70_000, 1).is_err());
}
