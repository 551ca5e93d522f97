use super::*;

fn rect_path(x: f64, y: f64, w: f64, h: f64) -> BezPath {
    Rect::new(x, y, x + w, y + h).to_path(0.1)
}

#[test]
fn empty_paths_have_zero_bounds() {
    assert_eq!(bounds(&BezPath::new()), Rect::ZERO);
    assert!(is_degenerate(&BezPath::new()));
    let mut line = BezPath::new();
    line.move_to((0.0, 2.0));
    line.line_to((10.0, 2.0));
    assert!(is_degenerate(&line));
    assert!(!is_degenerate(&rect_path(0.0, 0.0, 1.0, 1.0)));
}

#[test]
fn strip_origin_moves_bounds_to_zero() {
    let (stripped, origin) = strip_origin(&rect_path(3.0, 4.5, 2.0, 2.0));
    assert_eq!(origin, Point::new(3.0, 4.5));
    assert_eq!(bounds(&stripped), Rect::new(0.0, 0.0, 2.0, 2.0));
}

#[test]
fn scale_to_fit_keeps_proportions_and_centers() {
    let fitted = scale_to_fit(&rect_path(10.0, 10.0, 4.0, 2.0), Rect::new(0.0, 0.0, 2.0, 2.0));
    let b = bounds(&fitted);
    assert!((b.x0 - 0.0).abs() < 1e-9 && (b.x1 - 2.0).abs() < 1e-9);
    assert!((b.y0 - 0.5).abs() < 1e-9 && (b.y1 - 1.5).abs() < 1e-9);

    let grown = scale_to_fit(&rect_path(0.0, 0.0, 3.0, 3.0), Rect::new(-2.0, -2.0, 5.0, 5.0));
    let b = bounds(&grown);
    for (got, want) in [(b.x0, -2.0), (b.y0, -2.0), (b.x1, 5.0), (b.y1, 5.0)] {
        assert!((got - want).abs() < 1e-9);
    }
}

#[test]
fn enclosing_rect_is_appended_as_a_subpath() {
    let path = rect_path(1.0, 1.0, 2.0, 2.0);
    let wrapped = with_enclosing_rect(&path, Rect::new(0.0, 0.0, 4.0, 4.0));
    assert!(wrapped.elements().len() > path.elements().len());
    assert_eq!(bounds(&wrapped), Rect::new(0.0, 0.0, 4.0, 4.0));
}

#[test]
fn stroke_outline_covers_the_stroke_width() {
    let mut line = BezPath::new();
    line.move_to((0.0, 5.0));
    line.line_to((10.0, 5.0));
    let outline = stroke_outline(&line, &Stroke::new(2.0), 0.1);
    let b = bounds(&outline);
    assert!((b.y0 - 4.0).abs() < 1e-6);
    assert!((b.y1 - 6.0).abs() < 1e-6);
    assert!(!is_degenerate(&outline));
}

#[test]
fn nearest_point_lands_on_the_outline() {
    let square = rect_path(0.0, 0.0, 4.0, 4.0);
    let q = nearest_point(&square, Point::new(1.0, 1.5)).unwrap();
    assert!((q.x - 0.0).abs() < 1e-6 && (q.y - 1.5).abs() < 1e-6);
    let q = nearest_point(&square, Point::new(2.0, 9.0)).unwrap();
    assert!((q.x - 2.0).abs() < 1e-6 && (q.y - 4.0).abs() < 1e-6);
    assert!(nearest_point(&BezPath::new(), Point::ZERO).is_none());
}
