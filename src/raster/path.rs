use kurbo::{ParamCurve, ParamCurveNearest, Shape, Stroke, StrokeOpts};

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};

/// Tight bounds of `path`; empty paths report `Rect::ZERO`.
pub fn bounds(path: &BezPath) -> Rect {
    if path.elements().is_empty() {
        return Rect::ZERO;
    }
    path.bounding_box()
}

/// `true` when the path encloses no area worth shadowing.
pub fn is_degenerate(path: &BezPath) -> bool {
    let b = bounds(path);
    !(b.width() > 0.0 && b.height() > 0.0)
}

/// Translate `path` so its bounds start at the origin; returns the removed offset.
pub fn strip_origin(path: &BezPath) -> (BezPath, Point) {
    let origin = bounds(path).origin();
    let mut stripped = path.clone();
    stripped.apply_affine(Affine::translate(-origin.to_vec2()));
    (stripped, origin)
}

/// Uniformly scale and translate `path` so it fits inside `target`, centered.
pub fn scale_to_fit(path: &BezPath, target: Rect) -> BezPath {
    let src = bounds(path);
    if src.width() <= 0.0 || src.height() <= 0.0 {
        return path.clone();
    }
    let k = (target.width() / src.width()).min(target.height() / src.height());
    let fitted = src.size() * k;
    let offset = Vec2::new(
        target.x0 + (target.width() - fitted.width) / 2.0,
        target.y0 + (target.height() - fitted.height) / 2.0,
    );
    let mut out = path.clone();
    out.apply_affine(
        Affine::translate(offset) * Affine::scale(k) * Affine::translate(-src.origin().to_vec2()),
    );
    out
}

/// `path` plus a closed rectangle sub-path around it, for even-odd inversion.
pub fn with_enclosing_rect(path: &BezPath, rect: Rect) -> BezPath {
    let mut out = path.clone();
    out.extend(rect.path_elements(0.1));
    out
}

/// Fill outline of `path` stroked with `style`.
pub fn stroke_outline(path: &BezPath, style: &Stroke, tolerance: f64) -> BezPath {
    kurbo::stroke(path.iter(), style, &StrokeOpts::default(), tolerance)
}

/// Point on `path` closest to `p`, or `None` for a path without segments.
pub fn nearest_point(path: &BezPath, p: Point) -> Option<Point> {
    path.segments()
        .map(|seg| {
            let hit = seg.nearest(p, 1e-9);
            (hit.distance_sq, seg.eval(hit.t))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, q)| q)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/path.rs"]
mod tests;
