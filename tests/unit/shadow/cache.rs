use super::*;
use crate::canvas::CpuCanvas;
use crate::foundation::core::Rect;
use kurbo::Shape;

fn square(x: f64, y: f64, size: f64) -> BezPath {
    Rect::new(x, y, x + size, y + size).to_path(0.1)
}

fn canvas(scale: f64) -> CpuCanvas {
    let mut c = CpuCanvas::new(20, 20, scale).unwrap();
    c.fill_all(Rgba8::WHITE);
    c
}

fn rendered(specs: impl IntoIterator<Item = ShadowSpec>) -> (CachedShadows, CpuCanvas) {
    let mut cache = CachedShadows::drop_shadow(specs);
    let mut target = canvas(1.0);
    cache.render(&mut target, &square(3.0, 3.0, 4.0), false);
    (cache, target)
}

#[test]
fn first_render_clears_both_flags() {
    let (cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    assert!(!cache.needs_recalculate());
    assert!(!cache.needs_recomposite());
    assert_eq!(
        cache.stats(),
        CacheStats {
            recalculations: 1,
            recomposites: 1,
            draws: 1
        }
    );
}

#[test]
fn color_opacity_and_offset_only_recomposite() {
    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.set_color(0, Rgba8::opaque(255, 0, 0));
    assert!(cache.needs_recomposite() && !cache.needs_recalculate());

    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.set_opacity(0, 0.5);
    assert!(cache.needs_recomposite() && !cache.needs_recalculate());

    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.set_offset(0, 1, 1);
    assert!(cache.needs_recomposite() && !cache.needs_recalculate());
}

#[test]
fn radius_and_spread_recalculate() {
    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.set_radius(0, 3);
    assert!(cache.needs_recalculate());

    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.set_spread(0, 1);
    assert!(cache.needs_recalculate());
}

#[test]
fn unchanged_values_do_not_dirty() {
    let spec = ShadowSpec::drop(Rgba8::BLACK, 2).with_offset(1, 1);
    let (mut cache, _) = rendered([spec]);
    cache
        .set_radius(0, 2)
        .set_spread(0, 0)
        .set_offset(0, 1, 1)
        .set_color(0, Rgba8::BLACK)
        .set_opacity(0, 1.0);
    assert!(!cache.needs_recalculate());
    assert!(!cache.needs_recomposite());
}

#[test]
fn a_pending_recalculation_survives_an_unchanged_setter() {
    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.set_radius(0, 5).set_radius(0, 5);
    assert!(cache.needs_recalculate());
}

#[test]
fn translating_the_path_reuses_everything() {
    let (mut cache, mut target) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    let position = cache.composite_position();
    cache.render(&mut target, &square(9.0, 5.5, 4.0), false);
    assert_eq!(cache.stats().recalculations, 1);
    assert_eq!(cache.stats().recomposites, 1);
    assert_eq!(cache.stats().draws, 2);
    assert_eq!(cache.composite_position(), position);
    assert_eq!(cache.fingerprint().unwrap().origin(), Point::new(9.0, 5.5));
}

#[test]
fn new_geometry_recalculates() {
    let (mut cache, mut target) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.render(&mut target, &square(3.0, 3.0, 5.0), false);
    assert_eq!(cache.stats().recalculations, 2);
}

#[test]
fn slow_geometry_drift_eventually_recalculates() {
    let (mut cache, mut target) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    let mut size = 4.0;
    for _ in 0..10 {
        size += 4e-6;
        cache.render(&mut target, &square(3.0, 3.0, size), false);
    }
    assert!(cache.stats().recalculations >= 2, "{:?}", cache.stats());
    let width = cache.fingerprint().unwrap().bounds().width();
    assert!(width > 4.0 + 1e-5, "{width}");
    assert!(size - width < 2e-5, "{size} vs {width}");
}

#[test]
fn sub_tolerance_changes_keep_the_rendered_fingerprint() {
    let (mut cache, mut target) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.render(&mut target, &square(3.5, 3.0, 4.0 + 4e-6), false);
    assert_eq!(cache.stats().recalculations, 1);
    assert_eq!(cache.fingerprint().unwrap().bounds().width(), 4.0);
    assert_eq!(cache.fingerprint().unwrap().origin(), Point::new(3.5, 3.0));
}

#[test]
fn oversized_radius_draws_nothing() {
    let mut cache = CachedShadows::drop_shadow([ShadowSpec::drop(Rgba8::BLACK, u32::MAX)]);
    let mut target = canvas(1.0);
    cache.render(&mut target, &square(3.0, 3.0, 4.0), false);
    assert!(cache.composite().is_none());
    assert_eq!(target.pixel(5, 5), Rgba8::WHITE);
}

#[test]
fn scale_changes_recalculate() {
    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    let mut hi_dpi = canvas(2.0);
    cache.render(&mut hi_dpi, &square(3.0, 3.0, 4.0), false);
    assert_eq!(cache.stats().recalculations, 2);
    assert_eq!(cache.scale(), 2.0);
    assert_eq!(cache.composite().unwrap().width(), 16);

    cache.render(&mut hi_dpi, &square(3.0, 3.0, 4.0), true);
    assert_eq!(cache.stats().recalculations, 3);
    assert_eq!(cache.scale(), 1.0);
    assert_eq!(cache.composite().unwrap().width(), 8);
}

#[test]
fn stroke_changes_recalculate() {
    let mut cache = CachedShadows::drop_shadow([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    let mut target = canvas(1.0);
    let path = square(4.0, 4.0, 8.0);
    cache.render_stroked(&mut target, &path, &Stroke::new(2.0), false);
    cache.render_stroked(&mut target, &path, &Stroke::new(2.0), false);
    assert_eq!(cache.stats().recalculations, 1);
    cache.render_stroked(&mut target, &path, &Stroke::new(3.0), false);
    assert_eq!(cache.stats().recalculations, 2);
    cache.render(&mut target, &path, false);
    assert_eq!(cache.stats().recalculations, 3);
}

#[test]
fn setters_on_an_empty_cache_add_a_shadow_of_its_kind() {
    let mut cache = CachedShadows::inner_shadow([]);
    cache.set_radius(0, 3);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.shadow(0).unwrap().spec().kind(), ShadowKind::Inner);
    assert_eq!(cache.shadow(0).unwrap().spec().radius, 3);

    let mut cache = CachedShadows::drop_shadow([]);
    cache.set_color(2, Rgba8::WHITE);
    assert!(cache.is_empty());
}

#[test]
fn out_of_range_indices_are_ignored() {
    let (mut cache, _) = rendered([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.set_radius(4, 9).set_color(1, Rgba8::WHITE);
    assert_eq!(cache.len(), 1);
    assert!(!cache.needs_recalculate() && !cache.needs_recomposite());
}

#[test]
fn constructors_tag_kinds() {
    let cache = CachedShadows::inner_shadow([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    assert_eq!(cache.shadow(0).unwrap().spec().kind(), ShadowKind::Inner);
    let mixed = CachedShadows::new([
        ShadowSpec::drop(Rgba8::BLACK, 2),
        ShadowSpec::inner(Rgba8::BLACK, 2),
    ]);
    assert_eq!(mixed.shadow(1).unwrap().spec().kind(), ShadowKind::Inner);
    assert_eq!(mixed.kind(), ShadowKind::Drop);
}

#[test]
fn empty_inputs_draw_nothing() {
    let mut cache = CachedShadows::drop_shadow([]);
    let mut target = canvas(1.0);
    let before = target.buffer().clone();
    cache.render(&mut target, &square(3.0, 3.0, 4.0), false);
    assert_eq!(target.buffer(), &before);

    let mut cache = CachedShadows::drop_shadow([ShadowSpec::drop(Rgba8::BLACK, 2)]);
    cache.render(&mut target, &BezPath::new(), false);
    assert_eq!(target.buffer(), &before);
    assert_eq!(cache.stats(), CacheStats::default());
}

#[test]
fn zero_radius_shadows_leave_no_composite() {
    let (cache, target) = rendered([ShadowSpec::drop(Rgba8::BLACK, 0)]);
    assert!(cache.composite().is_none());
    assert_eq!(target.pixel(4, 4), Rgba8::WHITE);
}

#[test]
fn border_strips_cover_the_uncovered_sides() {
    let path = IntRect::new(0, 0, 5, 5);
    let strips = border_strips(path, IntRect::new(1, -1, 8, 6));
    assert!(strips[0].is_empty());
    assert_eq!(strips[1], IntRect::new(0, 0, 1, 5));
    assert!(strips[2].is_empty());
    assert!(strips[3].is_empty());
    assert!(border_strips(path, path.expanded(1)).iter().all(|r| r.is_empty()));
}
