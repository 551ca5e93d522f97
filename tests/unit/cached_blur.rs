use super::*;

fn dot() -> Arc<PixelBuffer> {
    let mut b = PixelBuffer::rgba(9, 9);
    b.set_pixel(4, 4, &[255, 255, 255, 255]);
    Arc::new(b)
}

#[test]
fn nothing_cached_before_first_render() {
    let cache = CachedBlur::new(2);
    assert!(cache.render_cached().is_none());
}

#[test]
fn same_arc_reuses_the_result() {
    let source = dot();
    let mut cache = CachedBlur::new(2);
    let first = cache.render(&source).clone();
    assert_ne!(&first, source.as_ref());
    assert!(!cache.needs_redraw);
    let second = cache.render(&source).clone();
    assert_eq!(first, second);
    assert_eq!(cache.render_cached(), Some(&first));
}

#[test]
fn equal_content_in_a_new_arc_is_re_blurred() {
    let a = dot();
    let b = Arc::new(PixelBuffer::clone(&a));
    let mut cache = CachedBlur::new(2);
    cache.render(&a);
    cache.render(&b);
    assert!(Arc::ptr_eq(cache.source.as_ref().unwrap(), &b));
}

#[test]
fn radius_change_forces_a_redraw() {
    let source = dot();
    let mut cache = CachedBlur::new(1);
    let narrow = cache.render(&source).clone();
    cache.set_radius(1);
    assert!(!cache.needs_redraw);
    cache.set_radius(3);
    assert!(cache.needs_redraw);
    let wide = cache.render(&source).clone();
    assert_ne!(narrow, wide);
    assert!(wide.pixel(1, 4)[3] > 0);
    assert_eq!(narrow.pixel(1, 4)[3], 0);
}

#[test]
fn single_channel_sources_are_supported() {
    let mut mask = PixelBuffer::single_channel(5, 5);
    mask.set(2, 2, 0, 255);
    let mut cache = CachedBlur::new(1);
    let out = cache.update(Arc::new(mask));
    assert!(out.get(1, 2, 0) > 0);
}
