//! Path geometry helpers and the `vello_cpu` rasterization bridge.

pub(crate) mod fill;
pub(crate) mod path;

pub use fill::{FillRule, fill_alpha_mask, fill_rgba};
pub use path::{
    bounds, is_degenerate, nearest_point, scale_to_fit, stroke_outline, strip_origin,
    with_enclosing_rect,
};
