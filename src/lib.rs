//! Penumbra renders drop and inner shadows for 2D vector paths.
//!
//! Shadows are alpha masks rasterized from a path, blurred with a stack blur and composited in
//! the shadow color. Everything expensive is cached:
//!
//! - [`CachedShadows`] keeps the masks and their composite across frames and redoes only the
//!   work a change requires
//! - [`CachedBlur`] keeps a blurred copy of a shared image
//! - [`blur`] exposes the stack-blur kernels directly
//!
//! Drawing goes through the [`RenderTarget`] trait; [`CpuCanvas`] is an in-memory implementation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod blur;
pub(crate) mod cached_blur;
pub(crate) mod canvas;
pub(crate) mod pixel;
pub mod raster;
pub(crate) mod shadow;

pub use crate::foundation::core::{Affine, BezPath, IntRect, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{PenumbraError, PenumbraResult};

pub use crate::cached_blur::CachedBlur;
pub use crate::canvas::{CpuCanvas, RenderTarget};
pub use crate::pixel::buffer::{Channels, PixelBuffer};
pub use crate::shadow::{
    CacheOpts, CacheStats, CachedShadows, DEFAULT_INNER_PAD_PX, PathFingerprint,
    PathWithShadows, RenderedShadow, ShadowKind, ShadowSpec,
};

pub use kurbo::Stroke;
