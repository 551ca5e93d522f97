//! Drop and inner shadows for vector paths.
//!
//! A [`CachedShadows`] owns a list of [`ShadowSpec`]s and keeps, per spec, a blurred alpha mask
//! ([`RenderedShadow`]) plus one composite image of all of them. Work is redone only as far as
//! a change requires.

pub(crate) mod cache;
pub(crate) mod fingerprint;
pub(crate) mod path_with_shadows;
pub(crate) mod rendered;
pub(crate) mod spec;

pub use cache::{CacheOpts, CacheStats, CachedShadows};
pub use fingerprint::PathFingerprint;
pub use path_with_shadows::PathWithShadows;
pub use rendered::{DEFAULT_INNER_PAD_PX, RenderedShadow};
pub use spec::{ShadowKind, ShadowSpec};
