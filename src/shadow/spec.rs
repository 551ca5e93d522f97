use crate::foundation::core::Rgba8;
use crate::foundation::error::{PenumbraError, PenumbraResult};

/// Whether a shadow falls outside the path or inside it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShadowKind {
    /// Cast outside the path, drawn beneath it.
    #[default]
    Drop,
    /// Cast inside the path from its edges, drawn on top of it.
    Inner,
}

/// Parameters of one shadow, in logical (unscaled) units.
///
/// Opacity is the alpha of `color`. The kind is fixed when the spec is created; all other fields
/// are plain data.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowSpec {
    /// Shadow color, straight alpha.
    pub color: Rgba8,
    /// Blur radius; 0 disables the shadow.
    pub radius: u32,
    /// Displacement of the shadow relative to the path.
    pub offset: (i32, i32),
    /// Grows (positive) or shrinks (negative) the shadow shape before blurring.
    pub spread: i32,
    /// Render at scale 1 regardless of the target's pixel density.
    pub low_quality: bool,
    kind: ShadowKind,
}

impl ShadowSpec {
    /// A drop shadow.
    pub fn drop(color: Rgba8, radius: u32) -> Self {
        Self {
            color,
            radius,
            ..Self::default()
        }
    }

    /// An inner shadow.
    pub fn inner(color: Rgba8, radius: u32) -> Self {
        Self {
            color,
            radius,
            kind: ShadowKind::Inner,
            ..Self::default()
        }
    }

    /// Default spec (black, radius 0) of the given kind.
    pub fn of_kind(kind: ShadowKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// With `offset` set.
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset = (x, y);
        self
    }

    /// With `spread` set.
    pub fn with_spread(mut self, spread: i32) -> Self {
        self.spread = spread;
        self
    }

    /// With `low_quality` set.
    pub fn with_low_quality(mut self, low_quality: bool) -> Self {
        self.low_quality = low_quality;
        self
    }

    pub(crate) fn into_kind(mut self, kind: ShadowKind) -> Self {
        self.kind = kind;
        self
    }

    /// Drop or inner.
    pub fn kind(&self) -> ShadowKind {
        self.kind
    }

    /// Color alpha as a `[0, 1]` opacity.
    pub fn opacity(&self) -> f32 {
        self.color.opacity()
    }

    /// Parse a JSON array of specs. Missing fields take their defaults.
    ///
    /// ```
    /// let specs = penumbra::ShadowSpec::list_from_json(
    ///     r#"[{"radius": 4, "offset": [2, 2]}, {"kind": "inner", "radius": 2}]"#,
    /// )
    /// .unwrap();
    /// assert_eq!(specs.len(), 2);
    /// assert_eq!(specs[1].kind(), penumbra::ShadowKind::Inner);
    /// ```
    pub fn list_from_json(json: &str) -> PenumbraResult<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| PenumbraError::serde(e.to_string()))
    }

    /// Serialize a list of specs as JSON.
    pub fn list_to_json(specs: &[Self]) -> PenumbraResult<String> {
        serde_json::to_string(specs).map_err(|e| PenumbraError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shadow/spec.rs"]
mod tests;
