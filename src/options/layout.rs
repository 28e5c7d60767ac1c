use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the animation is fitted into the canvas.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Fit {
    /// Scale to fit entirely inside the canvas.
    #[default]
    Contain,
    /// Scale to cover the canvas, cropping overflow.
    Cover,
    /// Stretch to the canvas size.
    Fill,
    /// Draw at intrinsic size.
    None,
    /// Match the canvas width.
    FitWidth,
    /// Match the canvas height.
    FitHeight,
}

impl Fit {
    /// Engine spelling of this fit mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::Cover => "cover",
            Self::Fill => "fill",
            Self::None => "none",
            Self::FitWidth => "fit-width",
            Self::FitHeight => "fit-height",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Placement of the animation inside its canvas.
pub struct Layout {
    /// Fit mode.
    #[schemars(title = "Fit")]
    pub fit: Fit,
    /// Horizontal and vertical alignment, `0.0` (start) to `1.0` (end).
    #[schemars(title = "Align")]
    pub align: [f32; 2],
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            fit: Fit::Contain,
            align: [0.5, 0.5],
        }
    }
}
