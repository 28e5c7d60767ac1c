use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The `data-lottie` attribute payload exactly as the host integration
/// emits it.
///
/// Every field is optional so partial or older payloads still parse;
/// [`AnimationConfig::from_payload`](super::AnimationConfig::from_payload)
/// applies the defaults.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[schemars(title = "Lottie Animation")]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigPayload {
    /// Unique id, used as the canvas element id.
    pub id: Option<String>,
    /// Animation sources per viewport width, ascending by `minWidth`.
    pub breakpoints: Option<Vec<BreakpointPayload>>,
    /// Interaction: `""` (autoplay), `"click"`, `"hover"` or `"scroll"`.
    pub trigger: Option<String>,
    /// Draw the animation over the image instead of replacing it.
    pub overlay: Option<bool>,
    /// Loop playback (ignored for hover).
    #[serde(rename = "loop")]
    pub loop_playback: Option<bool>,
    /// Alternate forward and reverse playback.
    pub bounce: Option<bool>,
    /// `"no-change"`, `"show-first-frame"`, `"show-last-frame"` or `"hide"`.
    pub reduced_motion_fallback: Option<String>,
    /// Viewport percentage where scroll sync starts.
    #[schemars(range(min = 0, max = 100))]
    pub scroll_start_pct: Option<f64>,
    /// Viewport percentage where scroll sync ends.
    #[schemars(range(min = 0, max = 100))]
    pub scroll_end_pct: Option<f64>,
    /// Scrub frames with scroll progress instead of playing once on enter.
    pub scroll_scrub: Option<bool>,
}

/// One breakpoint row of the payload.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(default, rename_all = "camelCase")]
pub struct BreakpointPayload {
    /// The Lottie file attachment id.
    pub file: Option<serde_json::Value>,
    /// The Lottie file URL.
    pub src: Option<String>,
    /// The viewport width above which this animation is shown.
    #[schemars(range(min = 0))]
    pub min_width: Option<f64>,
    /// Intrinsic width from attachment metadata.
    pub width: Option<f64>,
    /// Intrinsic height from attachment metadata.
    pub height: Option<f64>,
}
