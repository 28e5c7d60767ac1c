//! Per-element animation configuration.
//!
//! The host integration attaches a JSON payload ([`ConfigPayload`]) to every
//! element that carries an animation. [`AnimationConfig::from_json`] parses
//! it and applies defaults, producing the immutable configuration one
//! controller owns for its whole lifetime.

mod breakpoint;
mod payload;

pub use breakpoint::{resolve, Breakpoint};
pub use payload::{BreakpointPayload, ConfigPayload};
use serde::Serialize;

use crate::error::LottieError;

/// Interaction policy governing when playback starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TriggerKind {
    /// Play when the element scrolls into view.
    #[default]
    #[serde(rename = "")]
    Autoplay,
    /// Play on click.
    #[serde(rename = "click")]
    Click,
    /// Play forward on pointer enter, reverse on leave.
    #[serde(rename = "hover")]
    Hover,
    /// Driven by the scroll-linked library.
    #[serde(rename = "scroll")]
    Scroll,
}

impl TriggerKind {
    /// Parse the payload's trigger string. Empty means autoplay.
    pub fn parse(value: &str) -> Result<Self, LottieError> {
        match value {
            "" => Ok(Self::Autoplay),
            "click" => Ok(Self::Click),
            "hover" => Ok(Self::Hover),
            "scroll" => Ok(Self::Scroll),
            other => Err(LottieError::UnknownTrigger(other.to_owned())),
        }
    }

    /// Payload spelling of this trigger.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Autoplay => "",
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Scroll => "scroll",
        }
    }
}

/// What to render when the visitor prefers reduced motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReducedMotionFallback {
    /// Ignore the preference and animate normally.
    NoChange,
    /// Render the first frame and stay there.
    ShowFirstFrame,
    /// Render the last frame and stay there.
    ShowLastFrame,
    /// Keep the static image and never create a canvas.
    #[default]
    Hide,
}

impl ReducedMotionFallback {
    /// Parse the payload's fallback string.
    pub fn parse(value: &str) -> Result<Self, LottieError> {
        match value {
            "no-change" => Ok(Self::NoChange),
            "show-first-frame" => Ok(Self::ShowFirstFrame),
            "show-last-frame" => Ok(Self::ShowLastFrame),
            "hide" => Ok(Self::Hide),
            other => Err(LottieError::UnknownFallback(other.to_owned())),
        }
    }
}

/// Viewport-relative bounds of the scroll-synced region, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollRange {
    /// Start of the region; `0` is the element entering at the bottom edge.
    pub start_pct: u8,
    /// End of the region; `100` is the element reaching the top edge.
    pub end_pct: u8,
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self {
            start_pct: 0,
            end_pct: 100,
        }
    }
}

impl ScrollRange {
    /// Clamp both bounds to 0..=100 and order them.
    #[must_use]
    pub fn new(start_pct: u8, end_pct: u8) -> Self {
        let start = start_pct.min(100);
        let end = end_pct.min(100);
        Self {
            start_pct: start.min(end),
            end_pct: start.max(end),
        }
    }

    /// Start bound scaled to `[0, 1]`.
    #[must_use]
    pub fn start(&self) -> f64 {
        f64::from(self.start_pct) / 100.0
    }

    /// End bound scaled to `[0, 1]`.
    #[must_use]
    pub fn end(&self) -> f64 {
        f64::from(self.end_pct) / 100.0
    }

    /// Scroll-library start position, e.g. `"top 100%"` for `0`.
    #[must_use]
    pub fn start_position(&self) -> String {
        format!("top {}%", 100u8.saturating_sub(self.start_pct))
    }

    /// Scroll-library end position, e.g. `"top 0%"` for `100`.
    #[must_use]
    pub fn end_position(&self) -> String {
        format!("top {}%", 100u8.saturating_sub(self.end_pct))
    }
}

/// Typed, defaulted configuration for one animated element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Opaque identifier; becomes the canvas id when non-empty.
    pub id: String,
    /// Sources per viewport width, sorted ascending by `min_width`.
    pub breakpoints: Vec<Breakpoint>,
    /// Interaction policy, fixed for the element's lifetime.
    pub trigger: TriggerKind,
    /// Draw over the image instead of replacing it.
    pub overlay: bool,
    /// Loop playback. Hover playback never loops.
    #[serde(rename = "loop")]
    pub loop_playback: bool,
    /// Alternate forward and reverse instead of stopping at the end.
    pub bounce: bool,
    /// Reduced-motion behavior.
    pub reduced_motion_fallback: ReducedMotionFallback,
    /// Scroll-synced region.
    pub scroll: ScrollRange,
    /// Scrub frames with scroll progress (`true`) or play once on enter.
    pub scroll_scrub: bool,
}

impl AnimationConfig {
    /// Parse and normalize a raw `data-lottie` payload.
    pub fn from_json(raw: &str) -> Result<Self, LottieError> {
        let payload: ConfigPayload = serde_json::from_str(raw)?;
        Self::from_payload(payload)
    }

    /// Apply defaults and validate a deserialized payload.
    pub fn from_payload(payload: ConfigPayload) -> Result<Self, LottieError> {
        let trigger = match payload.trigger.as_deref() {
            Some(t) => TriggerKind::parse(t)?,
            None => TriggerKind::default(),
        };
        let reduced_motion_fallback =
            match payload.reduced_motion_fallback.as_deref() {
                Some(v) => ReducedMotionFallback::parse(v)?,
                None => ReducedMotionFallback::default(),
            };

        let mut breakpoints: Vec<Breakpoint> = payload
            .breakpoints
            .unwrap_or_default()
            .into_iter()
            .filter_map(normalize_breakpoint)
            .collect();
        if breakpoints.is_empty() {
            return Err(LottieError::NoBreakpoints);
        }
        // Stable: equal widths keep payload order.
        breakpoints.sort_by_key(|bp| bp.min_width);

        let defaults = ScrollRange::default();
        let scroll = ScrollRange::new(
            payload
                .scroll_start_pct
                .map_or(defaults.start_pct, percent),
            payload.scroll_end_pct.map_or(defaults.end_pct, percent),
        );

        Ok(Self {
            id: payload.id.unwrap_or_default(),
            breakpoints,
            trigger,
            overlay: payload.overlay.unwrap_or(false),
            loop_playback: payload.loop_playback.unwrap_or(true),
            bounce: payload.bounce.unwrap_or(false),
            reduced_motion_fallback,
            scroll,
            scroll_scrub: payload.scroll_scrub.unwrap_or(true),
        })
    }

    /// Generate JSON Schema describing the payload.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ConfigPayload)
    }
}

fn normalize_breakpoint(raw: BreakpointPayload) -> Option<Breakpoint> {
    let src = raw.src.filter(|s| !s.trim().is_empty());
    let Some(src) = src else {
        log::debug!("dropping breakpoint without a source");
        return None;
    };
    let file = raw.file.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    });
    Some(Breakpoint {
        file,
        src,
        min_width: raw.min_width.map_or(0, min_width),
        width: raw.width.and_then(dimension),
        height: raw.height.and_then(dimension),
    })
}

fn min_width(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn dimension(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 1.0)
        .then(|| value.floor().min(f64::from(u32::MAX)) as u32)
}

fn percent(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}
