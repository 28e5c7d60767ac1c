//! Reduced-motion gate, evaluated once before any handle exists.

use crate::config::ReducedMotionFallback;

/// Which frame the static render path settles on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEdge {
    /// Frame `0`.
    First,
    /// Frame `total_frames - 1`.
    Last,
}

impl FrameEdge {
    /// Frame index for a source with `total_frames` frames.
    #[must_use]
    pub fn frame(self, total_frames: u32) -> u32 {
        match self {
            Self::First => 0,
            Self::Last => total_frames.saturating_sub(1),
        }
    }
}

/// Outcome of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Initialize normally.
    Animate,
    /// Render one still frame, no triggers or visibility tracking.
    StaticFrame(FrameEdge),
    /// Keep the static image; no canvas.
    Hide,
}

/// Decide the render path from the system preference and the configured
/// fallback.
///
/// Not re-evaluated if the preference changes mid-session.
#[must_use]
pub fn evaluate(
    prefers_reduced_motion: bool,
    fallback: ReducedMotionFallback,
) -> GateDecision {
    if !prefers_reduced_motion {
        return GateDecision::Animate;
    }
    match fallback {
        ReducedMotionFallback::NoChange => GateDecision::Animate,
        ReducedMotionFallback::ShowFirstFrame => {
            GateDecision::StaticFrame(FrameEdge::First)
        }
        ReducedMotionFallback::ShowLastFrame => {
            GateDecision::StaticFrame(FrameEdge::Last)
        }
        ReducedMotionFallback::Hide => GateDecision::Hide,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_off_always_animates() {
        for fallback in [
            ReducedMotionFallback::NoChange,
            ReducedMotionFallback::ShowFirstFrame,
            ReducedMotionFallback::ShowLastFrame,
            ReducedMotionFallback::Hide,
        ] {
            assert_eq!(evaluate(false, fallback), GateDecision::Animate);
        }
    }

    #[test]
    fn preference_on_follows_fallback() {
        assert_eq!(
            evaluate(true, ReducedMotionFallback::NoChange),
            GateDecision::Animate
        );
        assert_eq!(
            evaluate(true, ReducedMotionFallback::ShowFirstFrame),
            GateDecision::StaticFrame(FrameEdge::First)
        );
        assert_eq!(
            evaluate(true, ReducedMotionFallback::ShowLastFrame),
            GateDecision::StaticFrame(FrameEdge::Last)
        );
        assert_eq!(
            evaluate(true, ReducedMotionFallback::Hide),
            GateDecision::Hide
        );
    }

    #[test]
    fn edge_frames() {
        assert_eq!(FrameEdge::First.frame(48), 0);
        assert_eq!(FrameEdge::Last.frame(48), 47);
        assert_eq!(FrameEdge::Last.frame(0), 0);
    }
}
