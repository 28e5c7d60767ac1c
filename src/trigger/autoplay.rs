//! Autoplay: playback starts when the element becomes visible.

use super::traits::{PlaybackOptions, TriggerHandler};
use crate::config::{AnimationConfig, TriggerKind};

/// Starts playback on first intersection; everything else is the
/// visibility lifecycle's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autoplay;

impl TriggerHandler for Autoplay {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Autoplay
    }

    fn playback(&self, config: &AnimationConfig) -> PlaybackOptions {
        PlaybackOptions::from_config(config)
    }

    fn autoplays(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "autoplay"
    }
}
