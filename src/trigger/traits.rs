//! Core trait for trigger policies.

use crate::config::{AnimationConfig, TriggerKind};
use crate::controller::{LiveHandle, PlaybackState};
use crate::host::{ElementHost, Interaction};
use crate::player::PlayMode;
use crate::scroll::ScrollSignal;

/// Loop and direction a trigger wants its handles created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Restart after the last frame.
    pub loop_playback: bool,
    /// Initial direction.
    pub mode: PlayMode,
}

impl PlaybackOptions {
    /// Loop as configured; bounce when configured, forward otherwise.
    #[must_use]
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            loop_playback: config.loop_playback,
            mode: if config.bounce {
                PlayMode::Bounce
            } else {
                PlayMode::Forward
            },
        }
    }
}

/// Defines when playback of a handle starts and what drives it.
///
/// One implementation per [`TriggerKind`]; the controller picks it once at
/// construction and routes every interaction, poll and scroll signal of the
/// live handle through it. Handlers never see a destroyed handle: the
/// controller discards stale notifications before calling in.
///
/// See [`Autoplay`](super::Autoplay), [`ClickToPlay`](super::ClickToPlay),
/// [`HoverScrub`](super::HoverScrub), [`ScrollSync`](super::ScrollSync).
pub trait TriggerHandler {
    /// Which trigger this handler implements.
    fn kind(&self) -> TriggerKind;

    /// Loop and direction for new handles.
    fn playback(&self, config: &AnimationConfig) -> PlaybackOptions;

    /// Whether visibility alone starts playback.
    /// Default: no.
    fn autoplays(&self) -> bool {
        false
    }

    /// Canvas interactions to forward for each handle.
    /// Default: none.
    fn interactions(&self) -> &'static [Interaction] {
        &[]
    }

    /// A bound interaction fired on the live handle.
    fn on_interaction(
        &mut self,
        _interaction: Interaction,
        _handle: &mut LiveHandle,
        _state: &mut PlaybackState,
    ) {
    }

    /// A handle was created and its listeners bound.
    fn on_attach(&mut self, _handle: &mut LiveHandle) {}

    /// The live handle's source finished loading.
    fn on_loaded(&mut self, _handle: &mut LiveHandle) {}

    /// A handle is about to be destroyed; drop anything bound to it.
    fn on_detach(&mut self, _handle: &mut LiveHandle) {}

    /// Check for optional capabilities. Called once when live playback
    /// starts, then for every poll the handler scheduled itself.
    fn on_poll(
        &mut self,
        _handle: Option<&mut LiveHandle>,
        _host: &mut dyn ElementHost,
    ) {
    }

    /// A scroll signal arrived for the live handle.
    fn on_scroll(
        &mut self,
        _signal: ScrollSignal,
        _handle: &mut LiveHandle,
        _state: &mut PlaybackState,
    ) {
    }

    /// Name for logging.
    fn name(&self) -> &'static str;
}

/// Owned trigger handler, fixed for the element's lifetime.
pub type BoxedTrigger = Box<dyn TriggerHandler>;
