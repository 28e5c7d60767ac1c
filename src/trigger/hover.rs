//! Hover: forward while the pointer is over the element, reverse after.

use super::traits::{PlaybackOptions, TriggerHandler};
use crate::config::{AnimationConfig, TriggerKind};
use crate::controller::{LiveHandle, PlaybackState};
use crate::host::Interaction;
use crate::player::PlayMode;

/// Pointer enter plays forward, pointer leave plays back in reverse.
///
/// Hover is a manual scrub, so it never loops and ignores `bounce`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverScrub;

impl TriggerHandler for HoverScrub {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Hover
    }

    fn playback(&self, _config: &AnimationConfig) -> PlaybackOptions {
        PlaybackOptions {
            loop_playback: false,
            mode: PlayMode::Forward,
        }
    }

    fn interactions(&self) -> &'static [Interaction] {
        &[Interaction::PointerEnter, Interaction::PointerLeave]
    }

    fn on_interaction(
        &mut self,
        interaction: Interaction,
        handle: &mut LiveHandle,
        state: &mut PlaybackState,
    ) {
        let mode = match interaction {
            Interaction::PointerEnter => PlayMode::Forward,
            Interaction::PointerLeave => PlayMode::Reverse,
            Interaction::Click => return,
        };
        handle.player_mut().set_mode(mode);
        handle.play_when_loaded(state);
    }

    fn name(&self) -> &'static str {
        "hover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Breakpoint;
    use crate::testing::{Call, Stage};

    #[test]
    fn never_loops() {
        let mut config = Stage::config(vec![Breakpoint::new("a", 0)]);
        config.loop_playback = true;
        config.bounce = true;
        let options = HoverScrub.playback(&config);
        assert!(!options.loop_playback);
        assert_eq!(options.mode, PlayMode::Forward);
    }

    #[test]
    fn enter_forward_leave_reverse() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(3);
        stage.mark_loaded(handle.id());
        let mut state = PlaybackState::default();
        let mut trigger = HoverScrub;

        trigger.on_interaction(
            Interaction::PointerEnter,
            &mut handle,
            &mut state,
        );
        trigger.on_interaction(
            Interaction::PointerLeave,
            &mut handle,
            &mut state,
        );

        let id = handle.id();
        assert_eq!(
            stage.calls(),
            vec![
                Call::SetMode(id, PlayMode::Forward),
                Call::Play(id),
                Call::SetMode(id, PlayMode::Reverse),
                Call::Play(id),
            ]
        );
    }
}
