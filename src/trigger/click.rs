//! Click-to-play.

use super::traits::{PlaybackOptions, TriggerHandler};
use crate::config::{AnimationConfig, TriggerKind};
use crate::controller::{LiveHandle, PlaybackState};
use crate::host::Interaction;

/// A click plays from wherever playback last stopped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickToPlay;

impl TriggerHandler for ClickToPlay {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Click
    }

    fn playback(&self, config: &AnimationConfig) -> PlaybackOptions {
        PlaybackOptions::from_config(config)
    }

    fn interactions(&self) -> &'static [Interaction] {
        &[Interaction::Click]
    }

    fn on_interaction(
        &mut self,
        interaction: Interaction,
        handle: &mut LiveHandle,
        state: &mut PlaybackState,
    ) {
        if interaction == Interaction::Click {
            handle.play_when_loaded(state);
        }
    }

    fn name(&self) -> &'static str {
        "click"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, Stage};

    #[test]
    fn click_resumes_without_rewinding() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(7);
        stage.mark_loaded(handle.id());
        let mut state = PlaybackState::default();
        let mut trigger = ClickToPlay;

        trigger.on_interaction(Interaction::Click, &mut handle, &mut state);
        trigger.on_interaction(Interaction::Click, &mut handle, &mut state);

        assert!(state.started);
        let calls = stage.calls();
        assert_eq!(calls.iter().filter(|c| c.is_play()).count(), 2);
        assert!(!calls
            .iter()
            .any(|c| matches!(c, Call::SetFrame(..) | Call::Stop(_))));
    }

    #[test]
    fn click_before_load_waits_for_source() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(8);
        let mut state = PlaybackState::default();

        ClickToPlay.on_interaction(Interaction::Click, &mut handle, &mut state);

        assert!(!state.started);
        assert!(state.start_on_load);
        assert!(!stage.calls().iter().any(Call::is_play));
    }

    #[test]
    fn ignores_hover_events() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(1);
        let mut state = PlaybackState::default();
        ClickToPlay.on_interaction(
            Interaction::PointerEnter,
            &mut handle,
            &mut state,
        );
        assert!(!state.started);
        assert!(stage.calls().is_empty());
    }
}
