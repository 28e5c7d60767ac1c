//! Visibility-driven lazy loading, autoplay and freezing.

use super::handle::{LiveHandle, PlaybackState};

/// Reacts to intersection changes of the live handle.
///
/// Freezing never destroys the handle; destruction belongs to breakpoint
/// replacement and teardown only.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityLifecycle {
    lazy: bool,
    autoplay: bool,
}

impl VisibilityLifecycle {
    /// `lazy` defers the fetch to first intersection; `autoplay` starts
    /// playback on it.
    #[must_use]
    pub fn new(lazy: bool, autoplay: bool) -> Self {
        Self { lazy, autoplay }
    }

    /// Whether sources are fetched on first intersection.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// The element's intersection with the viewport changed.
    pub fn on_change(
        &self,
        intersecting: bool,
        handle: &mut LiveHandle,
        state: &mut PlaybackState,
    ) {
        state.intersecting = intersecting;
        if !intersecting {
            handle.player_mut().freeze();
            return;
        }

        if self.lazy && !state.loaded {
            log::debug!(
                "handle {} visible, fetching {}",
                handle.id(),
                handle.source().src
            );
            let src = handle.source().src.clone();
            handle.player_mut().load(&src);
            state.loaded = true;
        }

        if self.autoplay && !state.started {
            handle.play_when_loaded(state);
        }

        handle.player_mut().unfreeze();
    }

    /// The handle's source finished loading.
    pub fn on_loaded(&self, handle: &mut LiveHandle, state: &mut PlaybackState) {
        state.loaded = true;
        // Shared by autoplay and trigger starts; one play per load at most.
        if std::mem::take(&mut state.start_on_load) && !state.started {
            handle.player_mut().play();
            state.started = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, Stage};

    #[test]
    fn lazy_fetch_happens_once() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(1);
        let mut state = PlaybackState::fresh(false);
        let lifecycle = VisibilityLifecycle::new(true, false);

        lifecycle.on_change(true, &mut handle, &mut state);
        lifecycle.on_change(false, &mut handle, &mut state);
        lifecycle.on_change(true, &mut handle, &mut state);

        let loads = stage
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Load(..)))
            .count();
        assert_eq!(loads, 1);
        assert!(state.loaded);
    }

    #[test]
    fn autoplay_waits_for_load() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(1);
        let mut state = PlaybackState::fresh(true);
        let lifecycle = VisibilityLifecycle::new(false, true);

        lifecycle.on_change(true, &mut handle, &mut state);
        assert!(!state.started);
        assert!(state.start_on_load);
        assert!(!stage.calls().iter().any(Call::is_play));

        stage.mark_loaded(handle.id());
        lifecycle.on_loaded(&mut handle, &mut state);
        assert!(state.started);
        assert_eq!(stage.calls().iter().filter(|c| c.is_play()).count(), 1);

        // Re-entering does not restart.
        lifecycle.on_change(false, &mut handle, &mut state);
        lifecycle.on_change(true, &mut handle, &mut state);
        assert_eq!(stage.calls().iter().filter(|c| c.is_play()).count(), 1);
    }

    #[test]
    fn autoplay_immediate_when_already_loaded() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(5);
        stage.mark_loaded(handle.id());
        let mut state = PlaybackState::fresh(true);
        VisibilityLifecycle::new(false, true).on_change(
            true,
            &mut handle,
            &mut state,
        );
        assert!(state.started);
        assert!(!state.start_on_load);
    }

    #[test]
    fn freeze_and_unfreeze_follow_visibility() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(2);
        let mut state = PlaybackState::fresh(true);
        let lifecycle = VisibilityLifecycle::new(false, false);

        lifecycle.on_change(true, &mut handle, &mut state);
        lifecycle.on_change(false, &mut handle, &mut state);

        let id = handle.id();
        assert_eq!(stage.calls(), vec![Call::Unfreeze(id), Call::Freeze(id)]);
        assert!(!state.intersecting);
        assert!(!stage.calls().iter().any(|c| matches!(c, Call::Destroy(_))));
    }

    #[test]
    fn pending_start_is_consumed_by_one_load() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(3);
        let mut state = PlaybackState::fresh(false);
        let lifecycle = VisibilityLifecycle::new(true, false);

        handle.play_when_loaded(&mut state);
        assert!(state.start_on_load);
        stage.mark_loaded(handle.id());
        lifecycle.on_loaded(&mut handle, &mut state);
        lifecycle.on_loaded(&mut handle, &mut state);

        assert!(state.started);
        assert!(!state.start_on_load);
        assert_eq!(stage.calls(), vec![Call::Play(handle.id())]);
    }

    #[test]
    fn load_without_pending_start_does_not_play() {
        let stage = Stage::new(1024);
        let mut handle = stage.handle(2);
        let mut state = PlaybackState::fresh(false);
        VisibilityLifecycle::new(true, false).on_loaded(&mut handle, &mut state);
        assert!(!stage.calls().iter().any(Call::is_play));
        assert!(state.loaded);
    }
}
