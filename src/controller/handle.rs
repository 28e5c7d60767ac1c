use crate::config::Breakpoint;
use crate::player::{HandleId, PlaybackHandle};

/// The element's one live playback handle and the source it plays.
pub struct LiveHandle {
    id: HandleId,
    source: Breakpoint,
    player: Box<dyn PlaybackHandle>,
}

impl LiveHandle {
    /// Wrap an engine handle created for `source`.
    #[must_use]
    pub fn new(
        id: HandleId,
        source: Breakpoint,
        player: Box<dyn PlaybackHandle>,
    ) -> Self {
        Self { id, source, player }
    }

    /// Identity of this handle.
    #[must_use]
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Breakpoint this handle was created for.
    #[must_use]
    pub fn source(&self) -> &Breakpoint {
        &self.source
    }

    /// The engine handle.
    #[must_use]
    pub fn player(&self) -> &dyn PlaybackHandle {
        self.player.as_ref()
    }

    /// The engine handle, mutably.
    pub fn player_mut(&mut self) -> &mut dyn PlaybackHandle {
        self.player.as_mut()
    }

    /// Play now if the source is loaded, otherwise once it is.
    pub fn play_when_loaded(&mut self, state: &mut PlaybackState) {
        if self.player.is_loaded() {
            self.player.play();
            state.started = true;
        } else {
            state.start_on_load = true;
        }
    }
}

impl std::fmt::Debug for LiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveHandle")
            .field("id", &self.id)
            .field("src", &self.source.src)
            .finish_non_exhaustive()
    }
}

/// Per-handle playback flags, reset whenever the handle is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PlaybackState {
    /// Playback has been started at least once.
    pub started: bool,
    /// The source has been handed to the engine.
    pub loaded: bool,
    /// A requested start is waiting for the source to finish loading.
    pub start_on_load: bool,
    /// Last intersection state observed for the handle.
    pub intersecting: bool,
}

impl PlaybackState {
    /// State for a fresh handle; `loaded` when the source was given at
    /// creation.
    #[must_use]
    pub fn fresh(loaded: bool) -> Self {
        Self {
            loaded,
            ..Self::default()
        }
    }

    /// Clear every flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
