//! Per-element animation controller.
//!
//! One [`AnimationController`] owns one element: its configuration, its at
//! most one live playback handle, and the subscriptions bound to that
//! handle. It is driven entirely by [`ControllerEvent`]s delivered on a
//! single timeline, so no locking is involved.
//!
//! # Handle lifecycle
//!
//! A handle exists only while a breakpoint resolves for the current
//! viewport. Replacing the source tears the old handle down completely
//! (scroll binding, interaction listeners, visibility subscription, engine
//! instance) before the next one is created. Every asynchronous
//! notification carries the [`HandleId`] it was issued for; notifications
//! for anything but the live handle are dropped.

mod gate;
mod handle;
mod lifecycle;
mod mailbox;

pub use gate::{evaluate as evaluate_reduced_motion, FrameEdge, GateDecision};
pub use handle::{LiveHandle, PlaybackState};
pub use lifecycle::VisibilityLifecycle;
pub use mailbox::Mailbox;

use crate::config::{resolve, AnimationConfig, Breakpoint};
use crate::error::LottieError;
use crate::host::{
    CanvasSpec, ElementHost, Interaction, ReadyDetail, VisibilityService,
    CLASS_IMG_HIDDEN, CLASS_INITIALIZED, CLASS_REDUCED_MOTION,
    VISIBILITY_THRESHOLDS,
};
use crate::options::ControllerOptions;
use crate::player::{HandleId, PlayMode, PlaybackEngine, PlayerConfig};
use crate::scroll::{ScrollLibrary, ScrollSignal};
use crate::trigger::{self, BoxedTrigger};

/// Everything that can happen to an element after mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// The window was resized.
    Resize,
    /// The animation frame requested after a resize arrived.
    AnimationFrame,
    /// The element's intersection with the viewport changed.
    Visibility {
        /// Handle the subscription was made for.
        handle: HandleId,
        /// Whether any part of the element is visible.
        intersecting: bool,
    },
    /// A handle's source finished loading.
    Loaded {
        /// Handle that loaded.
        handle: HandleId,
    },
    /// A bound pointer interaction fired.
    Interaction {
        /// Handle the listener was bound for.
        handle: HandleId,
        /// What happened.
        interaction: Interaction,
    },
    /// A scheduled scroll-library availability check is due.
    ScrollLibraryPoll,
    /// The scroll library reported on a binding.
    Scroll {
        /// Handle the binding was made for.
        handle: HandleId,
        /// Progress or entry.
        signal: ScrollSignal,
    },
}

impl ControllerEvent {
    /// Handle the event is addressed to, if any.
    #[must_use]
    pub fn handle(&self) -> Option<HandleId> {
        match *self {
            Self::Visibility { handle, .. }
            | Self::Loaded { handle }
            | Self::Interaction { handle, .. }
            | Self::Scroll { handle, .. } => Some(handle),
            Self::Resize | Self::AnimationFrame | Self::ScrollLibraryPoll => {
                None
            }
        }
    }
}

/// The external capabilities one controller works against.
pub struct Collaborators {
    /// Animation playback engine.
    pub engine: Box<dyn PlaybackEngine>,
    /// The element and its document.
    pub host: Box<dyn ElementHost>,
    /// Visibility-detection service.
    pub visibility: Box<dyn VisibilityService>,
    /// Scroll-linked animation library, used by the scroll trigger only.
    pub scroll: Box<dyn ScrollLibrary>,
}

/// How the element renders, decided once at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Reduced motion with `hide`: the image stays, nothing else happens.
    Dormant,
    /// Reduced motion with a frame fallback: one still frame.
    Static(FrameEdge),
    /// Normal responsive, visibility-aware playback.
    Live,
}

/// Controller for one animated element.
pub struct AnimationController {
    config: AnimationConfig,
    options: ControllerOptions,
    engine: Box<dyn PlaybackEngine>,
    host: Box<dyn ElementHost>,
    visibility: Box<dyn VisibilityService>,
    trigger: BoxedTrigger,
    lifecycle: VisibilityLifecycle,
    path: RenderPath,
    live: Option<LiveHandle>,
    state: PlaybackState,
    next_handle: u64,
    frame_requested: bool,
    disposed: bool,
}

impl AnimationController {
    /// Parse `payload` and mount a controller on the element.
    ///
    /// Errors mean the element stays a plain image; callers log and move
    /// on.
    pub fn mount(
        payload: &str,
        collaborators: Collaborators,
        options: ControllerOptions,
    ) -> Result<Self, LottieError> {
        let config = AnimationConfig::from_json(payload)?;
        Self::with_config(config, collaborators, options)
    }

    /// [`mount`](Self::mount), absorbing failures.
    pub fn try_mount(
        payload: &str,
        collaborators: Collaborators,
        options: ControllerOptions,
    ) -> Option<Self> {
        match Self::mount(payload, collaborators, options) {
            Ok(controller) => Some(controller),
            Err(e) => {
                log::debug!("element left static: {e}");
                None
            }
        }
    }

    /// Mount a controller for an already normalized configuration.
    pub fn with_config(
        config: AnimationConfig,
        collaborators: Collaborators,
        options: ControllerOptions,
    ) -> Result<Self, LottieError> {
        let Collaborators {
            engine,
            host,
            visibility,
            scroll,
        } = collaborators;
        if !host.has_image() {
            return Err(LottieError::MissingImage);
        }

        let decision = gate::evaluate(
            host.prefers_reduced_motion(),
            config.reduced_motion_fallback,
        );
        let trigger = trigger::for_config(&config, scroll, options.scroll_retry);
        let lifecycle =
            VisibilityLifecycle::new(options.lazy_load, trigger.autoplays());

        let mut controller = Self {
            config,
            options,
            engine,
            host,
            visibility,
            trigger,
            lifecycle,
            path: RenderPath::Dormant,
            live: None,
            state: PlaybackState::default(),
            next_handle: 0,
            frame_requested: false,
            disposed: false,
        };

        match decision {
            GateDecision::Hide => {
                log::debug!("reduced motion: keeping static image");
                controller.host.add_class(CLASS_REDUCED_MOTION);
            }
            GateDecision::StaticFrame(edge) => {
                log::debug!("reduced motion: rendering {edge:?} frame");
                controller.path = RenderPath::Static(edge);
                controller.host.add_class(CLASS_REDUCED_MOTION);
                controller.insert_canvas();
                controller.render_still();
            }
            GateDecision::Animate => {
                log::debug!(
                    "mounting '{}' with {} trigger",
                    controller.config.id,
                    controller.trigger.name()
                );
                controller.path = RenderPath::Live;
                controller.insert_canvas();
                controller.apply_breakpoint();
                controller
                    .trigger
                    .on_poll(controller.live.as_mut(), controller.host.as_mut());
            }
        }
        Ok(controller)
    }

    /// Deliver one event.
    pub fn handle_event(&mut self, event: ControllerEvent) {
        if self.disposed {
            log::trace!("controller disposed, dropping {event:?}");
            return;
        }
        if let Some(handle) = event.handle() {
            if !self.is_current(handle) {
                log::trace!("stale {event:?}, live handle is {:?}", self.live_id());
                return;
            }
        }

        match event {
            ControllerEvent::Resize => self.on_resize(),
            ControllerEvent::AnimationFrame => self.on_animation_frame(),
            ControllerEvent::Visibility { intersecting, .. } => {
                self.on_visibility(intersecting);
            }
            ControllerEvent::Loaded { .. } => self.on_loaded(),
            ControllerEvent::Interaction { interaction, .. } => {
                if self.path != RenderPath::Live {
                    return;
                }
                if let Some(live) = self.live.as_mut() {
                    self.trigger
                        .on_interaction(interaction, live, &mut self.state);
                }
            }
            ControllerEvent::ScrollLibraryPoll => {
                if self.path == RenderPath::Live {
                    self.trigger
                        .on_poll(self.live.as_mut(), self.host.as_mut());
                }
            }
            ControllerEvent::Scroll { signal, .. } => {
                if self.path != RenderPath::Live {
                    return;
                }
                if let Some(live) = self.live.as_mut() {
                    self.trigger.on_scroll(signal, live, &mut self.state);
                }
            }
        }
    }

    /// Destroy the live handle, remove the canvas and marker classes.
    ///
    /// Every later event is ignored.
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        self.release_handle();
        if self.path != RenderPath::Dormant {
            self.host.remove_canvas();
        }
        for class in [CLASS_INITIALIZED, CLASS_IMG_HIDDEN, CLASS_REDUCED_MOTION]
        {
            self.host.remove_class(class);
        }
        self.disposed = true;
        log::debug!("controller '{}' torn down", self.config.id);
    }

    /// The configuration this controller was mounted with.
    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Render path chosen at mount.
    #[must_use]
    pub fn render_path(&self) -> RenderPath {
        self.path
    }

    /// Id of the live handle.
    #[must_use]
    pub fn live_id(&self) -> Option<HandleId> {
        self.live.as_ref().map(LiveHandle::id)
    }

    /// Breakpoint the live handle plays.
    #[must_use]
    pub fn current(&self) -> Option<&Breakpoint> {
        self.live.as_ref().map(LiveHandle::source)
    }

    /// Playback flags of the live handle.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether [`teardown`](Self::teardown) ran.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn is_current(&self, handle: HandleId) -> bool {
        self.live_id() == Some(handle)
    }

    fn allocate_id(&mut self) -> HandleId {
        self.next_handle += 1;
        HandleId(self.next_handle)
    }

    fn insert_canvas(&mut self) {
        let width = self.host.viewport_width();
        let aspect_ratio = resolve(&self.config.breakpoints, width)
            .and_then(Breakpoint::dimensions)
            .or_else(|| self.host.image_size());
        let spec = CanvasSpec {
            id: (!self.config.id.is_empty()).then(|| self.config.id.clone()),
            aspect_ratio,
        };
        self.host.insert_canvas(&spec);
        self.host.add_class(CLASS_INITIALIZED);
    }

    // ── Resize ───────────────────────────────────────────────────────────

    fn on_resize(&mut self) {
        if self.path != RenderPath::Live || self.frame_requested {
            return;
        }
        self.frame_requested = true;
        self.host.request_animation_frame();
    }

    fn on_animation_frame(&mut self) {
        self.frame_requested = false;
        if self.path == RenderPath::Live {
            self.apply_breakpoint();
        }
    }

    /// Re-resolve the breakpoint, replacing the handle only when the
    /// source changes.
    fn apply_breakpoint(&mut self) {
        let width = self.host.viewport_width();
        let target = resolve(&self.config.breakpoints, width).cloned();
        match target {
            Some(bp) => {
                if self.current().is_some_and(|cur| cur.src == bp.src) {
                    return;
                }
                self.release_handle();
                self.attach(bp);
            }
            None => {
                if self.live.is_some() {
                    log::debug!("no breakpoint below {width}px, showing image");
                }
                self.release_handle();
                self.host.remove_class(CLASS_IMG_HIDDEN);
            }
        }
    }

    // ── Handle create / destroy ──────────────────────────────────────────

    fn attach(&mut self, source: Breakpoint) {
        let id = self.allocate_id();
        let playback = self.trigger.playback(&self.config);
        let lazy = self.lifecycle.is_lazy();
        let config = PlayerConfig {
            src: (!lazy).then(|| source.src.clone()),
            autoplay: false,
            loop_playback: playback.loop_playback,
            mode: playback.mode,
            layout: self.options.layout,
        };
        let player = match self.engine.create(id, &config) {
            Ok(player) => player,
            Err(e) => {
                log::warn!("could not create handle for {}: {e}", source.src);
                self.host.remove_class(CLASS_IMG_HIDDEN);
                return;
            }
        };
        log::debug!("created handle {id} for {}", source.src);

        let mut live = LiveHandle::new(id, source, player);
        self.state = PlaybackState::fresh(!lazy);
        let interactions = self.trigger.interactions();
        if !interactions.is_empty() {
            self.host.bind(id, interactions);
        }
        self.visibility.observe(id, &VISIBILITY_THRESHOLDS);
        self.trigger.on_attach(&mut live);
        self.announce(&live);
        self.live = Some(live);
    }

    /// Reduced-motion path: one handle, source given up front, no
    /// listeners.
    fn render_still(&mut self) {
        let width = self.host.viewport_width();
        let Some(source) = resolve(&self.config.breakpoints, width).cloned()
        else {
            log::debug!("no breakpoint below {width}px, showing image");
            return;
        };
        let id = self.allocate_id();
        let config = PlayerConfig {
            src: Some(source.src.clone()),
            autoplay: false,
            loop_playback: false,
            mode: PlayMode::Forward,
            layout: self.options.layout,
        };
        match self.engine.create(id, &config) {
            Ok(player) => {
                let live = LiveHandle::new(id, source, player);
                self.state = PlaybackState::fresh(true);
                self.announce(&live);
                self.live = Some(live);
            }
            Err(e) => {
                log::warn!("could not create still for {}: {e}", source.src);
            }
        }
    }

    fn announce(&mut self, live: &LiveHandle) {
        if let Some(ratio) = live.source().dimensions() {
            self.host.set_aspect_ratio(ratio);
        }
        if !self.config.overlay {
            self.host.add_class(CLASS_IMG_HIDDEN);
        }
        self.host.expose_handle(Some(live.id()));
        self.host.dispatch_ready(&ReadyDetail {
            id: self.config.id.clone(),
            src: live.source().src.clone(),
            handle: live.id(),
        });
    }

    /// Synchronously tear down the live handle and everything bound to it.
    fn release_handle(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };
        let id = live.id();
        self.trigger.on_detach(&mut live);
        self.host.unbind(id);
        self.visibility.unobserve(id);
        live.player_mut().destroy();
        self.host.expose_handle(None);
        self.state.reset();
        log::debug!("destroyed handle {id}");
    }

    // ── Notifications ────────────────────────────────────────────────────

    fn on_visibility(&mut self, intersecting: bool) {
        if self.path != RenderPath::Live {
            return;
        }
        if let Some(live) = self.live.as_mut() {
            self.lifecycle.on_change(intersecting, live, &mut self.state);
        }
    }

    fn on_loaded(&mut self) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        match self.path {
            RenderPath::Static(edge) => {
                let player = live.player_mut();
                player.set_frame(edge.frame(player.total_frames()));
                player.pause();
            }
            RenderPath::Live => {
                self.lifecycle.on_loaded(live, &mut self.state);
                self.trigger.on_loaded(live);
            }
            RenderPath::Dormant => {}
        }
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("id", &self.config.id)
            .field("trigger", &self.trigger.name())
            .field("path", &self.path)
            .field("live", &self.live)
            .field("state", &self.state)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
