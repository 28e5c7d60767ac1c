//! Scroll-linked playback through the external scroll library.

use super::traits::{PlaybackOptions, TriggerHandler};
use crate::config::{AnimationConfig, ScrollRange, TriggerKind};
use crate::controller::{LiveHandle, PlaybackState};
use crate::host::ElementHost;
use crate::options::RetryPolicy;
use crate::player::{frame_for_progress, HandleId, PlayMode};
use crate::scroll::{
    BoundedProbe, ProbeStatus, ScrollBinding, ScrollBindingId, ScrollLibrary,
    ScrollMode, ScrollSignal,
};

/// Drives the live handle from scroll position.
///
/// Waits for the scroll library with a bounded probe, then binds every
/// handle as it attaches: scrub mode seeks to the frame matching scroll
/// progress, enter mode plays once on first entry. Bindings die with their
/// handle.
pub struct ScrollSync {
    library: Box<dyn ScrollLibrary>,
    probe: BoundedProbe,
    range: ScrollRange,
    scrub: bool,
    binding: Option<ActiveBinding>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveBinding {
    handle: HandleId,
    id: ScrollBindingId,
    entered: bool,
    /// Last scrub progress, replayed once the source has frames.
    progress: Option<f64>,
}

impl ScrollSync {
    /// Scroll sync over `range`, scrubbing or playing once on enter.
    #[must_use]
    pub fn new(
        library: Box<dyn ScrollLibrary>,
        retry: RetryPolicy,
        range: ScrollRange,
        scrub: bool,
    ) -> Self {
        Self {
            library,
            probe: BoundedProbe::new(retry),
            range,
            scrub,
            binding: None,
        }
    }

    /// Whether the library was found.
    #[must_use]
    pub fn library_ready(&self) -> bool {
        self.probe.is_ready()
    }

    fn bind(&mut self, handle: &LiveHandle) {
        if self.binding.is_some_and(|b| b.handle == handle.id()) {
            return;
        }
        let spec = ScrollBinding {
            handle: handle.id(),
            start: self.range.start_position(),
            end: self.range.end_position(),
            mode: if self.scrub {
                ScrollMode::Scrub
            } else {
                ScrollMode::Once
            },
        };
        match self.library.create(&spec) {
            Ok(id) => {
                log::debug!(
                    "scroll binding {} -> {} for handle {}",
                    spec.start,
                    spec.end,
                    handle.id()
                );
                self.binding = Some(ActiveBinding {
                    handle: handle.id(),
                    id,
                    entered: false,
                    progress: None,
                });
            }
            Err(e) => log::warn!("scroll sync unavailable: {e}"),
        }
    }
}

/// Seek to the frame for `progress`; a no-op until frames are known.
fn seek(handle: &mut LiveHandle, progress: f64) {
    let player = handle.player_mut();
    if let Some(frame) = frame_for_progress(progress, player.total_frames()) {
        player.set_frame(frame);
    }
}

impl TriggerHandler for ScrollSync {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Scroll
    }

    fn playback(&self, config: &AnimationConfig) -> PlaybackOptions {
        if self.scrub {
            PlaybackOptions {
                loop_playback: false,
                mode: PlayMode::Forward,
            }
        } else {
            PlaybackOptions::from_config(config)
        }
    }

    fn on_attach(&mut self, handle: &mut LiveHandle) {
        if self.probe.is_ready() {
            self.bind(handle);
        }
    }

    fn on_loaded(&mut self, handle: &mut LiveHandle) {
        let pending = self
            .binding
            .filter(|b| b.handle == handle.id())
            .and_then(|b| b.progress);
        if let Some(progress) = pending {
            seek(handle, progress);
        }
    }

    fn on_detach(&mut self, handle: &mut LiveHandle) {
        if let Some(binding) = self.binding.take() {
            if binding.handle != handle.id() {
                log::debug!(
                    "scroll binding for {} outlived its handle",
                    binding.handle
                );
            }
            self.library.kill(binding.id);
        }
    }

    fn on_poll(
        &mut self,
        handle: Option<&mut LiveHandle>,
        host: &mut dyn ElementHost,
    ) {
        if self.probe.is_settled() {
            return;
        }
        match self.probe.check(self.library.is_available()) {
            ProbeStatus::Ready => {
                log::debug!(
                    "scroll library found after {} check(s)",
                    self.probe.attempts()
                );
                if let Some(handle) = handle {
                    self.bind(handle);
                }
            }
            ProbeStatus::Retry(delay) => host.schedule_scroll_poll(delay),
            ProbeStatus::GaveUp => log::debug!(
                "scroll library missing after {} checks, giving up",
                self.probe.attempts()
            ),
        }
    }

    fn on_scroll(
        &mut self,
        signal: ScrollSignal,
        handle: &mut LiveHandle,
        state: &mut PlaybackState,
    ) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        if binding.handle != handle.id() {
            return;
        }
        match signal {
            ScrollSignal::Progress(progress) if self.scrub => {
                binding.progress = Some(progress);
                seek(handle, progress);
            }
            ScrollSignal::Enter if !self.scrub && !binding.entered => {
                binding.entered = true;
                handle.play_when_loaded(state);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        if self.scrub {
            "scroll-scrub"
        } else {
            "scroll-enter"
        }
    }
}
