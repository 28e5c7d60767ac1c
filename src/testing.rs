//! Recording fakes for the engine, host, visibility and scroll seams.
//!
//! A [`Stage`] owns one shared journal. Every fake built from it appends
//! the calls it receives, in order, and reads its answers (viewport
//! width, load state, library presence) from the same journal, so a test
//! can flip the environment between events.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use web_time::Duration;

use crate::config::{
    AnimationConfig, Breakpoint, ReducedMotionFallback, ScrollRange,
    TriggerKind,
};
use crate::controller::{Collaborators, LiveHandle};
use crate::error::LottieError;
use crate::host::{
    CanvasSpec, ElementHost, Interaction, ReadyDetail, VisibilityService,
};
use crate::player::{
    HandleId, PlayMode, PlaybackEngine, PlaybackHandle, PlayerConfig,
};
use crate::scroll::{ScrollBinding, ScrollBindingId, ScrollLibrary};

/// One observed call on any fake.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create { id: HandleId, config: PlayerConfig },
    Play(HandleId),
    Pause(HandleId),
    Stop(HandleId),
    SetFrame(HandleId, u32),
    SetMode(HandleId, PlayMode),
    Load(HandleId, String),
    Freeze(HandleId),
    Unfreeze(HandleId),
    Destroy(HandleId),
    InsertCanvas(CanvasSpec),
    SetAspectRatio((u32, u32)),
    RemoveCanvas,
    AddClass(String),
    RemoveClass(String),
    Bind(HandleId, Vec<Interaction>),
    Unbind(HandleId),
    Expose(Option<HandleId>),
    Ready(ReadyDetail),
    RequestFrame,
    SchedulePoll(Duration),
    Observe(HandleId),
    Unobserve(HandleId),
    ScrollCreate(ScrollBinding),
    ScrollKill(ScrollBindingId),
}

impl Call {
    pub(crate) fn is_play(&self) -> bool {
        matches!(self, Self::Play(_))
    }
}

/// Page callback run on the next ready notification.
#[derive(Default)]
struct ReadyHook(Option<Box<dyn FnOnce()>>);

impl std::fmt::Debug for ReadyHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadyHook").field(&self.0.is_some()).finish()
    }
}

#[derive(Debug, Default)]
struct Journal {
    calls: Vec<Call>,
    width: u32,
    reduced_motion: bool,
    has_image: bool,
    image_size: Option<(u32, u32)>,
    scroll_available: bool,
    total_frames: u32,
    fail_create: bool,
    loaded: FxHashSet<HandleId>,
    live: FxHashSet<HandleId>,
    next_binding: u64,
    on_ready: ReadyHook,
}

type Shared = Rc<RefCell<Journal>>;

fn record(journal: &Shared, call: Call) {
    journal.borrow_mut().calls.push(call);
}

/// The shared environment every fake reads from and records into.
#[derive(Debug, Clone)]
pub(crate) struct Stage {
    journal: Shared,
}

impl Stage {
    /// A page `width` pixels wide with an anchor image and 48-frame
    /// sources. Frame counts read as zero until a handle is loaded.
    pub(crate) fn new(width: u32) -> Self {
        let journal = Journal {
            width,
            has_image: true,
            total_frames: 48,
            ..Journal::default()
        };
        Self {
            journal: Rc::new(RefCell::new(journal)),
        }
    }

    /// Configuration with every default applied.
    pub(crate) fn config(breakpoints: Vec<Breakpoint>) -> AnimationConfig {
        AnimationConfig {
            id: String::new(),
            breakpoints,
            trigger: TriggerKind::Autoplay,
            overlay: false,
            loop_playback: true,
            bounce: false,
            reduced_motion_fallback: ReducedMotionFallback::Hide,
            scroll: ScrollRange::default(),
            scroll_scrub: true,
        }
    }

    /// A handle playing source `"a"`, built without going through the
    /// engine.
    pub(crate) fn handle(&self, id: u64) -> LiveHandle {
        let id = HandleId(id);
        let _ = self.journal.borrow_mut().live.insert(id);
        LiveHandle::new(
            id,
            Breakpoint::new("a", 0),
            Box::new(FakePlayer {
                id,
                journal: Rc::clone(&self.journal),
            }),
        )
    }

    pub(crate) fn collaborators(&self) -> Collaborators {
        Collaborators {
            engine: Box::new(FakeEngine {
                journal: Rc::clone(&self.journal),
            }),
            host: Box::new(self.host()),
            visibility: Box::new(FakeVisibility {
                journal: Rc::clone(&self.journal),
            }),
            scroll: self.scroll_library(),
        }
    }

    pub(crate) fn host(&self) -> FakeHost {
        FakeHost {
            journal: Rc::clone(&self.journal),
        }
    }

    pub(crate) fn scroll_library(&self) -> Box<dyn ScrollLibrary> {
        Box::new(FakeScroll {
            journal: Rc::clone(&self.journal),
        })
    }

    /// Every call recorded so far.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.journal.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.journal.borrow_mut().calls.clear();
    }

    pub(crate) fn set_width(&self, width: u32) {
        self.journal.borrow_mut().width = width;
    }

    pub(crate) fn set_reduced_motion(&self, on: bool) {
        self.journal.borrow_mut().reduced_motion = on;
    }

    pub(crate) fn set_has_image(&self, present: bool) {
        self.journal.borrow_mut().has_image = present;
    }

    pub(crate) fn set_image_size(&self, size: Option<(u32, u32)>) {
        self.journal.borrow_mut().image_size = size;
    }

    pub(crate) fn set_scroll_available(&self, available: bool) {
        self.journal.borrow_mut().scroll_available = available;
    }

    pub(crate) fn set_total_frames(&self, frames: u32) {
        self.journal.borrow_mut().total_frames = frames;
    }

    pub(crate) fn fail_create(&self, fail: bool) {
        self.journal.borrow_mut().fail_create = fail;
    }

    /// Report `id` as loaded from now on.
    pub(crate) fn mark_loaded(&self, id: HandleId) {
        let _ = self.journal.borrow_mut().loaded.insert(id);
    }

    /// Run `hook` from inside the next ready notification, the way a page
    /// listener would.
    pub(crate) fn on_ready(&self, hook: impl FnOnce() + 'static) {
        self.journal.borrow_mut().on_ready = ReadyHook(Some(Box::new(hook)));
    }

    /// Handles created and not yet destroyed.
    pub(crate) fn live_handles(&self) -> usize {
        self.journal.borrow().live.len()
    }
}

struct FakeEngine {
    journal: Shared,
}

impl PlaybackEngine for FakeEngine {
    fn create(
        &mut self,
        id: HandleId,
        config: &PlayerConfig,
    ) -> Result<Box<dyn PlaybackHandle>, LottieError> {
        if self.journal.borrow().fail_create {
            return Err(LottieError::Engine("canvas unavailable".to_owned()));
        }
        record(
            &self.journal,
            Call::Create {
                id,
                config: config.clone(),
            },
        );
        let _ = self.journal.borrow_mut().live.insert(id);
        Ok(Box::new(FakePlayer {
            id,
            journal: Rc::clone(&self.journal),
        }))
    }
}

struct FakePlayer {
    id: HandleId,
    journal: Shared,
}

impl PlaybackHandle for FakePlayer {
    fn play(&mut self) {
        record(&self.journal, Call::Play(self.id));
    }

    fn pause(&mut self) {
        record(&self.journal, Call::Pause(self.id));
    }

    fn stop(&mut self) {
        record(&self.journal, Call::Stop(self.id));
    }

    fn set_frame(&mut self, frame: u32) {
        record(&self.journal, Call::SetFrame(self.id, frame));
    }

    fn set_mode(&mut self, mode: PlayMode) {
        record(&self.journal, Call::SetMode(self.id, mode));
    }

    fn load(&mut self, src: &str) {
        record(&self.journal, Call::Load(self.id, src.to_owned()));
    }

    fn freeze(&mut self) {
        record(&self.journal, Call::Freeze(self.id));
    }

    fn unfreeze(&mut self) {
        record(&self.journal, Call::Unfreeze(self.id));
    }

    fn total_frames(&self) -> u32 {
        let journal = self.journal.borrow();
        if journal.loaded.contains(&self.id) {
            journal.total_frames
        } else {
            0
        }
    }

    fn is_loaded(&self) -> bool {
        self.journal.borrow().loaded.contains(&self.id)
    }

    fn destroy(&mut self) {
        record(&self.journal, Call::Destroy(self.id));
        let _ = self.journal.borrow_mut().live.remove(&self.id);
    }
}

pub(crate) struct FakeHost {
    journal: Shared,
}

impl ElementHost for FakeHost {
    fn viewport_width(&self) -> u32 {
        self.journal.borrow().width
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.journal.borrow().reduced_motion
    }

    fn has_image(&self) -> bool {
        self.journal.borrow().has_image
    }

    fn image_size(&self) -> Option<(u32, u32)> {
        self.journal.borrow().image_size
    }

    fn insert_canvas(&mut self, spec: &CanvasSpec) {
        record(&self.journal, Call::InsertCanvas(spec.clone()));
    }

    fn set_aspect_ratio(&mut self, ratio: (u32, u32)) {
        record(&self.journal, Call::SetAspectRatio(ratio));
    }

    fn remove_canvas(&mut self) {
        record(&self.journal, Call::RemoveCanvas);
    }

    fn add_class(&mut self, class: &str) {
        record(&self.journal, Call::AddClass(class.to_owned()));
    }

    fn remove_class(&mut self, class: &str) {
        record(&self.journal, Call::RemoveClass(class.to_owned()));
    }

    fn bind(&mut self, handle: HandleId, interactions: &[Interaction]) {
        record(&self.journal, Call::Bind(handle, interactions.to_vec()));
    }

    fn unbind(&mut self, handle: HandleId) {
        record(&self.journal, Call::Unbind(handle));
    }

    fn expose_handle(&mut self, handle: Option<HandleId>) {
        record(&self.journal, Call::Expose(handle));
    }

    fn dispatch_ready(&mut self, detail: &ReadyDetail) {
        record(&self.journal, Call::Ready(detail.clone()));
        let hook = self.journal.borrow_mut().on_ready.0.take();
        if let Some(hook) = hook {
            hook();
        }
    }

    fn request_animation_frame(&mut self) {
        record(&self.journal, Call::RequestFrame);
    }

    fn schedule_scroll_poll(&mut self, delay: Duration) {
        record(&self.journal, Call::SchedulePoll(delay));
    }
}

struct FakeVisibility {
    journal: Shared,
}

impl VisibilityService for FakeVisibility {
    fn observe(&mut self, handle: HandleId, _thresholds: &[f64]) {
        record(&self.journal, Call::Observe(handle));
    }

    fn unobserve(&mut self, handle: HandleId) {
        record(&self.journal, Call::Unobserve(handle));
    }
}

struct FakeScroll {
    journal: Shared,
}

impl ScrollLibrary for FakeScroll {
    fn is_available(&self) -> bool {
        self.journal.borrow().scroll_available
    }

    fn create(
        &mut self,
        binding: &ScrollBinding,
    ) -> Result<ScrollBindingId, LottieError> {
        let id = {
            let mut journal = self.journal.borrow_mut();
            journal.next_binding += 1;
            ScrollBindingId(journal.next_binding)
        };
        record(&self.journal, Call::ScrollCreate(binding.clone()));
        Ok(id)
    }

    fn kill(&mut self, id: ScrollBindingId) {
        record(&self.journal, Call::ScrollKill(id));
    }
}
