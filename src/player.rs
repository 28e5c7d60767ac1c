//! Seam to the external animation playback engine.
//!
//! The engine parses and renders animation files; this crate only decides
//! when its handles exist and how they play. A [`PlaybackEngine`] creates
//! one [`PlaybackHandle`] per active source, bound to the element's canvas.

use std::fmt;

use crate::error::LottieError;
use crate::options::Layout;

/// Identity of one playback handle within its controller.
///
/// Every asynchronous notification carries the id of the handle it was
/// issued for, so notifications from a destroyed handle are recognizable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Play from the first frame towards the last.
    #[default]
    Forward,
    /// Play from the current frame towards the first.
    Reverse,
    /// Alternate forward and reverse.
    Bounce,
}

impl PlayMode {
    /// Engine spelling of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
            Self::Bounce => "bounce",
        }
    }
}

/// Construction parameters for one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Source to fetch immediately; `None` defers to
    /// [`PlaybackHandle::load`].
    pub src: Option<String>,
    /// Start playing as soon as the source is loaded.
    pub autoplay: bool,
    /// Restart after the last frame.
    pub loop_playback: bool,
    /// Initial playback direction.
    pub mode: PlayMode,
    /// Placement inside the canvas.
    pub layout: Option<Layout>,
}

/// One live animation instance bound to a canvas.
pub trait PlaybackHandle {
    /// Start or resume playback from the current frame.
    fn play(&mut self);

    /// Pause at the current frame.
    fn pause(&mut self);

    /// Stop and rewind.
    fn stop(&mut self);

    /// Seek to a frame index.
    fn set_frame(&mut self, frame: u32);

    /// Change the playback direction.
    fn set_mode(&mut self, mode: PlayMode);

    /// Fetch a source into this handle.
    fn load(&mut self, src: &str);

    /// Pause the render loop without touching playback state.
    fn freeze(&mut self);

    /// Resume a frozen render loop.
    fn unfreeze(&mut self);

    /// Frame count of the loaded source, `0` before load.
    fn total_frames(&self) -> u32;

    /// Whether the source has finished loading.
    fn is_loaded(&self) -> bool;

    /// Release the canvas and every engine-side listener.
    ///
    /// After this returns no notification for the handle is emitted.
    fn destroy(&mut self);
}

/// Factory for playback handles.
pub trait PlaybackEngine {
    /// Create a handle on the element's canvas.
    ///
    /// The engine reports source-load completion for `id` through the
    /// element's event channel as
    /// [`ControllerEvent::Loaded`](crate::controller::ControllerEvent::Loaded).
    fn create(
        &mut self,
        id: HandleId,
        config: &PlayerConfig,
    ) -> Result<Box<dyn PlaybackHandle>, LottieError>;
}

/// Frame index for scroll progress in `[0, 1]`.
///
/// `round(progress * (total_frames - 1))`; progress outside the range is
/// clamped. Returns `None` when nothing is loaded yet.
#[must_use]
pub fn frame_for_progress(progress: f64, total_frames: u32) -> Option<u32> {
    if total_frames == 0 {
        return None;
    }
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let last = f64::from(total_frames - 1);
    Some((progress * last).round() as u32)
}
