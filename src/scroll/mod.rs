//! Seam to the external scroll-linked animation library.
//!
//! The library is optional: it is detected by presence with a
//! [`BoundedProbe`] and a missing library degrades to no animation.

mod probe;

pub use probe::{BoundedProbe, ProbeStatus};

use crate::error::LottieError;
use crate::player::HandleId;

/// Identity of one binding inside the scroll library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollBindingId(pub u64);

/// How scroll position drives the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Report continuous progress through the region.
    Scrub,
    /// Report the first entry into the region, once.
    Once,
}

/// Parameters of one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollBinding {
    /// Handle the binding's signals are tagged with.
    pub handle: HandleId,
    /// Viewport-relative start position, e.g. `"top 100%"`.
    pub start: String,
    /// Viewport-relative end position, e.g. `"top 0%"`.
    pub end: String,
    /// Scrub or one-shot.
    pub mode: ScrollMode,
}

/// Scroll-driven notification for a bound handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollSignal {
    /// Progress through the region, `0.0` to `1.0`.
    Progress(f64),
    /// The region was entered.
    Enter,
}

/// The scroll-linked animation library.
pub trait ScrollLibrary {
    /// Whether the library has been loaded on the page.
    fn is_available(&self) -> bool;

    /// Bind the element for `binding.handle`.
    ///
    /// Signals arrive as
    /// [`ControllerEvent::Scroll`](crate::controller::ControllerEvent::Scroll).
    fn create(
        &mut self,
        binding: &ScrollBinding,
    ) -> Result<ScrollBindingId, LottieError>;

    /// Remove a binding; it emits nothing afterwards.
    fn kill(&mut self, id: ScrollBindingId);
}

/// Stand-in for pages without a scroll library.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScrollLibrary;

impl ScrollLibrary for NoScrollLibrary {
    fn is_available(&self) -> bool {
        false
    }

    fn create(
        &mut self,
        _binding: &ScrollBinding,
    ) -> Result<ScrollBindingId, LottieError> {
        Err(LottieError::ScrollBinding("no scroll library".to_owned()))
    }

    fn kill(&mut self, _id: ScrollBindingId) {}
}
