//! Seams to the host page: the animated element, its window, and the
//! visibility-detection service.
//!
//! Everything the controller does to the page goes through
//! [`ElementHost`]; everything the page tells the controller comes back as a
//! [`ControllerEvent`](crate::controller::ControllerEvent).

use web_time::Duration;

use crate::player::HandleId;

/// Added once the canvas has been inserted.
pub const CLASS_INITIALIZED: &str = "lottie-initialized";
/// Present while the canvas replaces (rather than overlays) the image.
pub const CLASS_IMG_HIDDEN: &str = "lottie-img-hidden";
/// Added when the reduced-motion gate took a fallback branch.
pub const CLASS_REDUCED_MOTION: &str = "lottie-reduced-motion";
/// Name of the notification dispatched when a handle attaches.
pub const READY_EVENT: &str = "lottie-ready";
/// Intersection thresholds: any overlap and fully visible.
pub const VISIBILITY_THRESHOLDS: [f64; 2] = [0.0, 1.0];

/// Pointer interactions a trigger can bind on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Primary click.
    Click,
    /// Pointer entered the element.
    PointerEnter,
    /// Pointer left the element.
    PointerLeave,
}

impl Interaction {
    /// DOM event name for this interaction.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
        }
    }
}

/// Canvas attributes derived from the anchor image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanvasSpec {
    /// Element id; omitted when the configuration id is empty.
    pub id: Option<String>,
    /// Aspect ratio as `(width, height)`.
    pub aspect_ratio: Option<(u32, u32)>,
}

/// Detail of the ready notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyDetail {
    /// Configuration id.
    pub id: String,
    /// Source the handle was created for.
    pub src: String,
    /// The handle that attached.
    pub handle: HandleId,
}

/// The animated element and the document around it.
pub trait ElementHost {
    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> u32;

    /// System-level "prefers reduced motion" signal.
    fn prefers_reduced_motion(&self) -> bool;

    /// Whether the element contains the anchor image.
    fn has_image(&self) -> bool;

    /// Rendered size of the anchor image.
    fn image_size(&self) -> Option<(u32, u32)>;

    /// Insert the canvas next to the anchor image.
    fn insert_canvas(&mut self, spec: &CanvasSpec);

    /// Update the canvas aspect ratio for a new source.
    fn set_aspect_ratio(&mut self, ratio: (u32, u32));

    /// Remove the canvas.
    fn remove_canvas(&mut self);

    /// Add a marker class to the element.
    fn add_class(&mut self, class: &str);

    /// Remove a marker class from the element.
    fn remove_class(&mut self, class: &str);

    /// Start forwarding `interactions` on the canvas as events for `handle`.
    fn bind(&mut self, handle: HandleId, interactions: &[Interaction]);

    /// Drop every listener registered for `handle`.
    fn unbind(&mut self, handle: HandleId);

    /// Expose the live handle on the canvas and element, or clear it.
    fn expose_handle(&mut self, handle: Option<HandleId>);

    /// Dispatch the ready notification on the element.
    fn dispatch_ready(&mut self, detail: &ReadyDetail);

    /// Ask for one `AnimationFrame` event before the next repaint.
    fn request_animation_frame(&mut self);

    /// Ask for one `ScrollLibraryPoll` event after `delay`.
    fn schedule_scroll_poll(&mut self, delay: Duration);
}

/// Visibility-detection capability.
pub trait VisibilityService {
    /// Subscribe the element on behalf of `handle`.
    ///
    /// Intersection changes arrive as
    /// [`ControllerEvent::Visibility`](crate::controller::ControllerEvent::Visibility)
    /// tagged with `handle`.
    fn observe(&mut self, handle: HandleId, thresholds: &[f64]);

    /// End the subscription made for `handle`.
    fn unobserve(&mut self, handle: HandleId);
}
