//! Trigger policies decide how playback of a handle starts.
//!
//! Each [`TriggerKind`] has exactly one handler. The handler is chosen once
//! from the configuration and fixed for the element's lifetime; handles come
//! and go underneath it as breakpoints change.

mod autoplay;
mod click;
mod hover;
mod scroll;
mod traits;

pub use autoplay::Autoplay;
pub use click::ClickToPlay;
pub use hover::HoverScrub;
pub use scroll::ScrollSync;
pub use traits::{BoxedTrigger, PlaybackOptions, TriggerHandler};

use crate::config::{AnimationConfig, TriggerKind};
use crate::options::RetryPolicy;
use crate::scroll::ScrollLibrary;

/// Build the handler for the configured trigger.
///
/// The scroll library is only kept by the scroll trigger.
#[must_use]
pub fn for_config(
    config: &AnimationConfig,
    library: Box<dyn ScrollLibrary>,
    retry: RetryPolicy,
) -> BoxedTrigger {
    match config.trigger {
        TriggerKind::Autoplay => Box::new(Autoplay),
        TriggerKind::Click => Box::new(ClickToPlay),
        TriggerKind::Hover => Box::new(HoverScrub),
        TriggerKind::Scroll => Box::new(ScrollSync::new(
            library,
            retry,
            config.scroll,
            config.scroll_scrub,
        )),
    }
}
