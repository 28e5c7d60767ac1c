//! Crate-level error types.

use std::fmt;

/// Errors produced by the lottie-lite crate.
///
/// None of these reach the page: the mounting code logs them and leaves the
/// element rendering as a plain image.
#[derive(Debug)]
pub enum LottieError {
    /// The element payload is not valid JSON for the expected shape.
    Payload(serde_json::Error),
    /// The payload carries no breakpoint with a usable source.
    NoBreakpoints,
    /// The payload names a trigger this controller does not know.
    UnknownTrigger(String),
    /// The payload names a reduced-motion fallback this controller does not
    /// know.
    UnknownFallback(String),
    /// The host element has no anchor image to replace.
    MissingImage,
    /// The playback engine refused to create a handle.
    Engine(String),
    /// The scroll-linked library refused to create a binding.
    ScrollBinding(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for LottieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payload(e) => write!(f, "malformed payload: {e}"),
            Self::NoBreakpoints => {
                write!(f, "payload has no breakpoint with a source")
            }
            Self::UnknownTrigger(t) => write!(f, "unknown trigger '{t}'"),
            Self::UnknownFallback(v) => {
                write!(f, "unknown reduced-motion fallback '{v}'")
            }
            Self::MissingImage => write!(f, "element has no anchor image"),
            Self::Engine(msg) => write!(f, "playback engine error: {msg}"),
            Self::ScrollBinding(msg) => {
                write!(f, "scroll binding error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for LottieError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Payload(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LottieError {
    fn from(e: serde_json::Error) -> Self {
        Self::Payload(e)
    }
}

impl From<std::io::Error> for LottieError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
