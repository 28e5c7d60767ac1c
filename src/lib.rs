// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Frame math converts between f64 progress and u32 indices
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
// Pedantic allowances
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::redundant_pub_crate)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::wildcard_imports))]

//! Responsive, visibility-aware Lottie playback for image blocks.
//!
//! Every image block with an attached animation gets one
//! [`controller::AnimationController`]. The controller picks the source for
//! the current viewport width, creates at most one playback handle for it,
//! defers the fetch until the element is visible, freezes the render loop
//! while it is off screen, and starts playback according to the configured
//! trigger. Users who prefer reduced motion get the static image or a single
//! still frame instead.
//!
//! # Key entry points
//!
//! - [`config::AnimationConfig`] - the normalized per-element payload
//! - [`controller::AnimationController`] - lifecycle of one element
//! - [`trigger::TriggerHandler`] - autoplay, click, hover and scroll
//!   policies
//! - [`options::ControllerOptions`] - site-wide loading and layout options
//!
//! # Architecture
//!
//! The playback engine, the page, the visibility service and the scroll
//! library are reached through traits ([`player::PlaybackEngine`],
//! [`host::ElementHost`], [`host::VisibilityService`],
//! [`scroll::ScrollLibrary`]). Everything they report comes back as a
//! [`controller::ControllerEvent`] tagged with the handle it concerns, so a
//! replaced handle can never act on the element again. The `web` feature
//! provides DOM-backed implementations for the browser.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod options;
pub mod player;
pub mod scroll;
pub mod trigger;
#[cfg(feature = "web")]
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AnimationConfig, Breakpoint};
pub use controller::{AnimationController, Collaborators, ControllerEvent};
pub use error::LottieError;
pub use options::ControllerOptions;
