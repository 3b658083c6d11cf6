//! A headless, measurement-driven infinite carousel.
//!
//! For adapter-level utilities (offset drivers, row placement, frame controller), see the
//! `carousel-adapter` crate.
//!
//! The carousel scrolls endlessly in either direction by cycling through a finite source, while
//! only materializing enough items to cover the viewport plus an advance margin:
//! - [`resolve`] maps a logical index onto `(source_index, batch)`.
//! - [`ItemIdentity`] keeps repeated elements distinguishable across batches.
//! - [`Carousel`] grows the window when content is about to run out and trims items that have
//!   scrolled fully out of view, compensating the shared [`ScrollOffset`] so nothing moves.
//!
//! It is UI-agnostic. A renderer is expected to:
//! - lay out [`Carousel::materialize`] in a row with the configured spacing, offset by the
//!   scroll offset and clipped to the viewport
//! - report the row width and per-item sizes after each layout pass
//!   ([`Carousel::on_layout_pass`])
//!
//! An animation driver owns the motion: it advances a clone of the [`ScrollOffset`] handle.
//!
//! ```
//! use carousel::{Carousel, CarouselOptions, ItemIdentity, ScrollOffset, Size};
//!
//! let offset = ScrollOffset::default();
//! let mut c = Carousel::new(
//!     CarouselOptions::new(["A", "B", "C"]).with_safety_padding(0.0),
//!     offset.clone(),
//! );
//!
//! // One layout pass: a single 100px item in a 320px viewport is not enough.
//! let measurements = vec![(ItemIdentity::new("A", 0), Size::new(100.0, 100.0))];
//! assert!(c.on_layout_pass(100.0, 320.0, measurements).changed_window());
//! assert_eq!(c.size(), 2);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod carousel;
mod cyclic;
mod offset;
mod options;
mod size_cache;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use carousel::Carousel;
pub use cyclic::resolve;
pub use offset::ScrollOffset;
pub use options::{
    CarouselOptions, DEFAULT_MAX_OFFSET_ABS_DELTA, DEFAULT_MAX_SIZE, DEFAULT_SAFETY_PADDING,
    DEFAULT_SPACING, GetItemKey, OnWindowChangeCallback,
};
pub use size_cache::{CarouselKey, SizeCache};
pub use state::WindowState;
pub use types::{
    CarouselItem, DirectionMode, ItemIdentity, LayoutOutcome, Resolved, ScrollDirection, Size,
    Traversal,
};
