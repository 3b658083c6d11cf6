//! Adapter utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and focuses on the window math and state. This crate
//! provides small, framework-neutral helpers commonly needed by hosts:
//!
//! - A periodic offset driver ([`Drift`]) built on [`Tween`]/[`Easing`]
//! - Row placement for headless renderers ([`place_row`], [`row_width`])
//! - A [`Controller`] that owns the item renderer and runs whole frames
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod drift;
mod layout;


pub use controller::Controller;
pub use drift::{Drift, Easing, Tween};
pub use layout::{Placement, place_row, row_width};
