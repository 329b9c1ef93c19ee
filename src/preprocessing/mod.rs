//! Image preprocessing module
//!
//! Prepares a decoded image for clustering: bounded downsampling followed by
//! an optional, swappable background suppression strategy.

pub mod background;
pub mod resize;

pub use background::{BackgroundSuppressor, LuminanceGate};
pub use resize::resize_bound;
