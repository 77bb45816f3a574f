//! sp-core: Shared types for SlotPulse
//!
//! This crate provides the error taxonomy and the fixed-capacity rolling
//! window used by every SlotPulse crate.

mod error;
mod window;

pub use error::*;
pub use window::*;
