//! gc-core: stable foundation for gridcarbon.
//!
//! Contains:
//! - constants (physical/reference constants shared across the workspace)
//! - numeric (Real + tolerances + float helpers)

pub mod constants;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use constants::*;
pub use numeric::*;
