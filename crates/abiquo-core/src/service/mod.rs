//! High-level service facades
//!
//! Services compose the listing strategies and the domain wrapper into the
//! operations callers actually need.

mod cloud;

pub use cloud::{CloudService, ids};
