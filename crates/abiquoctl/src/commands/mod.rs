//! Command implementations

pub mod profile;
pub mod template;
pub mod vapp;
pub mod vdc;
pub mod vm;
