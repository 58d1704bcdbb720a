//! Shared helpers for the feature modules.
//!
//! - [`reply`]: response envelope assembly
//! - [`tracing`]: span and audit helpers

pub mod reply;
pub mod tracing;
