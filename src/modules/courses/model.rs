//! Course models and DTOs.
//!
//! Re-exports the course types from the `polis-models` crate.

pub use polis_models::courses::*;
pub use polis_models::requests::IdRequest;
