//! Teacher models and DTOs, re-exported from the `polis-models` crate.

pub use polis_models::requests::IdRequest;
pub use polis_models::teachers::*;
