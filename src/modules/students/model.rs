pub use polis_models::requests::IdRequest;
pub use polis_models::students::*;
