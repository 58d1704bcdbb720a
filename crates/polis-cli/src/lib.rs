//! # Polis CLI
//!
//! Database seeding utilities for Polis testing and development.
//!
//! ## Usage
//!
//! ```ignore
//! use polis_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(5, 20, 200);
//! seed_all(repository.as_ref(), &config).await?;
//! ```

pub mod seeder;
