//! # Polis Core
//!
//! Core types shared by every layer of the Polis registry:
//!
//! - [`errors`]: `AppError` with HTTP response conversion
//! - [`status`]: the status catalog and the request-scoped [`StatusContext`]
//! - [`pagination`]: page requests and result slices
//! - [`filter`]: free-text filter resolution
//! - [`response`]: response envelopes
//!
//! # Example
//!
//! ```ignore
//! use polis_core::{AppError, ServerError, StatusContext};
//!
//! let mut ctx = StatusContext::new();
//! let err: AppError = ctx.reject(ServerError::CourseMissing, anyhow::anyhow!("Course is null"));
//! let err = err.with_statuses(&mut ctx);
//! assert_eq!(err.statuses.len(), 1);
//! ```

pub mod errors;
pub mod filter;
pub mod pagination;
pub mod response;
pub mod status;

pub use errors::AppError;
pub use filter::{FilterError, FilterQuery, SimpleStringFilterDto};
pub use pagination::{PageRequest, Pagination, Slice, Sorting};
pub use response::{Empty, RespSingle, RespSlice, RespVoid};
pub use status::{ServerError, Severity, StatusContext, StatusEntry};
