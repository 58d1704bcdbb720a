//! Response envelopes shared by every endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pagination::Slice;
use crate::status::StatusEntry;

/// Single-item response; `data` is `null` for void operations and failures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespSingle<T> {
    pub data: Option<T>,
    pub status: Vec<StatusEntry>,
}

impl<T> RespSingle<T> {
    pub fn new(data: T, status: Vec<StatusEntry>) -> Self {
        Self {
            data: Some(data),
            status,
        }
    }
}

/// Payload type of operations that return no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Empty {}

pub type RespVoid = RespSingle<Empty>;

impl RespSingle<Empty> {
    pub fn empty(status: Vec<StatusEntry>) -> Self {
        Self { data: None, status }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespSlice<T> {
    pub slice: Option<Slice<T>>,
    pub status: Vec<StatusEntry>,
}

impl<T> RespSlice<T> {
    pub fn new(slice: Slice<T>, status: Vec<StatusEntry>) -> Self {
        Self {
            slice: Some(slice),
            status,
        }
    }
}
