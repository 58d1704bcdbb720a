//! Builds the response envelopes from a service result and the request's
//! status context.

use axum::Json;
use polis_core::{AppError, Empty, RespSingle, RespSlice, Slice, StatusContext};

use crate::metrics::track_status_entries;
use crate::utils::tracing::{record_error, record_success};

/// Attaches the drained statuses to a failed request.
pub fn fail(err: AppError, ctx: &mut StatusContext) -> AppError {
    let err = err.with_statuses(ctx);
    track_status_entries(&err.statuses);
    record_error(&err.error.to_string());
    err
}

pub fn single<T>(
    result: Result<T, AppError>,
    ctx: &mut StatusContext,
) -> Result<Json<RespSingle<T>>, AppError> {
    match result {
        Ok(data) => {
            let status = ctx.drain_and_reset();
            track_status_entries(&status);
            record_success();
            Ok(Json(RespSingle::new(data, status)))
        }
        Err(err) => Err(fail(err, ctx)),
    }
}

pub fn slice<T>(
    result: Result<Slice<T>, AppError>,
    ctx: &mut StatusContext,
) -> Result<Json<RespSlice<T>>, AppError> {
    match result {
        Ok(slice) => {
            let status = ctx.drain_and_reset();
            track_status_entries(&status);
            record_success();
            Ok(Json(RespSlice::new(slice, status)))
        }
        Err(err) => Err(fail(err, ctx)),
    }
}

pub fn empty(
    result: Result<(), AppError>,
    ctx: &mut StatusContext,
) -> Result<Json<RespSingle<Empty>>, AppError> {
    match result {
        Ok(()) => {
            let status = ctx.drain_and_reset();
            track_status_entries(&status);
            record_success();
            Ok(Json(RespSingle::empty(status)))
        }
        Err(err) => Err(fail(err, ctx)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polis_core::ServerError;

    #[test]
    fn test_success_drains_context() {
        let mut ctx = StatusContext::new();
        let Json(resp) = single(Ok(5), &mut ctx).unwrap();
        assert_eq!(resp.data, Some(5));
        assert!(resp.status.is_empty());
    }

    #[test]
    fn test_failure_carries_recorded_status() {
        let mut ctx = StatusContext::new();
        let err = ctx.reject(ServerError::TeacherNotFound, anyhow::anyhow!("Teacher id not found 3"));
        let err = empty(Err(err), &mut ctx).unwrap_err();
        assert_eq!(err.statuses.len(), 1);
        assert_eq!(err.statuses[0].code, ServerError::TeacherNotFound);
        assert!(ctx.is_empty());
    }
}
