use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::status::{ServerError, StatusContext, StatusEntry};

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: Option<ServerError>,
    pub error: Error,
    pub statuses: Vec<StatusEntry>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            kind: None,
            error: err.into(),
            statuses: Vec::new(),
        }
    }

    /// Error classified against the status catalog.
    pub fn from_kind<E>(kind: ServerError, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: kind.http_status(),
            kind: Some(kind),
            error: err.into(),
            statuses: Vec::new(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Moves the request's accumulated statuses into the error body.
    ///
    /// An error that reaches the controller without any recorded status is
    /// reported as `UNKNOWN_ERROR`.
    pub fn with_statuses(mut self, ctx: &mut StatusContext) -> Self {
        if ctx.is_empty() && self.statuses.is_empty() {
            ctx.record(ServerError::UnknownError);
        }
        self.statuses.extend(ctx.drain_and_reset());
        self
    }

    pub fn kind(&self) -> ServerError {
        self.kind.unwrap_or(ServerError::UnknownError)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "data": null,
            "status": self.statuses,
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Severity;

    #[test]
    fn test_from_kind_uses_catalog_status() {
        let err = AppError::from_kind(ServerError::DeleteStudentNotAllowed, anyhow::anyhow!("linked"));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.kind(), ServerError::DeleteStudentNotAllowed);
    }

    #[test]
    fn test_unclassified_error_reports_unknown() {
        let mut ctx = StatusContext::new();
        let err = AppError::internal(anyhow::anyhow!("pool closed")).with_statuses(&mut ctx);

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.statuses.len(), 1);
        assert_eq!(err.statuses[0].code, ServerError::UnknownError);
        assert_eq!(err.statuses[0].severity, Severity::Fatal);
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_with_statuses_keeps_recorded_entries() {
        let mut ctx = StatusContext::new();
        let err = ctx
            .reject(ServerError::CourseNotFound, anyhow::anyhow!("Course id not found 7"))
            .with_statuses(&mut ctx);

        assert_eq!(err.statuses.len(), 1);
        assert_eq!(err.statuses[0].code, ServerError::CourseNotFound);
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_bad_request_status() {
        let err = AppError::bad_request(anyhow::anyhow!("bad"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), ServerError::UnknownError);
    }
}
