//! Status catalog and request-scoped status accumulation.
//!
//! Every failure path in the service layer records a [`StatusEntry`] before
//! returning an error. The entries for one request are collected in a
//! [`StatusContext`] that the controller creates, threads through the service
//! calls, and drains exactly once when it builds the response.
//!
//! # Example
//!
//! ```ignore
//! use polis_core::status::{ServerError, StatusContext};
//!
//! let mut ctx = StatusContext::new();
//! ctx.record(ServerError::CourseNotFound);
//!
//! let entries = ctx.drain_and_reset();
//! assert_eq!(entries.len(), 1);
//! assert!(ctx.is_empty());
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use utoipa::ToSchema;

use crate::errors::AppError;

/// Severity attached to every catalog entry.
///
/// Serialized by name (`"ERROR"`); [`Severity::code`] gives the numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Ok,
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub const fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Info => 1,
            Self::Warning => 2,
            Self::Error => 3,
            Self::Fatal => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

/// Fixed catalog of outcomes a request can report to the caller.
///
/// Each kind carries a user-facing message, a suggested action and a
/// severity. The text is part of the public contract with the web and mobile
/// clients and must not be reworded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerError {
    Ok,
    UnknownError,
    TeacherMissing,
    CourseMissing,
    CourseNotFound,
    TeacherNotFound,
    StudentNotFound,
    FilterMissing,
    StudentMissing,
    DeleteCourseNotAllowed,
    DeleteTeacherNotAllowed,
    DeleteStudentNotAllowed,
    SortNotSupported,
}

impl ServerError {
    pub const ALL: [ServerError; 13] = [
        Self::Ok,
        Self::UnknownError,
        Self::TeacherMissing,
        Self::CourseMissing,
        Self::CourseNotFound,
        Self::TeacherNotFound,
        Self::StudentNotFound,
        Self::FilterMissing,
        Self::StudentMissing,
        Self::DeleteCourseNotAllowed,
        Self::DeleteTeacherNotAllowed,
        Self::DeleteStudentNotAllowed,
        Self::SortNotSupported,
    ];

    pub const fn message(self) -> &'static str {
        match self {
            Self::Ok => "Success!",
            Self::UnknownError => "Unknown Error!",
            Self::TeacherMissing => "Teacher is missing or incomplete!",
            Self::CourseMissing => "Course is missing or incomplete!",
            Self::CourseNotFound => "Course id has not been found.",
            Self::TeacherNotFound => "Teacher id has not been found.",
            Self::StudentNotFound => "Student id has not been found.",
            Self::FilterMissing => "Filter is missing or incomplete!",
            Self::StudentMissing => "Student is missing or incomplete!",
            Self::DeleteCourseNotAllowed => "The course has relationships and cannot be deleted.",
            Self::DeleteTeacherNotAllowed => {
                "The teacher has relationships and cannot be deleted."
            }
            Self::DeleteStudentNotAllowed => {
                "The student has relationships and cannot be deleted."
            }
            Self::SortNotSupported => "Sorting is not supported yet.",
        }
    }

    pub const fn action(self) -> &'static str {
        match self {
            Self::Ok => "",
            Self::UnknownError => "Contact technical support",
            Self::TeacherMissing
            | Self::CourseMissing
            | Self::StudentMissing => "Enter all required data",
            Self::CourseNotFound | Self::TeacherNotFound | Self::StudentNotFound => "Check the id.",
            Self::FilterMissing => "Enter all required data to filter",
            Self::DeleteCourseNotAllowed => "Remove relationships to delete the course",
            Self::DeleteTeacherNotAllowed => "Remove relationships to delete the teacher",
            Self::DeleteStudentNotAllowed => "Remove relationships to delete the student",
            Self::SortNotSupported => "Remove the sort criteria and retry",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Ok => Severity::Ok,
            Self::UnknownError => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// HTTP status used when a request fails with this kind.
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TeacherMissing
            | Self::CourseMissing
            | Self::StudentMissing
            | Self::FilterMissing => StatusCode::BAD_REQUEST,
            Self::CourseNotFound | Self::TeacherNotFound | Self::StudentNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::DeleteCourseNotAllowed
            | Self::DeleteTeacherNotAllowed
            | Self::DeleteStudentNotAllowed => StatusCode::CONFLICT,
            Self::SortNotSupported => StatusCode::NOT_IMPLEMENTED,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::TeacherMissing => "TEACHER_MISSING",
            Self::CourseMissing => "COURSE_MISSING",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::TeacherNotFound => "TEACHER_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::FilterMissing => "FILTER_MISSING",
            Self::StudentMissing => "STUDENT_MISSING",
            Self::DeleteCourseNotAllowed => "DELETE_COURSE_NOT_ALLOWED",
            Self::DeleteTeacherNotAllowed => "DELETE_TEACHER_NOT_ALLOWED",
            Self::DeleteStudentNotAllowed => "DELETE_STUDENT_NOT_ALLOWED",
            Self::SortNotSupported => "SORT_NOT_SUPPORTED",
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured status record returned to the caller.
///
/// # Example JSON
///
/// ```json
/// {
///   "code": "COURSE_NOT_FOUND",
///   "severity": "ERROR",
///   "message": "Course id has not been found.",
///   "action": "Check the id.",
///   "helpReference": "",
///   "traceId": "18f3a2b41c7"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub code: ServerError,
    pub severity: Severity,
    pub message: String,
    pub action: String,
    pub help_reference: String,
    pub trace_id: String,
}

impl StatusEntry {
    pub fn new(code: ServerError) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: code.message().to_string(),
            action: code.action().to_string(),
            help_reference: String::new(),
            trace_id: generate_trace_id(),
        }
    }
}

impl From<ServerError> for StatusEntry {
    fn from(code: ServerError) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({}) trace_id={}",
            self.code,
            self.severity.as_str(),
            self.message,
            self.action,
            self.trace_id
        )
    }
}

/// Epoch milliseconds rendered as lowercase hex.
pub fn generate_trace_id() -> String {
    format!("{:x}", chrono::Utc::now().timestamp_millis())
}

/// Status entries accumulated while handling a single request.
///
/// A context is owned by exactly one request; it is never shared between
/// concurrent requests.
#[derive(Debug, Default)]
pub struct StatusContext {
    entries: Vec<StatusEntry>,
}

impl StatusContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the catalog entry for `kind` and writes it to the trace log.
    pub fn record(&mut self, kind: ServerError) -> &StatusEntry {
        let entry = StatusEntry::new(kind);
        info!(
            trace_id = %entry.trace_id,
            code = %entry.code,
            severity = entry.severity.as_str(),
            "Trace ID = {}",
            entry
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Records `kind` and returns the classified error for the caller to raise.
    pub fn reject<E>(&mut self, kind: ServerError, reason: E) -> AppError
    where
        E: Into<anyhow::Error>,
    {
        self.record(kind);
        AppError::from_kind(kind, reason)
    }

    /// Hands back everything recorded so far and leaves the context empty.
    pub fn drain_and_reset(&mut self) -> Vec<StatusEntry> {
        std::mem::take(&mut self.entries)
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_severities() {
        assert_eq!(ServerError::Ok.severity(), Severity::Ok);
        assert_eq!(ServerError::UnknownError.severity(), Severity::Fatal);
        for kind in ServerError::ALL {
            if !matches!(kind, ServerError::Ok | ServerError::UnknownError) {
                assert_eq!(kind.severity(), Severity::Error, "{kind}");
            }
        }
    }

    #[test]
    fn test_catalog_text_is_verbatim() {
        assert_eq!(
            ServerError::DeleteTeacherNotAllowed.message(),
            "The teacher has relationships and cannot be deleted."
        );
        assert_eq!(
            ServerError::DeleteTeacherNotAllowed.action(),
            "Remove relationships to delete the teacher"
        );
        assert_eq!(ServerError::StudentNotFound.message(), "Student id has not been found.");
        assert_eq!(ServerError::StudentNotFound.action(), "Check the id.");
        assert_eq!(
            ServerError::FilterMissing.action(),
            "Enter all required data to filter"
        );
        assert_eq!(ServerError::Ok.action(), "");
    }

    #[test]
    fn test_severity_codes() {
        assert_eq!(Severity::Ok.code(), 0);
        assert_eq!(Severity::Info.code(), 1);
        assert_eq!(Severity::Warning.code(), 2);
        assert_eq!(Severity::Error.code(), 3);
        assert_eq!(Severity::Fatal.code(), 4);
    }

    #[test]
    fn test_serialized_code_names_match_as_str() {
        for kind in ServerError::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ServerError::CourseMissing.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServerError::TeacherNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServerError::DeleteCourseNotAllowed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServerError::SortNotSupported.http_status(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ServerError::UnknownError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_entry_serialization() {
        let entry = StatusEntry::new(ServerError::CourseNotFound);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["code"], "COURSE_NOT_FOUND");
        assert_eq!(value["severity"], "ERROR");
        assert_eq!(value["message"], "Course id has not been found.");
        assert_eq!(value["action"], "Check the id.");
        assert_eq!(value["helpReference"], "");
        assert!(value["traceId"].is_string());
    }

    #[test]
    fn test_trace_id_is_hex() {
        let id = generate_trace_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(i64::from_str_radix(&id, 16).is_ok());
    }

    #[test]
    fn test_context_drain_and_reset() {
        let mut ctx = StatusContext::new();
        assert!(ctx.drain_and_reset().is_empty());

        ctx.record(ServerError::TeacherMissing);
        ctx.record(ServerError::TeacherNotFound);
        assert_eq!(ctx.len(), 2);

        let drained = ctx.drain_and_reset();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].code, ServerError::TeacherMissing);
        assert_eq!(drained[1].code, ServerError::TeacherNotFound);

        assert!(ctx.is_empty());
        assert!(ctx.drain_and_reset().is_empty());
    }

    #[test]
    fn test_reject_records_and_classifies() {
        let mut ctx = StatusContext::new();
        let err = ctx.reject(ServerError::StudentNotFound, anyhow::anyhow!("Student id not found 999"));

        assert_eq!(err.kind, Some(ServerError::StudentNotFound));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(ctx.entries().len(), 1);
        assert_eq!(ctx.entries()[0].severity, Severity::Error);
    }

    #[test]
    fn test_contexts_are_independent() {
        let mut first = StatusContext::new();
        let mut second = StatusContext::new();

        first.record(ServerError::CourseMissing);

        assert_eq!(first.len(), 1);
        assert!(second.drain_and_reset().is_empty());
    }
}
