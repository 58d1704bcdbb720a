//! # Polis Models
//!
//! Domain records, DTOs and views for the Polis registry.
//!
//! # Modules
//!
//! - [`ids`]: typed identifiers
//! - [`courses`], [`teachers`], [`students`]: stored records, upsert payloads and response views
//! - [`requests`]: id and association request bodies
//! - [`associations`]: reverse-collection maintenance and delete guards

pub mod associations;
pub mod courses;
pub mod ids;
pub mod requests;
pub mod students;
pub mod teachers;

pub use associations::{DeleteBlocked, Relation, Unlinked};
pub use courses::{Course, CourseRecord, CourseSummary, UpsertCourseDto};
pub use ids::{CourseId, StudentId, TeacherId};
pub use requests::{CourseStudentAssocDto, CourseTeacherAssocDto, IdRequest};
pub use students::{Student, StudentRecord, StudentSummary, UpsertStudentDto};
pub use teachers::{Teacher, TeacherRecord, TeacherSummary, UpsertTeacherDto};

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
