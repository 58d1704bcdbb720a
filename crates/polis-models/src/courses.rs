//! Course records, DTOs and response views.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, TeacherId};
use crate::students::{StudentRecord, StudentSummary};
use crate::teachers::{TeacherRecord, TeacherSummary};

/// A course row as stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CourseRecord {
    pub id: CourseId,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub teacher_id: Option<TeacherId>,
}

/// Insert-or-update payload for a course.
///
/// Nested `teacher`/`students` objects sent by clients are ignored; the
/// course's links are only changed through the association endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCourseDto {
    #[serde(default)]
    pub id: Option<CourseId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl UpsertCourseDto {
    /// Trims the required fields and drops blank optional ones.
    pub fn normalized(mut self) -> Self {
        self.code = self.code.trim().to_string();
        self.title = self.title.trim().to_string();
        self.description = crate::non_blank(self.description);
        self
    }
}

/// Course fields without links, embedded in teacher and student views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: CourseId,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
}

impl From<&CourseRecord> for CourseSummary {
    fn from(record: &CourseRecord) -> Self {
        Self {
            id: record.id,
            code: record.code.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            year: record.year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub teacher: Option<TeacherSummary>,
    pub students: Vec<StudentSummary>,
}

impl Course {
    pub fn from_parts(
        record: CourseRecord,
        teacher: Option<&TeacherRecord>,
        students: &[StudentRecord],
    ) -> Self {
        Self {
            id: record.id,
            code: record.code,
            title: record.title,
            description: record.description,
            year: record.year,
            teacher: teacher.map(TeacherSummary::from),
            students: students.iter().map(StudentSummary::from).collect(),
        }
    }
}
