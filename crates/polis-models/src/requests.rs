use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{CourseId, StudentId, TeacherId};

/// Body of the get and delete endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdRequest {
    #[serde(default)]
    pub id: Option<i64>,
}

impl IdRequest {
    pub fn new(id: i64) -> Self {
        Self { id: Some(id) }
    }

    pub fn get<I: From<i64>>(&self) -> Option<I> {
        self.id.map(I::from)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseTeacherAssocDto {
    #[serde(default)]
    pub id_course: Option<CourseId>,
    #[serde(default)]
    pub id_teacher: Option<TeacherId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseStudentAssocDto {
    #[serde(default)]
    pub id_course: Option<CourseId>,
    #[serde(default)]
    pub id_student: Option<StudentId>,
}
