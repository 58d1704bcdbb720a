use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::courses::{CourseRecord, CourseSummary};
use crate::ids::TeacherId;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TeacherRecord {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
}

/// Insert-or-update payload for a teacher. A nested `courses` list is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTeacherDto {
    #[serde(default)]
    pub id: Option<TeacherId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl UpsertTeacherDto {
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.title = crate::non_blank(self.title);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSummary {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
}

impl From<&TeacherRecord> for TeacherSummary {
    fn from(record: &TeacherRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            title: record.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub courses: Vec<CourseSummary>,
}

impl Teacher {
    pub fn from_parts(record: TeacherRecord, courses: &[CourseRecord]) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            title: record.title,
            courses: courses.iter().map(CourseSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_validation() {
        let valid: UpsertTeacherDto =
            serde_json::from_str(r#"{"firstName":"Grace","lastName":"Hopper","title":"Prof."}"#)
                .unwrap();
        assert!(valid.normalized().validate().is_ok());

        let missing_last: UpsertTeacherDto =
            serde_json::from_str(r#"{"firstName":"Grace"}"#).unwrap();
        let errors = missing_last.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
    }

    #[test]
    fn test_view_lists_course_summaries() {
        let record = TeacherRecord {
            id: TeacherId::new(1),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            title: None,
        };
        let course = CourseRecord {
            id: crate::ids::CourseId::new(9),
            code: "CS".into(),
            title: "Compilers".into(),
            description: None,
            year: None,
            teacher_id: Some(TeacherId::new(1)),
        };
        let json = serde_json::to_value(Teacher::from_parts(record, &[course])).unwrap();
        assert_eq!(json["firstName"], "Grace");
        assert_eq!(json["courses"][0]["id"], 9);
        assert!(json["courses"][0].get("teacher").is_none());
    }
}
