//! Student records, DTOs and response views.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::courses::{CourseRecord, CourseSummary};
use crate::ids::{CourseId, StudentId};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StudentRecord {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub serial_number: Option<String>,
    pub course_id: Option<CourseId>,
}

/// Insert-or-update payload for a student. A nested `course` is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertStudentDto {
    #[serde(default)]
    pub id: Option<StudentId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub serial_number: Option<String>,
}

impl UpsertStudentDto {
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = crate::non_blank(self.email);
        self.phone = crate::non_blank(self.phone);
        self.serial_number = crate::non_blank(self.serial_number);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub serial_number: Option<String>,
}

impl From<&StudentRecord> for StudentSummary {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            serial_number: record.serial_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub serial_number: Option<String>,
    pub course: Option<CourseSummary>,
}

impl Student {
    pub fn from_parts(record: StudentRecord, course: Option<&CourseRecord>) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            serial_number: record.serial_number,
            course: course.map(CourseSummary::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(email: Option<&str>) -> UpsertStudentDto {
        UpsertStudentDto {
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            email: email.map(str::to_string),
            ..Default::default()
        }
        .normalized()
    }

    #[test]
    fn test_email_is_optional() {
        assert!(dto(None).validate().is_ok());
        assert!(dto(Some("")).validate().is_ok());
    }

    #[test]
    fn test_email_must_be_valid_when_present() {
        assert!(dto(Some("alan@example.com")).validate().is_ok());
        let errors = dto(Some("not-an-email")).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_deserializes_client_payload() {
        let json = r#"{"firstName":"Alan","lastName":"Turing","serialNumber":"S-01","course":{"id":3}}"#;
        let dto: UpsertStudentDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.serial_number.as_deref(), Some("S-01"));
        assert_eq!(dto.id, None);
    }

    #[test]
    fn test_view_embeds_course_summary() {
        let record = StudentRecord {
            id: StudentId::new(2),
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            email: None,
            phone: None,
            serial_number: Some("S-01".into()),
            course_id: Some(CourseId::new(3)),
        };
        let course = CourseRecord {
            id: CourseId::new(3),
            code: "LOG".into(),
            title: "Logic".into(),
            description: None,
            year: None,
            teacher_id: None,
        };
        let json = serde_json::to_value(Student::from_parts(record, Some(&course))).unwrap();
        assert_eq!(json["serialNumber"], "S-01");
        assert_eq!(json["course"]["code"], "LOG");
    }
}
