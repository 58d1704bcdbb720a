//! Relationship bookkeeping for the Course-Teacher-Student graph.
//!
//! A course has at most one teacher and a teacher lists its courses; a
//! student has at most one course and a course lists its students. Both
//! sides of each relationship must agree. Stores that keep explicit reverse
//! collections maintain them with [`relink`] and [`unlink`]; every store runs
//! the delete guards before removing a row.

use std::fmt;

use polis_core::ServerError;
use thiserror::Error;

use crate::courses::CourseRecord;
use crate::ids::{CourseId, StudentId, TeacherId};
use crate::students::StudentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    CourseTeacher,
    CourseStudent,
}

impl Relation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CourseTeacher => "course_teacher",
            Self::CourseStudent => "course_student",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a dissociation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlinked {
    Removed,
    NotLinked,
}

/// Adds `item` to a reverse collection, dropping any earlier copy first.
///
/// Returns `true` if the item was already present.
pub fn relink<T: PartialEq>(list: &mut Vec<T>, item: T) -> bool {
    let before = list.len();
    list.retain(|existing| *existing != item);
    let was_present = list.len() != before;
    list.push(item);
    was_present
}

/// Removes `item` from a reverse collection. Returns `true` if it was present.
pub fn unlink<T: PartialEq>(list: &mut Vec<T>, item: &T) -> bool {
    let before = list.len();
    list.retain(|existing| existing != item);
    list.len() != before
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteBlocked {
    #[error("Teacher {teacher} is assigned to {courses} course(s) and cannot be deleted.")]
    TeacherHasCourses { teacher: TeacherId, courses: usize },
    #[error("Course {0} has a teacher and cannot be deleted.")]
    CourseHasTeacher(CourseId),
    #[error("Course {course} has {students} student(s) and cannot be deleted.")]
    CourseHasStudents { course: CourseId, students: usize },
    #[error("Student {0} is enrolled in a course and cannot be deleted.")]
    StudentHasCourse(StudentId),
}

impl DeleteBlocked {
    pub fn kind(&self) -> ServerError {
        match self {
            Self::TeacherHasCourses { .. } => ServerError::DeleteTeacherNotAllowed,
            Self::CourseHasTeacher(_) | Self::CourseHasStudents { .. } => {
                ServerError::DeleteCourseNotAllowed
            }
            Self::StudentHasCourse(_) => ServerError::DeleteStudentNotAllowed,
        }
    }
}

/// `courses` must be the result of a courses-by-teacher lookup.
pub fn guard_teacher_delete(
    teacher: TeacherId,
    courses: &[CourseRecord],
) -> Result<(), DeleteBlocked> {
    if courses.is_empty() {
        Ok(())
    } else {
        Err(DeleteBlocked::TeacherHasCourses {
            teacher,
            courses: courses.len(),
        })
    }
}

pub fn guard_course_delete(
    course: &CourseRecord,
    students: &[StudentRecord],
) -> Result<(), DeleteBlocked> {
    if course.teacher_id.is_some() {
        return Err(DeleteBlocked::CourseHasTeacher(course.id));
    }
    if !students.is_empty() {
        return Err(DeleteBlocked::CourseHasStudents {
            course: course.id,
            students: students.len(),
        });
    }
    Ok(())
}

pub fn guard_student_delete(student: &StudentRecord) -> Result<(), DeleteBlocked> {
    match student.course_id {
        Some(_) => Err(DeleteBlocked::StudentHasCourse(student.id)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, teacher: Option<i64>) -> CourseRecord {
        CourseRecord {
            id: CourseId::new(id),
            code: format!("C{id}"),
            title: "Course".into(),
            description: None,
            year: None,
            teacher_id: teacher.map(TeacherId::new),
        }
    }

    fn student(id: i64, course: Option<i64>) -> StudentRecord {
        StudentRecord {
            id: StudentId::new(id),
            first_name: "S".into(),
            last_name: "T".into(),
            email: None,
            phone: None,
            serial_number: None,
            course_id: course.map(CourseId::new),
        }
    }

    #[test]
    fn test_relink_is_idempotent() {
        let mut courses = vec![CourseId::new(1)];
        assert!(relink(&mut courses, CourseId::new(1)));
        assert!(relink(&mut courses, CourseId::new(1)));
        assert_eq!(courses, vec![CourseId::new(1)]);
    }

    #[test]
    fn test_relink_appends_new_item_last() {
        let mut students = vec![StudentId::new(1), StudentId::new(2)];
        assert!(!relink(&mut students, StudentId::new(3)));
        assert!(relink(&mut students, StudentId::new(1)));
        assert_eq!(students, vec![StudentId::new(2), StudentId::new(3), StudentId::new(1)]);
    }

    #[test]
    fn test_unlink() {
        let mut courses = vec![CourseId::new(1), CourseId::new(2)];
        assert!(unlink(&mut courses, &CourseId::new(1)));
        assert!(!unlink(&mut courses, &CourseId::new(1)));
        assert_eq!(courses, vec![CourseId::new(2)]);
    }

    #[test]
    fn test_teacher_guard() {
        let teacher = TeacherId::new(1);
        assert!(guard_teacher_delete(teacher, &[]).is_ok());

        let err = guard_teacher_delete(teacher, &[course(5, Some(1))]).unwrap_err();
        assert_eq!(err.kind(), ServerError::DeleteTeacherNotAllowed);
    }

    #[test]
    fn test_course_guard_rejects_teacher_or_students() {
        assert!(guard_course_delete(&course(1, None), &[]).is_ok());

        let err = guard_course_delete(&course(1, Some(2)), &[]).unwrap_err();
        assert_eq!(err, DeleteBlocked::CourseHasTeacher(CourseId::new(1)));

        let err = guard_course_delete(&course(1, None), &[student(3, Some(1))]).unwrap_err();
        assert_eq!(err.kind(), ServerError::DeleteCourseNotAllowed);
    }

    #[test]
    fn test_student_guard() {
        assert!(guard_student_delete(&student(1, None)).is_ok());
        let err = guard_student_delete(&student(1, Some(4))).unwrap_err();
        assert_eq!(err.kind(), ServerError::DeleteStudentNotAllowed);
    }

    #[test]
    fn test_relation_labels() {
        assert_eq!(Relation::CourseTeacher.to_string(), "course_teacher");
        assert_eq!(Relation::CourseStudent.as_str(), "course_student");
    }
}
