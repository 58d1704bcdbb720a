use utoipa::OpenApi;

use polis_core::pagination::SortDirection;
use polis_core::{
    Empty, Pagination, RespSingle, RespSlice, SimpleStringFilterDto, Slice, Sorting, StatusEntry,
};
use polis_core::{ServerError, Severity};
use polis_models::{
    Course, CourseStudentAssocDto, CourseSummary, CourseTeacherAssocDto, IdRequest, Student,
    StudentSummary, Teacher, TeacherSummary, UpsertCourseDto, UpsertStudentDto, UpsertTeacherDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::courses::controller::upsert_course,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::filter_courses,
        crate::modules::teachers::controller::upsert_teacher,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::teachers::controller::filter_teachers,
        crate::modules::students::controller::upsert_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::delete_student_by_id,
        crate::modules::students::controller::filter_students,
        crate::modules::associations::controller::associate_teacher_to_course,
        crate::modules::associations::controller::remove_teacher_from_course,
        crate::modules::associations::controller::associate_student_to_course,
        crate::modules::associations::controller::remove_student_from_course,
    ),
    components(
        schemas(
            Course,
            CourseSummary,
            UpsertCourseDto,
            Teacher,
            TeacherSummary,
            UpsertTeacherDto,
            Student,
            StudentSummary,
            UpsertStudentDto,
            IdRequest,
            CourseTeacherAssocDto,
            CourseStudentAssocDto,
            SimpleStringFilterDto,
            Pagination,
            Sorting,
            SortDirection,
            StatusEntry,
            ServerError,
            Severity,
            Empty,
            RespSingle<Course>,
            RespSingle<Teacher>,
            RespSingle<Student>,
            RespSingle<Empty>,
            RespSlice<Course>,
            RespSlice<Teacher>,
            RespSlice<Student>,
            Slice<Course>,
        )
    ),
    tags(
        (name = "Courses", description = "Course management endpoints"),
        (name = "Teachers", description = "Teacher management endpoints"),
        (name = "Students", description = "Student management endpoints"),
        (name = "Associations", description = "Course-Teacher and Course-Student links"),
        (name = "Health", description = "Liveness check")
    ),
    info(
        title = "Polis Registry API",
        version = "0.1.0",
        description = "Course, teacher and student registry built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/course/upsert",
            "/course/filter",
            "/teacher/delete",
            "/student/{id}",
            "/associateTeacherToCourse",
            "/removeStudentFromCourse",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
