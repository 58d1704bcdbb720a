use crate::modules::associations::controller::{
    associate_student_to_course, associate_teacher_to_course, remove_student_from_course,
    remove_teacher_from_course,
};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Association routes live at the root of the API.
pub fn init_associations_router() -> Router<AppState> {
    Router::new()
        .route("/associateTeacherToCourse", post(associate_teacher_to_course))
        .route("/removeTeacherFromCourse", post(remove_teacher_from_course))
        .route("/associateStudentToCourse", post(associate_student_to_course))
        .route("/removeStudentFromCourse", post(remove_student_from_course))
}
