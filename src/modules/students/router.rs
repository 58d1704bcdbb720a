use crate::modules::students::controller::{
    delete_student, delete_student_by_id, filter_students, get_student, upsert_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/upsert", post(upsert_student))
        .route("/get", post(get_student))
        .route("/delete", post(delete_student))
        .route("/filter", post(filter_students))
        .route("/{id}", delete(delete_student_by_id))
}
