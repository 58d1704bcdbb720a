use crate::modules::courses::controller::{delete_course, filter_courses, get_course, upsert_course};
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/upsert", post(upsert_course))
        .route("/get", post(get_course))
        .route("/delete", post(delete_course))
        .route("/filter", post(filter_courses))
}
