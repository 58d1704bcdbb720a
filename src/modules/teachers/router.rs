use crate::modules::teachers::controller::{
    delete_teacher, filter_teachers, get_teacher, upsert_teacher,
};
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/upsert", post(upsert_teacher))
        .route("/get", post(get_teacher))
        .route("/delete", post(delete_teacher))
        .route("/filter", post(filter_teachers))
}
