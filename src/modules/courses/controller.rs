use crate::modules::courses::model::{Course, IdRequest, UpsertCourseDto};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::reply;
use crate::validator::Payload;
use axum::{Json, extract::State};
use polis_core::{AppError, RespSingle, RespSlice, RespVoid, SimpleStringFilterDto, StatusContext};
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/course/upsert",
    request_body = UpsertCourseDto,
    responses(
        (status = 200, description = "Course inserted or updated", body = RespSingle<Course>),
        (status = 400, description = "Course is missing or incomplete", body = RespVoid),
        (status = 500, description = "Internal server error", body = RespVoid)
    ),
    tag = "Courses"
)]
#[instrument(skip(state, payload))]
pub async fn upsert_course(
    State(state): State<AppState>,
    Payload(payload): Payload<UpsertCourseDto>,
) -> Result<Json<RespSingle<Course>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = CourseService::upsert_course(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/course/get",
    request_body = IdRequest,
    responses(
        (status = 200, description = "Course with its teacher and students", body = RespSingle<Course>),
        (status = 400, description = "Course id is missing", body = RespVoid),
        (status = 404, description = "Course not found", body = RespVoid)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Payload(payload): Payload<IdRequest>,
) -> Result<Json<RespSingle<Course>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = CourseService::get_course(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/course/delete",
    request_body = IdRequest,
    responses(
        (status = 200, description = "Course deleted", body = RespVoid),
        (status = 400, description = "Course id is missing", body = RespVoid),
        (status = 404, description = "Course not found", body = RespVoid),
        (status = 409, description = "Course has a teacher or students", body = RespVoid)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Payload(payload): Payload<IdRequest>,
) -> Result<Json<RespVoid>, AppError> {
    let mut ctx = StatusContext::new();
    let result = CourseService::delete_course(state.repository.as_ref(), &mut ctx, payload).await;
    reply::empty(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/course/filter",
    request_body = SimpleStringFilterDto,
    responses(
        (status = 200, description = "Page of matching courses", body = RespSlice<Course>),
        (status = 400, description = "Filter is missing or incomplete", body = RespVoid),
        (status = 501, description = "Sorting was requested", body = RespVoid)
    ),
    tag = "Courses"
)]
#[instrument(skip(state, payload))]
pub async fn filter_courses(
    State(state): State<AppState>,
    Payload(payload): Payload<SimpleStringFilterDto>,
) -> Result<Json<RespSlice<Course>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = CourseService::filter_courses(state.repository.as_ref(), &mut ctx, payload).await;
    reply::slice(result, &mut ctx)
}
