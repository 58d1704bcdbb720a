use crate::modules::teachers::model::{IdRequest, Teacher, UpsertTeacherDto};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::utils::reply;
use crate::validator::Payload;
use axum::{Json, extract::State};
use polis_core::{AppError, RespSingle, RespSlice, RespVoid, SimpleStringFilterDto, StatusContext};
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/teacher/upsert",
    request_body = UpsertTeacherDto,
    responses(
        (status = 200, description = "Teacher inserted or updated", body = RespSingle<Teacher>),
        (status = 400, description = "Teacher is missing or incomplete", body = RespVoid)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, payload))]
pub async fn upsert_teacher(
    State(state): State<AppState>,
    Payload(payload): Payload<UpsertTeacherDto>,
) -> Result<Json<RespSingle<Teacher>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = TeacherService::upsert_teacher(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/teacher/get",
    request_body = IdRequest,
    responses(
        (status = 200, description = "Teacher with the courses taught", body = RespSingle<Teacher>),
        (status = 400, description = "Teacher id is missing", body = RespVoid),
        (status = 404, description = "Teacher not found", body = RespVoid)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    Payload(payload): Payload<IdRequest>,
) -> Result<Json<RespSingle<Teacher>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = TeacherService::get_teacher(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/teacher/delete",
    request_body = IdRequest,
    responses(
        (status = 200, description = "Teacher deleted", body = RespVoid),
        (status = 404, description = "Teacher not found", body = RespVoid),
        (status = 409, description = "Teacher still teaches courses", body = RespVoid)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Payload(payload): Payload<IdRequest>,
) -> Result<Json<RespVoid>, AppError> {
    let mut ctx = StatusContext::new();
    let result = TeacherService::delete_teacher(state.repository.as_ref(), &mut ctx, payload).await;
    reply::empty(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/teacher/filter",
    request_body = SimpleStringFilterDto,
    responses(
        (status = 200, description = "Page of matching teachers", body = RespSlice<Teacher>),
        (status = 400, description = "Filter is missing or incomplete", body = RespVoid),
        (status = 501, description = "Sorting was requested", body = RespVoid)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, payload))]
pub async fn filter_teachers(
    State(state): State<AppState>,
    Payload(payload): Payload<SimpleStringFilterDto>,
) -> Result<Json<RespSlice<Teacher>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = TeacherService::filter_teachers(state.repository.as_ref(), &mut ctx, payload).await;
    reply::slice(result, &mut ctx)
}
