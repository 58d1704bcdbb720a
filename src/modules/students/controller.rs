use crate::modules::students::model::{IdRequest, Student, UpsertStudentDto};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::reply;
use crate::validator::Payload;
use axum::{
    Json,
    extract::{Path, State},
};
use polis_core::{AppError, RespSingle, RespSlice, RespVoid, SimpleStringFilterDto, StatusContext};
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/student/upsert",
    request_body = UpsertStudentDto,
    responses(
        (status = 200, description = "Student inserted or updated", body = RespSingle<Student>),
        (status = 400, description = "Student is missing or incomplete", body = RespVoid)
    ),
    tag = "Students"
)]
#[instrument(skip(state, payload))]
pub async fn upsert_student(
    State(state): State<AppState>,
    Payload(payload): Payload<UpsertStudentDto>,
) -> Result<Json<RespSingle<Student>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = StudentService::upsert_student(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/student/get",
    request_body = IdRequest,
    responses(
        (status = 200, description = "Student with the enrolled course", body = RespSingle<Student>),
        (status = 400, description = "Student id is missing", body = RespVoid),
        (status = 404, description = "Student not found", body = RespVoid)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Payload(payload): Payload<IdRequest>,
) -> Result<Json<RespSingle<Student>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = StudentService::get_student(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/student/delete",
    request_body = IdRequest,
    responses(
        (status = 200, description = "Student deleted", body = RespVoid),
        (status = 404, description = "Student not found", body = RespVoid),
        (status = 409, description = "Student is still enrolled", body = RespVoid)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Payload(payload): Payload<IdRequest>,
) -> Result<Json<RespVoid>, AppError> {
    let mut ctx = StatusContext::new();
    let result = StudentService::delete_student(state.repository.as_ref(), &mut ctx, payload).await;
    reply::empty(result, &mut ctx)
}

#[utoipa::path(
    delete,
    path = "/student/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = RespVoid),
        (status = 404, description = "Student not found", body = RespVoid),
        (status = 409, description = "Student is still enrolled", body = RespVoid)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RespVoid>, AppError> {
    let mut ctx = StatusContext::new();
    let result =
        StudentService::delete_student(state.repository.as_ref(), &mut ctx, Some(IdRequest::new(id)))
            .await;
    reply::empty(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/student/filter",
    request_body = SimpleStringFilterDto,
    responses(
        (status = 200, description = "Page of matching students", body = RespSlice<Student>),
        (status = 400, description = "Filter is missing or incomplete", body = RespVoid),
        (status = 501, description = "Sorting was requested", body = RespVoid)
    ),
    tag = "Students"
)]
#[instrument(skip(state, payload))]
pub async fn filter_students(
    State(state): State<AppState>,
    Payload(payload): Payload<SimpleStringFilterDto>,
) -> Result<Json<RespSlice<Student>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = StudentService::filter_students(state.repository.as_ref(), &mut ctx, payload).await;
    reply::slice(result, &mut ctx)
}
