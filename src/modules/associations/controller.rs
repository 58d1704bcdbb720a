use crate::modules::associations::service::AssociationService;
use crate::modules::associations::{CourseStudentAssocDto, CourseTeacherAssocDto};
use crate::state::AppState;
use crate::utils::reply;
use crate::validator::Payload;
use axum::{Json, extract::State};
use polis_core::{AppError, RespSingle, RespVoid, StatusContext};
use polis_models::Course;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/associateTeacherToCourse",
    request_body = CourseTeacherAssocDto,
    responses(
        (status = 200, description = "Course with its new teacher", body = RespSingle<Course>),
        (status = 400, description = "Course or teacher id is missing", body = RespVoid),
        (status = 404, description = "Course or teacher not found", body = RespVoid)
    ),
    tag = "Associations"
)]
#[instrument(skip(state))]
pub async fn associate_teacher_to_course(
    State(state): State<AppState>,
    Payload(payload): Payload<CourseTeacherAssocDto>,
) -> Result<Json<RespSingle<Course>>, AppError> {
    let mut ctx = StatusContext::new();
    let result =
        AssociationService::associate_teacher(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/removeTeacherFromCourse",
    request_body = CourseTeacherAssocDto,
    responses(
        (status = 200, description = "Course without the teacher", body = RespSingle<Course>),
        (status = 400, description = "Course or teacher id is missing", body = RespVoid),
        (status = 404, description = "Course or teacher not found", body = RespVoid)
    ),
    tag = "Associations"
)]
#[instrument(skip(state))]
pub async fn remove_teacher_from_course(
    State(state): State<AppState>,
    Payload(payload): Payload<CourseTeacherAssocDto>,
) -> Result<Json<RespSingle<Course>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = AssociationService::remove_teacher(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/associateStudentToCourse",
    request_body = CourseStudentAssocDto,
    responses(
        (status = 200, description = "Course with the enrolled student", body = RespSingle<Course>),
        (status = 400, description = "Course or student id is missing", body = RespVoid),
        (status = 404, description = "Course or student not found", body = RespVoid)
    ),
    tag = "Associations"
)]
#[instrument(skip(state))]
pub async fn associate_student_to_course(
    State(state): State<AppState>,
    Payload(payload): Payload<CourseStudentAssocDto>,
) -> Result<Json<RespSingle<Course>>, AppError> {
    let mut ctx = StatusContext::new();
    let result =
        AssociationService::associate_student(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}

#[utoipa::path(
    post,
    path = "/removeStudentFromCourse",
    request_body = CourseStudentAssocDto,
    responses(
        (status = 200, description = "Course without the student", body = RespSingle<Course>),
        (status = 400, description = "Course or student id is missing", body = RespVoid),
        (status = 404, description = "Course or student not found", body = RespVoid)
    ),
    tag = "Associations"
)]
#[instrument(skip(state))]
pub async fn remove_student_from_course(
    State(state): State<AppState>,
    Payload(payload): Payload<CourseStudentAssocDto>,
) -> Result<Json<RespSingle<Course>>, AppError> {
    let mut ctx = StatusContext::new();
    let result = AssociationService::remove_student(state.repository.as_ref(), &mut ctx, payload).await;
    reply::single(result, &mut ctx)
}
