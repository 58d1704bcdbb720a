use anyhow::anyhow;
use polis_core::filter::{self, FilterQuery, SimpleStringFilterDto};
use polis_core::{AppError, ServerError, Slice, StatusContext};
use polis_db::{CourseRepository, Repository, TeacherRepository, UnitOfWork};
use polis_models::TeacherId;
use polis_models::associations::guard_teacher_delete;
use tracing::instrument;
use validator::Validate;

use crate::audit_event;
use crate::metrics::{track_entity_deleted, track_entity_upserted};
use crate::modules::teachers::model::{IdRequest, Teacher, TeacherRecord, UpsertTeacherDto};
use crate::validator::format_errors;

pub struct TeacherService;

impl TeacherService {
    pub(crate) async fn teacher_view(
        uow: &mut dyn UnitOfWork,
        record: TeacherRecord,
    ) -> Result<Teacher, AppError> {
        let courses = uow.courses_by_teacher(record.id).await?;
        Ok(Teacher::from_parts(record, &courses))
    }

    pub(crate) async fn require_teacher(
        uow: &mut dyn UnitOfWork,
        ctx: &mut StatusContext,
        id: TeacherId,
    ) -> Result<TeacherRecord, AppError> {
        uow.find_teacher(id).await?.ok_or_else(|| {
            ctx.reject(ServerError::TeacherNotFound, anyhow!("Teacher id not found {id}"))
        })
    }

    #[instrument(skip(repo, ctx, dto))]
    pub async fn upsert_teacher(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<UpsertTeacherDto>,
    ) -> Result<Teacher, AppError> {
        let Some(dto) = dto else {
            return Err(ctx.reject(ServerError::TeacherMissing, anyhow!("Teacher is null")));
        };
        let dto = dto.normalized();
        dto.validate()
            .map_err(|e| ctx.reject(ServerError::TeacherMissing, anyhow!("{}", format_errors(&e))))?;

        let mut uow = repo.begin().await?;
        let record = uow.save_teacher(&dto).await?;
        let teacher = Self::teacher_view(uow.as_mut(), record).await?;
        uow.commit().await?;

        audit_event!("upsert", "teacher", teacher.id = %teacher.id);
        track_entity_upserted("teacher");
        Ok(teacher)
    }

    #[instrument(skip(repo, ctx))]
    pub async fn get_teacher(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        req: Option<IdRequest>,
    ) -> Result<Teacher, AppError> {
        let Some(id) = req.and_then(|r| r.get::<TeacherId>()) else {
            return Err(ctx.reject(ServerError::TeacherMissing, anyhow!("Teacher id is null")));
        };

        let mut uow = repo.begin().await?;
        let record = Self::require_teacher(uow.as_mut(), ctx, id).await?;
        Self::teacher_view(uow.as_mut(), record).await
    }

    /// Rejected while any course still references the teacher.
    #[instrument(skip(repo, ctx))]
    pub async fn delete_teacher(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        req: Option<IdRequest>,
    ) -> Result<(), AppError> {
        let Some(id) = req.and_then(|r| r.get::<TeacherId>()) else {
            return Err(ctx.reject(ServerError::TeacherMissing, anyhow!("Teacher id is null")));
        };

        let mut uow = repo.begin().await?;
        Self::require_teacher(uow.as_mut(), ctx, id).await?;
        let courses = uow.courses_by_teacher(id).await?;
        guard_teacher_delete(id, &courses).map_err(|e| ctx.reject(e.kind(), e))?;

        match uow.delete_teacher(id).await {
            Ok(_) => {}
            Err(e) if e.is_constraint_violation() => {
                return Err(ctx.reject(ServerError::DeleteTeacherNotAllowed, e));
            }
            Err(e) => return Err(e.into()),
        }
        uow.commit().await?;

        audit_event!("delete", "teacher", teacher.id = %id);
        track_entity_deleted("teacher");
        Ok(())
    }

    #[instrument(skip(repo, ctx, dto))]
    pub async fn filter_teachers(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<SimpleStringFilterDto>,
    ) -> Result<Slice<Teacher>, AppError> {
        let query = filter::resolve(dto.as_ref()).map_err(|e| ctx.reject(e.status_kind(), e))?;

        let mut uow = repo.begin().await?;
        let records = match query {
            FilterQuery::All(page) => uow.list_teachers(page).await?,
            FilterQuery::Matching(criterion, page) => uow.search_teachers(criterion, page).await?,
        };

        let mut teachers = Vec::with_capacity(records.len());
        for record in records.content {
            teachers.push(Self::teacher_view(uow.as_mut(), record).await?);
        }

        Ok(Slice {
            content: teachers,
            page_number: records.page_number,
            page_size: records.page_size,
            has_next: records.has_next,
        })
    }
}
