use anyhow::anyhow;
use polis_core::filter::{self, FilterQuery, SimpleStringFilterDto};
use polis_core::{AppError, ServerError, Slice, StatusContext};
use polis_db::{
    CourseRepository, Repository, StudentRepository, TeacherRepository, UnitOfWork,
};
use polis_models::CourseId;
use polis_models::associations::guard_course_delete;
use tracing::instrument;
use validator::Validate;

use crate::audit_event;
use crate::metrics::{track_entity_deleted, track_entity_upserted};
use crate::modules::courses::model::{Course, CourseRecord, IdRequest, UpsertCourseDto};
use crate::validator::format_errors;

pub struct CourseService;

impl CourseService {
    /// Loads the teacher and students of `record` within the same unit of work.
    pub(crate) async fn course_view(
        uow: &mut dyn UnitOfWork,
        record: CourseRecord,
    ) -> Result<Course, AppError> {
        let teacher = match record.teacher_id {
            Some(teacher_id) => uow.find_teacher(teacher_id).await?,
            None => None,
        };
        let students = uow.students_by_course(record.id).await?;
        Ok(Course::from_parts(record, teacher.as_ref(), &students))
    }

    /// Finds the course or records `COURSE_NOT_FOUND`.
    pub(crate) async fn require_course(
        uow: &mut dyn UnitOfWork,
        ctx: &mut StatusContext,
        id: CourseId,
    ) -> Result<CourseRecord, AppError> {
        uow.find_course(id)
            .await?
            .ok_or_else(|| ctx.reject(ServerError::CourseNotFound, anyhow!("Course id not found {id}")))
    }

    #[instrument(skip(repo, ctx, dto))]
    pub async fn upsert_course(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<UpsertCourseDto>,
    ) -> Result<Course, AppError> {
        let Some(dto) = dto else {
            return Err(ctx.reject(ServerError::CourseMissing, anyhow!("Course is null")));
        };
        let dto = dto.normalized();
        dto.validate()
            .map_err(|e| ctx.reject(ServerError::CourseMissing, anyhow!("{}", format_errors(&e))))?;

        let mut uow = repo.begin().await?;
        let record = uow.save_course(&dto).await?;
        let course = Self::course_view(uow.as_mut(), record).await?;
        uow.commit().await?;

        audit_event!("upsert", "course", course.id = %course.id);
        track_entity_upserted("course");
        Ok(course)
    }

    #[instrument(skip(repo, ctx))]
    pub async fn get_course(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        req: Option<IdRequest>,
    ) -> Result<Course, AppError> {
        let Some(id) = req.and_then(|r| r.get::<CourseId>()) else {
            return Err(ctx.reject(ServerError::CourseMissing, anyhow!("Course id is null")));
        };

        let mut uow = repo.begin().await?;
        let record = Self::require_course(uow.as_mut(), ctx, id).await?;
        Self::course_view(uow.as_mut(), record).await
    }

    #[instrument(skip(repo, ctx))]
    pub async fn delete_course(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        req: Option<IdRequest>,
    ) -> Result<(), AppError> {
        let Some(id) = req.and_then(|r| r.get::<CourseId>()) else {
            return Err(ctx.reject(ServerError::CourseMissing, anyhow!("Course id is null")));
        };

        let mut uow = repo.begin().await?;
        let record = Self::require_course(uow.as_mut(), ctx, id).await?;
        let students = uow.students_by_course(id).await?;
        guard_course_delete(&record, &students).map_err(|e| ctx.reject(e.kind(), e))?;

        match uow.delete_course(id).await {
            Ok(_) => {}
            Err(e) if e.is_constraint_violation() => {
                return Err(ctx.reject(ServerError::DeleteCourseNotAllowed, e));
            }
            Err(e) => return Err(e.into()),
        }
        uow.commit().await?;

        audit_event!("delete", "course", course.id = %id);
        track_entity_deleted("course");
        Ok(())
    }

    #[instrument(skip(repo, ctx, dto))]
    pub async fn filter_courses(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<SimpleStringFilterDto>,
    ) -> Result<Slice<Course>, AppError> {
        let query = filter::resolve(dto.as_ref()).map_err(|e| ctx.reject(e.status_kind(), e))?;

        let mut uow = repo.begin().await?;
        let records = match query {
            FilterQuery::All(page) => uow.list_courses(page).await?,
            FilterQuery::Matching(criterion, page) => uow.search_courses(criterion, page).await?,
        };

        let Slice {
            content,
            page_number,
            page_size,
            has_next,
        } = records;
        let mut courses = Vec::with_capacity(content.len());
        for record in content {
            courses.push(Self::course_view(uow.as_mut(), record).await?);
        }

        Ok(Slice {
            content: courses,
            page_number,
            page_size,
            has_next,
        })
    }
}
