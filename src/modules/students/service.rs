use anyhow::anyhow;
use polis_core::filter::{self, FilterQuery, SimpleStringFilterDto};
use polis_core::{AppError, ServerError, Slice, StatusContext};
use polis_db::{CourseRepository, Repository, StudentRepository, UnitOfWork};
use polis_models::StudentId;
use polis_models::associations::guard_student_delete;
use tracing::instrument;
use validator::Validate;

use crate::audit_event;
use crate::metrics::{track_entity_deleted, track_entity_upserted};
use crate::modules::students::model::{IdRequest, Student, StudentRecord, UpsertStudentDto};
use crate::validator::format_errors;

pub struct StudentService;

impl StudentService {
    pub(crate) async fn student_view(
        uow: &mut dyn UnitOfWork,
        record: StudentRecord,
    ) -> Result<Student, AppError> {
        let course = match record.course_id {
            Some(course_id) => uow.find_course(course_id).await?,
            None => None,
        };
        Ok(Student::from_parts(record, course.as_ref()))
    }

    pub(crate) async fn require_student(
        uow: &mut dyn UnitOfWork,
        ctx: &mut StatusContext,
        id: StudentId,
    ) -> Result<StudentRecord, AppError> {
        uow.find_student(id).await?.ok_or_else(|| {
            ctx.reject(ServerError::StudentNotFound, anyhow!("Student id not found {id}"))
        })
    }

    #[instrument(skip(repo, ctx, dto))]
    pub async fn upsert_student(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<UpsertStudentDto>,
    ) -> Result<Student, AppError> {
        let Some(dto) = dto else {
            return Err(ctx.reject(ServerError::StudentMissing, anyhow!("Student is null")));
        };
        let dto = dto.normalized();
        dto.validate()
            .map_err(|e| ctx.reject(ServerError::StudentMissing, anyhow!("{}", format_errors(&e))))?;

        let mut uow = repo.begin().await?;
        let record = uow.save_student(&dto).await?;
        let student = Self::student_view(uow.as_mut(), record).await?;
        uow.commit().await?;

        audit_event!("upsert", "student", student.id = %student.id);
        track_entity_upserted("student");
        Ok(student)
    }

    #[instrument(skip(repo, ctx))]
    pub async fn get_student(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        req: Option<IdRequest>,
    ) -> Result<Student, AppError> {
        let Some(id) = req.and_then(|r| r.get::<StudentId>()) else {
            return Err(ctx.reject(ServerError::StudentMissing, anyhow!("Student id is null")));
        };

        let mut uow = repo.begin().await?;
        let record = Self::require_student(uow.as_mut(), ctx, id).await?;
        Self::student_view(uow.as_mut(), record).await
    }

    /// Rejected while the student is enrolled in a course.
    #[instrument(skip(repo, ctx))]
    pub async fn delete_student(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        req: Option<IdRequest>,
    ) -> Result<(), AppError> {
        let Some(id) = req.and_then(|r| r.get::<StudentId>()) else {
            return Err(ctx.reject(ServerError::StudentMissing, anyhow!("Student id is null")));
        };

        let mut uow = repo.begin().await?;
        let record = Self::require_student(uow.as_mut(), ctx, id).await?;
        guard_student_delete(&record).map_err(|e| ctx.reject(e.kind(), e))?;

        match uow.delete_student(id).await {
            Ok(_) => {}
            Err(e) if e.is_constraint_violation() => {
                return Err(ctx.reject(ServerError::DeleteStudentNotAllowed, e));
            }
            Err(e) => return Err(e.into()),
        }
        uow.commit().await?;

        audit_event!("delete", "student", student.id = %id);
        track_entity_deleted("student");
        Ok(())
    }

    #[instrument(skip(repo, ctx, dto))]
    pub async fn filter_students(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<SimpleStringFilterDto>,
    ) -> Result<Slice<Student>, AppError> {
        let query = filter::resolve(dto.as_ref()).map_err(|e| ctx.reject(e.status_kind(), e))?;

        let mut uow = repo.begin().await?;
        let records = match query {
            FilterQuery::All(page) => uow.list_students(page).await?,
            FilterQuery::Matching(criterion, page) => uow.search_students(criterion, page).await?,
        };

        let mut students = Vec::with_capacity(records.len());
        for record in records.content {
            students.push(Self::student_view(uow.as_mut(), record).await?);
        }

        Ok(Slice {
            content: students,
            page_number: records.page_number,
            page_size: records.page_size,
            has_next: records.has_next,
        })
    }
}
