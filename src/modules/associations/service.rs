use anyhow::anyhow;
use polis_core::{AppError, ServerError, StatusContext};
use polis_db::{CourseRepository, Repository, StudentRepository, UnitOfWork};
use polis_models::{
    Course, CourseId, CourseRecord, CourseStudentAssocDto, CourseTeacherAssocDto, Relation,
    StudentId, TeacherId, Unlinked,
};
use tracing::{debug, instrument};

use crate::audit_event;
use crate::metrics::track_association;
use crate::modules::courses::service::CourseService;
use crate::modules::students::service::StudentService;
use crate::modules::teachers::service::TeacherService;

pub struct AssociationService;

impl AssociationService {
    async fn require_course(
        uow: &mut dyn UnitOfWork,
        ctx: &mut StatusContext,
        id: Option<CourseId>,
    ) -> Result<CourseRecord, AppError> {
        let Some(id) = id else {
            return Err(ctx.reject(ServerError::CourseMissing, anyhow!("Course id is null")));
        };
        CourseService::require_course(uow, ctx, id).await
    }

    fn require_id<I>(
        ctx: &mut StatusContext,
        id: Option<I>,
        kind: ServerError,
        entity: &str,
    ) -> Result<I, AppError> {
        id.ok_or_else(|| ctx.reject(kind, anyhow!("{entity} id is null")))
    }

    /// Assigns the teacher to the course, moving the course away from any
    /// previous teacher.
    #[instrument(skip(repo, ctx))]
    pub async fn associate_teacher(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<CourseTeacherAssocDto>,
    ) -> Result<Course, AppError> {
        let dto = dto.unwrap_or_default();
        let mut uow = repo.begin().await?;

        let course = Self::require_course(uow.as_mut(), ctx, dto.id_course).await?;
        let teacher_id: TeacherId =
            Self::require_id(ctx, dto.id_teacher, ServerError::TeacherMissing, "Teacher")?;
        TeacherService::require_teacher(uow.as_mut(), ctx, teacher_id).await?;

        uow.set_course_teacher(course.id, Some(teacher_id)).await?;
        let course = Self::reload(uow.as_mut(), course.id).await?;
        uow.commit().await?;

        audit_event!(
            "associate",
            Relation::CourseTeacher.as_str(),
            course.id = %course.id,
            teacher.id = %teacher_id
        );
        track_association(Relation::CourseTeacher.as_str(), "associate");
        Ok(course)
    }

    #[instrument(skip(repo, ctx))]
    pub async fn remove_teacher(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<CourseTeacherAssocDto>,
    ) -> Result<Course, AppError> {
        let dto = dto.unwrap_or_default();
        let mut uow = repo.begin().await?;

        let course = Self::require_course(uow.as_mut(), ctx, dto.id_course).await?;
        let teacher_id: TeacherId =
            Self::require_id(ctx, dto.id_teacher, ServerError::TeacherMissing, "Teacher")?;
        TeacherService::require_teacher(uow.as_mut(), ctx, teacher_id).await?;

        let outcome = if course.teacher_id == Some(teacher_id) {
            uow.set_course_teacher(course.id, None).await?;
            Unlinked::Removed
        } else {
            debug!(course.id = %course.id, teacher.id = %teacher_id, "Teacher does not teach the course");
            Unlinked::NotLinked
        };
        let course = Self::reload(uow.as_mut(), course.id).await?;
        uow.commit().await?;

        Self::report_unlink(Relation::CourseTeacher, outcome);
        Ok(course)
    }

    /// Enrolls the student in the course, moving the student away from any
    /// previous course.
    #[instrument(skip(repo, ctx))]
    pub async fn associate_student(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<CourseStudentAssocDto>,
    ) -> Result<Course, AppError> {
        let dto = dto.unwrap_or_default();
        let mut uow = repo.begin().await?;

        let course = Self::require_course(uow.as_mut(), ctx, dto.id_course).await?;
        let student_id: StudentId =
            Self::require_id(ctx, dto.id_student, ServerError::StudentMissing, "Student")?;
        StudentService::require_student(uow.as_mut(), ctx, student_id).await?;

        uow.set_student_course(student_id, Some(course.id)).await?;
        let course = Self::reload(uow.as_mut(), course.id).await?;
        uow.commit().await?;

        audit_event!(
            "associate",
            Relation::CourseStudent.as_str(),
            course.id = %course.id,
            student.id = %student_id
        );
        track_association(Relation::CourseStudent.as_str(), "associate");
        Ok(course)
    }

    #[instrument(skip(repo, ctx))]
    pub async fn remove_student(
        repo: &dyn Repository,
        ctx: &mut StatusContext,
        dto: Option<CourseStudentAssocDto>,
    ) -> Result<Course, AppError> {
        let dto = dto.unwrap_or_default();
        let mut uow = repo.begin().await?;

        let course = Self::require_course(uow.as_mut(), ctx, dto.id_course).await?;
        let student_id: StudentId =
            Self::require_id(ctx, dto.id_student, ServerError::StudentMissing, "Student")?;
        let student = StudentService::require_student(uow.as_mut(), ctx, student_id).await?;

        let outcome = if student.course_id == Some(course.id) {
            uow.set_student_course(student_id, None).await?;
            Unlinked::Removed
        } else {
            debug!(course.id = %course.id, student.id = %student_id, "Student is not enrolled in the course");
            Unlinked::NotLinked
        };
        let course = Self::reload(uow.as_mut(), course.id).await?;
        uow.commit().await?;

        Self::report_unlink(Relation::CourseStudent, outcome);
        Ok(course)
    }

    async fn reload(uow: &mut dyn UnitOfWork, id: CourseId) -> Result<Course, AppError> {
        let record = uow
            .find_course(id)
            .await?
            .ok_or_else(|| AppError::internal(anyhow!("Course {id} vanished inside its transaction")))?;
        CourseService::course_view(uow, record).await
    }

    fn report_unlink(relation: Relation, outcome: Unlinked) {
        match outcome {
            Unlinked::Removed => {
                audit_event!("dissociate", relation.as_str(), relation = %relation);
                track_association(relation.as_str(), "dissociate");
            }
            Unlinked::NotLinked => track_association(relation.as_str(), "noop"),
        }
    }
}
