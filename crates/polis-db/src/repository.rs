//! Repository traits.
//!
//! Every service operation runs against one [`UnitOfWork`], opened with
//! [`Repository::begin`]. Its writes become visible only after
//! [`UnitOfWork::commit`]; dropping it without committing discards them.
//!
//! ```ignore
//! let mut uow = repository.begin().await?;
//! let course = uow.find_course(course_id).await?;
//! uow.set_course_teacher(course_id, Some(teacher_id)).await?;
//! uow.commit().await?;
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use polis_config::RepositoryKind;
use polis_core::{PageRequest, Slice};
use polis_models::{
    CourseId, CourseRecord, StudentId, StudentRecord, TeacherId, TeacherRecord,
    UpsertCourseDto, UpsertStudentDto, UpsertTeacherDto,
};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A row could not be removed or changed because another row references it.
    #[error("Constraint violation on {table}: {message}")]
    ConstraintViolation {
        table: &'static str,
        message: String,
    },

    #[error("{entity} {id} does not exist")]
    MissingRow { entity: &'static str, id: i64 },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RepositoryError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

#[async_trait]
pub trait CourseRepository: Send {
    async fn find_course(&mut self, id: CourseId) -> RepositoryResult<Option<CourseRecord>>;

    /// Updates the course with `course.id` if it exists, inserts a new one
    /// otherwise. The teacher link of an existing course is kept.
    async fn save_course(&mut self, course: &UpsertCourseDto) -> RepositoryResult<CourseRecord>;

    /// Returns `false` if the course did not exist.
    async fn delete_course(&mut self, id: CourseId) -> RepositoryResult<bool>;

    async fn list_courses(&mut self, page: PageRequest) -> RepositoryResult<Slice<CourseRecord>>;

    /// Case-sensitive substring match on code, title or description.
    async fn search_courses(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<CourseRecord>>;

    async fn courses_by_teacher(&mut self, teacher: TeacherId)
    -> RepositoryResult<Vec<CourseRecord>>;

    /// Points the course at `teacher` and keeps the teacher side in step.
    async fn set_course_teacher(
        &mut self,
        course: CourseId,
        teacher: Option<TeacherId>,
    ) -> RepositoryResult<()>;
}

#[async_trait]
pub trait TeacherRepository: Send {
    async fn find_teacher(&mut self, id: TeacherId) -> RepositoryResult<Option<TeacherRecord>>;
    async fn save_teacher(&mut self, teacher: &UpsertTeacherDto) -> RepositoryResult<TeacherRecord>;
    async fn delete_teacher(&mut self, id: TeacherId) -> RepositoryResult<bool>;
    async fn list_teachers(&mut self, page: PageRequest) -> RepositoryResult<Slice<TeacherRecord>>;

    /// Case-sensitive substring match on first or last name.
    async fn search_teachers(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<TeacherRecord>>;
}

#[async_trait]
pub trait StudentRepository: Send {
    async fn find_student(&mut self, id: StudentId) -> RepositoryResult<Option<StudentRecord>>;

    /// The course link of an existing student is kept.
    async fn save_student(&mut self, student: &UpsertStudentDto) -> RepositoryResult<StudentRecord>;
    async fn delete_student(&mut self, id: StudentId) -> RepositoryResult<bool>;
    async fn list_students(&mut self, page: PageRequest) -> RepositoryResult<Slice<StudentRecord>>;

    /// Case-sensitive substring match on first name, last name or email.
    async fn search_students(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<StudentRecord>>;

    async fn students_by_course(&mut self, course: CourseId)
    -> RepositoryResult<Vec<StudentRecord>>;

    async fn set_student_course(
        &mut self,
        student: StudentId,
        course: Option<CourseId>,
    ) -> RepositoryResult<()>;
}

/// Row counts removed by [`UnitOfWork::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearedCounts {
    pub students: u64,
    pub courses: u64,
    pub teachers: u64,
}

/// One transaction spanning all three entity stores.
#[async_trait]
pub trait UnitOfWork: CourseRepository + TeacherRepository + StudentRepository {
    async fn commit(self: Box<Self>) -> RepositoryResult<()>;

    /// Removes every student, course and teacher, in that order.
    async fn clear(&mut self) -> RepositoryResult<ClearedCounts>;
}

#[async_trait]
pub trait Repository: Send + Sync + Debug {
    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork>>;

    async fn health_check(&self) -> RepositoryResult<()>;

    fn kind(&self) -> RepositoryKind;
}
