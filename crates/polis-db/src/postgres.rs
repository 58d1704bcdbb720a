//! PostgreSQL repository.
//!
//! The reverse side of each relationship is derived from the foreign key
//! column (`courses.teacher_id`, `students.course_id`), so a single `UPDATE`
//! writes both sides of a link.

use async_trait::async_trait;
use polis_config::RepositoryKind;
use polis_core::{PageRequest, Slice};
use polis_models::{
    CourseId, CourseRecord, StudentId, StudentRecord, TeacherId, TeacherRecord,
    UpsertCourseDto, UpsertStudentDto, UpsertTeacherDto,
};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::repository::{
    ClearedCounts, CourseRepository, Repository, RepositoryError, RepositoryResult,
    StudentRepository, TeacherRepository, UnitOfWork,
};

const COURSE_COLUMNS: &str = "id, code, title, description, year, teacher_id";
const TEACHER_COLUMNS: &str = "id, first_name, last_name, title";
const STUDENT_COLUMNS: &str = "id, first_name, last_name, email, phone, serial_number, course_id";

/// Maps a foreign key violation raised by a write on `table`.
fn classify(table: &'static str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::ConstraintViolation {
            table,
            message: db_err.message().to_string(),
        };
    }
    RepositoryError::Database(err)
}

#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn kind(&self) -> RepositoryKind {
        RepositoryKind::Postgres
    }
}

pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CourseRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_course(&mut self, id: CourseId) -> RepositoryResult<Option<CourseRecord>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        let course = sqlx::query_as::<_, CourseRecord>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(course)
    }

    #[instrument(skip(self, course), fields(course.id = ?course.id))]
    async fn save_course(&mut self, course: &UpsertCourseDto) -> RepositoryResult<CourseRecord> {
        if let Some(id) = course.id {
            let sql = format!(
                "UPDATE courses SET code = $2, title = $3, description = $4, year = $5
                 WHERE id = $1 RETURNING {COURSE_COLUMNS}"
            );
            let updated = sqlx::query_as::<_, CourseRecord>(&sql)
                .bind(id)
                .bind(&course.code)
                .bind(&course.title)
                .bind(&course.description)
                .bind(course.year)
                .fetch_optional(&mut *self.tx)
                .await?;
            if let Some(updated) = updated {
                return Ok(updated);
            }
        }

        let sql = format!(
            "INSERT INTO courses (code, title, description, year)
             VALUES ($1, $2, $3, $4) RETURNING {COURSE_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, CourseRecord>(&sql)
            .bind(&course.code)
            .bind(&course.title)
            .bind(&course.description)
            .bind(course.year)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn delete_course(&mut self, id: CourseId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| classify("students", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_courses(&mut self, page: PageRequest) -> RepositoryResult<Slice<CourseRecord>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, CourseRecord>(&sql)
            .bind(page.fetch_limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(Slice::from_overfetch(rows, page))
    }

    #[instrument(skip(self))]
    async fn search_courses(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<CourseRecord>> {
        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE strpos(code, $1) > 0
                OR strpos(title, $1) > 0
                OR strpos(coalesce(description, ''), $1) > 0
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, CourseRecord>(&sql)
            .bind(criterion)
            .bind(page.fetch_limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(Slice::from_overfetch(rows, page))
    }

    async fn courses_by_teacher(
        &mut self,
        teacher: TeacherId,
    ) -> RepositoryResult<Vec<CourseRecord>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE teacher_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, CourseRecord>(&sql)
            .bind(teacher)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn set_course_teacher(
        &mut self,
        course: CourseId,
        teacher: Option<TeacherId>,
    ) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE courses SET teacher_id = $2 WHERE id = $1")
            .bind(course)
            .bind(teacher)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| classify("courses", e))?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::MissingRow {
                entity: "course",
                id: course.into_inner(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_teacher(&mut self, id: TeacherId) -> RepositoryResult<Option<TeacherRecord>> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1");
        let teacher = sqlx::query_as::<_, TeacherRecord>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(teacher)
    }

    #[instrument(skip(self, teacher), fields(teacher.id = ?teacher.id))]
    async fn save_teacher(&mut self, teacher: &UpsertTeacherDto) -> RepositoryResult<TeacherRecord> {
        if let Some(id) = teacher.id {
            let sql = format!(
                "UPDATE teachers SET first_name = $2, last_name = $3, title = $4
                 WHERE id = $1 RETURNING {TEACHER_COLUMNS}"
            );
            let updated = sqlx::query_as::<_, TeacherRecord>(&sql)
                .bind(id)
                .bind(&teacher.first_name)
                .bind(&teacher.last_name)
                .bind(&teacher.title)
                .fetch_optional(&mut *self.tx)
                .await?;
            if let Some(updated) = updated {
                return Ok(updated);
            }
        }

        let sql = format!(
            "INSERT INTO teachers (first_name, last_name, title)
             VALUES ($1, $2, $3) RETURNING {TEACHER_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, TeacherRecord>(&sql)
            .bind(&teacher.first_name)
            .bind(&teacher.last_name)
            .bind(&teacher.title)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn delete_teacher(&mut self, id: TeacherId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| classify("courses", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_teachers(&mut self, page: PageRequest) -> RepositoryResult<Slice<TeacherRecord>> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, TeacherRecord>(&sql)
            .bind(page.fetch_limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(Slice::from_overfetch(rows, page))
    }

    #[instrument(skip(self))]
    async fn search_teachers(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<TeacherRecord>> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers
             WHERE strpos(first_name, $1) > 0 OR strpos(last_name, $1) > 0
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, TeacherRecord>(&sql)
            .bind(criterion)
            .bind(page.fetch_limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(Slice::from_overfetch(rows, page))
    }
}

#[async_trait]
impl StudentRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn find_student(&mut self, id: StudentId) -> RepositoryResult<Option<StudentRecord>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
        let student = sqlx::query_as::<_, StudentRecord>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(student)
    }

    #[instrument(skip(self, student), fields(student.id = ?student.id))]
    async fn save_student(&mut self, student: &UpsertStudentDto) -> RepositoryResult<StudentRecord> {
        if let Some(id) = student.id {
            let sql = format!(
                "UPDATE students
                 SET first_name = $2, last_name = $3, email = $4, phone = $5, serial_number = $6
                 WHERE id = $1 RETURNING {STUDENT_COLUMNS}"
            );
            let updated = sqlx::query_as::<_, StudentRecord>(&sql)
                .bind(id)
                .bind(&student.first_name)
                .bind(&student.last_name)
                .bind(&student.email)
                .bind(&student.phone)
                .bind(&student.serial_number)
                .fetch_optional(&mut *self.tx)
                .await?;
            if let Some(updated) = updated {
                return Ok(updated);
            }
        }

        let sql = format!(
            "INSERT INTO students (first_name, last_name, email, phone, serial_number)
             VALUES ($1, $2, $3, $4, $5) RETURNING {STUDENT_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, StudentRecord>(&sql)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .bind(&student.phone)
            .bind(&student.serial_number)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn delete_student(&mut self, id: StudentId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_students(&mut self, page: PageRequest) -> RepositoryResult<Slice<StudentRecord>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, StudentRecord>(&sql)
            .bind(page.fetch_limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(Slice::from_overfetch(rows, page))
    }

    #[instrument(skip(self))]
    async fn search_students(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<StudentRecord>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE strpos(first_name, $1) > 0
                OR strpos(last_name, $1) > 0
                OR strpos(coalesce(email, ''), $1) > 0
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, StudentRecord>(&sql)
            .bind(criterion)
            .bind(page.fetch_limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(Slice::from_overfetch(rows, page))
    }

    async fn students_by_course(
        &mut self,
        course: CourseId,
    ) -> RepositoryResult<Vec<StudentRecord>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE course_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, StudentRecord>(&sql)
            .bind(course)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn set_student_course(
        &mut self,
        student: StudentId,
        course: Option<CourseId>,
    ) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE students SET course_id = $2 WHERE id = $1")
            .bind(student)
            .bind(course)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| classify("students", e))?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::MissingRow {
                entity: "student",
                id: student.into_inner(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&mut self) -> RepositoryResult<ClearedCounts> {
        let students = sqlx::query("DELETE FROM students")
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        let courses = sqlx::query("DELETE FROM courses")
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        let teachers = sqlx::query("DELETE FROM teachers")
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(ClearedCounts {
            students,
            courses,
            teachers,
        })
    }
}
