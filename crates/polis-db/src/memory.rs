//! In-process repository.
//!
//! The store is an object graph: every teacher node lists the ids of its
//! courses and every course node lists the ids of its students, next to the
//! forward `teacher_id` / `course_id` columns of the records. Links are only
//! changed through [`relink`] and [`unlink`] so the two sides stay in step.
//!
//! A unit of work holds the store's lock for its whole lifetime and mutates a
//! working copy, which replaces the shared state on commit.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use polis_config::RepositoryKind;
use polis_core::{PageRequest, Slice};
use polis_models::associations::{relink, unlink};
use polis_models::{
    CourseId, CourseRecord, StudentId, StudentRecord, TeacherId, TeacherRecord,
    UpsertCourseDto, UpsertStudentDto, UpsertTeacherDto,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument};

use crate::repository::{
    ClearedCounts, CourseRepository, Repository, RepositoryError, RepositoryResult,
    StudentRepository, TeacherRepository, UnitOfWork,
};

#[derive(Debug, Clone)]
struct TeacherNode {
    record: TeacherRecord,
    courses: Vec<CourseId>,
}

#[derive(Debug, Clone)]
struct CourseNode {
    record: CourseRecord,
    students: Vec<StudentId>,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    teachers: BTreeMap<TeacherId, TeacherNode>,
    courses: BTreeMap<CourseId, CourseNode>,
    students: BTreeMap<StudentId, StudentRecord>,
    last_teacher_id: i64,
    last_course_id: i64,
    last_student_id: i64,
}

fn page_of<T: Clone>(rows: impl Iterator<Item = T>, page: PageRequest) -> Slice<T> {
    let rows = rows
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page.fetch_limit()).unwrap_or(usize::MAX))
        .collect();
    Slice::from_overfetch(rows, page)
}

fn contains(field: Option<&str>, criterion: &str) -> bool {
    field.is_some_and(|value| value.contains(criterion))
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork>> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(MemoryUnitOfWork { guard, working }))
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        Ok(())
    }

    fn kind(&self) -> RepositoryKind {
        RepositoryKind::Memory
    }
}

pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl MemoryUnitOfWork {
    fn course_node(&mut self, id: CourseId) -> RepositoryResult<&mut CourseNode> {
        self.working
            .courses
            .get_mut(&id)
            .ok_or(RepositoryError::MissingRow {
                entity: "course",
                id: id.into_inner(),
            })
    }

    fn teacher_node(&mut self, id: TeacherId) -> RepositoryResult<&mut TeacherNode> {
        self.working
            .teachers
            .get_mut(&id)
            .ok_or(RepositoryError::MissingRow {
                entity: "teacher",
                id: id.into_inner(),
            })
    }
}

#[async_trait]
impl CourseRepository for MemoryUnitOfWork {
    async fn find_course(&mut self, id: CourseId) -> RepositoryResult<Option<CourseRecord>> {
        Ok(self.working.courses.get(&id).map(|node| node.record.clone()))
    }

    async fn save_course(&mut self, course: &UpsertCourseDto) -> RepositoryResult<CourseRecord> {
        if let Some(node) = course.id.and_then(|id| self.working.courses.get_mut(&id)) {
            node.record.code = course.code.clone();
            node.record.title = course.title.clone();
            node.record.description = course.description.clone();
            node.record.year = course.year;
            return Ok(node.record.clone());
        }

        self.working.last_course_id += 1;
        let record = CourseRecord {
            id: CourseId::new(self.working.last_course_id),
            code: course.code.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            year: course.year,
            teacher_id: None,
        };
        self.working.courses.insert(
            record.id,
            CourseNode {
                record: record.clone(),
                students: Vec::new(),
            },
        );
        Ok(record)
    }

    async fn delete_course(&mut self, id: CourseId) -> RepositoryResult<bool> {
        let Some(node) = self.working.courses.get(&id) else {
            return Ok(false);
        };
        if !node.students.is_empty() {
            return Err(RepositoryError::ConstraintViolation {
                table: "students",
                message: format!("course {id} is still referenced by {} student(s)", node.students.len()),
            });
        }
        if let Some(teacher) = node.record.teacher_id
            && let Some(teacher) = self.working.teachers.get_mut(&teacher)
        {
            unlink(&mut teacher.courses, &id);
        }
        self.working.courses.remove(&id);
        Ok(true)
    }

    async fn list_courses(&mut self, page: PageRequest) -> RepositoryResult<Slice<CourseRecord>> {
        Ok(page_of(
            self.working.courses.values().map(|node| node.record.clone()),
            page,
        ))
    }

    async fn search_courses(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<CourseRecord>> {
        let matches = self
            .working
            .courses
            .values()
            .map(|node| &node.record)
            .filter(|c| {
                c.code.contains(criterion)
                    || c.title.contains(criterion)
                    || contains(c.description.as_deref(), criterion)
            })
            .cloned();
        Ok(page_of(matches, page))
    }

    async fn courses_by_teacher(
        &mut self,
        teacher: TeacherId,
    ) -> RepositoryResult<Vec<CourseRecord>> {
        let Some(node) = self.working.teachers.get(&teacher) else {
            return Ok(Vec::new());
        };
        Ok(node
            .courses
            .iter()
            .filter_map(|id| self.working.courses.get(id))
            .map(|course| course.record.clone())
            .collect())
    }

    #[instrument(skip(self))]
    async fn set_course_teacher(
        &mut self,
        course: CourseId,
        teacher: Option<TeacherId>,
    ) -> RepositoryResult<()> {
        if let Some(teacher) = teacher {
            self.teacher_node(teacher)?;
        }
        let previous = {
            let node = self.course_node(course)?;
            std::mem::replace(&mut node.record.teacher_id, teacher)
        };

        if let Some(previous) = previous
            && Some(previous) != teacher
            && let Some(node) = self.working.teachers.get_mut(&previous)
        {
            unlink(&mut node.courses, &course);
            debug!(%course, %previous, "Removed stale teacher link");
        }
        if let Some(teacher) = teacher {
            relink(&mut self.teacher_node(teacher)?.courses, course);
        }
        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for MemoryUnitOfWork {
    async fn find_teacher(&mut self, id: TeacherId) -> RepositoryResult<Option<TeacherRecord>> {
        Ok(self.working.teachers.get(&id).map(|node| node.record.clone()))
    }

    async fn save_teacher(&mut self, teacher: &UpsertTeacherDto) -> RepositoryResult<TeacherRecord> {
        if let Some(node) = teacher.id.and_then(|id| self.working.teachers.get_mut(&id)) {
            node.record.first_name = teacher.first_name.clone();
            node.record.last_name = teacher.last_name.clone();
            node.record.title = teacher.title.clone();
            return Ok(node.record.clone());
        }

        self.working.last_teacher_id += 1;
        let record = TeacherRecord {
            id: TeacherId::new(self.working.last_teacher_id),
            first_name: teacher.first_name.clone(),
            last_name: teacher.last_name.clone(),
            title: teacher.title.clone(),
        };
        self.working.teachers.insert(
            record.id,
            TeacherNode {
                record: record.clone(),
                courses: Vec::new(),
            },
        );
        Ok(record)
    }

    async fn delete_teacher(&mut self, id: TeacherId) -> RepositoryResult<bool> {
        let Some(node) = self.working.teachers.get(&id) else {
            return Ok(false);
        };
        if !node.courses.is_empty() {
            return Err(RepositoryError::ConstraintViolation {
                table: "courses",
                message: format!("teacher {id} is still referenced by {} course(s)", node.courses.len()),
            });
        }
        self.working.teachers.remove(&id);
        Ok(true)
    }

    async fn list_teachers(&mut self, page: PageRequest) -> RepositoryResult<Slice<TeacherRecord>> {
        Ok(page_of(
            self.working.teachers.values().map(|node| node.record.clone()),
            page,
        ))
    }

    async fn search_teachers(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<TeacherRecord>> {
        let matches = self
            .working
            .teachers
            .values()
            .map(|node| &node.record)
            .filter(|t| t.first_name.contains(criterion) || t.last_name.contains(criterion))
            .cloned();
        Ok(page_of(matches, page))
    }
}

#[async_trait]
impl StudentRepository for MemoryUnitOfWork {
    async fn find_student(&mut self, id: StudentId) -> RepositoryResult<Option<StudentRecord>> {
        Ok(self.working.students.get(&id).cloned())
    }

    async fn save_student(&mut self, student: &UpsertStudentDto) -> RepositoryResult<StudentRecord> {
        if let Some(record) = student.id.and_then(|id| self.working.students.get_mut(&id)) {
            record.first_name = student.first_name.clone();
            record.last_name = student.last_name.clone();
            record.email = student.email.clone();
            record.phone = student.phone.clone();
            record.serial_number = student.serial_number.clone();
            return Ok(record.clone());
        }

        self.working.last_student_id += 1;
        let record = StudentRecord {
            id: StudentId::new(self.working.last_student_id),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            serial_number: student.serial_number.clone(),
            course_id: None,
        };
        self.working.students.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_student(&mut self, id: StudentId) -> RepositoryResult<bool> {
        let Some(record) = self.working.students.remove(&id) else {
            return Ok(false);
        };
        if let Some(course) = record.course_id
            && let Some(node) = self.working.courses.get_mut(&course)
        {
            unlink(&mut node.students, &id);
        }
        Ok(true)
    }

    async fn list_students(&mut self, page: PageRequest) -> RepositoryResult<Slice<StudentRecord>> {
        Ok(page_of(self.working.students.values().cloned(), page))
    }

    async fn search_students(
        &mut self,
        criterion: &str,
        page: PageRequest,
    ) -> RepositoryResult<Slice<StudentRecord>> {
        let matches = self
            .working
            .students
            .values()
            .filter(|s| {
                s.first_name.contains(criterion)
                    || s.last_name.contains(criterion)
                    || contains(s.email.as_deref(), criterion)
            })
            .cloned();
        Ok(page_of(matches, page))
    }

    async fn students_by_course(
        &mut self,
        course: CourseId,
    ) -> RepositoryResult<Vec<StudentRecord>> {
        let Some(node) = self.working.courses.get(&course) else {
            return Ok(Vec::new());
        };
        Ok(node
            .students
            .iter()
            .filter_map(|id| self.working.students.get(id))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn set_student_course(
        &mut self,
        student: StudentId,
        course: Option<CourseId>,
    ) -> RepositoryResult<()> {
        if let Some(course) = course {
            self.course_node(course)?;
        }
        let previous = {
            let record = self
                .working
                .students
                .get_mut(&student)
                .ok_or(RepositoryError::MissingRow {
                    entity: "student",
                    id: student.into_inner(),
                })?;
            std::mem::replace(&mut record.course_id, course)
        };

        if let Some(previous) = previous
            && Some(previous) != course
            && let Some(node) = self.working.courses.get_mut(&previous)
        {
            unlink(&mut node.students, &student);
            debug!(%student, %previous, "Removed stale course link");
        }
        if let Some(course) = course {
            relink(&mut self.course_node(course)?.students, student);
        }
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        let MemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn clear(&mut self) -> RepositoryResult<ClearedCounts> {
        let counts = ClearedCounts {
            students: self.working.students.len() as u64,
            courses: self.working.courses.len() as u64,
            teachers: self.working.teachers.len() as u64,
        };
        self.working.students.clear();
        self.working.courses.clear();
        self.working.teachers.clear();
        Ok(counts)
    }
}
