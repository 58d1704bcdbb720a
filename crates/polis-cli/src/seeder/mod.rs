//! Seeding and clearing through the repository layer.
//!
//! Every run is a single unit of work: either all generated records are
//! stored and linked, or none are.

pub mod generate;
pub mod models;

use std::time::Instant;

use polis_db::{
    ClearedCounts, CourseRepository, Repository, RepositoryResult, StudentRepository,
    TeacherRepository,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use generate::{assign_randomly, generate_courses, generate_students, generate_teachers};
pub use models::{SeedConfig, SeedReport};

/// Inserts fake teachers, courses and students, then gives every course a
/// random teacher and every student a random course.
pub async fn seed_all(repo: &dyn Repository, config: &SeedConfig) -> RepositoryResult<SeedReport> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} teachers, {} courses, {} students...",
        config.teachers, config.courses, config.students
    );

    let teachers = generate_teachers(config.teachers);
    let courses = generate_courses(config.courses);
    let students = generate_students(config.students);
    println!("   ✓ Generated records in {:?}", start_time.elapsed());

    let mut uow = repo.begin().await?;
    let mut report = SeedReport::default();

    let mut teacher_ids = Vec::with_capacity(teachers.len());
    for teacher in &teachers {
        teacher_ids.push(uow.save_teacher(teacher).await?.id);
    }
    report.teachers = teacher_ids.len();

    let mut course_ids = Vec::with_capacity(courses.len());
    for course in &courses {
        course_ids.push(uow.save_course(course).await?.id);
    }
    report.courses = course_ids.len();

    let mut student_ids = Vec::with_capacity(students.len());
    for student in &students {
        student_ids.push(uow.save_student(student).await?.id);
    }
    report.students = student_ids.len();

    let (course_teachers, student_courses) = {
        let mut rng = StdRng::from_entropy();
        (
            assign_randomly(course_ids.len(), &teacher_ids, &mut rng),
            assign_randomly(student_ids.len(), &course_ids, &mut rng),
        )
    };

    for (course, teacher) in course_ids.iter().zip(&course_teachers) {
        uow.set_course_teacher(*course, Some(*teacher)).await?;
        report.courses_assigned += 1;
    }
    for (student, course) in student_ids.iter().zip(&student_courses) {
        uow.set_student_course(*student, Some(*course)).await?;
        report.students_enrolled += 1;
    }

    uow.commit().await?;

    println!(
        "   ✓ Stored {} teachers, {} courses, {} students in {:?}",
        report.teachers,
        report.courses,
        report.students,
        start_time.elapsed()
    );
    Ok(report)
}

/// Deletes every student, course and teacher.
pub async fn clear_all(repo: &dyn Repository) -> RepositoryResult<ClearedCounts> {
    let start_time = Instant::now();
    println!("🗑️  Clearing registry...");

    let mut uow = repo.begin().await?;
    let counts = uow.clear().await?;
    uow.commit().await?;

    println!(
        "   ✓ Deleted {} students, {} courses, {} teachers in {:?}",
        counts.students,
        counts.courses,
        counts.teachers,
        start_time.elapsed()
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polis_db::MemoryRepository;
    use polis_core::PageRequest;

    #[tokio::test]
    async fn test_seed_links_every_record() {
        let repo = MemoryRepository::new();
        let report = seed_all(&repo, &SeedConfig::new(2, 4, 10)).await.unwrap();

        assert_eq!(report.courses_assigned, 4);
        assert_eq!(report.students_enrolled, 10);

        let mut uow = repo.begin().await.unwrap();
        let courses = uow.list_courses(PageRequest::first()).await.unwrap();
        assert!(courses.content.iter().all(|c| c.teacher_id.is_some()));
        let students = uow.list_students(PageRequest::first()).await.unwrap();
        assert!(students.content.iter().all(|s| s.course_id.is_some()));
    }

    #[tokio::test]
    async fn test_seed_without_teachers_leaves_courses_unassigned() {
        let repo = MemoryRepository::new();
        let report = seed_all(&repo, &SeedConfig::new(0, 3, 0)).await.unwrap();
        assert_eq!(report.courses, 3);
        assert_eq!(report.courses_assigned, 0);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let repo = MemoryRepository::new();
        seed_all(&repo, &SeedConfig::new(2, 3, 5)).await.unwrap();

        let counts = clear_all(&repo).await.unwrap();
        assert_eq!(counts, ClearedCounts { students: 5, courses: 3, teachers: 2 });

        let mut uow = repo.begin().await.unwrap();
        assert!(uow.list_teachers(PageRequest::first()).await.unwrap().is_empty());
    }
}
