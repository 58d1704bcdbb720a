//! Seeding configuration and results.

/// Number of records to generate per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    pub teachers: usize,
    pub courses: usize,
    pub students: usize,
}

impl SeedConfig {
    pub fn new(teachers: usize, courses: usize, students: usize) -> Self {
        Self {
            teachers,
            courses,
            students,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 5,
            courses: 20,
            students: 200,
        }
    }
}

/// Counts of records written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub teachers: usize,
    pub courses: usize,
    pub students: usize,
    pub courses_assigned: usize,
    pub students_enrolled: usize,
}
