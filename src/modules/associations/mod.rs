//! Course-Teacher and Course-Student link management.

pub mod controller;
pub mod router;
pub mod service;

pub use polis_models::requests::{CourseStudentAssocDto, CourseTeacherAssocDto};
pub use router::init_associations_router;
