pub mod associations;
pub mod courses;
pub mod students;
pub mod teachers;

pub use self::courses::model::Course;
pub use self::students::model::Student;
pub use self::teachers::model::Teacher;
