//! Domain model: the student record and its derived grade

pub mod grade;
pub mod student;

pub use grade::Grade;
pub use student::StudentRecord;
