pub mod student;

pub use student::{Student, StudentFields, StudentIn, StudentQuery, UNNAMED_PARENT};
