//! StudentService and request validation.

mod student;
pub mod validation;
pub use student::StudentService;
pub use validation::{FieldRule, RequestValidator, Schema};
