//! HTTP handlers for the student resource and permission administration.

pub mod admin;
pub mod student;
pub use admin::*;
pub use student::*;
