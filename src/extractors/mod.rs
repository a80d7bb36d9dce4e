//! Extractors that validate path, query and body before a handler runs.

mod validated;

pub use validated::{IdPath, ValidatedJson, ValidatedQuery};
