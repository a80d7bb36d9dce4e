//! Student record, its writable field set and the search query shape.

use crate::service::validation::{FieldRule, Schema};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Stored when a student is written without a parent.
pub const UNNAMED_PARENT: &str = "未名";

/// Active student as returned by every read path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub parent: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Create/update body.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct StudentIn {
    #[schema(max_length = 50)]
    pub name: String,
    #[serde(default)]
    #[schema(max_length = 30)]
    pub parent: Option<String>,
    #[serde(default)]
    #[schema(max_length = 50)]
    pub phone: Option<String>,
    #[serde(default)]
    #[schema(max_length = 5000)]
    pub address: Option<String>,
}

impl Schema for StudentIn {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::string("name").required().max_length(50),
            FieldRule::string("parent").max_length(30),
            FieldRule::string("phone").max_length(50),
            FieldRule::string("address").max_length(5000),
        ];
        RULES
    }
}

/// Every writable column, with defaults applied. Writes replace all of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub parent: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<StudentIn> for StudentFields {
    fn from(body: StudentIn) -> Self {
        StudentFields {
            name: body.name,
            parent: body.parent.unwrap_or_else(|| UNNAMED_PARENT.to_string()),
            phone: body.phone,
            address: body.address,
        }
    }
}

/// Search query string.
#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    /// Substring of the student name.
    pub q: String,
}

impl Schema for StudentQuery {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[FieldRule::string("q").required()];
        RULES
    }
}
