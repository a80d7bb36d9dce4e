//! Student handlers: get, list, search, create, update, delete.

use crate::auth::CurrentUser;
use crate::config::codemsg;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{IdPath, ValidatedJson, ValidatedQuery};
use crate::model::{Student, StudentIn, StudentQuery};
use crate::response::{success, SuccessBody};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};

/// Get one student by id.
#[utoipa::path(
    get,
    path = "/v2/student/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, body = Student),
        (status = 404, description = "Student not found", body = ErrorBody),
    ),
    tag = "student"
)]
pub async fn get_student(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Student>, AppError> {
    let student = state.students.get(id).await?;
    Ok(Json(student))
}

/// List every student.
#[utoipa::path(
    get,
    path = "/v2/student",
    responses((status = 200, body = Vec<Student>)),
    tag = "student"
)]
pub async fn get_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.students.list().await?))
}

/// Search students by a substring of their name.
#[utoipa::path(
    get,
    path = "/v2/student/search",
    params(StudentQuery),
    responses(
        (status = 200, body = Vec<Student>),
        (status = 400, description = "Missing q", body = ErrorBody),
    ),
    tag = "student"
)]
pub async fn search(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<StudentQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.students.search(&query.q).await?))
}

/// Create a student.
#[utoipa::path(
    post,
    path = "/v2/student",
    request_body = StudentIn,
    responses(
        (status = 201, description = "code 12", body = SuccessBody),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "student"
)]
pub async fn create_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(body): ValidatedJson<StudentIn>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.students.create(body).await?;
    tracing::info!(user = %user.sub, id = created.id, "student created");
    Ok(success(&state.settings.codes, codemsg::STUDENT_CREATED))
}

/// Replace a student's fields.
#[utoipa::path(
    put,
    path = "/v2/student/{id}",
    params(("id" = i32, Path, description = "Student id")),
    request_body = StudentIn,
    responses(
        (status = 201, description = "code 13", body = SuccessBody),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "student"
)]
pub async fn update_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<StudentIn>,
) -> Result<impl IntoResponse, AppError> {
    state.students.update(id, body).await?;
    tracing::info!(user = %user.sub, id, "student updated");
    Ok(success(&state.settings.codes, codemsg::STUDENT_UPDATED))
}

/// Soft-delete a student. Requires the 学生/删除学生 permission.
#[utoipa::path(
    delete,
    path = "/v2/student/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 201, description = "code 14", body = SuccessBody),
        (status = 401, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "student"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    state.students.delete(id).await?;
    tracing::info!(user = %user.sub, id, "student deleted");
    Ok(success(&state.settings.codes, codemsg::STUDENT_DELETED))
}
