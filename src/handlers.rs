use crate::errors::AppError;
use crate::extractors::StudentId;
use crate::models::{Student, StudentInput};
use crate::state::AppState;
use crate::store::{Store, StoreError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.store.list().await?))
}

pub async fn get_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<Json<Student>, AppError> {
    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound { id })
}

pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let student = Student::new(input.validate()?);

    let mut session = state.store.begin();
    session.insert(student.clone());
    session.commit().await?;

    info!(id = %student.id, "created student");
    let location = format!("/students/{}", student.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(student)))
}

/// Replaces the name and program of an existing student. A missing student
/// is reported as not found; this never inserts.
pub async fn upsert_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Json<Student>, AppError> {
    let Json(input) = payload?;
    let fields = input.validate()?;

    if !state.store.exists(id).await? {
        return Err(AppError::NotFound { id });
    }
    let mut student = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound { id })?;
    student.apply(fields);

    let student = commit_update(&state.store, student).await?;
    info!(%id, "updated student");
    Ok(Json(student))
}

/// A student deleted between lookup and commit is reported as not found.
async fn commit_update(store: &Store, student: Student) -> Result<Student, AppError> {
    let id = student.id;
    let mut session = store.begin();
    session.update(student.clone());
    match session.commit().await {
        Ok(()) => Ok(student),
        Err(StoreError::Missing { .. }) => Err(AppError::NotFound { id }),
        Err(err) => Err(err.into()),
    }
}

/// Deleting an unknown id is accepted as a no-op.
pub async fn delete_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<StatusCode, AppError> {
    if let Some(student) = state.store.find_by_id(id).await? {
        let mut session = state.store.begin();
        session.remove(&student);
        session.commit().await?;
        info!(%id, "deleted student");
    }
    Ok(StatusCode::ACCEPTED)
}
