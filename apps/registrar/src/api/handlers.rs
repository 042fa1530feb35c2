//! # Request Handlers
//!
//! One handler per student operation. Each request is independent: bind,
//! validate, then at most one call into the registry.
//!
//! Failed validation re-renders the form with status 200 and never touches
//! storage. Successful writes answer with 303 to the list.

use super::{
    AppState, STUDENTS_PATH,
    error::AppError,
    types::{HealthResponse, StudentForm},
    views::{FormMode, StudentFormPage, StudentListPage, render},
};
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use registrar_core::{Student, StudentId, Violations, validate};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// `GET /` sends visitors to the list.
pub async fn index_handler() -> Redirect {
    Redirect::to(STUDENTS_PATH)
}

// =============================================================================
// LIST
// =============================================================================

/// `GET /students` - every stored student.
pub async fn list_students(State(state): State<AppState>) -> Result<Response, AppError> {
    let students = state.registry.read().await.find_all()?;
    tracing::debug!(count = students.len(), "listing students");
    Ok(render(&StudentListPage::new(students))?.into_response())
}

// =============================================================================
// CREATE
// =============================================================================

/// `GET /students/new` - blank form.
pub async fn show_create_form() -> Result<Response, AppError> {
    let page = StudentFormPage::new(FormMode::Create, &Student::new(), &Violations::new());
    Ok(render(&page)?.into_response())
}

/// `POST /students` - insert a new student.
pub async fn submit_create(
    State(state): State<AppState>,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let bound = form.bind();
    let student = bound.student;
    let mut violations = bound.violations;
    violations.merge_uncovered(validate(&student));

    if !violations.is_empty() {
        tracing::info!(violations = violations.len(), "create rejected by validation");
        let page = StudentFormPage::new(FormMode::Create, &student, &violations)
            .with_rejected_date(bound.rejected_date_of_birth);
        return Ok(render(&page)?.into_response());
    }

    let saved = state.registry.write().await.save(student)?;
    if let Some(id) = saved.id {
        tracing::info!(student_id = %id, "student created");
    }
    Ok(Redirect::to(STUDENTS_PATH).into_response())
}

// =============================================================================
// EDIT / UPDATE
// =============================================================================

/// `GET /students/edit/{id}` - form pre-filled from storage.
pub async fn show_edit_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let id = StudentId(id);
    let student = state.registry.read().await.get(id)?;
    let page = StudentFormPage::new(FormMode::Edit(id), &student, &Violations::new());
    Ok(render(&page)?.into_response())
}

/// `POST /students/{id}` - replace an existing student.
///
/// The identity is taken from the path and reattached before validation so
/// a re-rendered form still targets the same record. Unknown identities are
/// a 404 whether or not the submission is valid.
pub async fn submit_update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let id = StudentId(id);
    state.registry.read().await.get(id)?;

    let bound = form.bind();
    let mut student = bound.student;
    student.id = Some(id);
    let mut violations = bound.violations;
    violations.merge_uncovered(validate(&student));

    if !violations.is_empty() {
        tracing::info!(
            student_id = %id,
            violations = violations.len(),
            "update rejected by validation"
        );
        let page = StudentFormPage::new(FormMode::Edit(id), &student, &violations)
            .with_rejected_date(bound.rejected_date_of_birth);
        return Ok(render(&page)?.into_response());
    }

    state.registry.write().await.save(student)?;
    tracing::info!(student_id = %id, "student updated");
    Ok(Redirect::to(STUDENTS_PATH).into_response())
}

// =============================================================================
// DELETE
// =============================================================================

/// `GET /students/delete/{id}` - remove a student, no confirmation.
///
/// Unknown identities are a no-op, so repeating a delete is harmless.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let id = StudentId(id);
    let removed = state.registry.write().await.delete_by_id(id)?;
    if removed {
        tracing::info!(student_id = %id, "student deleted");
    } else {
        tracing::debug!(student_id = %id, "delete of unknown student ignored");
    }
    Ok(Redirect::to(STUDENTS_PATH).into_response())
}
