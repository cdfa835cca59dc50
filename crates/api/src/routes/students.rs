//! Student Routes
//!
//! Every handler loads the whole record file, and mutating handlers write it
//! back whole on success. File I/O runs on the blocking pool.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use data_validator::ValidationError;
use metrics::counter;
use serde::Deserialize;
use std::sync::Arc;
use storage::RollNumber;
use tracing::{debug, info};

use super::{load_records, save_records};
use crate::error::ApiError;
use crate::pages::{self, FormValues};
use crate::AppState;

const LISTING: &str = "/students";

/// Fields of the create form
#[derive(Debug, Deserialize)]
pub struct NewStudentForm {
    pub roll_no: String,
    pub name: String,
    pub marks: String,
}

/// Fields of the update form; both optional
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub marks: String,
}

fn record_rejection(err: &ValidationError) {
    debug!("Rejected {} field: {}", err.field(), err);
    counter!("validation_failures_total", "field" => err.field()).increment(1);
}

/// Home redirects to the listing
pub async fn home() -> Redirect {
    Redirect::to(LISTING)
}

/// List every student with derived grade
pub async fn list_students(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let records = load_records(&state.store).await?;
    Ok(Html(pages::students_list(&records)))
}

/// Blank create form
pub async fn add_student_form() -> Html<String> {
    Html(pages::add_student(None, FormValues::default()))
}

/// Create a student
pub async fn add_student(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewStudentForm>,
) -> Result<Response, ApiError> {
    let mut records = load_records(&state.store).await?;

    let (roll_no, record) = match state.validator.validate_new_student(
        &records,
        &form.roll_no,
        &form.name,
        &form.marks,
    ) {
        Ok(accepted) => accepted,
        Err(err) => {
            record_rejection(&err);
            let values = FormValues {
                roll_no: &form.roll_no,
                name: &form.name,
                marks: &form.marks,
            };
            return Ok(Html(pages::add_student(Some(&err.to_string()), values)).into_response());
        }
    };

    info!("Adding student {} ({})", roll_no, record.name);
    records.insert(roll_no, record);
    save_records(&state.store, records).await?;
    counter!("students_created_total").increment(1);

    Ok(Redirect::to(LISTING).into_response())
}

/// Delete a student; unknown roll numbers are already satisfied
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(roll_no): Path<RollNumber>,
) -> Result<Redirect, ApiError> {
    let mut records = load_records(&state.store).await?;

    if records.remove(roll_no).is_some() {
        save_records(&state.store, records).await?;
        info!("Deleted student {}", roll_no);
        counter!("students_deleted_total").increment(1);
    } else {
        debug!("Delete of unknown student {} ignored", roll_no);
    }

    Ok(Redirect::to(LISTING))
}

/// Edit form for an existing student
pub async fn update_student_form(
    State(state): State<Arc<AppState>>,
    Path(roll_no): Path<RollNumber>,
) -> Result<Response, ApiError> {
    let records = load_records(&state.store).await?;
    let response = match records.get(roll_no) {
        Some(record) => {
            Html(pages::update_student(roll_no, record, None, FormValues::default())).into_response()
        }
        None => Redirect::to(LISTING).into_response(),
    };
    Ok(response)
}

/// Apply the non-blank fields of the edit form
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(roll_no): Path<RollNumber>,
    Form(form): Form<UpdateStudentForm>,
) -> Result<Response, ApiError> {
    let mut records = load_records(&state.store).await?;

    let Some(record) = records.get_mut(roll_no) else {
        return Ok(Redirect::to(LISTING).into_response());
    };

    let update = match state.validator.validate_update(&form.name, &form.marks) {
        Ok(update) => update,
        Err(err) => {
            record_rejection(&err);
            let values = FormValues {
                roll_no: "",
                name: &form.name,
                marks: &form.marks,
            };
            let page = pages::update_student(roll_no, record, Some(&err.to_string()), values);
            return Ok(Html(page).into_response());
        }
    };

    if update.is_empty() {
        debug!("Update of student {} changed nothing", roll_no);
        return Ok(Redirect::to(LISTING).into_response());
    }

    update.apply(record);
    info!("Updated student {}", roll_no);
    save_records(&state.store, records).await?;
    counter!("students_updated_total").increment(1);

    Ok(Redirect::to(LISTING).into_response())
}
