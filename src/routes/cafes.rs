//! Café route handlers.
//!
//! Writes go through the form validator first; a failed validation
//! re-renders the same form with per-field messages and touches nothing in
//! the store. Deletion is confirmed on a GET page and performed only on
//! POST, so GET stays side-effect-free.

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use minijinja::context;
use validator::Validate;

use crate::db::cafes;
use crate::error::AppError;
use crate::forms::{self, CafeForm, ConfirmForm, FieldErrors};
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/add", get(add_form).post(add_submit))
        .route("/edit/{id}", get(edit_form).post(edit_submit))
        .route("/delete/{id}", get(delete_confirm).post(delete_submit))
}

/// GET / - list all cafés.
async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let cafes = cafes::list(&state.db).await?;
    views::render(&state.views, "home.html", context! { cafes })
}

/// GET /add - empty form.
async fn add_form(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    render_form(
        &state,
        "Add a new cafe",
        "/add",
        &CafeForm::default(),
        &FieldErrors::new(),
        StatusCode::OK,
    )
}

/// POST /add - validate, create, redirect home.
async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CafeForm>,
) -> Result<Response, AppError> {
    check_form_token(&state, &form.csrf_token)?;

    if let Err(errors) = form.validate() {
        return render_form(
            &state,
            "Add a new cafe",
            "/add",
            &form,
            &forms::field_errors(&errors),
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    let created = cafes::create(&state.db, &form.into_new_cafe()).await?;
    tracing::info!(id = created.id, name = %created.name, "cafe created");
    Ok(Redirect::to("/").into_response())
}

/// GET /edit/{id} - pre-populated form; 404 page when the id is unknown.
async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let cafe = cafes::get(&state.db, id).await?;
    render_form(
        &state,
        "Edit cafe",
        &format!("/edit/{id}"),
        &CafeForm::from_cafe(&cafe),
        &FieldErrors::new(),
        StatusCode::OK,
    )
}

/// POST /edit/{id} - validate, update in place, redirect home.
async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<CafeForm>,
) -> Result<Response, AppError> {
    check_form_token(&state, &form.csrf_token)?;

    if let Err(errors) = form.validate() {
        return render_form(
            &state,
            "Edit cafe",
            &format!("/edit/{id}"),
            &form,
            &forms::field_errors(&errors),
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    cafes::update(&state.db, id, &form.into_new_cafe()).await?;
    tracing::info!(id, "cafe updated");
    Ok(Redirect::to("/").into_response())
}

/// GET /delete/{id} - confirmation page only, nothing is removed here.
async fn delete_confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let cafe = cafes::get(&state.db, id).await?;
    views::render(
        &state.views,
        "confirm_delete.html",
        context! { cafe, csrf_token => &state.form_token },
    )
}

/// POST /delete/{id} - remove the row, redirect home.
async fn delete_submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<ConfirmForm>,
) -> Result<Response, AppError> {
    check_form_token(&state, &form.csrf_token)?;

    cafes::delete(&state.db, id).await?;
    tracing::info!(id, "cafe deleted");
    Ok(Redirect::to("/").into_response())
}

fn render_form(
    state: &AppState,
    title: &str,
    action: &str,
    form: &CafeForm,
    errors: &FieldErrors,
    status: StatusCode,
) -> Result<Response, AppError> {
    let page = views::render(
        &state.views,
        "cafe_form.html",
        context! {
            title,
            action,
            form,
            errors,
            csrf_token => &state.form_token,
        },
    )?;
    Ok((status, page).into_response())
}

fn check_form_token(state: &AppState, token: &str) -> Result<(), AppError> {
    if token != state.form_token {
        return Err(AppError::BadRequest(
            "The form token is missing or stale. Go back and try again.".into(),
        ));
    }
    Ok(())
}
