use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::TodoStore;
use crate::error::ApiError;
use crate::models::{CreateTodoRequest, TodoPatch, UpdateTodoRequest};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "filterDate")]
    filter_date: Option<String>,
}

pub async fn list_todos(
    State(store): State<TodoStore>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // An empty filterDate is the same as no filter.
    let filter_date = match query.filter_date.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ApiError::BadRequest(format!("Invalid filterDate: {raw}")))?,
        ),
    };

    let todos = store.list(filter_date).await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(store): State<TodoStore>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;

    if input.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".to_string()));
    }

    let todo = store.create(&input.text).await?;
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;

    // An empty text value leaves the stored text unchanged, so the text
    // column can never become empty through an update.
    let patch = TodoPatch {
        text: input.text.filter(|t| !t.trim().is_empty()),
        completed: input.completed,
    };

    if patch.is_empty() {
        return Err(ApiError::BadRequest(
            "Text or completed is required".to_string(),
        ));
    }

    let todo = store.update(id, &patch).await?;
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    store.delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Todo deleted successfully" })))
}
