//! Person HTTP Routes
//!
//! CRUD endpoints mounted under `/api`.
//!
//! | Verb   | Path           | Success | Not found |
//! |--------|----------------|---------|-----------|
//! | GET    | `/persons`     | 200     |           |
//! | GET    | `/persons/:id` | 200     | 404       |
//! | POST   | `/persons`     | 201     |           |
//! | PUT    | `/persons/:id` | 200     | 404       |
//! | DELETE | `/persons/:id` | 204     | 204       |

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::errors::ApiResult;
use super::extract::{JsonBody, PathId};
use super::state::AppState;
use crate::person::{NewPerson, Person};

#[derive(Debug, Deserialize)]
pub struct UpdatePersonRequest {
    #[serde(default)]
    pub number: Option<String>,
}

/// Create person routes
pub fn person_routes(state: AppState) -> Router {
    Router::new()
        .route("/persons", get(list_persons_handler).post(create_person_handler))
        .route(
            "/persons/:id",
            get(get_person_handler)
                .put(update_person_handler)
                .delete(delete_person_handler),
        )
        .with_state(state)
}

async fn list_persons_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Person>>> {
    Ok(Json(state.people.list_all().await?))
}

async fn get_person_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> ApiResult<Response> {
    let response = match state.people.find_by_id(&id).await? {
        Some(person) => Json(person).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

async fn create_person_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewPerson>,
) -> ApiResult<(StatusCode, Json<Person>)> {
    let person = state.people.create(request).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

async fn update_person_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(request): JsonBody<UpdatePersonRequest>,
) -> ApiResult<Response> {
    let response = match state
        .people
        .update_number(&id, request.number.as_deref())
        .await?
    {
        Some(person) => Json(person).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

async fn delete_person_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    state.people.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
