//! Record handlers
//!
//! One generic handler per operation, instantiated for each record type
//! when the router is built.

use axum::{extract::State, response::Json};

use super::extract::Payload;
use crate::error::AppResult;
use crate::gateway::{self, Resource};
use crate::state::AppState;

/// POST /{records}/
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Payload(payload): Payload<R>,
) -> AppResult<Json<R::Record>> {
    let record = gateway::create_one(&state.db, payload).await?;
    Ok(Json(record))
}

/// GET /{records}/
pub async fn list<R: Resource>(State(state): State<AppState>) -> AppResult<Json<Vec<R::Record>>> {
    let records = gateway::list_all::<R>(&state.db).await?;
    Ok(Json(records))
}

/// POST /{records}/bulk/
pub async fn create_bulk<R: Resource>(
    State(state): State<AppState>,
    Payload(payloads): Payload<Vec<R>>,
) -> AppResult<Json<Vec<R::Record>>> {
    let records = gateway::create_many(&state.db, payloads).await?;
    Ok(Json(records))
}
