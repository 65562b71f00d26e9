//! Report handlers

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppResult;
use crate::report::{ParamInfo, ReportDef, CATALOG};
use crate::state::AppState;

/// Catalog listing entry
#[derive(Debug, Serialize)]
pub struct ReportInfo {
    pub number: u16,
    pub name: String,
    pub path: String,
    pub title: &'static str,
    pub parameters: Vec<ParamInfo>,
}

impl From<&ReportDef> for ReportInfo {
    fn from(def: &ReportDef) -> Self {
        Self {
            number: def.number,
            name: def.name(),
            path: def.path(),
            title: def.title,
            parameters: def.parameters(),
        }
    }
}

/// GET /Query{N}/
pub async fn run_report(
    def: &'static ReportDef,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<JsonValue>>> {
    let rows = def.run(&state.db, &params).await?;
    tracing::debug!("{} returned {} row(s)", def.name(), rows.len());
    Ok(Json(rows))
}

/// GET /reports/
pub async fn list_reports() -> Json<Vec<ReportInfo>> {
    Json(CATALOG.iter().map(ReportInfo::from).collect())
}
