// SPDX-License-Identifier: MIT

//! HTTP surface over a registry of rule tables

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::DecisionError;
use crate::table::{engine, DecisionContext, TableRegistry};

/// Load the configured tables and serve them until the process stops
pub async fn serve(config: &ServerConfig) -> Result<(), DecisionError> {
    let registry = TableRegistry::new();
    let count = registry.load_dir(&config.tables_dir).await?;
    tracing::info!(
        "Loaded {} tables from {}",
        count,
        config.tables_dir.display()
    );

    let listener = config.bind().await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    serve_with(listener, registry).await
}

/// Serve `registry` on an already bound listener
pub async fn serve_with(
    listener: TcpListener,
    registry: TableRegistry,
) -> Result<(), DecisionError> {
    axum::serve(listener, router(registry)).await?;
    Ok(())
}

pub fn router(registry: TableRegistry) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/tables", get(list_tables))
        .route("/api/tables/{name}", get(get_table))
        .route("/api/tables/{name}/evaluate", post(evaluate_table))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(registry)
}

/// Error body returned to HTTP callers
struct ApiError(DecisionError);

impl From<DecisionError> for ApiError {
    fn from(err: DecisionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DecisionError::TableNotFound { .. } => StatusCode::NOT_FOUND,
            DecisionError::Context(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_tables(State(registry): State<TableRegistry>) -> Json<Value> {
    let mut tables = Vec::new();
    for name in registry.names().await {
        if let Some(table) = registry.get(&name).await {
            tables.push(json!({
                "name": name,
                "description": table.description(),
                "rules": table.len(),
            }));
        }
    }
    Json(json!(tables))
}

async fn get_table(
    State(registry): State<TableRegistry>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let table = registry
        .get(&name)
        .await
        .ok_or_else(|| DecisionError::table_not_found(&name))?;
    let body = serde_json::to_value(&*table).map_err(DecisionError::from)?;
    Ok(Json(body))
}

#[derive(Deserialize)]
struct EvaluationRequest {
    #[serde(default)]
    context: Map<String, Value>,
}

async fn evaluate_table(
    State(registry): State<TableRegistry>,
    Path(name): Path<String>,
    Json(payload): Json<EvaluationRequest>,
) -> Result<Json<Value>, ApiError> {
    let table = registry
        .get(&name)
        .await
        .ok_or_else(|| DecisionError::table_not_found(&name))?;

    let mut ctx = DecisionContext::from_json(&Value::Object(payload.context))
        .map_err(DecisionError::from)?;
    let outcome = engine::evaluate_traced(&table, &mut ctx);

    let id = Uuid::new_v4();
    tracing::info!(
        evaluation = %id,
        table = %name,
        rule = ?outcome.rule_index,
        "Evaluation finished"
    );

    let assignments: Map<String, Value> = outcome
        .assignments
        .iter()
        .map(|(column, value)| (column.clone(), value.to_json()))
        .collect();

    Ok(Json(json!({
        "id": id,
        "table": name,
        "matched": outcome.matched(),
        "rule": outcome.rule_index,
        "assignments": assignments,
        "context": ctx.to_json(),
    })))
}
