use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::shared::dimension::{CreateLayerRequest, IndexPattern, LayerSummary};
use uuid::Uuid;

use crate::shared::api_error::ApiError;
use crate::shared::workspace::SharedWorkspace;

/// GET /api/index-patterns
pub async fn list_index_patterns(
    State(workspace): State<SharedWorkspace>,
) -> Json<Vec<IndexPattern>> {
    let ws = workspace.lock().await;
    Json(ws.index_patterns().into_iter().cloned().collect())
}

/// GET /api/layers
pub async fn list_layers(State(workspace): State<SharedWorkspace>) -> Json<Vec<LayerSummary>> {
    let ws = workspace.lock().await;
    Json(ws.layers())
}

/// POST /api/layers
pub async fn create_layer(
    State(workspace): State<SharedWorkspace>,
    Json(request): Json<CreateLayerRequest>,
) -> Result<(StatusCode, Json<LayerSummary>), ApiError> {
    let mut ws = workspace.lock().await;
    let summary = ws.create_layer(Uuid::new_v4().to_string(), &request.index_pattern_id)?;
    Ok((StatusCode::CREATED, Json(summary)))
}
