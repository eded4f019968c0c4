use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::shared::dimension::{
    ChooseFieldRequest, ClickOperationRequest, ClickOperationResponse, EditorView, SetLabelRequest,
};

use crate::shared::api_error::ApiError;
use crate::shared::workspace::SharedWorkspace;

type DimensionPath = Path<(String, String)>;

/// GET /api/layers/:layer_id/columns/:column_id/editor
pub async fn get_editor(
    State(workspace): State<SharedWorkspace>,
    Path((layer_id, column_id)): DimensionPath,
) -> Result<Json<EditorView>, ApiError> {
    let mut ws = workspace.lock().await;
    let view = ws.with_editor(&layer_id, &column_id, |editor, ctx, store| {
        Ok(editor.view(ctx, &*store))
    })?;
    Ok(Json(view))
}

/// POST .../editor/toggle
pub async fn toggle(
    State(workspace): State<SharedWorkspace>,
    Path((layer_id, column_id)): DimensionPath,
) -> Result<Json<EditorView>, ApiError> {
    let mut ws = workspace.lock().await;
    let view = ws.with_editor(&layer_id, &column_id, |editor, ctx, store| {
        editor.toggle();
        Ok(editor.view(ctx, &*store))
    })?;
    Ok(Json(view))
}

/// POST .../editor/close
pub async fn close(
    State(workspace): State<SharedWorkspace>,
    Path((layer_id, column_id)): DimensionPath,
) -> Result<Json<EditorView>, ApiError> {
    let mut ws = workspace.lock().await;
    let view = ws.with_editor(&layer_id, &column_id, |editor, ctx, store| {
        editor.close();
        Ok(editor.view(ctx, &*store))
    })?;
    Ok(Json(view))
}

/// POST .../editor/operation
pub async fn click_operation(
    State(workspace): State<SharedWorkspace>,
    Path((layer_id, column_id)): DimensionPath,
    Json(request): Json<ClickOperationRequest>,
) -> Result<Json<ClickOperationResponse>, ApiError> {
    let mut ws = workspace.lock().await;
    let response = ws.with_editor(&layer_id, &column_id, |editor, ctx, store| {
        editor.set_suggested_priority(request.suggested_priority);
        let outcome = editor.click_operation(request.operation_type, ctx, store)?;
        Ok(ClickOperationResponse {
            outcome,
            view: editor.view(ctx, &*store),
        })
    })?;
    Ok(Json(response))
}

/// POST .../editor/field
pub async fn choose_field(
    State(workspace): State<SharedWorkspace>,
    Path((layer_id, column_id)): DimensionPath,
    Json(request): Json<ChooseFieldRequest>,
) -> Result<Json<EditorView>, ApiError> {
    let mut ws = workspace.lock().await;
    let view = ws.with_editor(&layer_id, &column_id, |editor, ctx, store| {
        editor.set_suggested_priority(request.suggested_priority);
        editor.choose_field(&request.choice, ctx, store)?;
        Ok(editor.view(ctx, &*store))
    })?;
    Ok(Json(view))
}

/// PUT .../editor/label
pub async fn set_label(
    State(workspace): State<SharedWorkspace>,
    Path((layer_id, column_id)): DimensionPath,
    Json(request): Json<SetLabelRequest>,
) -> Result<Json<EditorView>, ApiError> {
    if request.label.trim().is_empty() {
        return Err(ApiError::BadRequest("Label must not be empty".to_string()));
    }
    let mut ws = workspace.lock().await;
    let view = ws.with_editor(&layer_id, &column_id, |editor, ctx, store| {
        editor.set_label(&request.label, store)?;
        Ok(editor.view(ctx, &*store))
    })?;
    Ok(Json(view))
}

/// DELETE /api/layers/:layer_id/columns/:column_id
pub async fn delete_column(
    State(workspace): State<SharedWorkspace>,
    Path((layer_id, column_id)): DimensionPath,
) -> Result<StatusCode, ApiError> {
    let mut ws = workspace.lock().await;
    ws.with_editor(&layer_id, &column_id, |editor, _, store| {
        editor.delete_column(store)
    })?;
    Ok(StatusCode::NO_CONTENT)
}
