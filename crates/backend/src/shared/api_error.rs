use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use super::dimension_editor::EditorError;
use super::layer_store::StoreError;
use super::workspace::WorkspaceError;

/// Error returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), "{}", self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<WorkspaceError> for ApiError {
    fn from(err: WorkspaceError) -> Self {
        let message = err.to_string();
        match err {
            WorkspaceError::LayerNotFound(_) | WorkspaceError::IndexPatternNotFound(_) => {
                ApiError::NotFound(message)
            }
            WorkspaceError::Editor(EditorError::Store(StoreError::LayerNotFound(_)))
            | WorkspaceError::Editor(EditorError::Store(StoreError::ColumnNotFound { .. }))
            | WorkspaceError::Editor(EditorError::NoColumn) => ApiError::NotFound(message),
            WorkspaceError::Editor(EditorError::Build(_))
            | WorkspaceError::Editor(EditorError::UnknownField(_))
            | WorkspaceError::Editor(EditorError::NoDocumentOperation)
            | WorkspaceError::Editor(EditorError::SelectionPending) => {
                ApiError::BadRequest(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::operations::BuildError;
    use contracts::shared::dimension::OperationType;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = WorkspaceError::LayerNotFound("x".to_string()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let missing_column: ApiError = WorkspaceError::Editor(EditorError::Store(
            StoreError::ColumnNotFound {
                layer_id: "first".to_string(),
                column_id: "col1".to_string(),
            },
        ))
        .into();
        assert_eq!(missing_column.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            missing_column.to_string(),
            "Column 'col1' not found in layer 'first'"
        );

        let bad: ApiError = WorkspaceError::Editor(EditorError::Build(BuildError::FieldRequired(
            OperationType::Sum,
        )))
        .into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.to_string(), "Operation 'sum' requires a field");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::BadRequest("bad label".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let pending: ApiError = WorkspaceError::Editor(EditorError::SelectionPending).into();
        assert_eq!(pending.status(), StatusCode::BAD_REQUEST);
    }
}
