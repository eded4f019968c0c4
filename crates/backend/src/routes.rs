use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::shared::workspace::SharedWorkspace;

/// Application routes
pub fn configure_routes(workspace: SharedWorkspace) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/index-patterns",
            get(handlers::layers::list_index_patterns),
        )
        .route(
            "/api/layers",
            get(handlers::layers::list_layers).post(handlers::layers::create_layer),
        )
        .route(
            "/api/layers/:layer_id/columns/:column_id",
            delete(handlers::dimension_editor::delete_column),
        )
        // Dimension editor
        .route(
            "/api/layers/:layer_id/columns/:column_id/editor",
            get(handlers::dimension_editor::get_editor),
        )
        .route(
            "/api/layers/:layer_id/columns/:column_id/editor/toggle",
            post(handlers::dimension_editor::toggle),
        )
        .route(
            "/api/layers/:layer_id/columns/:column_id/editor/close",
            post(handlers::dimension_editor::close),
        )
        .route(
            "/api/layers/:layer_id/columns/:column_id/editor/operation",
            post(handlers::dimension_editor::click_operation),
        )
        .route(
            "/api/layers/:layer_id/columns/:column_id/editor/field",
            post(handlers::dimension_editor::choose_field),
        )
        .route(
            "/api/layers/:layer_id/columns/:column_id/editor/label",
            put(handlers::dimension_editor::set_label),
        )
        .with_state(workspace)
}
