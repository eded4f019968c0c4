//! In-memory workspace served by the API: index patterns, layers and the
//! open dimension editors.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use contracts::shared::dimension::{IndexPattern, Layer, LayerSummary};
use thiserror::Error;
use tokio::sync::Mutex;

use super::dimension_editor::{DimensionEditor, EditorContext, EditorError};
use super::field_support::{accept_all, build_support_matrix};
use super::layer_store::{ColumnStore, LayerStore};
use super::operations::OperationCatalog;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("Layer '{0}' not found")]
    LayerNotFound(String),

    #[error("Index pattern '{0}' not found")]
    IndexPatternNotFound(String),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Workspace shared by the HTTP handlers; one request at a time mutates it
pub type SharedWorkspace = Arc<Mutex<Workspace>>;

pub struct Workspace {
    catalog: OperationCatalog,
    index_patterns: HashMap<String, IndexPattern>,
    store: LayerStore,
    editors: HashMap<(String, String), DimensionEditor>,
}

impl Workspace {
    pub fn new(catalog: OperationCatalog, index_patterns: Vec<IndexPattern>) -> Self {
        Self {
            catalog,
            index_patterns: index_patterns
                .into_iter()
                .map(|pattern| (pattern.id.clone(), pattern))
                .collect(),
            store: LayerStore::new(),
            editors: HashMap::new(),
        }
    }

    /// Index patterns sorted by id
    pub fn index_patterns(&self) -> Vec<&IndexPattern> {
        let mut patterns: Vec<_> = self.index_patterns.values().collect();
        patterns.sort_by(|a, b| a.id.cmp(&b.id));
        patterns
    }

    pub fn layers(&self) -> Vec<LayerSummary> {
        self.store
            .layers()
            .into_iter()
            .map(|(id, layer)| LayerSummary {
                id: id.clone(),
                index_pattern_id: layer.index_pattern_id.clone(),
                column_order: layer.column_order.clone(),
            })
            .collect()
    }

    /// Create an empty layer over an existing index pattern
    pub fn create_layer(
        &mut self,
        layer_id: impl Into<String>,
        index_pattern_id: &str,
    ) -> Result<LayerSummary, WorkspaceError> {
        if !self.index_patterns.contains_key(index_pattern_id) {
            return Err(WorkspaceError::IndexPatternNotFound(
                index_pattern_id.to_string(),
            ));
        }
        let layer_id = layer_id.into();
        self.store
            .insert_layer(layer_id.clone(), Layer::new(index_pattern_id));
        tracing::info!(layer_id = %layer_id, index_pattern_id, "layer created");

        Ok(LayerSummary {
            id: layer_id,
            index_pattern_id: index_pattern_id.to_string(),
            column_order: Vec::new(),
        })
    }

    /// Run `f` against the editor of one dimension.
    ///
    /// The editor is created on first use and dropped again once its dimension
    /// is empty with the popover closed and nothing pending. The support matrix
    /// is derived from the layer's index pattern for every call.
    pub fn with_editor<R, F>(
        &mut self,
        layer_id: &str,
        column_id: &str,
        f: F,
    ) -> Result<R, WorkspaceError>
    where
        F: FnOnce(&mut DimensionEditor, &EditorContext<'_>, &mut LayerStore) -> Result<R, EditorError>,
    {
        let index_pattern_id = self
            .store
            .layer(layer_id)
            .map(|layer| layer.index_pattern_id.clone())
            .ok_or_else(|| WorkspaceError::LayerNotFound(layer_id.to_string()))?;
        let index_pattern = self
            .index_patterns
            .get(&index_pattern_id)
            .ok_or(WorkspaceError::IndexPatternNotFound(index_pattern_id))?;

        let matrix = build_support_matrix(index_pattern, &self.catalog, accept_all);
        let ctx = EditorContext {
            matrix: &matrix,
            index_pattern,
            catalog: &self.catalog,
        };

        let key = (layer_id.to_string(), column_id.to_string());
        let editor = self
            .editors
            .entry(key.clone())
            .or_insert_with(|| DimensionEditor::new(layer_id, column_id));

        let result = f(editor, &ctx, &mut self.store);

        let idle = !editor.is_open() && editor.incompatible_selection().is_none();
        if idle && self.store.column(layer_id, column_id).is_none() {
            self.editors.remove(&key);
        }

        Ok(result?)
    }
}

/// Read seed index patterns from a JSON file; a missing file yields none
pub fn load_index_patterns(path: &Path) -> anyhow::Result<Vec<IndexPattern>> {
    if !path.exists() {
        tracing::warn!("Index pattern file not found: {}", path.display());
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)?;
    let patterns: Vec<IndexPattern> = serde_json::from_str(&contents)?;
    tracing::info!(
        "Loaded {} index pattern(s) from {}",
        patterns.len(),
        path.display()
    );
    Ok(patterns)
}
