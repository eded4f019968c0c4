//! Layer/column state store
//!
//! Columns are never edited in place: callers hand over a whole replacement
//! column, or ask for the column to be removed.

use std::collections::HashMap;

use contracts::shared::dimension::{Column, Layer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Layer '{0}' not found")]
    LayerNotFound(String),

    #[error("Column '{column_id}' not found in layer '{layer_id}'")]
    ColumnNotFound { layer_id: String, column_id: String },
}

/// Keyed collection of columns grouped into layers
pub trait ColumnStore {
    fn layer(&self, layer_id: &str) -> Option<&Layer>;

    fn column(&self, layer_id: &str, column_id: &str) -> Option<&Column> {
        self.layer(layer_id)
            .and_then(|layer| layer.columns.get(column_id))
    }

    /// Insert or overwrite a column
    fn replace_column(
        &mut self,
        layer_id: &str,
        column_id: &str,
        column: Column,
    ) -> Result<(), StoreError>;

    fn delete_column(&mut self, layer_id: &str, column_id: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct LayerStore {
    layers: HashMap<String, Layer>,
}

impl LayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_layer(&mut self, layer_id: impl Into<String>, layer: Layer) {
        self.layers.insert(layer_id.into(), layer);
    }

    /// Layers sorted by id
    pub fn layers(&self) -> Vec<(&String, &Layer)> {
        let mut layers: Vec<_> = self.layers.iter().collect();
        layers.sort_by(|a, b| a.0.cmp(b.0));
        layers
    }
}

impl ColumnStore for LayerStore {
    fn layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.get(layer_id)
    }

    fn replace_column(
        &mut self,
        layer_id: &str,
        column_id: &str,
        column: Column,
    ) -> Result<(), StoreError> {
        let layer = self
            .layers
            .get_mut(layer_id)
            .ok_or_else(|| StoreError::LayerNotFound(layer_id.to_string()))?;

        layer.columns.insert(column_id.to_string(), column);
        layer.column_order = column_order(&layer.columns);

        tracing::info!(layer_id, column_id, "column replaced");
        Ok(())
    }

    fn delete_column(&mut self, layer_id: &str, column_id: &str) -> Result<(), StoreError> {
        let layer = self
            .layers
            .get_mut(layer_id)
            .ok_or_else(|| StoreError::LayerNotFound(layer_id.to_string()))?;

        if layer.columns.remove(column_id).is_none() {
            return Err(StoreError::ColumnNotFound {
                layer_id: layer_id.to_string(),
                column_id: column_id.to_string(),
            });
        }
        layer.column_order.retain(|id| id != column_id);

        tracing::info!(layer_id, column_id, "column deleted");
        Ok(())
    }
}

/// Display order of a layer's columns: buckets first by suggested priority,
/// then metrics; ties by column id.
pub fn column_order(columns: &HashMap<String, Column>) -> Vec<String> {
    let mut entries: Vec<(&String, &Column)> = columns.iter().collect();
    entries.sort_by(|(a_id, a), (b_id, b)| {
        b.is_bucketed
            .cmp(&a.is_bucketed)
            .then_with(|| {
                if a.is_bucketed {
                    priority_key(a).cmp(&priority_key(b))
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| a_id.cmp(b_id))
    });
    entries.into_iter().map(|(id, _)| id.clone()).collect()
}

fn priority_key(column: &Column) -> u32 {
    column.suggested_priority.unwrap_or(u32::MAX)
}
