use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::column::Column;

/// Named collection of columns forming one data series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Index pattern the columns draw from
    pub index_pattern_id: String,
    /// Column ids in display order
    pub column_order: Vec<String>,
    /// Columns keyed by id
    pub columns: HashMap<String, Column>,
}

impl Layer {
    pub fn new(index_pattern_id: impl Into<String>) -> Self {
        Self {
            index_pattern_id: index_pattern_id.into(),
            column_order: Vec::new(),
            columns: HashMap::new(),
        }
    }
}

/// Layer as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSummary {
    pub id: String,
    pub index_pattern_id: String,
    pub column_order: Vec<String>,
}

/// Request to create an empty layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLayerRequest {
    pub index_pattern_id: String,
}
