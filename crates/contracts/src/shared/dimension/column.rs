use serde::{Deserialize, Serialize};

use super::operation::{DataType, OperationType};

/// Where a column reads its values from.
///
/// A column either aggregates a single field or operates on whole documents;
/// there is no third state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnSource {
    /// Aggregates the named field
    Field { name: String },
    /// Document-level operation, no source field
    Document,
}

impl ColumnSource {
    pub fn field(name: impl Into<String>) -> Self {
        ColumnSource::Field { name: name.into() }
    }

    /// Field name if the column has one
    pub fn field_name(&self) -> Option<&str> {
        match self {
            ColumnSource::Field { name } => Some(name),
            ColumnSource::Document => None,
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, ColumnSource::Document)
    }
}

/// Sort direction for top values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Operation-specific parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationParams {
    #[default]
    None,
    Terms {
        size: u32,
        /// Column id whose value orders the buckets; `None` orders alphabetically
        order_by_column: Option<String>,
        order_direction: SortDirection,
    },
    DateHistogram {
        interval: String,
    },
    FilterRatio {
        numerator: String,
        denominator: String,
    },
}

/// One configured aggregation or bucket in a layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Display label
    pub label: String,
    /// Operation applied by the column
    pub operation_type: OperationType,
    /// Source field, or document-level
    pub source: ColumnSource,
    /// Output data type
    pub data_type: DataType,
    /// Bucket columns split the data, metric columns aggregate it
    pub is_bucketed: bool,
    /// Ordering hint among bucket columns; lower comes first
    #[serde(default)]
    pub suggested_priority: Option<u32>,
    /// Operation parameters
    #[serde(default)]
    pub params: OperationParams,
}

impl Column {
    pub fn source_field(&self) -> Option<&str> {
        self.source.field_name()
    }

    pub fn has_field(&self) -> bool {
        !self.source.is_document()
    }
}
