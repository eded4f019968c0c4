use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation that can be configured on a dimension column.
///
/// Declaration order is significant: it is the final tie-break when two
/// operations share a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Top values bucket
    Terms,
    /// Date histogram bucket
    DateHistogram,
    /// Average value
    #[serde(rename = "avg")]
    Average,
    /// Sum of values
    Sum,
    /// Minimum value
    #[serde(rename = "min")]
    Minimum,
    /// Maximum value
    #[serde(rename = "max")]
    Maximum,
    /// Median value
    Median,
    /// Unique count
    Cardinality,
    /// Count of documents
    Count,
    /// Ratio of documents matching a filter
    FilterRatio,
}

impl OperationType {
    /// All operation types in declaration order
    pub const ALL: [OperationType; 10] = [
        OperationType::Terms,
        OperationType::DateHistogram,
        OperationType::Average,
        OperationType::Sum,
        OperationType::Minimum,
        OperationType::Maximum,
        OperationType::Median,
        OperationType::Cardinality,
        OperationType::Count,
        OperationType::FilterRatio,
    ];

    /// Wire identifier, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Terms => "terms",
            OperationType::DateHistogram => "date_histogram",
            OperationType::Average => "avg",
            OperationType::Sum => "sum",
            OperationType::Minimum => "min",
            OperationType::Maximum => "max",
            OperationType::Median => "median",
            OperationType::Cardinality => "cardinality",
            OperationType::Count => "count",
            OperationType::FilterRatio => "filter_ratio",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationType::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operation type: {}", s))
    }
}

/// Output data type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Number,
    Date,
    Boolean,
    Ip,
}

/// Metadata a visualization inspects to decide whether it accepts an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMetadata {
    pub data_type: DataType,
    pub is_bucketed: bool,
}

/// Parameter editor shown under the operation list for the selected column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamEditorKind {
    Terms,
    DateHistogram,
    FilterRatio,
}
