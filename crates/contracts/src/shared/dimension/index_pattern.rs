use serde::{Deserialize, Serialize};

use super::operation::DataType;

/// Type of a field as described by the index pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Date,
    Boolean,
    Ip,
}

impl FieldType {
    /// Data type a column over this field produces
    pub fn data_type(&self) -> DataType {
        match self {
            FieldType::String => DataType::String,
            FieldType::Number => DataType::Number,
            FieldType::Date => DataType::Date,
            FieldType::Boolean => DataType::Boolean,
            FieldType::Ip => DataType::Ip,
        }
    }
}

/// Single field of an index pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPatternField {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub aggregatable: bool,
    #[serde(default)]
    pub searchable: bool,
}

/// Described set of fields a layer draws its columns from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPattern {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub time_field_name: Option<String>,
    pub fields: Vec<IndexPatternField>,
}

impl IndexPattern {
    pub fn field(&self, name: &str) -> Option<&IndexPatternField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
