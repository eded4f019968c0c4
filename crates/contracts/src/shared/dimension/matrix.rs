use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::operation::OperationType;

/// Precomputed compatibility between operations and the fields of an index pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldSupportMatrix {
    /// Operations usable without a field
    pub operation_by_document: Vec<OperationType>,
    /// Field name -> operations applicable to it
    pub operation_by_field: BTreeMap<String, Vec<OperationType>>,
    /// Operation -> field names it accepts
    pub field_by_operation: BTreeMap<OperationType, Vec<String>>,
}

impl FieldSupportMatrix {
    /// Operations applicable to `field`; empty if the field is unknown
    pub fn operations_for_field(&self, field: &str) -> &[OperationType] {
        self.operation_by_field
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fields accepted by `operation`; empty if it takes no field
    pub fn fields_for_operation(&self, operation: OperationType) -> &[String] {
        self.field_by_operation
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_document_operation(&self, operation: OperationType) -> bool {
        self.operation_by_document.contains(&operation)
    }

    pub fn field_supports(&self, field: &str, operation: OperationType) -> bool {
        self.operations_for_field(field).contains(&operation)
    }
}
