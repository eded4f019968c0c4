//! Operation catalog
//!
//! Explicit registry mapping each operation type to the descriptor that knows
//! its display name, which fields it accepts and how to build a column for it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use contracts::shared::dimension::{
    Column, DataType, IndexPatternField, OperationMetadata, OperationType, ParamEditorKind,
};
use thiserror::Error;

use super::definitions;

/// Errors raised while building a column
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Operation '{0}' is not registered")]
    UnknownOperation(OperationType),

    #[error("Operation '{0}' requires a field")]
    FieldRequired(OperationType),

    #[error("Operation '{0}' does not take a field")]
    FieldNotAccepted(OperationType),

    #[error("Operation '{operation}' cannot be applied to field '{field}'")]
    FieldNotSupported {
        operation: OperationType,
        field: String,
    },
}

/// Localized operation names
pub trait OperationDisplayNames {
    fn display_name(&self, operation: OperationType) -> &str;
}

/// Input for building a fresh column
#[derive(Debug, Clone, Copy)]
pub struct BuildColumnRequest<'a> {
    pub operation_type: OperationType,
    /// `None` builds a document-level column
    pub field: Option<&'a IndexPatternField>,
    pub layer_id: &'a str,
    pub column_id: &'a str,
    pub suggested_priority: Option<u32>,
}

/// Builds columns with operation-specific defaults
pub trait ColumnBuilder {
    fn build_column(&self, request: BuildColumnRequest<'_>) -> Result<Column, BuildError>;
}

/// Capability descriptor of a single operation
#[derive(Clone)]
pub struct OperationDefinition {
    pub operation_type: OperationType,
    pub display_name: String,
    pub is_bucketed: bool,
    /// Usable without a field
    pub is_document_operation: bool,
    /// Fixed output type; `None` means the source field's type
    pub data_type: Option<DataType>,
    pub param_editor: Option<ParamEditorKind>,
    pub accepts_field: fn(&IndexPatternField) -> bool,
    pub build: fn(&OperationDefinition, Option<&IndexPatternField>) -> Column,
}

impl fmt::Debug for OperationDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDefinition")
            .field("operation_type", &self.operation_type)
            .field("display_name", &self.display_name)
            .field("is_bucketed", &self.is_bucketed)
            .field("is_document_operation", &self.is_document_operation)
            .field("data_type", &self.data_type)
            .field("param_editor", &self.param_editor)
            .finish_non_exhaustive()
    }
}

impl OperationDefinition {
    /// Metadata of the column this operation would produce over `field`
    pub fn metadata(&self, field: Option<&IndexPatternField>) -> OperationMetadata {
        let data_type = self
            .data_type
            .or_else(|| field.map(|f| f.field_type.data_type()))
            .unwrap_or(DataType::Number);
        OperationMetadata {
            data_type,
            is_bucketed: self.is_bucketed,
        }
    }
}

/// Registry of all operations the editor can offer
#[derive(Debug, Clone)]
pub struct OperationCatalog {
    definitions: BTreeMap<OperationType, OperationDefinition>,
}

impl OperationCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// Register or replace an operation
    pub fn register(&mut self, definition: OperationDefinition) {
        self.definitions
            .insert(definition.operation_type, definition);
    }

    pub fn get(&self, operation: OperationType) -> Option<&OperationDefinition> {
        self.definitions.get(&operation)
    }

    /// Definitions in declaration order of [`OperationType`]
    pub fn definitions(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.values()
    }

    /// Replace display names, e.g. with a translated table
    pub fn with_display_names(mut self, names: &HashMap<OperationType, String>) -> Self {
        for (operation, name) in names {
            if let Some(definition) = self.definitions.get_mut(operation) {
                definition.display_name = name.clone();
            }
        }
        self
    }

    pub fn param_editor(&self, operation: OperationType) -> Option<ParamEditorKind> {
        self.get(operation).and_then(|d| d.param_editor)
    }
}

impl Default for OperationCatalog {
    fn default() -> Self {
        let mut catalog = Self::new();
        for definition in definitions::default_definitions() {
            catalog.register(definition);
        }
        catalog
    }
}

impl OperationDisplayNames for OperationCatalog {
    fn display_name(&self, operation: OperationType) -> &str {
        self.get(operation)
            .map(|d| d.display_name.as_str())
            .unwrap_or_else(|| operation.as_str())
    }
}

impl ColumnBuilder for OperationCatalog {
    fn build_column(&self, request: BuildColumnRequest<'_>) -> Result<Column, BuildError> {
        let operation = request.operation_type;
        let definition = self
            .get(operation)
            .ok_or(BuildError::UnknownOperation(operation))?;

        match request.field {
            Some(_) if definition.is_document_operation => {
                return Err(BuildError::FieldNotAccepted(operation));
            }
            Some(field) if !(definition.accepts_field)(field) => {
                return Err(BuildError::FieldNotSupported {
                    operation,
                    field: field.name.clone(),
                });
            }
            None if !definition.is_document_operation => {
                return Err(BuildError::FieldRequired(operation));
            }
            _ => {}
        }

        let mut column = (definition.build)(definition, request.field);
        column.suggested_priority = request.suggested_priority;

        tracing::debug!(
            layer_id = request.layer_id,
            column_id = request.column_id,
            operation = %operation,
            "built column '{}'",
            column.label
        );
        Ok(column)
    }
}
