//! Dimension popover editor
//!
//! Holds the transient UI state of one dimension (popover open flag and the
//! pending incompatible operation) and turns user interactions into
//! replace/delete requests on the column store.

use contracts::shared::dimension::{
    ClickOutcome, Column, EditorNotice, EditorView, FieldChoice, FieldSupportMatrix,
    IndexPattern, IndexPatternField, OperationListItem, OperationType,
};
use thiserror::Error;

use super::{field_select, resolver};
use crate::shared::layer_store::{ColumnStore, StoreError};
use crate::shared::operations::{BuildColumnRequest, BuildError, ColumnBuilder, OperationCatalog};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Field '{0}' is not part of the index pattern")]
    UnknownField(String),

    #[error("Dimension has no column")]
    NoColumn,

    #[error("No document-level operation is available")]
    NoDocumentOperation,

    #[error("Choose a field for the pending operation first")]
    SelectionPending,
}

/// Read-only inputs the editor works against
#[derive(Debug, Clone, Copy)]
pub struct EditorContext<'a> {
    pub matrix: &'a FieldSupportMatrix,
    pub index_pattern: &'a IndexPattern,
    pub catalog: &'a OperationCatalog,
}

/// Editor state for the dimension `column_id` of layer `layer_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionEditor {
    layer_id: String,
    column_id: String,
    suggested_priority: Option<u32>,
    is_open: bool,
    incompatible_selection: Option<OperationType>,
}

impl DimensionEditor {
    pub fn new(layer_id: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            layer_id: layer_id.into(),
            column_id: column_id.into(),
            suggested_priority: None,
            is_open: false,
            incompatible_selection: None,
        }
    }

    /// Priority given to columns built by this editor; `None` keeps the current one
    pub fn set_suggested_priority(&mut self, priority: Option<u32>) {
        if priority.is_some() {
            self.suggested_priority = priority;
        }
    }

    pub fn suggested_priority(&self) -> Option<u32> {
        self.suggested_priority
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn incompatible_selection(&self) -> Option<OperationType> {
        self.incompatible_selection
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Close the popover, dropping any pending selection
    pub fn close(&mut self) {
        self.is_open = false;
        self.incompatible_selection = None;
    }

    fn selected_column<S: ColumnStore>(&self, store: &S) -> Option<Column> {
        store.column(&self.layer_id, &self.column_id).cloned()
    }

    fn lookup_field<'a>(
        ctx: &EditorContext<'a>,
        name: Option<&str>,
    ) -> Result<Option<&'a IndexPatternField>, EditorError> {
        match name {
            Some(name) => ctx
                .index_pattern
                .field(name)
                .map(Some)
                .ok_or_else(|| EditorError::UnknownField(name.to_string())),
            None => Ok(None),
        }
    }

    fn build_column(
        &self,
        ctx: &EditorContext<'_>,
        operation: OperationType,
        field: Option<&str>,
    ) -> Result<Column, EditorError> {
        let field = Self::lookup_field(ctx, field)?;
        let column = ctx.catalog.build_column(BuildColumnRequest {
            operation_type: operation,
            field,
            layer_id: &self.layer_id,
            column_id: &self.column_id,
            suggested_priority: self.suggested_priority,
        })?;
        Ok(column)
    }

    /// Handle a click on `operation` in the operation list
    pub fn click_operation<S: ColumnStore>(
        &mut self,
        operation: OperationType,
        ctx: &EditorContext<'_>,
        store: &mut S,
    ) -> Result<ClickOutcome, EditorError> {
        let Some(selected) = self.selected_column(store) else {
            let possible_fields = ctx.matrix.fields_for_operation(operation);
            let fieldless_possible = ctx.matrix.is_document_operation(operation);

            if possible_fields.len() == 1 || (possible_fields.is_empty() && fieldless_possible) {
                let field = possible_fields.first().map(String::as_str);
                let column = self.build_column(ctx, operation, field)?;
                store.replace_column(&self.layer_id, &self.column_id, column)?;
                self.incompatible_selection = None;
                tracing::info!(
                    layer_id = %self.layer_id,
                    column_id = %self.column_id,
                    operation = %operation,
                    "created column from operation click"
                );
                return Ok(ClickOutcome::Created);
            }

            // Several fields qualify: the user has to pick one
            self.incompatible_selection = Some(operation);
            tracing::debug!(operation = %operation, "operation needs a field");
            return Ok(ClickOutcome::MarkedIncompatible);
        };

        if !resolver::is_compatible(Some(&selected), ctx.matrix, operation) {
            self.incompatible_selection = Some(operation);
            tracing::debug!(
                operation = %operation,
                field = ?selected.source_field(),
                "operation not applicable to field"
            );
            return Ok(ClickOutcome::MarkedIncompatible);
        }

        let cleared = self.incompatible_selection.take().is_some();

        if selected.operation_type == operation {
            return Ok(if cleared {
                ClickOutcome::ClearedMarker
            } else {
                ClickOutcome::Unchanged
            });
        }

        let column = self.build_column(ctx, operation, selected.source_field())?;
        store.replace_column(&self.layer_id, &self.column_id, column)?;
        tracing::info!(
            layer_id = %self.layer_id,
            column_id = %self.column_id,
            from = %selected.operation_type,
            to = %operation,
            "column operation changed"
        );
        Ok(ClickOutcome::Replaced)
    }

    /// Commit a field selector choice
    pub fn choose_field<S: ColumnStore>(
        &mut self,
        choice: &FieldChoice,
        ctx: &EditorContext<'_>,
        store: &mut S,
    ) -> Result<(), EditorError> {
        let (operation, field) = match choice {
            FieldChoice::Field {
                field,
                operation_type,
            } => (
                self.incompatible_selection.unwrap_or(*operation_type),
                Some(field.as_str()),
            ),
            FieldChoice::Document => {
                let operation = match self.incompatible_selection {
                    Some(op) => op,
                    None => resolver::as_operation_options(
                        &ctx.matrix.operation_by_document,
                        true,
                        ctx.catalog,
                    )
                    .first()
                    .map(|choice| choice.operation_type)
                    .ok_or(EditorError::NoDocumentOperation)?,
                };
                (operation, None)
            }
        };

        let column = self.build_column(ctx, operation, field)?;
        store.replace_column(&self.layer_id, &self.column_id, column)?;
        self.incompatible_selection = None;
        Ok(())
    }

    /// Remove the column from its layer
    pub fn delete_column<S: ColumnStore>(&mut self, store: &mut S) -> Result<(), EditorError> {
        store.delete_column(&self.layer_id, &self.column_id)?;
        self.incompatible_selection = None;
        Ok(())
    }

    /// Rename the selected column; not allowed while a selection is pending
    pub fn set_label<S: ColumnStore>(&self, label: &str, store: &mut S) -> Result<(), EditorError> {
        if self.incompatible_selection.is_some() {
            return Err(EditorError::SelectionPending);
        }
        let mut column = self.selected_column(store).ok_or(EditorError::NoColumn)?;
        column.label = label.to_string();
        store.replace_column(&self.layer_id, &self.column_id, column)?;
        Ok(())
    }

    /// Render model of the popover
    pub fn view<S: ColumnStore>(&self, ctx: &EditorContext<'_>, store: &S) -> EditorView {
        let selected = store.column(&self.layer_id, &self.column_id);
        let marker = self.incompatible_selection;

        let operations = resolver::compute_choices(selected, ctx.matrix, ctx.catalog)
            .into_iter()
            .map(|choice| {
                let is_selected = match marker {
                    Some(op) => op == choice.operation_type,
                    None => selected.is_some_and(|c| c.operation_type == choice.operation_type),
                };
                OperationListItem {
                    choice,
                    is_selected,
                }
            })
            .collect();

        let notice = match (marker, selected) {
            (Some(_), Some(_)) => Some(EditorNotice::InvalidOperation),
            (Some(_), None) => Some(EditorNotice::FieldlessOperation),
            (None, _) => None,
        };

        // Label and parameter editors only apply to a settled column
        let (label, param_editor) = match (marker, selected) {
            (None, Some(column)) => (
                Some(column.label.clone()),
                ctx.catalog.param_editor(column.operation_type),
            ),
            _ => (None, None),
        };

        let operation_in_effect = marker.or_else(|| selected.map(|c| c.operation_type));

        EditorView {
            is_open: self.is_open,
            label,
            source_field: selected.and_then(Column::source_field).map(str::to_string),
            operations,
            field_options: field_select::field_options(ctx.matrix, operation_in_effect),
            incompatible_selection: marker,
            notice,
            param_editor,
        }
    }
}
