use serde::{Deserialize, Serialize};

use super::operation::{OperationType, ParamEditorKind};

/// Operation entry offered by the editor's operation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationChoice {
    pub operation_type: OperationType,
    /// Whether the operation applies to the currently selected field
    pub compatible_with_current_field: bool,
    /// Localized name shown in the list
    pub display_name: String,
}

/// Operation list row with its highlight state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationListItem {
    #[serde(flatten)]
    pub choice: OperationChoice,
    pub is_selected: bool,
}

/// Call-out shown next to the operation list while an incompatible
/// operation is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorNotice {
    /// Operation not applicable to the column's field; another field is needed
    InvalidOperation,
    /// No column yet; a field must be chosen for the operation
    FieldlessOperation,
}

/// Commit made from the field selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldChoice {
    /// Apply `operation_type` to `field`
    Field {
        field: String,
        operation_type: OperationType,
    },
    /// Use a document-level operation
    Document,
}

/// Entry offered by the field selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub choice: FieldChoice,
    /// Whether the option works with the operation currently in effect
    pub compatible: bool,
}

/// Everything needed to render the dimension popover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorView {
    pub is_open: bool,
    /// Label of the selected column; hidden while a selection is pending
    pub label: Option<String>,
    /// Field of the selected column, `None` for empty or document-level columns
    pub source_field: Option<String>,
    pub operations: Vec<OperationListItem>,
    pub field_options: Vec<FieldOption>,
    pub incompatible_selection: Option<OperationType>,
    pub notice: Option<EditorNotice>,
    /// Parameter editor for the selected column; hidden while a selection is pending
    pub param_editor: Option<ParamEditorKind>,
}

/// Result of clicking an operation in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    /// A new column was created for an empty dimension
    Created,
    /// The selected column was replaced with the new operation
    Replaced,
    /// The operation needs a different field; recorded as pending
    MarkedIncompatible,
    /// A pending incompatible selection was dropped
    ClearedMarker,
    /// The operation was already applied
    Unchanged,
}

/// Request body for an operation click
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickOperationRequest {
    pub operation_type: OperationType,
    /// Priority for a column created by this click
    #[serde(default)]
    pub suggested_priority: Option<u32>,
}

/// Response to an operation click
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickOperationResponse {
    pub outcome: ClickOutcome,
    pub view: EditorView,
}

/// Request body for a field selector commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChooseFieldRequest {
    pub choice: FieldChoice,
    /// Priority for the column built from this choice
    #[serde(default)]
    pub suggested_priority: Option<u32>,
}

/// Request body for a label change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLabelRequest {
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_flattens_choice() {
        let item = OperationListItem {
            choice: OperationChoice {
                operation_type: OperationType::Sum,
                compatible_with_current_field: true,
                display_name: "Sum".to_string(),
            },
            is_selected: false,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["operation_type"], "sum");
        assert_eq!(json["compatible_with_current_field"], true);
        assert_eq!(json["is_selected"], false);
    }

    #[test]
    fn test_field_choice_parses_tagged() {
        let choice: FieldChoice = serde_json::from_value(serde_json::json!({
            "type": "field",
            "field": "bytes",
            "operation_type": "max"
        }))
        .unwrap();
        assert_eq!(
            choice,
            FieldChoice::Field {
                field: "bytes".to_string(),
                operation_type: OperationType::Maximum,
            }
        );

        let document: FieldChoice =
            serde_json::from_value(serde_json::json!({"type": "document"})).unwrap();
        assert_eq!(document, FieldChoice::Document);
    }

    #[test]
    fn test_suggested_priority_is_optional() {
        let request: ClickOperationRequest =
            serde_json::from_value(serde_json::json!({"operation_type": "terms"})).unwrap();
        assert_eq!(request.suggested_priority, None);

        let request: ChooseFieldRequest = serde_json::from_value(serde_json::json!({
            "choice": {"type": "document"},
            "suggested_priority": 1
        }))
        .unwrap();
        assert_eq!(request.suggested_priority, Some(1));
    }
}
