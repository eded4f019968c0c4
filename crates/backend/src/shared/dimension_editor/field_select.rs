use contracts::shared::dimension::{FieldChoice, FieldOption, FieldSupportMatrix, OperationType};

/// Label of the document-level option
pub const RECORDS_LABEL: &str = "Records";

/// Options offered by the field selector.
///
/// `operation` is the operation in effect (a pending incompatible selection,
/// else the column's operation). Options that work with it come first; with no
/// operation in effect everything is compatible.
pub fn field_options(
    matrix: &FieldSupportMatrix,
    operation: Option<OperationType>,
) -> Vec<FieldOption> {
    let mut options = Vec::new();

    if !matrix.operation_by_document.is_empty() {
        options.push(FieldOption {
            label: RECORDS_LABEL.to_string(),
            choice: FieldChoice::Document,
            compatible: operation.map_or(true, |op| matrix.is_document_operation(op)),
        });
    }

    for (field, operations) in &matrix.operation_by_field {
        let Some(first) = operations.first() else {
            continue;
        };
        let compatible = operation.map_or(true, |op| operations.contains(&op));
        // Keep the operation in effect when the field supports it
        let operation_type = match operation {
            Some(op) if compatible => op,
            _ => *first,
        };
        options.push(FieldOption {
            label: field.clone(),
            choice: FieldChoice::Field {
                field: field.clone(),
                operation_type,
            },
            compatible,
        });
    }

    options.sort_by_key(|option| !option.compatible);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn matrix() -> FieldSupportMatrix {
        FieldSupportMatrix {
            operation_by_document: vec![OperationType::Count],
            operation_by_field: BTreeMap::from([
                (
                    "bytes".to_string(),
                    vec![OperationType::Average, OperationType::Sum],
                ),
                ("host".to_string(), vec![OperationType::Terms]),
                ("memory".to_string(), vec![OperationType::Sum]),
            ]),
            field_by_operation: BTreeMap::from([
                (OperationType::Average, vec!["bytes".to_string()]),
                (
                    OperationType::Sum,
                    vec!["bytes".to_string(), "memory".to_string()],
                ),
                (OperationType::Terms, vec!["host".to_string()]),
            ]),
        }
    }

    #[test]
    fn test_everything_compatible_without_operation() {
        let options = field_options(&matrix(), None);

        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Records", "bytes", "host", "memory"]);
        assert!(options.iter().all(|o| o.compatible));
        assert_eq!(
            options[1].choice,
            FieldChoice::Field {
                field: "bytes".to_string(),
                operation_type: OperationType::Average,
            }
        );
    }

    #[test]
    fn test_compatible_fields_first() {
        let options = field_options(&matrix(), Some(OperationType::Sum));

        let summary: Vec<_> = options
            .iter()
            .map(|o| (o.label.as_str(), o.compatible))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("bytes", true),
                ("memory", true),
                ("Records", false),
                ("host", false),
            ]
        );
        assert_eq!(
            options[0].choice,
            FieldChoice::Field {
                field: "bytes".to_string(),
                operation_type: OperationType::Sum,
            }
        );
        // incompatible fields fall back to their own first operation
        assert_eq!(
            options[3].choice,
            FieldChoice::Field {
                field: "host".to_string(),
                operation_type: OperationType::Terms,
            }
        );
    }

    #[test]
    fn test_no_records_option_without_document_operations() {
        let mut matrix = matrix();
        matrix.operation_by_document.clear();

        let options = field_options(&matrix, Some(OperationType::Count));
        assert!(options.iter().all(|o| o.choice != FieldChoice::Document));
    }
}
