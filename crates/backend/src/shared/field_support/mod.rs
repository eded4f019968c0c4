//! Field-support matrix builder
//!
//! Derives which operations apply to which fields of an index pattern, and
//! which operations work without a field at all.

use contracts::shared::dimension::{FieldSupportMatrix, IndexPattern, OperationMetadata};

use super::operations::OperationCatalog;

/// Filter that accepts every operation
pub fn accept_all(_metadata: &OperationMetadata) -> bool {
    true
}

/// Build the support matrix for `index_pattern`.
///
/// `filter` is the visualization's predicate on the column an operation would
/// produce; operations it rejects are left out entirely.
pub fn build_support_matrix<F>(
    index_pattern: &IndexPattern,
    catalog: &OperationCatalog,
    filter: F,
) -> FieldSupportMatrix
where
    F: Fn(&OperationMetadata) -> bool,
{
    let mut matrix = FieldSupportMatrix::default();

    for definition in catalog.definitions() {
        let operation = definition.operation_type;

        if definition.is_document_operation {
            if filter(&definition.metadata(None)) {
                matrix.operation_by_document.push(operation);
            }
            continue;
        }

        for field in &index_pattern.fields {
            if !(definition.accepts_field)(field) || !filter(&definition.metadata(Some(field))) {
                continue;
            }
            matrix
                .operation_by_field
                .entry(field.name.clone())
                .or_default()
                .push(operation);
            matrix
                .field_by_operation
                .entry(operation)
                .or_default()
                .push(field.name.clone());
        }
    }

    tracing::debug!(
        index_pattern = %index_pattern.id,
        fields = matrix.operation_by_field.len(),
        document_operations = matrix.operation_by_document.len(),
        "built field support matrix"
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::dimension::{DataType, FieldType, IndexPatternField, OperationType};

    fn index_pattern() -> IndexPattern {
        let field = |name: &str, field_type, aggregatable| IndexPatternField {
            name: name.to_string(),
            field_type,
            aggregatable,
            searchable: true,
        };
        IndexPattern {
            id: "logs".to_string(),
            title: "logs-*".to_string(),
            time_field_name: Some("timestamp".to_string()),
            fields: vec![
                field("bytes", FieldType::Number, true),
                field("timestamp", FieldType::Date, true),
                field("host", FieldType::String, true),
                field("message", FieldType::String, false),
            ],
        }
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let matrix = build_support_matrix(&index_pattern(), &OperationCatalog::default(), accept_all);

        for (field, operations) in &matrix.operation_by_field {
            for op in operations {
                assert!(matrix.fields_for_operation(*op).contains(field));
            }
        }
        for (op, fields) in &matrix.field_by_operation {
            for field in fields {
                assert!(matrix.field_supports(field, *op));
            }
        }
    }

    #[test]
    fn test_matrix_contents() {
        let matrix = build_support_matrix(&index_pattern(), &OperationCatalog::default(), accept_all);

        assert_eq!(
            matrix.operation_by_document,
            vec![OperationType::Count, OperationType::FilterRatio]
        );
        assert_eq!(
            matrix.operations_for_field("bytes"),
            [
                OperationType::Terms,
                OperationType::Average,
                OperationType::Sum,
                OperationType::Minimum,
                OperationType::Maximum,
                OperationType::Median,
                OperationType::Cardinality,
            ]
        );
        assert_eq!(
            matrix.operations_for_field("timestamp"),
            [OperationType::DateHistogram, OperationType::Cardinality]
        );
        // not aggregatable
        assert!(matrix.operations_for_field("message").is_empty());
        assert!(!matrix.operation_by_field.contains_key("message"));
    }

    #[test]
    fn test_filter_restricts_operations() {
        let only_buckets = |metadata: &OperationMetadata| metadata.is_bucketed;
        let matrix = build_support_matrix(&index_pattern(), &OperationCatalog::default(), only_buckets);

        assert!(matrix.operation_by_document.is_empty());
        assert_eq!(matrix.operations_for_field("bytes"), [OperationType::Terms]);
        assert_eq!(
            matrix.operations_for_field("timestamp"),
            [OperationType::DateHistogram]
        );

        let only_dates = |metadata: &OperationMetadata| metadata.data_type == DataType::Date;
        let matrix = build_support_matrix(&index_pattern(), &OperationCatalog::default(), only_dates);
        assert_eq!(
            matrix.field_by_operation.keys().copied().collect::<Vec<_>>(),
            vec![OperationType::DateHistogram]
        );
    }
}
