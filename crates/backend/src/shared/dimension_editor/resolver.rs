//! Operation compatibility resolver
//!
//! Computes the operation list of the dimension popover: every operation the
//! catalog can offer, with the ones applicable to the current column first.
//! Pure function of its inputs; called on every render.

use std::cmp::Ordering;
use std::collections::HashSet;

use contracts::shared::dimension::{Column, FieldSupportMatrix, OperationChoice, OperationType};

use crate::shared::operations::OperationDisplayNames;

/// Operations applicable to the current state of the dimension.
///
/// Without a column this is everything usable: document-level operations and
/// every operation that accepts some field. A fieldless column keeps to
/// document-level operations; a column with a field gets that field's operations.
pub fn valid_operations(column: Option<&Column>, matrix: &FieldSupportMatrix) -> Vec<OperationType> {
    let mut valid = Vec::new();

    if column.map_or(true, |c| !c.has_field()) {
        valid.extend_from_slice(&matrix.operation_by_document);
    }

    match column.and_then(Column::source_field) {
        None if column.is_none() => valid.extend(matrix.field_by_operation.keys().copied()),
        Some(field) => valid.extend_from_slice(matrix.operations_for_field(field)),
        None => {}
    }

    valid
}

/// Full catalog of operations the matrix knows, regardless of compatibility
pub fn possible_operations(matrix: &FieldSupportMatrix) -> Vec<OperationType> {
    matrix
        .field_by_operation
        .keys()
        .copied()
        .chain(matrix.operation_by_document.iter().copied())
        .collect()
}

/// Sort operations by display name and tag them
pub fn as_operation_options<N>(
    operations: &[OperationType],
    compatible_with_current_field: bool,
    names: &N,
) -> Vec<OperationChoice>
where
    N: OperationDisplayNames + ?Sized,
{
    let mut sorted = operations.to_vec();
    sorted.sort_by(|a, b| compare_display_names(names, *a, *b));
    sorted
        .into_iter()
        .map(|operation_type| OperationChoice {
            operation_type,
            compatible_with_current_field,
            display_name: names.display_name(operation_type).to_string(),
        })
        .collect()
}

fn compare_display_names<N>(names: &N, a: OperationType, b: OperationType) -> Ordering
where
    N: OperationDisplayNames + ?Sized,
{
    let a_name = names.display_name(a);
    let b_name = names.display_name(b);
    a_name
        .to_lowercase()
        .cmp(&b_name.to_lowercase())
        .then_with(|| a_name.cmp(b_name))
        .then_with(|| a.cmp(&b))
}

/// Operation list for the popover.
///
/// Compatible operations come first, then the remaining catalog flagged
/// incompatible. Duplicates are dropped keeping the first occurrence, which is
/// why the compatible list has to be emitted first.
pub fn compute_choices<N>(
    column: Option<&Column>,
    matrix: &FieldSupportMatrix,
    names: &N,
) -> Vec<OperationChoice>
where
    N: OperationDisplayNames + ?Sized,
{
    let valid = valid_operations(column, matrix);
    let possible = possible_operations(matrix);

    let mut seen = HashSet::new();
    as_operation_options(&valid, true, names)
        .into_iter()
        .chain(as_operation_options(&possible, false, names))
        .filter(|choice| seen.insert(choice.operation_type))
        .collect()
}

/// Whether clicking `operation` can be applied to the current column as is
pub fn is_compatible(
    column: Option<&Column>,
    matrix: &FieldSupportMatrix,
    operation: OperationType,
) -> bool {
    valid_operations(column, matrix).contains(&operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::dimension::{ColumnSource, DataType, OperationParams};
    use std::collections::{BTreeMap, HashMap};

    impl OperationDisplayNames for HashMap<OperationType, String> {
        fn display_name(&self, operation: OperationType) -> &str {
            self.get(&operation)
                .map(String::as_str)
                .unwrap_or_else(|| operation.as_str())
        }
    }

    fn names() -> HashMap<OperationType, String> {
        HashMap::from([
            (OperationType::Sum, "Sum".to_string()),
            (OperationType::Average, "Average".to_string()),
            (OperationType::Count, "Count".to_string()),
            (OperationType::Median, "Median".to_string()),
            (OperationType::Cardinality, "Unique count".to_string()),
            (OperationType::Terms, "Top values".to_string()),
        ])
    }

    fn matrix() -> FieldSupportMatrix {
        FieldSupportMatrix {
            operation_by_document: vec![OperationType::Count],
            operation_by_field: BTreeMap::from([
                (
                    "bytes".to_string(),
                    vec![OperationType::Sum, OperationType::Average, OperationType::Median],
                ),
                (
                    "status".to_string(),
                    vec![OperationType::Terms, OperationType::Cardinality],
                ),
            ]),
            field_by_operation: BTreeMap::from([
                (OperationType::Sum, vec!["bytes".to_string()]),
                (OperationType::Average, vec!["bytes".to_string()]),
                (OperationType::Median, vec!["bytes".to_string()]),
                (OperationType::Terms, vec!["status".to_string()]),
                (OperationType::Cardinality, vec!["status".to_string()]),
            ]),
        }
    }

    fn column(operation_type: OperationType, source: ColumnSource) -> Column {
        Column {
            label: "column".to_string(),
            operation_type,
            source,
            data_type: DataType::Number,
            is_bucketed: false,
            suggested_priority: None,
            params: OperationParams::None,
        }
    }

    fn summary(choices: &[OperationChoice]) -> Vec<(OperationType, bool)> {
        choices
            .iter()
            .map(|c| (c.operation_type, c.compatible_with_current_field))
            .collect()
    }

    #[test]
    fn test_no_column_everything_is_compatible() {
        let choices = compute_choices(None, &matrix(), &names());

        assert_eq!(
            summary(&choices),
            vec![
                (OperationType::Average, true),
                (OperationType::Count, true),
                (OperationType::Median, true),
                (OperationType::Sum, true),
                (OperationType::Terms, true),
                (OperationType::Cardinality, true),
            ]
        );
        assert_eq!(choices[5].display_name, "Unique count");
    }

    #[test]
    fn test_field_column_splits_compatible_and_incompatible() {
        let selected = column(OperationType::Sum, ColumnSource::field("bytes"));
        let choices = compute_choices(Some(&selected), &matrix(), &names());

        assert_eq!(
            summary(&choices),
            vec![
                (OperationType::Average, true),
                (OperationType::Median, true),
                (OperationType::Sum, true),
                (OperationType::Count, false),
                (OperationType::Terms, false),
                (OperationType::Cardinality, false),
            ]
        );
    }

    #[test]
    fn test_fieldless_column_only_document_operations_compatible() {
        let selected = column(OperationType::Count, ColumnSource::Document);
        let choices = compute_choices(Some(&selected), &matrix(), &names());

        let compatible: Vec<_> = choices
            .iter()
            .filter(|c| c.compatible_with_current_field)
            .map(|c| c.operation_type)
            .collect();
        assert_eq!(compatible, vec![OperationType::Count]);
        assert_eq!(choices.len(), 6);
    }

    #[test]
    fn test_unknown_field_has_no_compatible_operations() {
        let selected = column(OperationType::Sum, ColumnSource::field("gone"));
        let choices = compute_choices(Some(&selected), &matrix(), &names());

        assert!(choices.iter().all(|c| !c.compatible_with_current_field));
        assert_eq!(choices.len(), 6);
    }

    #[test]
    fn test_no_duplicates_and_each_sublist_sorted() {
        let selected = column(OperationType::Terms, ColumnSource::field("status"));
        let names = names();
        for column in [None, Some(&selected)] {
            let choices = compute_choices(column, &matrix(), &names);

            let unique: HashSet<_> = choices.iter().map(|c| c.operation_type).collect();
            assert_eq!(unique.len(), choices.len());

            for flag in [true, false] {
                let sublist: Vec<_> = choices
                    .iter()
                    .filter(|c| c.compatible_with_current_field == flag)
                    .map(|c| c.display_name.to_lowercase())
                    .collect();
                let mut sorted = sublist.clone();
                sorted.sort();
                assert_eq!(sublist, sorted);
            }

            // compatible entries are never preceded by incompatible ones
            let first_incompatible = choices
                .iter()
                .position(|c| !c.compatible_with_current_field)
                .unwrap_or(choices.len());
            assert!(choices[first_incompatible..]
                .iter()
                .all(|c| !c.compatible_with_current_field));
        }
    }

    #[test]
    fn test_compatible_entry_wins_over_catalog_duplicate() {
        // Sum is both valid for "bytes" and part of the full catalog
        let selected = column(OperationType::Average, ColumnSource::field("bytes"));
        let choices = compute_choices(Some(&selected), &matrix(), &names());

        let sums: Vec<_> = choices
            .iter()
            .filter(|c| c.operation_type == OperationType::Sum)
            .collect();
        assert_eq!(sums.len(), 1);
        assert!(sums[0].compatible_with_current_field);
    }

    #[test]
    fn test_ties_fall_back_to_declaration_order() {
        let names = HashMap::from([
            (OperationType::Maximum, "Extreme".to_string()),
            (OperationType::Minimum, "Extreme".to_string()),
        ]);
        let choices = as_operation_options(
            &[OperationType::Maximum, OperationType::Minimum],
            true,
            &names,
        );

        assert_eq!(choices[0].operation_type, OperationType::Minimum);
        assert_eq!(choices[1].operation_type, OperationType::Maximum);
    }

    #[test]
    fn test_sorting_ignores_case() {
        let names = HashMap::from([
            (OperationType::Sum, "sum".to_string()),
            (OperationType::Average, "Zebra".to_string()),
        ]);
        let choices = as_operation_options(&[OperationType::Average, OperationType::Sum], false, &names);

        assert_eq!(choices[0].operation_type, OperationType::Sum);
        assert!(!choices[0].compatible_with_current_field);
    }

    #[test]
    fn test_is_compatible() {
        let bytes = column(OperationType::Sum, ColumnSource::field("bytes"));
        let status = column(OperationType::Terms, ColumnSource::field("status"));

        assert!(is_compatible(None, &matrix(), OperationType::Median));
        assert!(is_compatible(Some(&bytes), &matrix(), OperationType::Average));
        assert!(!is_compatible(Some(&status), &matrix(), OperationType::Average));
        assert!(!is_compatible(Some(&bytes), &matrix(), OperationType::Count));
    }
}
