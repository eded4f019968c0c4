use contracts::shared::dimension::{
    Column, ColumnSource, DataType, FieldType, IndexPatternField, OperationParams,
    OperationType, ParamEditorKind, SortDirection,
};

use super::catalog::OperationDefinition;

const DEFAULT_TERMS_SIZE: u32 = 5;
const DEFAULT_DATE_INTERVAL: &str = "auto";

/// Built-in operations
pub fn default_definitions() -> Vec<OperationDefinition> {
    vec![
        OperationDefinition {
            operation_type: OperationType::Terms,
            display_name: "Top values".to_string(),
            is_bucketed: true,
            is_document_operation: false,
            data_type: None,
            param_editor: Some(ParamEditorKind::Terms),
            accepts_field: accepts_terms_field,
            build: build_terms,
        },
        OperationDefinition {
            operation_type: OperationType::DateHistogram,
            display_name: "Date histogram".to_string(),
            is_bucketed: true,
            is_document_operation: false,
            data_type: Some(DataType::Date),
            param_editor: Some(ParamEditorKind::DateHistogram),
            accepts_field: accepts_date_field,
            build: build_date_histogram,
        },
        metric(OperationType::Average, "Average"),
        metric(OperationType::Sum, "Sum"),
        metric(OperationType::Minimum, "Minimum"),
        metric(OperationType::Maximum, "Maximum"),
        metric(OperationType::Median, "Median"),
        OperationDefinition {
            operation_type: OperationType::Cardinality,
            display_name: "Unique count".to_string(),
            is_bucketed: false,
            is_document_operation: false,
            data_type: Some(DataType::Number),
            param_editor: None,
            accepts_field: accepts_any_aggregatable,
            build: build_field_metric,
        },
        OperationDefinition {
            operation_type: OperationType::Count,
            display_name: "Count".to_string(),
            is_bucketed: false,
            is_document_operation: true,
            data_type: Some(DataType::Number),
            param_editor: None,
            accepts_field: accepts_no_field,
            build: build_count,
        },
        OperationDefinition {
            operation_type: OperationType::FilterRatio,
            display_name: "Filter ratio".to_string(),
            is_bucketed: false,
            is_document_operation: true,
            data_type: Some(DataType::Number),
            param_editor: Some(ParamEditorKind::FilterRatio),
            accepts_field: accepts_no_field,
            build: build_filter_ratio,
        },
    ]
}

fn metric(operation_type: OperationType, display_name: &str) -> OperationDefinition {
    OperationDefinition {
        operation_type,
        display_name: display_name.to_string(),
        is_bucketed: false,
        is_document_operation: false,
        data_type: Some(DataType::Number),
        param_editor: None,
        accepts_field: accepts_number_field,
        build: build_field_metric,
    }
}

fn accepts_number_field(field: &IndexPatternField) -> bool {
    field.aggregatable && field.field_type == FieldType::Number
}

fn accepts_date_field(field: &IndexPatternField) -> bool {
    field.aggregatable && field.field_type == FieldType::Date
}

fn accepts_terms_field(field: &IndexPatternField) -> bool {
    field.aggregatable
        && matches!(
            field.field_type,
            FieldType::String | FieldType::Boolean | FieldType::Ip | FieldType::Number
        )
}

fn accepts_any_aggregatable(field: &IndexPatternField) -> bool {
    field.aggregatable
}

fn accepts_no_field(_field: &IndexPatternField) -> bool {
    false
}

fn base_column(
    definition: &OperationDefinition,
    field: Option<&IndexPatternField>,
    label: String,
    params: OperationParams,
) -> Column {
    Column {
        label,
        operation_type: definition.operation_type,
        source: match field {
            Some(f) => ColumnSource::field(f.name.clone()),
            None => ColumnSource::Document,
        },
        data_type: definition.metadata(field).data_type,
        is_bucketed: definition.is_bucketed,
        suggested_priority: None,
        params,
    }
}

fn field_label(definition: &OperationDefinition, field: Option<&IndexPatternField>) -> String {
    match field {
        Some(f) => format!("{} of {}", definition.display_name, f.name),
        None => definition.display_name.clone(),
    }
}

fn build_field_metric(definition: &OperationDefinition, field: Option<&IndexPatternField>) -> Column {
    base_column(
        definition,
        field,
        field_label(definition, field),
        OperationParams::None,
    )
}

fn build_terms(definition: &OperationDefinition, field: Option<&IndexPatternField>) -> Column {
    base_column(
        definition,
        field,
        field_label(definition, field),
        OperationParams::Terms {
            size: DEFAULT_TERMS_SIZE,
            order_by_column: None,
            order_direction: SortDirection::Desc,
        },
    )
}

fn build_date_histogram(
    definition: &OperationDefinition,
    field: Option<&IndexPatternField>,
) -> Column {
    // Date histograms are labelled by the field alone
    let label = field
        .map(|f| f.name.clone())
        .unwrap_or_else(|| definition.display_name.clone());
    base_column(
        definition,
        field,
        label,
        OperationParams::DateHistogram {
            interval: DEFAULT_DATE_INTERVAL.to_string(),
        },
    )
}

fn build_count(definition: &OperationDefinition, field: Option<&IndexPatternField>) -> Column {
    let label = format!("{} of records", definition.display_name);
    base_column(definition, field, label, OperationParams::None)
}

fn build_filter_ratio(
    definition: &OperationDefinition,
    field: Option<&IndexPatternField>,
) -> Column {
    base_column(
        definition,
        field,
        definition.display_name.clone(),
        OperationParams::FilterRatio {
            numerator: String::new(),
            denominator: String::new(),
        },
    )
}
