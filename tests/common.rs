//! Common test utilities for building graph packages and sources.
use prefill::form::{
    Edge, FieldSchema, FieldSpec, FlowPackage, FormNode, NodeData, RawForm, UiElement, UiSchema,
};
use prefill::prelude::*;
use std::sync::Arc;

#[allow(dead_code)]
pub fn form_node(id: &str, name: &str, component_id: &str) -> FormNode {
    FormNode {
        id: id.to_string(),
        node_type: "form".to_string(),
        data: NodeData {
            component_id: component_id.to_string(),
            name: name.to_string(),
        },
    }
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> Edge {
    Edge {
        source: source.to_string(),
        target: target.to_string(),
    }
}

#[allow(dead_code)]
pub fn field_spec(title: Option<&str>, field_type: &str, avantos_type: &str) -> FieldSpec {
    FieldSpec {
        field_type: field_type.to_string(),
        title: title.map(str::to_string),
        avantos_type: Some(avantos_type.to_string()),
        format: None,
        items: None,
    }
}

/// Builds a form whose UI schema references every field in declaration
/// order, like the production form service does.
#[allow(dead_code)]
pub fn raw_form(id: &str, name: &str, fields: Vec<(&str, FieldSpec)>) -> RawForm {
    let elements = fields
        .iter()
        .map(|(field_id, spec)| UiElement {
            element_type: "Control".to_string(),
            scope: format!("#/properties/{field_id}"),
            label: spec.title.clone(),
        })
        .collect();
    let properties = fields
        .into_iter()
        .map(|(field_id, spec)| (field_id.to_string(), spec))
        .collect();

    RawForm {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        is_reusable: false,
        field_schema: FieldSchema { properties },
        ui_schema: UiSchema { elements },
    }
}

#[allow(dead_code)]
pub fn form_field(id: &str, name: &str, field_type: &str, avantos_type: &str) -> FormField {
    FormField {
        id: id.to_string(),
        name: name.to_string(),
        field_type: field_type.to_string(),
        avantos_type: avantos_type.to_string(),
        format: None,
        items: None,
    }
}

#[allow(dead_code)]
pub fn static_source(
    id: &str,
    label: &str,
    source_type: Option<SourceType>,
    fields: Vec<FormField>,
) -> DataSource {
    DataSource::new(
        id,
        label,
        source_type,
        Arc::new(StaticFieldSource::new(fields)),
    )
}

/// The scenario used across the integration tests: form A is a prerequisite
/// of form B, plus a global source `G` carrying a timestamp field.
///
/// A has field `name` titled "Name"; B has field `age` titled "Age".
#[allow(dead_code)]
pub fn simple_package() -> FlowPackage {
    FlowPackage {
        nodes: vec![
            form_node("node-a", "Form A", "form-a"),
            form_node("node-b", "Form B", "form-b"),
        ],
        edges: vec![edge("node-a", "node-b")],
        forms: vec![
            raw_form(
                "form-a",
                "Form A",
                vec![("name", field_spec(Some("Name"), "string", "short-text"))],
            ),
            raw_form(
                "form-b",
                "Form B",
                vec![("age", field_spec(Some("Age"), "integer", "number"))],
            ),
        ],
    }
}

#[allow(dead_code)]
pub fn global_source() -> DataSource {
    static_source(
        "global-fields",
        "Global Fields",
        Some(SourceType::Global),
        vec![form_field("ts", "Global Timestamp", "string", "date-time")],
    )
}
