use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Node payload containing the form reference and display name
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NodeData {
    #[serde(alias = "componentId")]
    pub component_id: String,
    pub name: String,
}

/// A vertex in the form graph
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FormNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    pub data: NodeData,
}

/// A directed edge: `source` is a prerequisite ("parent") of `target`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// Per-field type metadata from a form's JSON schema
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldSpec {
    #[serde(rename = "type", default)]
    pub field_type: String,
    pub title: Option<String>,
    #[serde(default)]
    pub avantos_type: Option<String>,
    pub format: Option<String>,
    pub items: Option<FieldItems>,
}

/// Item constraints for array-typed fields
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldItems {
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(rename = "enum", default)]
    pub options: Option<Vec<serde_json::Value>>,
}

/// Field schema container; property order is the schema declaration order
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FieldSchema {
    #[serde(default)]
    pub properties: IndexMap<String, FieldSpec>,
}

/// A single UI schema element referencing a field by scope
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    pub scope: String,
    pub label: Option<String>,
}

/// Ordered list of UI elements controlling field display order
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UiSchema {
    #[serde(default)]
    pub elements: Vec<UiElement>,
}

/// Form metadata: the schema a node's `component_id` points at
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawForm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_reusable: bool,
    #[serde(default)]
    pub field_schema: FieldSchema,
    #[serde(default)]
    pub ui_schema: UiSchema,
}

/// Complete graph package as produced by a graph source
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FlowPackage {
    #[serde(default)]
    pub nodes: Vec<FormNode>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub forms: Vec<RawForm>,
}
