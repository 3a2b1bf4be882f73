use crate::form::{FormField, FormGraph, FormNode};
use ahash::AHashMap;
use std::collections::hash_map::Entry;

/// Flattens the field schemas of a node and all of its transitive ancestors
/// into a single deduplicated field list.
///
/// Visitation order is the node itself followed by its ancestors in
/// depth-first preorder. Nodes whose `component_id` resolves to no form
/// contribute nothing and are skipped silently.
///
/// Deduplication by field id follows insertion-map semantics: the first
/// occurrence fixes a field's position in the output, while the occurrence
/// from the most recently visited node supplies its value (last-write-wins).
/// Both halves of that rule are a documented contract, not an accident.
pub fn collect_fields(node: &FormNode, graph: &FormGraph) -> Vec<FormField> {
    let mut visit_order = vec![node.id.clone()];
    visit_order.extend(graph.index().ancestor_ids(&node.id));

    let mut fields: Vec<FormField> = Vec::new();
    let mut slot_by_id: AHashMap<String, usize> = AHashMap::new();

    for visited_id in &visit_order {
        let Some(visited_node) = graph.node(visited_id) else {
            continue;
        };
        let Some(form) = graph.form_for(visited_node) else {
            log::debug!(
                "Node '{}' references unknown form '{}'; contributing no fields",
                visited_node.id,
                visited_node.data.component_id
            );
            continue;
        };

        for (field_id, spec) in &form.field_schema.properties {
            let field = FormField::from_spec(field_id, spec);
            match slot_by_id.entry(field_id.clone()) {
                Entry::Occupied(slot) => fields[*slot.get()] = field,
                Entry::Vacant(slot) => {
                    slot.insert(fields.len());
                    fields.push(field);
                }
            }
        }
    }
    fields
}
