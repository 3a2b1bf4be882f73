//! Tests for mapping display text, the payload codec and the store.
mod common;
use common::*;
use async_trait::async_trait;
use prefill::mapping::JsonFileMappingStore;
use prefill::prelude::*;
use std::result::Result;
use std::sync::Arc;
use tokio::sync::Notify;

fn entry(node: &str, field: &str, source_form: &str, source_field: &str) -> MappingEntry {
    MappingEntry {
        target_node_id: node.to_string(),
        target_field_id: field.to_string(),
        source_form_id: source_form.to_string(),
        source_field_id: source_field.to_string(),
    }
}

fn form_a_source() -> DataSource {
    static_source(
        "A",
        "Form A",
        Some(SourceType::Direct),
        vec![form_field("name", "Name", "string", "short-text")],
    )
}

#[test]
fn test_resolve_mapping_text_for_known_field() {
    let session = ResolverSession::new();
    let text = tokio_test::block_on(resolve_mapping_text(
        "Age",
        &FieldMapping::new("A", "name"),
        &[form_a_source()],
        &session,
    ))
    .unwrap();
    assert_eq!(text, "Age: Form A.Name");
}

#[test]
fn test_resolve_mapping_text_falls_back_to_field_id() {
    let session = ResolverSession::new();
    let text = tokio_test::block_on(resolve_mapping_text(
        "Age",
        &FieldMapping::new("A", "unknownField"),
        &[form_a_source()],
        &session,
    ))
    .unwrap();
    assert_eq!(text, "Age: Form A.unknownField");
}

#[test]
fn test_resolve_mapping_text_marks_unresolved_source() {
    let session = ResolverSession::new();
    let text = tokio_test::block_on(resolve_mapping_text(
        "Age",
        &FieldMapping::new("gone", "name"),
        &[form_a_source()],
        &session,
    ))
    .unwrap();
    assert_eq!(text, format!("Age: {UNRESOLVED_SOURCE_LABEL}.name"));
}

#[tokio::test]
async fn test_resolve_mapping_text_surfaces_load_failure() {
    struct BrokenFieldSource;

    #[async_trait]
    impl FieldSource for BrokenFieldSource {
        async fn load_fields(&self) -> Result<Vec<FormField>, FieldLoadError> {
            Err(FieldLoadError::SourceUnavailable {
                source_id: "A".to_string(),
                message: "backend down".to_string(),
            })
        }
    }

    let source = DataSource::new("A", "Form A", Some(SourceType::Direct), Arc::new(BrokenFieldSource));
    let session = ResolverSession::new();
    let result =
        resolve_mapping_text("Age", &FieldMapping::new("A", "name"), &[source], &session).await;
    assert!(result.is_err());
}

#[test]
fn test_sequencer_tickets_invalidate_older_requests() {
    let sequencer = ResolutionSequencer::new();
    let first = sequencer.begin("node-b", "age");
    let second = sequencer.begin("node-b", "age");
    let unrelated = sequencer.begin("node-b", "email");

    assert!(!sequencer.is_current(&first));
    assert!(sequencer.is_current(&second));
    assert!(sequencer.is_current(&unrelated));
}

#[tokio::test]
async fn test_sequencer_resolves_current_request() {
    let sequencer = ResolutionSequencer::new();
    let session = ResolverSession::new();
    let text = sequencer
        .resolve(
            "node-b",
            "age",
            "Age",
            &FieldMapping::new("A", "name"),
            &[form_a_source()],
            &session,
        )
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("Age: Form A.Name"));
}

#[tokio::test]
async fn test_sequencer_discards_stale_resolution() {
    struct GatedFieldSource {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl FieldSource for GatedFieldSource {
        async fn load_fields(&self) -> Result<Vec<FormField>, FieldLoadError> {
            self.gate.notified().await;
            Ok(vec![form_field("name", "Name", "string", "short-text")])
        }
    }

    let gate = Arc::new(Notify::new());
    let source = DataSource::new(
        "A",
        "Form A",
        Some(SourceType::Direct),
        Arc::new(GatedFieldSource {
            gate: Arc::clone(&gate),
        }),
    );
    let sequencer = ResolutionSequencer::new();
    let session = ResolverSession::new();
    let mapping = FieldMapping::new("A", "name");

    // The resolution suspends on the gated load; a newer request for the
    // same field is issued before the gate opens, so the completed result
    // must be discarded.
    let sources = [source];
    let slow = sequencer.resolve("node-b", "age", "Age", &mapping, &sources, &session);
    let stomp = async {
        tokio::task::yield_now().await;
        sequencer.begin("node-b", "age");
        gate.notify_one();
        Ok::<(), FieldLoadError>(())
    };
    let (resolved, ()) = tokio::try_join!(slow, stomp).unwrap();
    assert_eq!(resolved, None);
}

#[test]
fn test_restructure_builds_nested_mapping() {
    let entries = vec![
        entry("node-b", "age", "A", "name"),
        entry("node-b", "email", "A", "mail"),
        entry("node-c", "city", "B", "town"),
    ];
    let set = MappingSet::restructure(&entries);

    assert_eq!(set.get("node-b", "age"), Some(&FieldMapping::new("A", "name")));
    assert_eq!(set.get("node-c", "city"), Some(&FieldMapping::new("B", "town")));
    assert_eq!(set.get("node-c", "age"), None);
}

#[test]
fn test_restructure_later_entry_wins() {
    let entries = vec![
        entry("node-b", "age", "A", "name"),
        entry("node-b", "age", "B", "other"),
    ];
    let set = MappingSet::restructure(&entries);
    assert_eq!(set.get("node-b", "age"), Some(&FieldMapping::new("B", "other")));
    assert_eq!(set.flatten().len(), 1);
}

#[test]
fn test_flatten_restructure_round_trip() {
    let entries = vec![
        entry("node-b", "age", "A", "name"),
        entry("node-b", "email", "A", "mail"),
        entry("node-c", "city", "B", "town"),
    ];
    assert_eq!(MappingSet::restructure(&entries).flatten(), entries);
}

#[test]
fn test_cleared_mappings_are_not_persisted() {
    let mut set = MappingSet::restructure(&[
        entry("node-b", "age", "A", "name"),
        entry("node-b", "email", "A", "mail"),
    ]);
    set.clear("node-b", "age");

    // Cleared in memory, invisible on the wire.
    assert_eq!(set.get("node-b", "age"), None);
    assert_eq!(set.flatten(), [entry("node-b", "email", "A", "mail")]);
}

#[test]
fn test_cleared_is_distinguishable_from_never_mapped() {
    let mut set = MappingSet::restructure(&[entry("node-b", "age", "A", "name")]);
    set.clear("node-b", "age");

    assert!(set.is_cleared("node-b", "age"));
    assert!(!set.is_cleared("node-b", "email"));
    assert!(!set.is_cleared("node-c", "age"));

    // A fresh assignment drops the marker again.
    set.set("node-b", "age", FieldMapping::new("B", "other"));
    assert!(!set.is_cleared("node-b", "age"));
}

#[test]
fn test_set_overwrites_existing_mapping() {
    let mut set = MappingSet::new();
    set.set("node-b", "age", FieldMapping::new("A", "name"));
    set.set("node-b", "age", FieldMapping::new("B", "other"));
    assert_eq!(set.get("node-b", "age"), Some(&FieldMapping::new("B", "other")));
}

#[test]
fn test_mapping_entry_wire_format_is_camel_case() {
    let json = serde_json::to_value(entry("node-b", "age", "A", "name")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "targetNodeId": "node-b",
            "targetFieldId": "age",
            "sourceFormId": "A",
            "sourceFieldId": "name",
        })
    );
}

#[tokio::test]
async fn test_memory_store_save_is_full_replace() {
    let store = MemoryMappingStore::with_entries(vec![entry("node-b", "age", "A", "name")]);
    store
        .save(&[entry("node-c", "city", "B", "town")])
        .await
        .unwrap();
    assert_eq!(
        store.load().await.unwrap(),
        [entry("node-c", "city", "B", "town")]
    );
}

#[tokio::test]
async fn test_json_file_store_round_trip() {
    let path = std::env::temp_dir().join(format!("prefill-mappings-{}.json", std::process::id()));
    let store = JsonFileMappingStore::new(&path);

    let entries = vec![
        entry("node-b", "age", "A", "name"),
        entry("node-c", "city", "B", "town"),
    ];
    store.save(&entries).await.unwrap();
    assert_eq!(store.load().await.unwrap(), entries);

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn test_json_file_store_missing_file_reads_empty() {
    let store = JsonFileMappingStore::new("/nonexistent/prefill-mappings.json");
    assert_eq!(store.load().await.unwrap(), Vec::<MappingEntry>::new());
}
