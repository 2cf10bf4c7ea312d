//! Whole-document analysis and component tree summaries.

use serde_json::{json, Value};

use mgdsl::domain::{analyze, build_component_tree};

fn screen_with_texts(count: usize) -> Value {
    let texts: Vec<Value> = (0..count)
        .map(|i| json!({ "id": format!("3:{i}"), "type": "TEXT", "name": format!("Line {i}"), "characters": format!("text {i}") }))
        .collect();
    json!({
        "dsl": {
            "version": "2.0",
            "nodes": [{ "id": "3:100", "type": "FRAME", "name": "List", "children": texts }]
        }
    })
}

#[test]
fn given_analysis_when_serializing_then_camel_case_report() {
    let dsl = json!({
        "framework": "vue",
        "nodes": [{
            "id": "1:1", "type": "INSTANCE", "name": "Tab",
            "componentInfo": { "componentSetDocumentLink": ["https://docs.example/tab.mdx"] },
            "interactive": [{ "type": "navigation", "targetLayerId": "0:7" }]
        }]
    });

    let report = serde_json::to_value(analyze(&dsl)).unwrap();

    assert_eq!(report["version"], "unknown");
    assert_eq!(report["framework"], "vue");
    assert_eq!(
        report["stats"],
        json!({ "totalNodes": 1, "textNodes": 0, "componentInstances": 1, "navigations": 1 })
    );
    assert_eq!(report["componentDocs"], json!(["https://docs.example/tab.mdx"]));
    assert_eq!(
        report["navigations"],
        json!([{ "sourceId": "1:1", "sourceName": "Tab", "targetLayerId": "0:7" }])
    );
    assert_eq!(report["structure"][0]["componentDoc"], "https://docs.example/tab.mdx");
    assert_eq!(report["structure"][0]["navigateTo"], "0:7");
}

#[test]
fn given_many_texts_when_rendering_then_listing_capped() {
    let report = analyze(&screen_with_texts(25)).render_tree();

    assert!(report.contains("Stats: 26 nodes, 25 texts, 0 components, 0 navigations"));
    assert!(report.contains("  [3:19] Line 19: \"text 19\""));
    assert!(!report.contains("  [3:20] Line 20"));
    assert!(report.contains("  ... and 5 more"));
}

#[test]
fn given_empty_document_when_analyzing_then_zero_stats() {
    let analysis = analyze(&json!({}));

    assert_eq!(analysis.stats.total_nodes, 0);
    assert!(analysis.structure.is_empty());
    assert!(analysis.render_flat().is_empty());
}

#[test]
fn given_null_children_when_building_tree_then_dropped() {
    let dsl = json!({ "nodes": [{ "id": "1:1", "children": [null, { "id": "1:2" }, null] }] });

    let trees = build_component_tree(&dsl);

    assert_eq!(trees[0].children.len(), 1);
    assert_eq!(trees[0].children[0].id.as_deref(), Some("1:2"));
}
