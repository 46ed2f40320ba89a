// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for imports of imperfect documents.
//!
//! Every case here must decode without error and report what it dropped.

use matgraph_codec::{
    decode, CodecError, DecodeWarning, LinkSkipReason, MaterialDocument, NodeSkipReason,
};
use matgraph_core::{NodeGraphHost, ShaderGraph, SocketDirection};
use serde_json::{json, Value};

// ── Helpers ────────────────────────────────────────────────────────

fn document(value: Value) -> MaterialDocument {
    MaterialDocument::from_json_str(&value.to_string()).unwrap()
}

fn node(name: &str, type_tag: &str) -> Value {
    json!({"name": name, "type": type_tag, "location": [0.0, 0.0], "inputs": {}, "outputs": [], "properties": {}})
}

fn link(from_node: &str, from_socket: &str, to_node: &str, to_socket: &str) -> Value {
    json!({"from_node": from_node, "from_socket": from_socket, "to_node": to_node, "to_socket": to_socket})
}

fn linked_inputs(graph: &ShaderGraph, node: &str) -> Vec<usize> {
    graph
        .sockets(node, SocketDirection::Input)
        .into_iter()
        .filter(|s| s.is_linked)
        .map(|s| s.index)
        .collect()
}

// ── Unknown nodes and dangling links ───────────────────────────────

#[test]
fn test_unknown_node_type_is_skipped() {
    let doc = document(json!({
        "material_name": "Stone",
        "nodes": [
            node("Noise", "ShaderNodeTexNoise"),
            node("Bogus", "BogusNode"),
            node("Bump", "ShaderNodeBump")
        ],
        "links": [
            link("Noise", "Fac", "Bump", "Height"),
            link("Bogus", "Out", "Bump", "Normal")
        ]
    }));

    let mut graph = ShaderGraph::new("Stone");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.nodes_created, 2);
    assert_eq!(manifest.nodes_skipped.len(), 1);
    assert_eq!(manifest.nodes_skipped[0].name, "Bogus");
    assert_eq!(
        manifest.nodes_skipped[0].reason,
        NodeSkipReason::UnsupportedNodeType { type_tag: "BogusNode".to_string() }
    );

    assert_eq!(manifest.links_created, 1);
    assert_eq!(manifest.links_skipped.len(), 1);
    assert_eq!(
        manifest.links_skipped[0].reason,
        LinkSkipReason::UnresolvedLinkEndpoint { node: "Bogus".to_string(), socket: None }
    );
    assert_eq!(linked_inputs(&graph, "Bump"), vec![2]);
}

#[test]
fn test_host_only_node_type_is_skipped() {
    let doc = document(json!({
        "nodes": [node("Emission", "ShaderNodeEmission")],
        "links": []
    }));
    let mut graph = ShaderGraph::new("Glow");
    let manifest = decode(&doc, &mut graph);
    assert_eq!(manifest.nodes_created, 0);
    assert!(matches!(
        manifest.nodes_skipped[0].reason,
        NodeSkipReason::UnsupportedNodeType { .. }
    ));
}

#[test]
fn test_dangling_link_does_not_stop_later_links() {
    let doc = document(json!({
        "nodes": [
            node("Noise", "ShaderNodeTexNoise"),
            node("Ramp", "ShaderNodeValToRGB"),
            node("Bump", "ShaderNodeBump")
        ],
        "links": [
            link("Noise", "Fac", "Ghost", "Fac"),
            link("Noise", "Fac", "Ramp", "Fac"),
            link("Ramp", "Alpha", "Bump", "Height")
        ]
    }));

    let mut graph = ShaderGraph::new("Stone");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.links_created, 2);
    assert_eq!(manifest.links_skipped.len(), 1);
    assert_eq!(manifest.links_skipped[0].link.to_node, "Ghost");
    assert_eq!(
        manifest.links_skipped[0].reason,
        LinkSkipReason::UnresolvedLinkEndpoint { node: "Ghost".to_string(), socket: None }
    );
}

#[test]
fn test_missing_source_socket() {
    let doc = document(json!({
        "nodes": [
            node("Noise", "ShaderNodeTexNoise"),
            node("Ramp", "ShaderNodeValToRGB"),
            node("Bump", "ShaderNodeBump")
        ],
        "links": [link("Noise", "Displacement", "Bump", "Height")]
    }));

    let mut graph = ShaderGraph::new("Stone");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.nodes_created, 3);
    assert_eq!(manifest.links_created, 0);
    assert_eq!(manifest.links_skipped.len(), 1);
    assert_eq!(
        manifest.links_skipped[0].reason,
        LinkSkipReason::UnresolvedLinkEndpoint {
            node: "Noise".to_string(),
            socket: Some("Displacement".to_string()),
        }
    );
    assert_eq!(
        manifest.links_skipped[0].reason.to_string(),
        "Unresolved endpoint Noise.Displacement"
    );
}

#[test]
fn test_second_link_into_same_input() {
    let doc = document(json!({
        "nodes": [
            node("Noise", "ShaderNodeTexNoise"),
            node("Wave", "ShaderNodeTexWave"),
            node("Bump", "ShaderNodeBump")
        ],
        "links": [
            link("Noise", "Fac", "Bump", "Height"),
            link("Wave", "Fac", "Bump", "Height")
        ]
    }));

    let mut graph = ShaderGraph::new("Stone");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.links_created, 1);
    assert_eq!(
        manifest.links_skipped[0].reason,
        LinkSkipReason::DuplicateInputLink { node: "Bump".to_string(), socket: "Height".to_string() }
    );
    assert_eq!(graph.link_count(), 1);
}

// ── Duplicate socket names ─────────────────────────────────────────

#[test]
fn test_index_hint_picks_among_same_named_inputs() {
    let mut hinted = link("A", "Value", "B", "Value");
    hinted["to_socket_index"] = json!(2);
    let doc = document(json!({
        "nodes": [node("A", "ShaderNodeMath"), node("B", "ShaderNodeMath")],
        "links": [hinted]
    }));

    let mut graph = ShaderGraph::new("Math");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.links_created, 1);
    assert!(manifest.warnings.is_empty());
    assert_eq!(linked_inputs(&graph, "B"), vec![2]);
}

#[test]
fn test_ambiguous_input_without_hint_uses_first() {
    let mut out_of_range = link("A", "Value", "C", "Value");
    out_of_range["to_socket_index"] = json!(7);
    let doc = document(json!({
        "nodes": [node("A", "ShaderNodeMath"), node("B", "ShaderNodeMath"), node("C", "ShaderNodeMath")],
        "links": [link("A", "Value", "B", "Value"), out_of_range]
    }));

    let mut graph = ShaderGraph::new("Math");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.links_created, 2);
    assert_eq!(linked_inputs(&graph, "B"), vec![0]);
    assert_eq!(linked_inputs(&graph, "C"), vec![0]);
    assert_eq!(
        manifest.warnings,
        vec![
            DecodeWarning::AmbiguousSocket { node: "B".to_string(), socket: "Value".to_string(), chosen: 0 },
            DecodeWarning::AmbiguousSocket { node: "C".to_string(), socket: "Value".to_string(), chosen: 0 },
        ]
    );
}

// ── Fatal documents ────────────────────────────────────────────────

#[test]
fn test_missing_top_level_keys_are_fatal() {
    let err = MaterialDocument::from_json_str(r#"{"material_name": "Stone", "nodes": []}"#).unwrap_err();
    assert!(matches!(err, CodecError::MalformedDocument(_)));

    let err = MaterialDocument::from_json_str("not json").unwrap_err();
    assert!(matches!(err, CodecError::MalformedDocument(_)));

    let err = MaterialDocument::from_json_str(r#"{"nodes": {}, "links": []}"#).unwrap_err();
    assert!(matches!(err, CodecError::MalformedDocument(_)));
}

// ── Malformed entries ──────────────────────────────────────────────

#[test]
fn test_bad_link_entry_does_not_stop_good_links() {
    let doc = document(json!({
        "nodes": [node("Noise", "ShaderNodeTexNoise"), node("Bump", "ShaderNodeBump")],
        "links": [
            {"from_node": "Noise", "from_socket": "Fac", "to_node": "Bump"},
            link("Noise", "Fac", "Bump", "Height")
        ]
    }));

    let mut graph = ShaderGraph::new("Stone");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.links_created, 1);
    assert_eq!(linked_inputs(&graph, "Bump"), vec![2]);
    assert_eq!(manifest.links_skipped.len(), 1);
    assert_eq!(manifest.links_skipped[0].link.to_node, "Bump");
    assert!(matches!(
        &manifest.links_skipped[0].reason,
        LinkSkipReason::MalformedRecord { index: 0, message } if message.contains("to_socket")
    ));
}

#[test]
fn test_bad_node_entry_is_skipped() {
    let doc = document(json!({
        "nodes": [
            {"name": "Untyped", "location": [0.0, 0.0]},
            node("Noise", "ShaderNodeTexNoise"),
            node("Bump", "ShaderNodeBump")
        ],
        "links": [
            link("Noise", "Fac", "Bump", "Height"),
            link("Untyped", "Value", "Bump", "Strength")
        ]
    }));

    let mut graph = ShaderGraph::new("Stone");
    let manifest = decode(&doc, &mut graph);

    assert_eq!(manifest.nodes_created, 2);
    assert_eq!(manifest.nodes_skipped.len(), 1);
    assert_eq!(manifest.nodes_skipped[0].name, "Untyped");
    assert!(matches!(
        manifest.nodes_skipped[0].reason,
        NodeSkipReason::MalformedRecord { index: 0, .. }
    ));
    assert_eq!(manifest.links_created, 1);
    assert_eq!(
        manifest.links_skipped[0].reason,
        LinkSkipReason::UnresolvedLinkEndpoint { node: "Untyped".to_string(), socket: None }
    );
}

#[test]
fn test_manifest_serializes_reasons() {
    let doc = document(json!({
        "nodes": [node("Bogus", "BogusNode")],
        "links": [link("Bogus", "Out", "Ghost", "In")]
    }));
    let mut graph = ShaderGraph::new("Stone");
    let manifest = decode(&doc, &mut graph);

    let value = serde_json::to_value(&manifest).unwrap();
    assert_eq!(value["material_name"], json!("Stone"));
    assert_eq!(value["nodes_skipped"][0]["reason"]["kind"], json!("UnsupportedNodeType"));
    assert_eq!(value["links_skipped"][0]["reason"]["kind"], json!("UnresolvedLinkEndpoint"));
    assert_eq!(value["links_skipped"][0]["link"]["to_node"], json!("Ghost"));
}
