// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document → graph.
//!
//! Decoding always starts from a cleared graph, so importing the same
//! document twice leaves the same graph behind. Problems with individual
//! nodes, inputs or links never abort the import; they are collected in
//! the returned [`DecodeManifest`].

use crate::document::{InputValue, LinkRecord, MaterialDocument, NodeRecord};
use crate::manifest::{
    DecodeManifest, DecodeWarning, LinkSkipReason, NodeSkipReason, SkippedLink, SkippedNode,
};
use crate::schema::socket_properties;
use matgraph_core::{
    ColorStop, MaterialLibrary, NodeGraphHost, NodeProperties, ShaderNodeKind, SocketDirection,
    SocketType, SocketValue,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Material an import writes into
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportTarget {
    /// The active material, or a new one named after the document
    #[default]
    Active,
    /// The material with this name, created if missing
    Named(String),
}

/// Rebuild a host graph from a document
pub fn decode<H: NodeGraphHost + ?Sized>(document: &MaterialDocument, host: &mut H) -> DecodeManifest {
    let mut manifest = DecodeManifest::new(host.graph_name());
    tracing::debug!(
        "Decoding {} nodes and {} links into '{}'",
        document.nodes.len(),
        document.links.len(),
        manifest.material_name
    );

    host.clear();

    for rejected in &document.rejected_nodes {
        manifest.nodes_skipped.push(SkippedNode {
            name: rejected.field("name"),
            type_tag: rejected.field("type"),
            reason: NodeSkipReason::MalformedRecord {
                index: rejected.index,
                message: rejected.message.clone(),
            },
        });
    }

    // Document name -> host name
    let mut created: HashMap<&str, String> = HashMap::new();
    for record in &document.nodes {
        if let Some(name) = decode_node(host, record, &mut manifest) {
            created.insert(record.name.as_str(), name);
        }
    }

    let mut fed: HashSet<(String, usize)> = HashSet::new();
    for record in &document.links {
        match decode_link(host, record, &created, &fed, &mut manifest.warnings) {
            Ok(target) => {
                fed.insert(target);
                manifest.links_created += 1;
            }
            Err(reason) => manifest.links_skipped.push(SkippedLink {
                link: record.clone(),
                reason,
            }),
        }
    }

    for rejected in &document.rejected_links {
        // Whatever endpoint names the entry carries
        let link = LinkRecord::new(
            rejected.field("from_node"),
            rejected.field("from_socket"),
            rejected.field("to_node"),
            rejected.field("to_socket"),
        );
        manifest.links_skipped.push(SkippedLink {
            link,
            reason: LinkSkipReason::MalformedRecord {
                index: rejected.index,
                message: rejected.message.clone(),
            },
        });
    }

    manifest
}

/// Import a document into a material library.
///
/// The target material is switched to nodes and its graph replaced.
/// `fallback_name` names the new material when the document has an empty
/// material name.
pub fn decode_into_library(
    document: &MaterialDocument,
    library: &mut MaterialLibrary,
    target: &ImportTarget,
    fallback_name: &str,
) -> DecodeManifest {
    let name = match target {
        ImportTarget::Named(name) => library.get_or_create(name).name.clone(),
        ImportTarget::Active => match library.active_name() {
            Some(active) => active.to_string(),
            None => {
                let base = if document.material_name.is_empty() {
                    fallback_name
                } else {
                    document.material_name.as_str()
                };
                let name = library.add_material(base);
                library.set_active(&name);
                name
            }
        },
    };

    let material = library.get_or_create(&name);
    material.use_nodes = true;
    let mut manifest = decode(document, &mut material.graph);
    manifest.material_name = name;
    manifest
}

fn decode_node<H: NodeGraphHost + ?Sized>(
    host: &mut H,
    record: &NodeRecord,
    manifest: &mut DecodeManifest,
) -> Option<String> {
    let Some(kind) = ShaderNodeKind::from_type_tag(&record.type_tag) else {
        manifest.nodes_skipped.push(SkippedNode {
            name: record.name.clone(),
            type_tag: record.type_tag.clone(),
            reason: NodeSkipReason::UnsupportedNodeType {
                type_tag: record.type_tag.clone(),
            },
        });
        return None;
    };

    let name = match host.create_node(&record.type_tag, &record.name, record.location) {
        Ok(name) => name,
        Err(e) => {
            manifest.nodes_skipped.push(SkippedNode {
                name: record.name.clone(),
                type_tag: record.type_tag.clone(),
                reason: NodeSkipReason::HostRejected { message: e.to_string() },
            });
            return None;
        }
    };
    manifest.nodes_created += 1;

    if name != record.name {
        manifest.warnings.push(DecodeWarning::RenamedNode {
            requested: record.name.clone(),
            assigned: name.clone(),
        });
    }

    apply_properties(host, &name, &record.properties, &mut manifest.warnings);
    apply_socket_properties(host, &name, kind, &record.properties, &mut manifest.warnings);
    apply_inputs(host, &name, record, &mut manifest.warnings);

    Some(name)
}

/// Reads optional properties from a property bag; absent or null keys are left alone
struct PropertyReader<'a> {
    node: &'a str,
    properties: &'a Map<String, Value>,
    warnings: &'a mut Vec<DecodeWarning>,
}

impl PropertyReader<'_> {
    fn read<T: DeserializeOwned>(&mut self, key: &str, target: &mut T) {
        let Some(value) = self.properties.get(key).filter(|v| !v.is_null()) else {
            return;
        };
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => *target = parsed,
            Err(e) => self.invalid(key, e.to_string()),
        }
    }

    fn invalid(&mut self, key: &str, reason: String) {
        self.warnings.push(DecodeWarning::InvalidProperty {
            node: self.node.to_string(),
            property: key.to_string(),
            reason,
        });
    }
}

fn apply_properties<H: NodeGraphHost + ?Sized>(
    host: &mut H,
    node: &str,
    properties: &Map<String, Value>,
    warnings: &mut Vec<DecodeWarning>,
) {
    let Some(info) = host.node_info(node) else {
        return;
    };
    let mut current = info.properties;
    if current == NodeProperties::None {
        return;
    }

    let mut reader = PropertyReader { node, properties, warnings };
    match &mut current {
        NodeProperties::NoiseTexture { noise_dimensions } => {
            reader.read("noise_dimensions", noise_dimensions);
        }
        NodeProperties::WaveTexture {
            wave_type,
            bands_direction,
            wave_profile,
        } => {
            reader.read("wave_type", wave_type);
            reader.read("bands_direction", bands_direction);
            reader.read("wave_profile", wave_profile);
        }
        NodeProperties::ColorRamp(ramp) => {
            reader.read("color_mode", &mut ramp.color_mode);
            reader.read("interpolation", &mut ramp.interpolation);
            let mut stops: Option<Vec<ColorStop>> = None;
            reader.read("stops", &mut stops);
            if let Some(stops) = stops {
                if !ramp.set_stops(stops) {
                    reader.invalid("stops", "a color ramp needs at least one stop".to_string());
                }
            }
        }
        NodeProperties::Mix {
            data_type,
            blend_type,
            clamp_factor,
        } => {
            reader.read("data_type", data_type);
            reader.read("blend_type", blend_type);
            reader.read("clamp_factor", clamp_factor);
        }
        NodeProperties::Math { operation, use_clamp } => {
            reader.read("operation", operation);
            reader.read("use_clamp", use_clamp);
        }
        NodeProperties::VectorMath { operation } => {
            reader.read("operation", operation);
        }
        NodeProperties::Bump { invert } => {
            reader.read("invert", invert);
        }
        NodeProperties::Mapping { vector_type } => {
            reader.read("vector_type", vector_type);
        }
        NodeProperties::None => {}
    }

    if let Err(e) = host.set_properties(node, current) {
        warnings.push(DecodeWarning::InvalidProperty {
            node: node.to_string(),
            property: "properties".to_string(),
            reason: e.to_string(),
        });
    }
}

/// Properties that mirror input sockets. Applied before the inputs map,
/// so linked sockets (absent from `inputs`) keep their exported defaults.
fn apply_socket_properties<H: NodeGraphHost + ?Sized>(
    host: &mut H,
    node: &str,
    kind: ShaderNodeKind,
    properties: &Map<String, Value>,
    warnings: &mut Vec<DecodeWarning>,
) {
    for (key, socket_name) in socket_properties(kind) {
        let Some(value) = properties.get(*key).filter(|v| !v.is_null()) else {
            continue;
        };
        let mut invalid = |reason: String| {
            warnings.push(DecodeWarning::InvalidProperty {
                node: node.to_string(),
                property: (*key).to_string(),
                reason,
            });
        };

        let Some(number) = value.as_f64() else {
            invalid(format!("expected a number, found {value}"));
            continue;
        };
        let Some(socket) = host
            .sockets(node, SocketDirection::Input)
            .into_iter()
            .find(|s| s.name == *socket_name)
        else {
            invalid(format!("node has no input {socket_name}"));
            continue;
        };

        let current = host.input_default(node, socket.index).ok().flatten();
        let Some(value) =
            SocketValue::from_components(socket.socket_type, &[number as f32], current.as_ref())
        else {
            invalid(format!("input {socket_name} takes no literal value"));
            continue;
        };
        if let Err(e) = host.set_input_default(node, socket.index, value) {
            invalid(e.to_string());
        }
    }
}

fn apply_inputs<H: NodeGraphHost + ?Sized>(
    host: &mut H,
    node: &str,
    record: &NodeRecord,
    warnings: &mut Vec<DecodeWarning>,
) {
    let sockets = host.sockets(node, SocketDirection::Input);

    for (socket_name, input) in &record.inputs {
        let Some(socket) = sockets.iter().find(|s| s.name == *socket_name) else {
            warnings.push(DecodeWarning::UnknownInput {
                node: node.to_string(),
                socket: socket_name.clone(),
            });
            continue;
        };

        let mut ignored = |reason: &str| {
            warnings.push(DecodeWarning::IgnoredInput {
                node: node.to_string(),
                socket: socket_name.clone(),
                reason: reason.to_string(),
            });
        };

        if socket.socket_type == SocketType::Shader {
            ignored("shader inputs take no literal value");
            continue;
        }
        let Some(components) = input.components() else {
            ignored(match input {
                InputValue::Text(_) => "text values are not applied",
                _ => "value is not a number, bool or number list",
            });
            continue;
        };
        if !matches!(input, InputValue::Sequence(_)) && socket.socket_type.arity() > 1 {
            ignored("scalar value for a vector or color input");
            continue;
        }

        let current = host.input_default(node, socket.index).ok().flatten();
        let Some(value) =
            SocketValue::from_components(socket.socket_type, &components, current.as_ref())
        else {
            ignored("empty number list");
            continue;
        };
        if let Err(e) = host.set_input_default(node, socket.index, value) {
            ignored(&e.to_string());
        }
    }
}

fn decode_link<H: NodeGraphHost + ?Sized>(
    host: &mut H,
    record: &LinkRecord,
    created: &HashMap<&str, String>,
    fed: &HashSet<(String, usize)>,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<(String, usize), LinkSkipReason> {
    let unresolved = |node: &str, socket: Option<&str>| LinkSkipReason::UnresolvedLinkEndpoint {
        node: node.to_string(),
        socket: socket.map(str::to_string),
    };

    let from_node = created
        .get(record.from_node.as_str())
        .ok_or_else(|| unresolved(&record.from_node, None))?;
    let to_node = created
        .get(record.to_node.as_str())
        .ok_or_else(|| unresolved(&record.to_node, None))?;

    let from_socket = resolve_socket(
        host,
        from_node,
        SocketDirection::Output,
        &record.from_socket,
        record.from_socket_index,
        warnings,
    )
    .ok_or_else(|| unresolved(&record.from_node, Some(record.from_socket.as_str())))?;
    let to_socket = resolve_socket(
        host,
        to_node,
        SocketDirection::Input,
        &record.to_socket,
        record.to_socket_index,
        warnings,
    )
    .ok_or_else(|| unresolved(&record.to_node, Some(record.to_socket.as_str())))?;

    let target = (to_node.clone(), to_socket);
    if fed.contains(&target) {
        return Err(LinkSkipReason::DuplicateInputLink {
            node: record.to_node.clone(),
            socket: record.to_socket.clone(),
        });
    }

    host.link(from_node, from_socket, to_node, to_socket)
        .map_err(|e| LinkSkipReason::HostRejected { message: e.to_string() })?;
    Ok(target)
}

/// Position of the socket named `name`.
///
/// Among several sockets sharing the name, the hint wins if it points at
/// one of them; otherwise the first is used and a warning recorded.
fn resolve_socket<H: NodeGraphHost + ?Sized>(
    host: &H,
    node: &str,
    direction: SocketDirection,
    name: &str,
    hint: Option<usize>,
    warnings: &mut Vec<DecodeWarning>,
) -> Option<usize> {
    let matches: Vec<usize> = host
        .sockets(node, direction)
        .into_iter()
        .filter(|s| s.name == name)
        .map(|s| s.index)
        .collect();

    match matches.as_slice() {
        [] => None,
        [only] => Some(*only),
        [first, ..] => {
            if let Some(hint) = hint.filter(|h| matches.contains(h)) {
                return Some(hint);
            }
            warnings.push(DecodeWarning::AmbiguousSocket {
                node: node.to_string(),
                socket: name.to_string(),
                chosen: *first,
            });
            Some(*first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matgraph_core::properties::{MathOperation, NoiseDimensions};
    use matgraph_core::ShaderGraph;
    use serde_json::json;

    fn document(value: Value) -> MaterialDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_properties_applied() {
        let doc = document(json!({
            "material_name": "M",
            "nodes": [
                {"name": "Noise", "type": "ShaderNodeTexNoise",
                 "properties": {"noise_dimensions": "4D", "scale": 12.5, "detail": null}},
                {"name": "Math", "type": "ShaderNodeMath",
                 "properties": {"operation": "MULTIPLY_ADD", "use_clamp": true}}
            ],
            "links": []
        }));
        let mut graph = ShaderGraph::new("M");
        let manifest = decode(&doc, &mut graph);
        assert!(manifest.warnings.is_empty());

        let noise = graph.node_info("Noise").unwrap();
        assert_eq!(
            noise.properties,
            NodeProperties::NoiseTexture { noise_dimensions: NoiseDimensions::Four }
        );
        assert_eq!(graph.node("Noise").unwrap().input("Scale").unwrap().default_value, Some(SocketValue::Float(12.5)));
        assert_eq!(graph.node("Noise").unwrap().input("Detail").unwrap().default_value, Some(SocketValue::Float(2.0)));

        let math = graph.node_info("Math").unwrap();
        assert_eq!(
            math.properties,
            NodeProperties::Math { operation: MathOperation::MultiplyAdd, use_clamp: true }
        );
    }

    #[test]
    fn test_invalid_property_is_a_warning() {
        let doc = document(json!({
            "nodes": [{"name": "Wave", "type": "ShaderNodeTexWave",
                       "properties": {"wave_type": "SPIRAL", "wave_profile": "SAW"}}],
            "links": []
        }));
        let mut graph = ShaderGraph::new("M");
        let manifest = decode(&doc, &mut graph);
        assert_eq!(manifest.nodes_created, 1);
        assert!(matches!(
            &manifest.warnings[..],
            [DecodeWarning::InvalidProperty { property, .. }] if property == "wave_type"
        ));
        let NodeProperties::WaveTexture { wave_profile, .. } = graph.node_info("Wave").unwrap().properties else {
            panic!("wave properties expected");
        };
        assert_eq!(wave_profile, matgraph_core::properties::WaveProfile::Saw);
    }

    #[test]
    fn test_empty_stops_keep_default_ramp() {
        let doc = document(json!({
            "nodes": [{"name": "Ramp", "type": "ShaderNodeValToRGB", "properties": {"stops": []}}],
            "links": []
        }));
        let mut graph = ShaderGraph::new("M");
        let manifest = decode(&doc, &mut graph);
        assert_eq!(manifest.warnings.len(), 1);
        let NodeProperties::ColorRamp(ramp) = graph.node_info("Ramp").unwrap().properties else {
            panic!("ramp properties expected");
        };
        assert_eq!(ramp.stops().len(), 2);
    }

    #[test]
    fn test_input_values_fit_socket_arity() {
        let doc = document(json!({
            "nodes": [{"name": "Map", "type": "ShaderNodeMapping", "inputs": {
                "Location": [1.0, 2.0, 3.0, 4.0],
                "Scale": [2.0],
                "Rotation": 1.0,
                "Vector": "text",
                "Missing": 1.0
            }}],
            "links": []
        }));
        let mut graph = ShaderGraph::new("M");
        let manifest = decode(&doc, &mut graph);

        let node = graph.node("Map").unwrap();
        assert_eq!(node.input("Location").unwrap().default_value, Some(SocketValue::Vector([1.0, 2.0, 3.0])));
        // Padding keeps the socket's current components
        assert_eq!(node.input("Scale").unwrap().default_value, Some(SocketValue::Vector([2.0, 1.0, 1.0])));

        let ignored: Vec<&str> = manifest
            .warnings
            .iter()
            .filter_map(|w| match w {
                DecodeWarning::IgnoredInput { socket, .. } => Some(socket.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ignored, vec!["Rotation", "Vector"]);
        assert!(manifest
            .warnings
            .contains(&DecodeWarning::UnknownInput { node: "Map".to_string(), socket: "Missing".to_string() }));
    }

    #[test]
    fn test_duplicate_node_names_are_renamed() {
        let doc = document(json!({
            "nodes": [
                {"name": "A", "type": "ShaderNodeMath"},
                {"name": "A", "type": "ShaderNodeMath"}
            ],
            "links": [{"from_node": "A", "from_socket": "Value", "to_node": "A", "to_socket": "Value"}]
        }));
        let mut graph = ShaderGraph::new("M");
        let manifest = decode(&doc, &mut graph);
        assert_eq!(manifest.nodes_created, 2);
        assert!(manifest.warnings.contains(&DecodeWarning::RenamedNode {
            requested: "A".to_string(),
            assigned: "A.001".to_string(),
        }));
        // Both endpoints resolve to the later node, which the host refuses
        assert!(matches!(
            manifest.links_skipped[0].reason,
            LinkSkipReason::HostRejected { .. }
        ));
    }

    #[test]
    fn test_shader_link_into_float_is_rejected() {
        let doc = document(json!({
            "nodes": [
                {"name": "BSDF", "type": "ShaderNodeBsdfPrincipled"},
                {"name": "Math", "type": "ShaderNodeMath"}
            ],
            "links": [{"from_node": "BSDF", "from_socket": "BSDF", "to_node": "Math", "to_socket": "Value"}]
        }));
        let mut graph = ShaderGraph::new("M");
        let manifest = decode(&doc, &mut graph);
        assert_eq!(manifest.links_created, 0);
        assert!(matches!(manifest.links_skipped[0].reason, LinkSkipReason::HostRejected { .. }));
        // Math inputs all share the name Value
        assert_eq!(manifest.warnings.len(), 1);
    }

    #[test]
    fn test_import_into_new_active_material() {
        let doc = document(json!({"nodes": [], "links": []}));
        let mut library = MaterialLibrary::new();
        let manifest = decode_into_library(&doc, &mut library, &ImportTarget::Active, "Fallback");
        assert_eq!(manifest.material_name, "Imported_Material");
        assert_eq!(library.active_name(), Some("Imported_Material"));
        assert!(library.active_material().unwrap().use_nodes);

        let mut unnamed = doc.clone();
        unnamed.material_name.clear();
        let mut library = MaterialLibrary::new();
        let manifest = decode_into_library(&unnamed, &mut library, &ImportTarget::Active, "Fallback");
        assert_eq!(manifest.material_name, "Fallback");
    }

    #[test]
    fn test_import_replaces_named_material_graph() {
        let doc = document(json!({
            "nodes": [{"name": "Bump", "type": "ShaderNodeBump"}],
            "links": []
        }));
        let mut library = MaterialLibrary::new();
        let name = library.add_material("Stone");
        library.material_mut(&name).unwrap().enable_nodes();

        let manifest = decode_into_library(&doc, &mut library, &ImportTarget::Named("Stone".to_string()), "Fallback");
        assert_eq!(manifest.material_name, "Stone");
        let graph = &library.material("Stone").unwrap().graph;
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.link_count(), 0);
        // Active selection is untouched by a named import
        assert_eq!(library.active_name(), None);
    }
}
