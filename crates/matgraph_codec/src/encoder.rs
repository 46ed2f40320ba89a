// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph → document.
//!
//! Encoding is a pure read of the host graph: one pass over the nodes,
//! one pass over the links.

use crate::document::{InputValue, LinkRecord, MaterialDocument, NodeRecord};
use crate::error::{CodecError, CodecResult};
use crate::manifest::{CollapsedInput, EncodeManifest, UnexportedLink, UnreadableSocketDefault};
use crate::schema::{number, socket_properties, socket_value};
use indexmap::IndexMap;
use matgraph_core::properties::MixDataType;
use matgraph_core::{
    MaterialLibrary, NodeGraphHost, NodeInfo, NodeProperties, ShaderNodeKind, SocketDirection,
    SocketInfo,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Encoder settings
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Write socket positions next to socket names in link records
    pub emit_socket_indices: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            emit_socket_indices: true,
        }
    }
}

/// An encoded document and what happened while encoding it
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The document
    pub document: MaterialDocument,
    /// Export summary
    pub manifest: EncodeManifest,
}

/// Encode a host graph
pub fn encode<H: NodeGraphHost + ?Sized>(host: &H, options: &EncodeOptions) -> Encoded {
    let mut document = MaterialDocument::new(host.graph_name());
    let mut manifest = EncodeManifest::default();

    for name in host.node_names() {
        let Some(info) = host.node_info(&name) else {
            continue;
        };
        document.nodes.push(encode_node(host, info, &mut manifest));
    }

    for link in host.links() {
        let from = socket_name(host, &link.from_node, SocketDirection::Output, link.from_socket);
        let to = socket_name(host, &link.to_node, SocketDirection::Input, link.to_socket);
        let (from_socket, to_socket) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (from, _) => {
                let side = if from.is_none() { "source" } else { "target" };
                let skipped = UnexportedLink {
                    from_node: link.from_node,
                    to_node: link.to_node,
                    reason: format!("{side} socket not found"),
                };
                tracing::debug!("{skipped}");
                manifest.skipped_links.push(skipped);
                continue;
            }
        };

        let mut record = LinkRecord::new(link.from_node, from_socket, link.to_node, to_socket);
        if options.emit_socket_indices {
            record.from_socket_index = link.from_socket;
            record.to_socket_index = link.to_socket;
        }
        document.links.push(record);
    }

    manifest.nodes_exported = document.nodes.len();
    manifest.links_exported = document.links.len();
    Encoded { document, manifest }
}

/// Encode a material from a library.
///
/// With no name, the active material is encoded.
pub fn encode_material(
    library: &MaterialLibrary,
    material: Option<&str>,
    options: &EncodeOptions,
) -> CodecResult<Encoded> {
    let material = match material {
        Some(name) => library
            .material(name)
            .ok_or_else(|| CodecError::NoActiveGraph(format!("material '{name}' does not exist")))?,
        None => library
            .active_material()
            .ok_or_else(|| CodecError::NoActiveGraph("no active material".to_string()))?,
    };

    let graph = material.node_graph().ok_or_else(|| {
        CodecError::NoActiveGraph(format!("material '{}' does not use nodes", material.name))
    })?;

    let mut encoded = encode(graph, options);
    encoded.document.material_name = material.name.clone();
    Ok(encoded)
}

fn socket_name<H: NodeGraphHost + ?Sized>(
    host: &H,
    node: &str,
    direction: SocketDirection,
    index: Option<usize>,
) -> Option<String> {
    let index = index?;
    host.sockets(node, direction)
        .into_iter()
        .find(|s| s.index == index)
        .map(|s| s.name)
}

fn encode_node<H: NodeGraphHost + ?Sized>(
    host: &H,
    info: NodeInfo,
    manifest: &mut EncodeManifest,
) -> NodeRecord {
    let sockets = host.sockets(&info.name, SocketDirection::Input);

    let mut inputs = IndexMap::new();
    for socket in sockets.iter().filter(|s| !s.is_linked) {
        match host.input_default(&info.name, socket.index) {
            Ok(Some(value)) if value.components().iter().any(|c| !c.is_finite()) => {
                tracing::debug!("Skipping non-finite default of {}.{}", info.name, socket.name);
                manifest.unreadable_defaults.push(UnreadableSocketDefault {
                    node: info.name.clone(),
                    socket: socket.name.clone(),
                    reason: "value is not finite".to_string(),
                });
            }
            Ok(Some(value)) => {
                let previous = inputs.insert(socket.name.clone(), InputValue::from(value));
                if previous.is_some() {
                    manifest.collapsed_inputs.push(CollapsedInput {
                        node: info.name.clone(),
                        socket: socket.name.clone(),
                        kept_index: socket.index,
                    });
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("Skipping default of {}.{}: {e}", info.name, socket.name);
                manifest.unreadable_defaults.push(UnreadableSocketDefault {
                    node: info.name.clone(),
                    socket: socket.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let outputs = host
        .sockets(&info.name, SocketDirection::Output)
        .into_iter()
        .map(|s| s.name)
        .collect();

    let properties = encode_properties(host, &info, &sockets);

    NodeRecord {
        name: info.name,
        type_tag: info.type_tag,
        location: info.location,
        inputs,
        outputs,
        properties,
    }
}

fn encode_properties<H: NodeGraphHost + ?Sized>(
    host: &H,
    info: &NodeInfo,
    sockets: &[SocketInfo],
) -> Map<String, Value> {
    let mut props = Map::new();

    match &info.properties {
        NodeProperties::NoiseTexture { noise_dimensions } => {
            props.insert("noise_dimensions".into(), enum_value(noise_dimensions));
        }
        NodeProperties::WaveTexture {
            wave_type,
            bands_direction,
            wave_profile,
        } => {
            props.insert("wave_type".into(), enum_value(wave_type));
            props.insert("bands_direction".into(), enum_value(bands_direction));
            props.insert("wave_profile".into(), enum_value(wave_profile));
        }
        NodeProperties::ColorRamp(ramp) => {
            let stops: Vec<Value> = ramp
                .stops()
                .iter()
                .map(|stop| {
                    json!({
                        "position": number(stop.position),
                        "color": stop.color.iter().copied().map(number).collect::<Vec<_>>(),
                    })
                })
                .collect();
            props.insert("color_mode".into(), enum_value(&ramp.color_mode));
            props.insert("interpolation".into(), enum_value(&ramp.interpolation));
            props.insert("stops".into(), Value::Array(stops));
        }
        NodeProperties::Mix {
            data_type,
            blend_type,
            clamp_factor,
        } => {
            let blend = if *data_type == MixDataType::Rgba {
                enum_value(blend_type)
            } else {
                Value::Null
            };
            props.insert("data_type".into(), enum_value(data_type));
            props.insert("blend_type".into(), blend);
            props.insert("clamp_factor".into(), Value::Bool(*clamp_factor));
        }
        NodeProperties::Math { operation, use_clamp } => {
            props.insert("operation".into(), enum_value(operation));
            props.insert("use_clamp".into(), Value::Bool(*use_clamp));
        }
        NodeProperties::VectorMath { operation } => {
            props.insert("operation".into(), enum_value(operation));
        }
        NodeProperties::Bump { invert } => {
            props.insert("invert".into(), Value::Bool(*invert));
        }
        NodeProperties::Mapping { vector_type } => {
            props.insert("vector_type".into(), enum_value(vector_type));
        }
        NodeProperties::None => {}
    }

    let Some(kind) = ShaderNodeKind::from_type_tag(&info.type_tag) else {
        return props;
    };
    for (key, socket_name) in socket_properties(kind) {
        // Read whether or not the socket is linked; null when absent or unreadable
        let value = sockets
            .iter()
            .find(|s| s.name == *socket_name)
            .and_then(|s| host.input_default(&info.name, s.index).ok().flatten())
            .map_or(Value::Null, |v| socket_value(&v));
        props.insert((*key).to_string(), value);
    }

    props
}

fn enum_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
