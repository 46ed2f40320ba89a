// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interchange document records.
//!
//! A document is one UTF-8 JSON object:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "material_name": "Stone",
//!   "nodes": [{ "name": "Noise", "type": "ShaderNodeTexNoise", "location": [0.0, 0.0],
//!               "inputs": { "Scale": 5.0 }, "outputs": ["Fac", "Color"],
//!               "properties": { "noise_dimensions": "3D", "scale": 5.0 } }],
//!   "links": [{ "from_node": "Noise", "from_socket": "Fac",
//!               "to_node": "Bump", "to_socket": "Height" }]
//! }
//! ```
//!
//! Documents written before `format_version` existed are read as version 0.
//! Only the top-level `nodes` and `links` arrays are required; an entry
//! inside them that does not parse is kept aside as a [`RejectedRecord`]
//! and reported by the decoder.

use crate::error::{CodecError, CodecResult};
use indexmap::IndexMap;
use matgraph_core::SocketValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Current document format version
pub const FORMAT_VERSION: u32 = 1;

/// Material name used when a document does not carry one
pub const DEFAULT_MATERIAL_NAME: &str = "Imported_Material";

fn default_material_name() -> String {
    DEFAULT_MATERIAL_NAME.to_string()
}

/// A serialized material node graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDocument")]
pub struct MaterialDocument {
    /// Format version, 0 when absent
    pub format_version: u32,
    /// Name of the exported material
    pub material_name: String,
    /// Nodes in graph order
    pub nodes: Vec<NodeRecord>,
    /// Links in graph order
    pub links: Vec<LinkRecord>,
    /// Node entries that could not be read
    #[serde(skip)]
    pub rejected_nodes: Vec<RejectedRecord>,
    /// Link entries that could not be read
    #[serde(skip)]
    pub rejected_links: Vec<RejectedRecord>,
}

/// Document as read, before each entry is parsed on its own
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    format_version: u32,
    #[serde(default = "default_material_name")]
    material_name: String,
    nodes: Vec<Value>,
    links: Vec<Value>,
}

impl From<RawDocument> for MaterialDocument {
    fn from(raw: RawDocument) -> Self {
        let (nodes, rejected_nodes) = parse_entries(raw.nodes);
        let (links, rejected_links) = parse_entries(raw.links);
        Self {
            format_version: raw.format_version,
            material_name: raw.material_name,
            nodes,
            links,
            rejected_nodes,
            rejected_links,
        }
    }
}

fn parse_entries<T: serde::de::DeserializeOwned>(entries: Vec<Value>) -> (Vec<T>, Vec<RejectedRecord>) {
    let mut parsed = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match T::deserialize(&entry) {
            Ok(record) => parsed.push(record),
            Err(e) => rejected.push(RejectedRecord {
                index,
                message: e.to_string(),
                entry,
            }),
        }
    }
    (parsed, rejected)
}

/// A `nodes` or `links` entry that did not parse
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position in its array
    pub index: usize,
    /// Parse error
    pub message: String,
    /// The entry as found
    pub entry: Value,
}

impl RejectedRecord {
    /// String field of the entry, empty when missing or not a string
    pub fn field(&self, key: &str) -> String {
        self.entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

impl MaterialDocument {
    /// Create an empty document at the current format version
    pub fn new(material_name: impl Into<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            material_name: material_name.into(),
            nodes: Vec::new(),
            links: Vec::new(),
            rejected_nodes: Vec::new(),
            rejected_links: Vec::new(),
        }
    }

    /// Parse a document and check its version
    pub fn from_json_str(s: &str) -> CodecResult<Self> {
        let document: MaterialDocument = serde_json::from_str(s)?;

        if document.format_version > FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion {
                found: document.format_version,
                supported: FORMAT_VERSION,
            });
        }

        Ok(document)
    }

    /// Serialize to JSON
    pub fn to_json_string(&self, pretty: bool) -> CodecResult<String> {
        write_json(self, pretty)
    }

    /// Load a document from a file
    pub fn load(path: &Path) -> CodecResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Save the document to a file
    pub fn save(&self, path: &Path, pretty: bool) -> CodecResult<()> {
        let content = self.to_json_string(pretty)?;
        std::fs::write(path, content).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get a node record by name
    pub fn node(&self, name: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> CodecResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(CodecError::Serialize)
}

/// One node of the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node name, unique within the graph
    pub name: String,
    /// Host type tag
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Editor location
    #[serde(default)]
    pub location: [f32; 2],
    /// Literal values of unlinked inputs, by socket name
    #[serde(default)]
    pub inputs: IndexMap<String, InputValue>,
    /// Output socket names in order
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Kind-specific properties; empty for generic nodes
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

/// Literal input value as written in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// Boolean
    Bool(bool),
    /// Scalar number
    Number(f32),
    /// Vector or color components
    Sequence(Vec<f32>),
    /// Text; carried but never applied to a socket
    Text(String),
    /// Anything else
    Other(Value),
}

impl InputValue {
    /// Numeric components, if the value is numeric
    pub fn components(&self) -> Option<Vec<f32>> {
        match self {
            Self::Bool(b) => Some(vec![if *b { 1.0 } else { 0.0 }]),
            Self::Number(n) => Some(vec![*n]),
            Self::Sequence(values) => Some(values.clone()),
            Self::Text(_) | Self::Other(_) => None,
        }
    }
}

impl From<SocketValue> for InputValue {
    fn from(value: SocketValue) -> Self {
        match value {
            SocketValue::Bool(b) => Self::Bool(b),
            SocketValue::Int(i) => Self::Number(i as f32),
            SocketValue::Float(f) => Self::Number(f),
            SocketValue::Vector(v) => Self::Sequence(v.to_vec()),
            SocketValue::Color(c) => Self::Sequence(c.to_vec()),
        }
    }
}

/// One link, endpoints by node and socket name.
///
/// Socket names are not unique on every node type. The optional indices
/// record the socket positions so a reader can pick the right socket when
/// a name is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Source node name
    pub from_node: String,
    /// Source output socket name
    pub from_socket: String,
    /// Target node name
    pub to_node: String,
    /// Target input socket name
    pub to_socket: String,
    /// Source output position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_socket_index: Option<usize>,
    /// Target input position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_socket_index: Option<usize>,
}

impl LinkRecord {
    /// Create a link record without position hints
    pub fn new(
        from_node: impl Into<String>,
        from_socket: impl Into<String>,
        to_node: impl Into<String>,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from_node: from_node.into(),
            from_socket: from_socket.into(),
            to_node: to_node.into(),
            to_socket: to_socket.into(),
            from_socket_index: None,
            to_socket_index: None,
        }
    }
}

impl fmt::Display for LinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.from_node, self.from_socket, self.to_node, self.to_socket
        )
    }
}
