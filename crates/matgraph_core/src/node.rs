// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the shader graph.

use crate::properties::{NodeProperties, ShaderNodeKind};
use crate::socket::{Socket, SocketDirection, SocketId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Host type tag, e.g. `ShaderNodeTexNoise`
    pub type_tag: String,
    /// Display name, also the base for generated node names
    pub label: String,
    /// Default input sockets
    pub inputs: Vec<Socket>,
    /// Default output sockets
    pub outputs: Vec<Socket>,
}

impl NodeType {
    /// Supported kind for this type, if any
    pub fn kind(&self) -> Option<ShaderNodeKind> {
        ShaderNodeKind::from_type_tag(&self.type_tag)
    }
}

/// A node instance in the graph
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique name within the graph, also the node's identity
    pub name: String,
    /// Host type tag
    pub type_tag: String,
    /// Location in the graph editor
    pub location: [f32; 2],
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
    /// Kind-specific properties
    pub properties: NodeProperties,
}

impl Node {
    /// Create a new node from a type definition
    pub fn new(node_type: &NodeType, name: impl Into<String>) -> Self {
        let properties = node_type
            .kind()
            .map_or(NodeProperties::None, |kind| kind.default_properties());
        Self {
            name: name.into(),
            type_tag: node_type.type_tag.clone(),
            location: [0.0, 0.0],
            inputs: node_type.inputs.iter().map(Socket::instantiate).collect(),
            outputs: node_type.outputs.iter().map(Socket::instantiate).collect(),
            properties,
        }
    }

    /// Sockets in one direction
    pub fn sockets(&self, direction: SocketDirection) -> &[Socket] {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }

    /// First input socket with the given name
    pub fn input(&self, name: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    /// Mutable first input socket with the given name
    pub fn input_mut(&mut self, name: &str) -> Option<&mut Socket> {
        self.inputs.iter_mut().find(|s| s.name == name)
    }

    /// First output socket with the given name
    pub fn output(&self, name: &str) -> Option<&Socket> {
        self.outputs.iter().find(|s| s.name == name)
    }

    /// Get a socket by ID
    pub fn socket(&self, socket_id: &SocketId) -> Option<&Socket> {
        self.inputs
            .iter()
            .find(|s| s.id == *socket_id)
            .or_else(|| self.outputs.iter().find(|s| s.id == *socket_id))
    }

    /// Position of a socket among the sockets of its direction
    pub fn socket_index(&self, socket_id: &SocketId) -> Option<usize> {
        self.inputs
            .iter()
            .position(|s| s.id == *socket_id)
            .or_else(|| self.outputs.iter().position(|s| s.id == *socket_id))
    }
}

/// Registry of node types the host can instantiate
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    types: IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Register a node type, replacing any type with the same tag
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.type_tag.clone(), node_type);
    }

    /// Get a node type by tag
    pub fn get(&self, type_tag: &str) -> Option<&NodeType> {
        self.types.get(type_tag)
    }

    /// Create a node from a type tag
    pub fn create_node(&self, type_tag: &str, name: impl Into<String>) -> Option<Node> {
        self.get(type_tag).map(|t| Node::new(t, name))
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
