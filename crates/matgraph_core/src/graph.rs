// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader graph data structure containing nodes and links.

use crate::link::{Link, LinkId};
use crate::node::{Node, NodeRegistry};
use crate::shader_nodes::create_shader_registry;
use crate::socket::{SocketDirection, SocketId, SocketValue};
use indexmap::IndexMap;

/// A shader node graph.
///
/// Nodes are keyed by name, which is unique within the graph. An input
/// socket receives at most one link.
#[derive(Debug, Clone)]
pub struct ShaderGraph {
    /// Graph name
    pub name: String,
    /// Node types this graph can instantiate
    registry: NodeRegistry,
    /// Nodes in creation order
    nodes: IndexMap<String, Node>,
    /// Links in creation order
    links: IndexMap<LinkId, Link>,
}

impl ShaderGraph {
    /// Create a new empty graph using the built-in shader node types
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name, create_shader_registry())
    }

    /// Create a new empty graph with a custom registry
    pub fn with_registry(name: impl Into<String>, registry: NodeRegistry) -> Self {
        Self {
            name: name.into(),
            registry,
            nodes: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Instantiate a registered node type.
    ///
    /// Returns the name the node ended up with, which differs from `name`
    /// when that name is already taken.
    pub fn add_node(&mut self, type_tag: &str, name: &str) -> Result<String, HostError> {
        let node = self
            .registry
            .create_node(type_tag, name)
            .ok_or_else(|| HostError::UnknownNodeType(type_tag.to_string()))?;
        Ok(self.insert_node(node))
    }

    /// Insert an already built node, renaming it if its name is taken
    pub fn insert_node(&mut self, mut node: Node) -> String {
        let base = if node.name.is_empty() {
            self.registry
                .get(&node.type_tag)
                .map_or_else(|| node.type_tag.clone(), |t| t.label.clone())
        } else {
            node.name.clone()
        };
        node.name = self.unique_name(&base);
        let name = node.name.clone();
        self.nodes.insert(name.clone(), node);
        name
    }

    /// `base` if free, otherwise `base.001`, `base.002`, ...
    pub fn unique_name(&self, base: &str) -> String {
        if !self.nodes.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !self.nodes.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Remove every node and link
    pub fn clear(&mut self) {
        self.links.clear();
        self.nodes.clear();
    }

    /// Get a node by name
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Get a mutable node by name
    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Set the literal value of the first input socket named `socket`
    pub fn set_input(&mut self, node: &str, socket: &str, value: SocketValue) -> Result<(), HostError> {
        let target = self
            .nodes
            .get_mut(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        let input = target.input_mut(socket).ok_or_else(|| HostError::SocketNotFound {
            node: node.to_string(),
            socket: socket.to_string(),
        })?;
        if input.socket_type != value.socket_type() {
            return Err(HostError::IncompatibleValue {
                node: node.to_string(),
                socket: socket.to_string(),
            });
        }
        input.default_value = Some(value);
        Ok(())
    }

    /// Link two sockets
    pub fn connect(
        &mut self,
        from_node: &str,
        from_socket: SocketId,
        to_node: &str,
        to_socket: SocketId,
    ) -> Result<LinkId, HostError> {
        let source_node = self
            .nodes
            .get(from_node)
            .ok_or_else(|| HostError::NodeNotFound(from_node.to_string()))?;
        let target_node = self
            .nodes
            .get(to_node)
            .ok_or_else(|| HostError::NodeNotFound(to_node.to_string()))?;

        let source = source_node
            .socket(&from_socket)
            .ok_or_else(|| HostError::SocketNotFound {
                node: from_node.to_string(),
                socket: format!("{from_socket:?}"),
            })?;
        let target = target_node
            .socket(&to_socket)
            .ok_or_else(|| HostError::SocketNotFound {
                node: to_node.to_string(),
                socket: format!("{to_socket:?}"),
            })?;

        if !source.can_connect(target) {
            return Err(HostError::IncompatibleSockets {
                from: format!("{from_node}.{}", source.name),
                to: format!("{to_node}.{}", target.name),
            });
        }

        if self.is_socket_linked(to_socket) {
            return Err(HostError::SocketAlreadyLinked {
                node: to_node.to_string(),
                socket: target.name.clone(),
            });
        }

        if from_node == to_node {
            return Err(HostError::SelfLoop(from_node.to_string()));
        }

        let link = Link::new(from_node, from_socket, to_node, to_socket);
        let id = link.id;
        self.links.insert(id, link);
        Ok(id)
    }

    /// Link the first output named `from_socket` to the first input named `to_socket`
    pub fn connect_by_name(
        &mut self,
        from_node: &str,
        from_socket: &str,
        to_node: &str,
        to_socket: &str,
    ) -> Result<LinkId, HostError> {
        let source = self
            .node(from_node)
            .ok_or_else(|| HostError::NodeNotFound(from_node.to_string()))?
            .output(from_socket)
            .ok_or_else(|| HostError::SocketNotFound {
                node: from_node.to_string(),
                socket: from_socket.to_string(),
            })?
            .id;
        let target = self
            .node(to_node)
            .ok_or_else(|| HostError::NodeNotFound(to_node.to_string()))?
            .input(to_socket)
            .ok_or_else(|| HostError::SocketNotFound {
                node: to_node.to_string(),
                socket: to_socket.to_string(),
            })?
            .id;
        self.connect(from_node, source, to_node, target)
    }

    /// Get all links
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Check if any link touches a socket
    pub fn is_socket_linked(&self, socket_id: SocketId) -> bool {
        self.links.values().any(|l| l.involves_socket(socket_id))
    }

    /// Resolve a socket by direction and position
    pub(crate) fn socket_id(
        &self,
        node: &str,
        direction: SocketDirection,
        index: usize,
    ) -> Result<SocketId, HostError> {
        let target = self
            .nodes
            .get(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        target
            .sockets(direction)
            .get(index)
            .map(|s| s.id)
            .ok_or_else(|| HostError::SocketNotFound {
                node: node.to_string(),
                socket: format!("{direction:?} #{index}"),
            })
    }
}

impl Default for ShaderGraph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error raised by a graph host
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// Node type not known to the host
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Socket not found
    #[error("Socket not found: {node}.{socket}")]
    SocketNotFound {
        /// Node name
        node: String,
        /// Socket name or position
        socket: String,
    },

    /// Socket types cannot be linked
    #[error("Incompatible sockets: {from} -> {to}")]
    IncompatibleSockets {
        /// Source endpoint
        from: String,
        /// Target endpoint
        to: String,
    },

    /// Input already has an incoming link
    #[error("Socket already linked: {node}.{socket}")]
    SocketAlreadyLinked {
        /// Node name
        node: String,
        /// Socket name
        socket: String,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed on {0}")]
    SelfLoop(String),

    /// Value does not fit the socket
    #[error("Value does not fit socket {node}.{socket}")]
    IncompatibleValue {
        /// Node name
        node: String,
        /// Socket name
        socket: String,
    },

    /// Socket default could not be read
    #[error("Default value of {node}.{socket} is unreadable")]
    UnreadableDefault {
        /// Node name
        node: String,
        /// Socket name
        socket: String,
    },

    /// Properties belong to a different node kind
    #[error("Properties do not match the kind of node {0}")]
    PropertyMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names() {
        let mut graph = ShaderGraph::new("Test");
        let first = graph.add_node("ShaderNodeMath", "Math").unwrap();
        let second = graph.add_node("ShaderNodeMath", "Math").unwrap();
        let third = graph.add_node("ShaderNodeMath", "Math").unwrap();
        assert_eq!(first, "Math");
        assert_eq!(second, "Math.001");
        assert_eq!(third, "Math.002");
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut graph = ShaderGraph::new("Test");
        let err = graph.add_node("ShaderNodeBogus", "Bogus").unwrap_err();
        assert_eq!(err, HostError::UnknownNodeType("ShaderNodeBogus".to_string()));
    }

    #[test]
    fn test_single_link_per_input() {
        let mut graph = ShaderGraph::new("Test");
        graph.add_node("ShaderNodeTexNoise", "Noise").unwrap();
        graph.add_node("ShaderNodeTexWave", "Wave").unwrap();
        graph.add_node("ShaderNodeBump", "Bump").unwrap();

        graph.connect_by_name("Noise", "Fac", "Bump", "Height").unwrap();
        let err = graph.connect_by_name("Wave", "Fac", "Bump", "Height").unwrap_err();
        assert!(matches!(err, HostError::SocketAlreadyLinked { .. }));
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn test_shader_into_float_rejected() {
        let mut graph = ShaderGraph::new("Test");
        graph.add_node("ShaderNodeBsdfPrincipled", "BSDF").unwrap();
        graph.add_node("ShaderNodeMath", "Math").unwrap();
        let err = graph.connect_by_name("BSDF", "BSDF", "Math", "Value").unwrap_err();
        assert!(matches!(err, HostError::IncompatibleSockets { .. }));
    }
}
