// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host graph provider interface.
//!
//! Interchange code talks to a node graph only through [`NodeGraphHost`].
//! Sockets are addressed by node name and position; names are resolved by
//! the caller, since socket names are not unique on every node type.

use crate::graph::{HostError, ShaderGraph};
use crate::properties::NodeProperties;
use crate::socket::{SocketDirection, SocketType, SocketValue};

/// Snapshot of a node's identity and properties
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    /// Unique node name
    pub name: String,
    /// Host type tag
    pub type_tag: String,
    /// Location in the graph editor
    pub location: [f32; 2],
    /// Kind-specific properties
    pub properties: NodeProperties,
}

/// Snapshot of one socket
#[derive(Debug, Clone, PartialEq)]
pub struct SocketInfo {
    /// Position among the node's sockets of the same direction
    pub index: usize,
    /// Display name
    pub name: String,
    /// Data type
    pub socket_type: SocketType,
    /// Whether a link is attached
    pub is_linked: bool,
}

/// Snapshot of one link, endpoints by node name and socket position.
///
/// A position is `None` when the host can no longer locate the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Source node name
    pub from_node: String,
    /// Source output position
    pub from_socket: Option<usize>,
    /// Target node name
    pub to_node: String,
    /// Target input position
    pub to_socket: Option<usize>,
}

/// Narrow interface to a host-resident shader node graph
pub trait NodeGraphHost {
    /// Name of the graph (usually the material name)
    fn graph_name(&self) -> &str;

    /// Node names in host order
    fn node_names(&self) -> Vec<String>;

    /// Identity, location and properties of a node
    fn node_info(&self, node: &str) -> Option<NodeInfo>;

    /// Sockets of a node in one direction, in host order
    fn sockets(&self, node: &str, direction: SocketDirection) -> Vec<SocketInfo>;

    /// Literal default of an input socket.
    ///
    /// `Ok(None)` means the socket has no representable default.
    fn input_default(&self, node: &str, index: usize) -> Result<Option<SocketValue>, HostError>;

    /// All links in host order
    fn links(&self) -> Vec<LinkInfo>;

    /// Remove every node and link
    fn clear(&mut self);

    /// Create a node; returns the name the host assigned
    fn create_node(&mut self, type_tag: &str, name: &str, location: [f32; 2]) -> Result<String, HostError>;

    /// Replace a node's kind-specific properties
    fn set_properties(&mut self, node: &str, properties: NodeProperties) -> Result<(), HostError>;

    /// Set the literal default of an input socket
    fn set_input_default(&mut self, node: &str, index: usize, value: SocketValue) -> Result<(), HostError>;

    /// Link an output socket to an input socket
    fn link(&mut self, from_node: &str, from_socket: usize, to_node: &str, to_socket: usize) -> Result<(), HostError>;
}

impl NodeGraphHost for ShaderGraph {
    fn graph_name(&self) -> &str {
        &self.name
    }

    fn node_names(&self) -> Vec<String> {
        self.nodes().map(|n| n.name.clone()).collect()
    }

    fn node_info(&self, node: &str) -> Option<NodeInfo> {
        self.node(node).map(|n| NodeInfo {
            name: n.name.clone(),
            type_tag: n.type_tag.clone(),
            location: n.location,
            properties: n.properties.clone(),
        })
    }

    fn sockets(&self, node: &str, direction: SocketDirection) -> Vec<SocketInfo> {
        let Some(n) = self.node(node) else {
            return Vec::new();
        };
        n.sockets(direction)
            .iter()
            .enumerate()
            .map(|(index, s)| SocketInfo {
                index,
                name: s.name.clone(),
                socket_type: s.socket_type,
                is_linked: self.is_socket_linked(s.id),
            })
            .collect()
    }

    fn input_default(&self, node: &str, index: usize) -> Result<Option<SocketValue>, HostError> {
        let n = self
            .node(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        let socket = n.inputs.get(index).ok_or_else(|| HostError::SocketNotFound {
            node: node.to_string(),
            socket: format!("Input #{index}"),
        })?;
        Ok(socket.default_value)
    }

    fn links(&self) -> Vec<LinkInfo> {
        self.links()
            .map(|l| LinkInfo {
                from_node: l.from_node.clone(),
                from_socket: self.node(&l.from_node).and_then(|n| n.socket_index(&l.from_socket)),
                to_node: l.to_node.clone(),
                to_socket: self.node(&l.to_node).and_then(|n| n.socket_index(&l.to_socket)),
            })
            .collect()
    }

    fn clear(&mut self) {
        ShaderGraph::clear(self);
    }

    fn create_node(&mut self, type_tag: &str, name: &str, location: [f32; 2]) -> Result<String, HostError> {
        let name = self.add_node(type_tag, name)?;
        if let Some(n) = self.node_mut(&name) {
            n.location = location;
        }
        Ok(name)
    }

    fn set_properties(&mut self, node: &str, properties: NodeProperties) -> Result<(), HostError> {
        let n = self
            .node_mut(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        if std::mem::discriminant(&n.properties) != std::mem::discriminant(&properties) {
            return Err(HostError::PropertyMismatch(node.to_string()));
        }
        n.properties = properties;
        Ok(())
    }

    fn set_input_default(&mut self, node: &str, index: usize, value: SocketValue) -> Result<(), HostError> {
        let n = self
            .node_mut(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        let socket = n.inputs.get_mut(index).ok_or_else(|| HostError::SocketNotFound {
            node: node.to_string(),
            socket: format!("Input #{index}"),
        })?;
        if socket.socket_type != value.socket_type() {
            return Err(HostError::IncompatibleValue {
                node: node.to_string(),
                socket: socket.name.clone(),
            });
        }
        socket.default_value = Some(value);
        Ok(())
    }

    fn link(&mut self, from_node: &str, from_socket: usize, to_node: &str, to_socket: usize) -> Result<(), HostError> {
        let from = self.socket_id(from_node, SocketDirection::Output, from_socket)?;
        let to = self.socket_id(to_node, SocketDirection::Input, to_socket)?;
        self.connect(from_node, from, to_node, to).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_report_positions() {
        let mut graph = ShaderGraph::new("Test");
        graph.create_node("ShaderNodeMath", "A", [0.0, 0.0]).unwrap();
        graph.create_node("ShaderNodeMath", "B", [200.0, 0.0]).unwrap();
        graph.link("A", 0, "B", 1).unwrap();

        let links = NodeGraphHost::links(&graph);
        assert_eq!(
            links,
            vec![LinkInfo {
                from_node: "A".to_string(),
                from_socket: Some(0),
                to_node: "B".to_string(),
                to_socket: Some(1),
            }]
        );

        let sockets = graph.sockets("B", SocketDirection::Input);
        assert!(!sockets[0].is_linked);
        assert!(sockets[1].is_linked);
    }

    #[test]
    fn test_stale_link_keeps_its_entry() {
        let mut graph = ShaderGraph::new("Test");
        graph.create_node("ShaderNodeMath", "A", [0.0, 0.0]).unwrap();
        graph.create_node("ShaderNodeMath", "B", [200.0, 0.0]).unwrap();
        graph.link("A", 0, "B", 2).unwrap();
        graph.node_mut("B").unwrap().inputs.truncate(1);

        let links = NodeGraphHost::links(&graph);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from_socket, Some(0));
        assert_eq!(links[0].to_socket, None);
    }

    #[test]
    fn test_property_kind_checked() {
        let mut graph = ShaderGraph::new("Test");
        graph.create_node("ShaderNodeBump", "Bump", [0.0, 0.0]).unwrap();
        let err = graph
            .set_properties("Bump", NodeProperties::Mapping { vector_type: Default::default() })
            .unwrap_err();
        assert_eq!(err, HostError::PropertyMismatch("Bump".to_string()));
        assert!(graph.set_properties("Bump", NodeProperties::Bump { invert: true }).is_ok());
    }

    #[test]
    fn test_input_default_type_checked() {
        let mut graph = ShaderGraph::new("Test");
        graph.create_node("ShaderNodeTexNoise", "Noise", [0.0, 0.0]).unwrap();
        assert_eq!(graph.input_default("Noise", 0).unwrap(), None);
        assert_eq!(graph.input_default("Noise", 2).unwrap(), Some(SocketValue::Float(5.0)));
        assert!(graph.set_input_default("Noise", 2, SocketValue::Bool(true)).is_err());
    }
}
