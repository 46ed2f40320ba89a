// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the graph.

use crate::socket::SocketId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub Uuid);

impl LinkId {
    /// Create a new random link ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed link from an output socket to an input socket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Unique link ID
    pub id: LinkId,
    /// Source node name
    pub from_node: String,
    /// Source socket
    pub from_socket: SocketId,
    /// Target node name
    pub to_node: String,
    /// Target socket
    pub to_socket: SocketId,
}

impl Link {
    /// Create a new link
    pub fn new(
        from_node: impl Into<String>,
        from_socket: SocketId,
        to_node: impl Into<String>,
        to_socket: SocketId,
    ) -> Self {
        Self {
            id: LinkId::new(),
            from_node: from_node.into(),
            from_socket,
            to_node: to_node.into(),
            to_socket,
        }
    }

    /// Check if this link involves a specific socket
    pub fn involves_socket(&self, socket_id: SocketId) -> bool {
        self.from_socket == socket_id || self.to_socket == socket_id
    }
}
