// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketId(pub Uuid);

impl SocketId {
    /// Create a new random socket ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SocketId {
    fn default() -> Self {
        Self::new()
    }
}

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

/// Data type carried by a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketType {
    /// Boolean value
    Bool,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// 3D vector
    Vector,
    /// Color (RGBA)
    Color,
    /// Shader closure, never carries a literal default
    Shader,
}

impl SocketType {
    /// Number of numeric components a literal of this type holds.
    ///
    /// Shader sockets have no literal representation and report zero.
    pub fn arity(&self) -> usize {
        match self {
            Self::Bool | Self::Int | Self::Float => 1,
            Self::Vector => 3,
            Self::Color => 4,
            Self::Shader => 0,
        }
    }

    /// Check if a link from this type into `other` is allowed
    pub fn can_connect_to(&self, other: &SocketType) -> bool {
        match (self, other) {
            // Closures only flow into closure inputs
            (Self::Shader, Self::Shader) => true,
            (Self::Shader, _) | (_, Self::Shader) => false,
            // Every data socket converts implicitly into every other
            _ => true,
        }
    }
}

/// A socket on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socket {
    /// Unique socket ID
    pub id: SocketId,
    /// Display name, not necessarily unique on a node
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Data type
    pub socket_type: SocketType,
    /// Literal value used while the socket is unlinked (inputs only)
    pub default_value: Option<SocketValue>,
}

impl Socket {
    /// Create a new input socket
    pub fn input(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Input,
            socket_type,
            default_value: None,
        }
    }

    /// Create a new output socket
    pub fn output(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Output,
            socket_type,
            default_value: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: SocketValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Copy of this socket with a fresh ID, used when instantiating templates
    pub fn instantiate(&self) -> Self {
        Self {
            id: SocketId::new(),
            ..self.clone()
        }
    }

    /// Check if a link from this socket into `other` is valid
    pub fn can_connect(&self, other: &Socket) -> bool {
        self.direction == SocketDirection::Output
            && other.direction == SocketDirection::Input
            && self.socket_type.can_connect_to(&other.socket_type)
    }
}

/// Literal value that can be stored in a socket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SocketValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// 3D vector
    Vector([f32; 3]),
    /// Color
    Color([f32; 4]),
}

impl SocketValue {
    /// Get the socket type for this value
    pub fn socket_type(&self) -> SocketType {
        match self {
            Self::Bool(_) => SocketType::Bool,
            Self::Int(_) => SocketType::Int,
            Self::Float(_) => SocketType::Float,
            Self::Vector(_) => SocketType::Vector,
            Self::Color(_) => SocketType::Color,
        }
    }

    /// Numeric components of the value, booleans as 0/1
    pub fn components(&self) -> Vec<f32> {
        match self {
            Self::Bool(b) => vec![if *b { 1.0 } else { 0.0 }],
            Self::Int(i) => vec![*i as f32],
            Self::Float(f) => vec![*f],
            Self::Vector(v) => v.to_vec(),
            Self::Color(c) => c.to_vec(),
        }
    }

    /// Build a value of `socket_type` from a component sequence.
    ///
    /// Sequences longer than the type's arity are truncated; shorter ones
    /// are padded from `fill`, falling back to zero for missing components.
    /// Returns `None` for shader sockets and empty sequences.
    pub fn from_components(
        socket_type: SocketType,
        components: &[f32],
        fill: Option<&SocketValue>,
    ) -> Option<Self> {
        let arity = socket_type.arity();
        if arity == 0 || components.is_empty() {
            return None;
        }
        let fill = fill.map(SocketValue::components).unwrap_or_default();
        let mut padded = [0.0_f32; 4];
        for (i, slot) in padded.iter_mut().enumerate().take(arity) {
            *slot = components
                .get(i)
                .or_else(|| fill.get(i))
                .copied()
                .unwrap_or(0.0);
        }

        Some(match socket_type {
            SocketType::Bool => Self::Bool(padded[0] != 0.0),
            SocketType::Int => Self::Int(padded[0].round() as i32),
            SocketType::Float => Self::Float(padded[0]),
            SocketType::Vector => Self::Vector([padded[0], padded[1], padded[2]]),
            SocketType::Color => Self::Color(padded),
            SocketType::Shader => return None,
        })
    }
}
