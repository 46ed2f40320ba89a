// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in shader node types.
//!
//! Socket layouts follow the host application's shader nodes closely
//! enough for interchange: same socket names, order and default values.
//! Math and vector math nodes intentionally keep their repeated input
//! names (`Value`, `Vector`).

use crate::node::{NodeRegistry, NodeType};
use crate::properties::ShaderNodeKind;
use crate::socket::{Socket, SocketType, SocketValue};

fn float(name: &str, value: f32) -> Socket {
    Socket::input(name, SocketType::Float).with_default(SocketValue::Float(value))
}

fn vector(name: &str, value: [f32; 3]) -> Socket {
    Socket::input(name, SocketType::Vector).with_default(SocketValue::Vector(value))
}

fn color(name: &str, value: [f32; 4]) -> Socket {
    Socket::input(name, SocketType::Color).with_default(SocketValue::Color(value))
}

fn node_type(kind: ShaderNodeKind, label: &str, inputs: Vec<Socket>, outputs: Vec<Socket>) -> NodeType {
    NodeType {
        type_tag: kind.type_tag().to_string(),
        label: label.to_string(),
        inputs,
        outputs,
    }
}

/// Create the shader node registry with all built-in node types
pub fn create_shader_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Textures
    // ========================================================================

    registry.register(node_type(
        ShaderNodeKind::NoiseTexture,
        "Noise Texture",
        vec![
            // Texture vectors default to generated coordinates and carry no literal
            Socket::input("Vector", SocketType::Vector),
            float("W", 0.0),
            float("Scale", 5.0),
            float("Detail", 2.0),
            float("Roughness", 0.5),
            float("Lacunarity", 2.0),
            float("Distortion", 0.0),
        ],
        vec![
            Socket::output("Fac", SocketType::Float),
            Socket::output("Color", SocketType::Color),
        ],
    ));

    registry.register(node_type(
        ShaderNodeKind::WaveTexture,
        "Wave Texture",
        vec![
            Socket::input("Vector", SocketType::Vector),
            float("Scale", 5.0),
            float("Distortion", 0.0),
            float("Detail", 2.0),
            float("Detail Scale", 1.0),
            float("Detail Roughness", 0.5),
            float("Phase Offset", 0.0),
        ],
        vec![
            Socket::output("Color", SocketType::Color),
            Socket::output("Fac", SocketType::Float),
        ],
    ));

    // ========================================================================
    // Converters
    // ========================================================================

    registry.register(node_type(
        ShaderNodeKind::ColorRamp,
        "Color Ramp",
        vec![float("Fac", 0.5)],
        vec![
            Socket::output("Color", SocketType::Color),
            Socket::output("Alpha", SocketType::Float),
        ],
    ));

    registry.register(node_type(
        ShaderNodeKind::Mix,
        "Mix",
        vec![
            float("Factor", 0.5),
            color("Color1", [0.5, 0.5, 0.5, 1.0]),
            color("Color2", [0.5, 0.5, 0.5, 1.0]),
        ],
        vec![Socket::output("Result", SocketType::Color)],
    ));

    registry.register(node_type(
        ShaderNodeKind::Math,
        "Math",
        vec![float("Value", 0.5), float("Value", 0.5), float("Value", 0.0)],
        vec![Socket::output("Value", SocketType::Float)],
    ));

    registry.register(node_type(
        ShaderNodeKind::VectorMath,
        "Vector Math",
        vec![
            vector("Vector", [0.0, 0.0, 0.0]),
            vector("Vector", [0.0, 0.0, 0.0]),
            vector("Vector", [0.0, 0.0, 0.0]),
            float("Scale", 1.0),
        ],
        vec![
            Socket::output("Vector", SocketType::Vector),
            Socket::output("Value", SocketType::Float),
        ],
    ));

    // ========================================================================
    // Vector
    // ========================================================================

    registry.register(node_type(
        ShaderNodeKind::Bump,
        "Bump",
        vec![
            float("Strength", 1.0),
            float("Distance", 1.0),
            float("Height", 1.0),
            Socket::input("Normal", SocketType::Vector),
        ],
        vec![Socket::output("Normal", SocketType::Vector)],
    ));

    registry.register(node_type(
        ShaderNodeKind::Mapping,
        "Mapping",
        vec![
            vector("Vector", [0.0, 0.0, 0.0]),
            vector("Location", [0.0, 0.0, 0.0]),
            vector("Rotation", [0.0, 0.0, 0.0]),
            vector("Scale", [1.0, 1.0, 1.0]),
        ],
        vec![Socket::output("Vector", SocketType::Vector)],
    ));

    // ========================================================================
    // Input / Output / Shaders
    // ========================================================================

    registry.register(node_type(
        ShaderNodeKind::TexCoordinate,
        "Texture Coordinate",
        vec![],
        ["Generated", "Normal", "UV", "Object", "Camera", "Window", "Reflection"]
            .into_iter()
            .map(|name| Socket::output(name, SocketType::Vector))
            .collect(),
    ));

    registry.register(node_type(
        ShaderNodeKind::PrincipledBsdf,
        "Principled BSDF",
        vec![
            color("Base Color", [0.8, 0.8, 0.8, 1.0]),
            float("Metallic", 0.0),
            float("Roughness", 0.5),
            float("IOR", 1.5),
            float("Alpha", 1.0),
            Socket::input("Normal", SocketType::Vector),
            float("Subsurface Weight", 0.0),
            float("Specular IOR Level", 0.5),
            float("Coat Weight", 0.0),
            float("Sheen Weight", 0.0),
            color("Emission Color", [1.0, 1.0, 1.0, 1.0]),
            float("Emission Strength", 0.0),
        ],
        vec![Socket::output("BSDF", SocketType::Shader)],
    ));

    registry.register(node_type(
        ShaderNodeKind::MaterialOutput,
        "Material Output",
        vec![
            Socket::input("Surface", SocketType::Shader),
            Socket::input("Volume", SocketType::Shader),
            Socket::input("Displacement", SocketType::Vector),
            float("Thickness", 0.0),
        ],
        vec![],
    ));

    // Host-only types, exported as generic nodes

    registry.register(NodeType {
        type_tag: "ShaderNodeEmission".to_string(),
        label: "Emission".to_string(),
        inputs: vec![color("Color", [1.0, 1.0, 1.0, 1.0]), float("Strength", 1.0)],
        outputs: vec![Socket::output("Emission", SocketType::Shader)],
    });

    registry.register(NodeType {
        type_tag: "ShaderNodeMixShader".to_string(),
        label: "Mix Shader".to_string(),
        inputs: vec![
            float("Fac", 0.5),
            Socket::input("Shader", SocketType::Shader),
            Socket::input("Shader", SocketType::Shader),
        ],
        outputs: vec![Socket::output("Shader", SocketType::Shader)],
    });

    registry.register(NodeType {
        type_tag: "ShaderNodeAddShader".to_string(),
        label: "Add Shader".to_string(),
        inputs: vec![
            Socket::input("Shader", SocketType::Shader),
            Socket::input("Shader", SocketType::Shader),
        ],
        outputs: vec![Socket::output("Shader", SocketType::Shader)],
    });

    registry
}
