// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property keys shared by the encoder and decoder.

use matgraph_core::{ShaderNodeKind, SocketValue};
use serde_json::Value;

/// Properties that mirror an input socket, as `(property key, socket name)`.
///
/// They are written after the kind's own properties.
pub fn socket_properties(kind: ShaderNodeKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ShaderNodeKind::NoiseTexture => &[
            ("scale", "Scale"),
            ("detail", "Detail"),
            ("roughness", "Roughness"),
        ],
        ShaderNodeKind::WaveTexture => &[
            ("scale", "Scale"),
            ("distortion", "Distortion"),
            ("detail", "Detail"),
            ("detail_scale", "Detail Scale"),
            ("detail_roughness", "Detail Roughness"),
        ],
        ShaderNodeKind::Mix => &[("factor", "Factor")],
        ShaderNodeKind::Bump => &[("strength", "Strength"), ("distance", "Distance")],
        _ => &[],
    }
}

/// JSON number for an `f32`, keeping its shortest decimal form.
///
/// Widening through `f64` would write `0.3` as `0.30000001192092896`.
pub fn number(value: f32) -> Value {
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// JSON form of a socket value: a number, a bool or a number array
pub fn socket_value(value: &SocketValue) -> Value {
    match value {
        SocketValue::Bool(b) => Value::Bool(*b),
        SocketValue::Int(i) => Value::from(*i),
        SocketValue::Float(f) => number(*f),
        SocketValue::Vector(v) => Value::Array(v.iter().copied().map(number).collect()),
        SocketValue::Color(c) => Value::Array(c.iter().copied().map(number).collect()),
    }
}
