//! Compiled variant description
//!
//! [`VariantOutput`] is everything an external shader cache and draw-call
//! binder need: the program identity, its define sequence, typed uniform
//! values and texture bindings.

use std::fmt;

use crate::foundation::math::{Mat3, Vec3, Vec4};
use crate::material::texture::ImageHandle;

/// Identifier of the physically-based fragment pipeline
pub const SHADER_IDENTIFIER: &str = "pbr.frag";

/// Typed uniform value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Scalar float
    Float(f32),
    /// Scalar integer
    Int(i32),
    /// 3-component vector
    Vec3(Vec3),
    /// 4-component vector
    Vec4(Vec4),
    /// 3x3 matrix
    Mat3(Mat3),
}

impl UniformValue {
    /// Scalar float payload
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer payload
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Matrix payload
    pub const fn as_mat3(&self) -> Option<&Mat3> {
        match self {
            Self::Mat3(value) => Some(value),
            _ => None,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        Self::Vec4(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        Self::Mat3(value)
    }
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Vec3(v) => write!(f, "[{}, {}, {}]", v.x, v.y, v.z),
            Self::Vec4(v) => write!(f, "[{}, {}, {}, {}]", v.x, v.y, v.z, v.w),
            Self::Mat3(m) => write!(
                f,
                "[[{}, {}, {}], [{}, {}, {}], [{}, {}, {}]]",
                m[(0, 0)], m[(0, 1)], m[(0, 2)],
                m[(1, 0)], m[(1, 1)], m[(1, 2)],
                m[(2, 0)], m[(2, 1)], m[(2, 2)]
            ),
        }
    }
}

/// Insertion-ordered uniform mapping
///
/// Setting a name that is already present replaces its value and keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformMap {
    entries: Vec<(String, UniformValue)>,
}

impl UniformMap {
    /// Create an empty map
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Set `name` to `value`; the last write for a name wins
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of `name`
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Whether `name` is set
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Uniform names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of uniforms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no uniform is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sampler-to-image association for one draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    /// Sampler uniform the image binds to
    pub sampler_name: &'static str,
    /// Image to bind
    pub image: ImageHandle,
    /// Effective UV channel after any transform override
    pub uv_channel: u32,
    /// Composed UV transform, if the reference had one
    pub uv_transform: Option<Mat3>,
}

/// Cache key of a compiled variant
///
/// Two outputs with equal keys select the same GPU program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    /// Shader pipeline identifier
    pub shader_identifier: String,
    /// Define sequence, order significant
    pub defines: Vec<String>,
}

/// Result of compiling one material under one toggle snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct VariantOutput {
    /// Shader pipeline identifier
    pub shader_identifier: String,
    /// Define sequence; duplicates are kept and order is significant
    pub defines: Vec<String>,
    /// Uniform values
    pub uniforms: UniformMap,
    /// Texture bindings in emission order
    pub texture_bindings: Vec<TextureBinding>,
}

impl VariantOutput {
    /// Empty output for the PBR pipeline
    pub fn new() -> Self {
        Self {
            shader_identifier: SHADER_IDENTIFIER.to_string(),
            defines: Vec::new(),
            uniforms: UniformMap::new(),
            texture_bindings: Vec::new(),
        }
    }

    /// Append a define
    pub fn define(&mut self, name: impl Into<String>) {
        self.defines.push(name.into());
    }

    /// Whether `name` was defined
    pub fn has_define(&self, name: &str) -> bool {
        self.defines.iter().any(|define| define == name)
    }

    /// Key for an external shader-program cache
    pub fn variant_key(&self) -> VariantKey {
        VariantKey {
            shader_identifier: self.shader_identifier.clone(),
            defines: self.defines.clone(),
        }
    }
}

impl Default for VariantOutput {
    fn default() -> Self {
        Self::new()
    }
}
