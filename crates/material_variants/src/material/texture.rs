//! Texture references and the texture slot catalogue
//!
//! A [`TextureReference`] points at an externally owned image and records
//! which UV channel samples it, plus an optional [`UvTransform`]
//! (KHR_texture_transform). [`TextureSlot`] names every place a material can
//! bind a texture and carries the fixed shader-facing names for that slot.

use crate::foundation::math::{affine, Mat3, Vec2};

/// Opaque handle to an image owned by the asset loader
///
/// The handle is the glTF texture index. This crate never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageHandle(pub u32);

/// KHR_texture_transform parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTransform {
    /// UV offset
    pub offset: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// UV scale
    pub scale: Vec2,
    /// UV channel override
    pub tex_coord: Option<u32>,
}

impl UvTransform {
    /// Affine matrix `rotation * scale * translation`
    pub fn matrix(&self) -> Mat3 {
        affine::rotation_scale_translation(self.rotation, self.scale, self.offset)
    }
}

impl Default for UvTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            tex_coord: None,
        }
    }
}

/// Reference from a material to a texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureReference {
    /// Image being sampled
    pub image: ImageHandle,
    /// Texture coordinate set (TEXCOORD_n)
    pub uv_channel: u32,
    /// Normal map scale; only read for normal textures
    pub scale: f32,
    /// Occlusion strength; only read for occlusion textures
    pub strength: f32,
    /// Optional UV transform
    pub transform: Option<UvTransform>,
}

impl TextureReference {
    /// Create a reference sampling `image` through UV channel 0
    pub const fn new(image: ImageHandle) -> Self {
        Self {
            image,
            uv_channel: 0,
            scale: 1.0,
            strength: 1.0,
            transform: None,
        }
    }

    /// Set the UV channel
    #[must_use]
    pub const fn with_uv_channel(mut self, channel: u32) -> Self {
        self.uv_channel = channel;
        self
    }

    /// Attach a UV transform
    #[must_use]
    pub const fn with_transform(mut self, transform: UvTransform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Every texture slot a material can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Tangent-space normal map
    Normal,
    /// Ambient occlusion
    Occlusion,
    /// Emission
    Emissive,
    /// Metallic-roughness base color
    BaseColor,
    /// Metallic (B) and roughness (G)
    MetallicRoughness,
    /// Specular-glossiness diffuse color
    Diffuse,
    /// Specular (RGB) and glossiness (A)
    SpecularGlossiness,
    /// Clearcoat intensity
    Clearcoat,
    /// Clearcoat roughness
    ClearcoatRoughness,
    /// Clearcoat normal map
    ClearcoatNormal,
    /// KHR_materials_specular strength
    PbrSpecular,
    /// KHR_materials_specular color
    PbrSpecularColor,
    /// Sheen roughness
    SheenRoughness,
    /// Sheen color
    SheenColor,
    /// Transmission amount
    Transmission,
    /// Volume thickness
    Thickness,
}

impl TextureSlot {
    /// Logical slot name, e.g. `BaseColor`
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Occlusion => "Occlusion",
            Self::Emissive => "Emissive",
            Self::BaseColor => "BaseColor",
            Self::MetallicRoughness => "MetallicRoughness",
            Self::Diffuse => "Diffuse",
            Self::SpecularGlossiness => "SpecularGlossiness",
            Self::Clearcoat => "Clearcoat",
            Self::ClearcoatRoughness => "ClearcoatRoughness",
            Self::ClearcoatNormal => "ClearcoatNormal",
            Self::PbrSpecular => "PbrSpecular",
            Self::PbrSpecularColor => "PbrSpecularColor",
            Self::SheenRoughness => "SheenRoughness",
            Self::SheenColor => "SheenColor",
            Self::Transmission => "Transmission",
            Self::Thickness => "Thickness",
        }
    }

    /// Lower-camel prefix used for this slot's uniforms, e.g. `baseColor`
    pub const fn uniform_prefix(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Occlusion => "occlusion",
            Self::Emissive => "emissive",
            Self::BaseColor => "baseColor",
            Self::MetallicRoughness => "metallicRoughness",
            Self::Diffuse => "diffuse",
            Self::SpecularGlossiness => "specularGlossiness",
            Self::Clearcoat => "clearcoat",
            Self::ClearcoatRoughness => "clearcoatRoughness",
            Self::ClearcoatNormal => "clearcoatNormal",
            Self::PbrSpecular => "pbrSpecular",
            Self::PbrSpecularColor => "pbrSpecularColor",
            Self::SheenRoughness => "sheenRoughness",
            Self::SheenColor => "sheenColor",
            Self::Transmission => "transmission",
            Self::Thickness => "thickness",
        }
    }

    /// Define announcing that the slot is bound
    pub const fn map_define(self) -> &'static str {
        match self {
            Self::Normal => "HAS_NORMAL_MAP",
            Self::Occlusion => "HAS_OCCLUSION_MAP",
            Self::Emissive => "HAS_EMISSIVE_MAP",
            Self::BaseColor => "HAS_BASE_COLOR_MAP",
            Self::MetallicRoughness => "HAS_METALLIC_ROUGHNESS_MAP",
            Self::Diffuse => "HAS_DIFFUSE_MAP",
            Self::SpecularGlossiness => "HAS_SPECULAR_GLOSSINESS_MAP",
            Self::Clearcoat => "HAS_CLEARCOAT_TEXTURE_MAP",
            Self::ClearcoatRoughness => "HAS_CLEARCOAT_ROUGHNESS_MAP",
            Self::ClearcoatNormal => "HAS_CLEARCOAT_NORMAL_MAP",
            Self::PbrSpecular => "HAS_PBRSPECULAR_MAP",
            Self::PbrSpecularColor => "HAS_PBRSPECULARCOLOR_MAP",
            Self::SheenRoughness => "HAS_SHEEN_ROUGHNESS_MAP",
            Self::SheenColor => "HAS_SHEEN_COLOR_MAP",
            Self::Transmission => "HAS_TRANSMISSION_MAP",
            Self::Thickness => "HAS_THICKNESS_MAP",
        }
    }

    /// Sampler the slot binds to
    pub const fn sampler_name(self) -> &'static str {
        match self {
            Self::Normal => "normalSampler",
            Self::Occlusion => "occlusionSampler",
            Self::Emissive => "emissiveSampler",
            Self::BaseColor => "baseColorSampler",
            Self::MetallicRoughness => "metallicRoughnessSampler",
            Self::Diffuse => "diffuseSampler",
            Self::SpecularGlossiness => "specularGlossinessSampler",
            Self::Clearcoat => "clearcoatSampler",
            Self::ClearcoatRoughness => "clearcoatRoughnessSampler",
            Self::ClearcoatNormal => "clearcoatNormalSampler",
            Self::PbrSpecular => "pbrSpecularSampler",
            Self::PbrSpecularColor => "pbrSpecularColorSampler",
            Self::SheenRoughness => "sheenRoughnessSampler",
            Self::SheenColor => "sheenColorSampler",
            Self::Transmission => "transmissionSampler",
            Self::Thickness => "thicknessSampler",
        }
    }

    /// Define announcing a UV transform on this slot, e.g. `HAS_BASECOLOR_UV_TRANSFORM`
    pub fn uv_transform_define(self) -> String {
        format!("HAS_{}_UV_TRANSFORM", self.label().to_ascii_uppercase())
    }

    /// Uniform holding this slot's UV transform matrix, e.g. `baseColorUVTransform`
    pub fn uv_transform_uniform(self) -> String {
        format!("{}UVTransform", self.uniform_prefix())
    }

    /// Uniform holding this slot's effective UV channel, e.g. `baseColorUVSet`
    pub fn uv_set_uniform(self) -> String {
        format!("{}UVSet", self.uniform_prefix())
    }
}
