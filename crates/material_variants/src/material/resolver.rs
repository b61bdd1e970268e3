//! Capability resolution
//!
//! Turns one raw glTF material record into a [`MaterialDescriptor`]. This is
//! the only place extension presence is probed: each recognized extension
//! becomes a typed `Option` block, and the capability flags are recorded
//! from block presence once, before the descriptor is handed out.
//!
//! Shading-model precedence:
//!
//! 1. `KHR_materials_pbrSpecularGlossiness` selects specular-glossiness.
//! 2. `KHR_materials_unlit` then selects unlit.
//! 3. A `pbrMetallicRoughness` block selects metallic-roughness unless the
//!    model is already specular-glossiness, so it overrides an unlit
//!    declaration in the same record.
//!
//! A record with none of these resolves to unlit.

use serde_json::Value;

use super::descriptor::{
    AlphaMode, Clearcoat, FeatureBlocks, MaterialCapabilities, MaterialDescriptor,
    MaterialOrigin, MetallicRoughnessParams, PbrSpecular, ShadingModel, Sheen,
    SpecularGlossinessParams, Transmission, Volume,
};
use super::schema::{FieldReader, SchemaError};
use crate::foundation::math::{Vec3, Vec4};

/// Recognized material extension keys
pub mod extensions {
    /// Unlit shading
    pub const UNLIT: &str = "KHR_materials_unlit";
    /// Specular-glossiness workflow
    pub const PBR_SPECULAR_GLOSSINESS: &str = "KHR_materials_pbrSpecularGlossiness";
    /// Clearcoat layer
    pub const CLEARCOAT: &str = "KHR_materials_clearcoat";
    /// Specular strength and color
    pub const SPECULAR: &str = "KHR_materials_specular";
    /// Sheen layer
    pub const SHEEN: &str = "KHR_materials_sheen";
    /// Transmission
    pub const TRANSMISSION: &str = "KHR_materials_transmission";
    /// Volume
    pub const VOLUME: &str = "KHR_materials_volume";

    /// Every material-level extension this crate understands
    pub const RECOGNIZED: [&str; 7] = [
        UNLIT,
        PBR_SPECULAR_GLOSSINESS,
        CLEARCOAT,
        SPECULAR,
        SHEEN,
        TRANSMISSION,
        VOLUME,
    ];
}

const DEFAULT_ALPHA_CUTOFF: f32 = 0.5;

/// Parses raw material records into descriptors
pub struct CapabilityResolver;

impl CapabilityResolver {
    /// Resolve a raw material record
    ///
    /// Unknown extensions are ignored. A present field with the wrong type
    /// or arity aborts resolution with [`SchemaError`].
    pub fn resolve(record: &Value) -> Result<MaterialDescriptor, SchemaError> {
        let material = FieldReader::new(record, "")?;

        let name = material.str_opt("name")?.map(str::to_string);
        let alpha_mode = match material.str_opt("alphaMode")? {
            None => AlphaMode::Opaque,
            Some(text) => AlphaMode::from_gltf(text).ok_or_else(|| SchemaError::InvalidValue {
                field: material.field_path("alphaMode"),
                value: text.to_string(),
            })?,
        };

        let mut shading_model = ShadingModel::Unlit;
        let mut specular_glossiness = None;
        let mut features = FeatureBlocks::default();

        let mut extensions_path = String::new();
        if let Some(exts) = material.object_opt("extensions", &mut extensions_path)? {
            let mut path = String::new();

            if let Some(block) = exts.object_opt(extensions::PBR_SPECULAR_GLOSSINESS, &mut path)? {
                shading_model = ShadingModel::SpecularGlossiness;
                specular_glossiness = Some(Self::specular_glossiness(&block)?);
            }

            if exts.contains(extensions::UNLIT) {
                shading_model = ShadingModel::Unlit;
            }

            if let Some(block) = exts.object_opt(extensions::CLEARCOAT, &mut path)? {
                features.clearcoat = Some(Self::clearcoat(&block)?);
            }
            if let Some(block) = exts.object_opt(extensions::SPECULAR, &mut path)? {
                features.pbr_specular = Some(Self::pbr_specular(&block)?);
            }
            if let Some(block) = exts.object_opt(extensions::SHEEN, &mut path)? {
                features.sheen = Some(Self::sheen(&block)?);
            }
            if let Some(block) = exts.object_opt(extensions::TRANSMISSION, &mut path)? {
                features.transmission = Some(Self::transmission(&block)?);
            }
            if let Some(block) = exts.object_opt(extensions::VOLUME, &mut path)? {
                features.volume = Some(Self::volume(&block)?);
            }

            for key in exts.keys() {
                if !extensions::RECOGNIZED.contains(&key.as_str()) {
                    log::trace!("Ignoring unrecognized material extension {}", key);
                }
            }
        }

        let mut metallic_roughness = None;
        let mut pbr_path = String::new();
        if let Some(block) = material.object_opt("pbrMetallicRoughness", &mut pbr_path)? {
            if shading_model != ShadingModel::SpecularGlossiness {
                shading_model = ShadingModel::MetallicRoughness;
                metallic_roughness = Some(Self::metallic_roughness(&block)?);
            }
        }

        let capabilities = MaterialCapabilities::from_blocks(&features);
        let descriptor = MaterialDescriptor {
            name,
            alpha_mode,
            alpha_cutoff: material.f32_or("alphaCutoff", DEFAULT_ALPHA_CUTOFF)?,
            double_sided: material.bool_or("doubleSided", false)?,
            emissive_factor: material.vec3_or("emissiveFactor", Vec3::zeros())?,
            shading_model,
            metallic_roughness,
            specular_glossiness,
            features,
            normal_texture: material.texture_opt("normalTexture")?,
            occlusion_texture: material.texture_opt("occlusionTexture")?,
            emissive_texture: material.texture_opt("emissiveTexture")?,
            capabilities,
            origin: MaterialOrigin::Authored,
        };

        log::debug!(
            "Resolved material {:?}: {:?}, capabilities {:?}",
            descriptor.name(),
            descriptor.shading_model,
            descriptor.capabilities
        );

        Ok(descriptor)
    }

    fn metallic_roughness(block: &FieldReader<'_>) -> Result<MetallicRoughnessParams, SchemaError> {
        let defaults = MetallicRoughnessParams::default();
        Ok(MetallicRoughnessParams {
            base_color_factor: block.vec4_or("baseColorFactor", defaults.base_color_factor)?,
            metallic_factor: block.f32_or("metallicFactor", defaults.metallic_factor)?,
            roughness_factor: block.f32_or("roughnessFactor", defaults.roughness_factor)?,
            base_color_texture: block.texture_opt("baseColorTexture")?,
            metallic_roughness_texture: block.texture_opt("metallicRoughnessTexture")?,
        })
    }

    fn specular_glossiness(block: &FieldReader<'_>) -> Result<SpecularGlossinessParams, SchemaError> {
        Ok(SpecularGlossinessParams {
            diffuse_factor: block.vec4_or("diffuseFactor", Vec4::new(1.0, 1.0, 1.0, 1.0))?,
            specular_factor: block.vec3_or("specularFactor", Vec3::new(1.0, 1.0, 1.0))?,
            glossiness_factor: block.f32_or("glossinessFactor", 1.0)?,
            diffuse_texture: block.texture_opt("diffuseTexture")?,
            specular_glossiness_texture: block.texture_opt("specularGlossinessTexture")?,
        })
    }

    fn clearcoat(block: &FieldReader<'_>) -> Result<Clearcoat, SchemaError> {
        Ok(Clearcoat {
            factor: block.f32_or("clearcoatFactor", 0.0)?,
            roughness_factor: block.f32_or("clearcoatRoughnessFactor", 0.0)?,
            texture: block.texture_opt("clearcoatTexture")?,
            roughness_texture: block.texture_opt("clearcoatRoughnessTexture")?,
            normal_texture: block.texture_opt("clearcoatNormalTexture")?,
        })
    }

    fn pbr_specular(block: &FieldReader<'_>) -> Result<PbrSpecular, SchemaError> {
        let defaults = PbrSpecular::default();
        Ok(PbrSpecular {
            specular_factor: block.f32_or("specularFactor", defaults.specular_factor)?,
            specular_color_factor: block
                .vec3_or("specularColorFactor", defaults.specular_color_factor)?,
            texture: block.texture_opt("specularTexture")?,
            color_texture: block.texture_opt("specularColorTexture")?,
        })
    }

    fn sheen(block: &FieldReader<'_>) -> Result<Sheen, SchemaError> {
        let defaults = Sheen::default();
        Ok(Sheen {
            roughness_factor: block.f32_or("sheenRoughnessFactor", defaults.roughness_factor)?,
            color_factor: block.vec3_or("sheenColorFactor", defaults.color_factor)?,
            roughness_texture: block.texture_opt("sheenRoughnessTexture")?,
            color_texture: block.texture_opt("sheenColorTexture")?,
        })
    }

    fn transmission(block: &FieldReader<'_>) -> Result<Transmission, SchemaError> {
        Ok(Transmission {
            factor: block.f32_or("transmissionFactor", 0.0)?,
            texture: block.texture_opt("transmissionTexture")?,
        })
    }

    fn volume(block: &FieldReader<'_>) -> Result<Volume, SchemaError> {
        let defaults = Volume::default();
        Ok(Volume {
            attenuation_color: block.vec3_or("attenuationColor", defaults.attenuation_color)?,
            attenuation_distance: block
                .f32_or("attenuationDistance", defaults.attenuation_distance)?,
            thickness_factor: block.f32_or("thicknessFactor", defaults.thickness_factor)?,
            texture: block.texture_opt("thicknessTexture")?,
        })
    }
}
