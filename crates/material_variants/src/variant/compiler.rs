//! Shader variant compilation
//!
//! [`VariantCompiler::compile`] is a pure function of a resolved
//! [`MaterialDescriptor`] and a [`RenderToggles`] snapshot. Contributions are
//! emitted in a fixed order because the resulting define sequence is the
//! shader cache key:
//!
//! 1. base textures (normal, occlusion, emissive, then the shading model's
//!    own textures)
//! 2. alpha mode
//! 3. shading model define and factors
//! 4. optional feature blocks, in [`FEATURE_BLOCKS`] order, each gated on its
//!    capability flag and render toggle

use super::output::{TextureBinding, VariantOutput};
use super::texture_transform::TextureTransformResolver;
use crate::material::descriptor::{
    AlphaMode, FeatureBlocks, MaterialCapabilities, MaterialDescriptor, MaterialOrigin,
    ShadingModel,
};
use crate::material::texture::{TextureReference, TextureSlot};
use crate::render::RenderToggles;

/// One optional feature block: capability flag, toggle accessor, contributor
pub struct FeatureBlock {
    /// Define announcing the feature
    pub define: &'static str,
    /// Capability the material must have declared
    pub capability: MaterialCapabilities,
    /// Toggle that must be enabled
    pub enabled: fn(&RenderToggles) -> bool,
    /// Emits the block's defines, bindings and uniforms
    pub contribute: fn(&FeatureBlocks, &mut VariantOutput),
}

/// Optional feature blocks in emission order
pub const FEATURE_BLOCKS: [FeatureBlock; 5] = [
    FeatureBlock {
        define: "MATERIAL_CLEARCOAT",
        capability: MaterialCapabilities::CLEARCOAT,
        enabled: |toggles| toggles.clearcoat,
        contribute: contribute_clearcoat,
    },
    FeatureBlock {
        define: "MATERIAL_PBRSPECULAR",
        capability: MaterialCapabilities::PBR_SPECULAR,
        enabled: |toggles| toggles.pbr_specular,
        contribute: contribute_pbr_specular,
    },
    FeatureBlock {
        define: "MATERIAL_SHEEN",
        capability: MaterialCapabilities::SHEEN,
        enabled: |toggles| toggles.sheen,
        contribute: contribute_sheen,
    },
    FeatureBlock {
        define: "MATERIAL_TRANSMISSION",
        capability: MaterialCapabilities::TRANSMISSION,
        enabled: |toggles| toggles.transmission,
        contribute: contribute_transmission,
    },
    FeatureBlock {
        define: "MATERIAL_VOLUME",
        capability: MaterialCapabilities::VOLUME,
        enabled: |toggles| toggles.transmission,
        contribute: contribute_volume,
    },
];

/// Compiles material descriptors into shader variants
pub struct VariantCompiler;

impl VariantCompiler {
    /// Compile `material` under `toggles`
    ///
    /// Never fails: every field read has already been defaulted by the
    /// resolver. Neither input is modified.
    pub fn compile(material: &MaterialDescriptor, toggles: &RenderToggles) -> VariantOutput {
        let mut output = VariantOutput::new();

        Self::base_textures(material, &mut output);

        // The fallback material declares no alpha mode
        if material.origin() == MaterialOrigin::Authored {
            Self::alpha(material, &mut output);
        }

        Self::shading_model(material, &mut output);

        for block in &FEATURE_BLOCKS {
            if material.capabilities().contains(block.capability) && (block.enabled)(toggles) {
                output.define(block.define);
                (block.contribute)(material.features(), &mut output);
            }
        }

        log::trace!(
            "Compiled variant for {:?}: {} defines, {} uniforms, {} textures",
            material.name(),
            output.defines.len(),
            output.uniforms.len(),
            output.texture_bindings.len()
        );

        output
    }

    fn base_textures(material: &MaterialDescriptor, output: &mut VariantOutput) {
        bind(output, TextureSlot::Normal, material.normal_texture());
        bind(output, TextureSlot::Occlusion, material.occlusion_texture());
        bind(output, TextureSlot::Emissive, material.emissive_texture());

        match material.shading_model() {
            ShadingModel::MetallicRoughness => {
                if let Some(params) = material.metallic_roughness() {
                    bind(output, TextureSlot::BaseColor, params.base_color_texture.as_ref());
                    bind(
                        output,
                        TextureSlot::MetallicRoughness,
                        params.metallic_roughness_texture.as_ref(),
                    );
                }
            }
            ShadingModel::SpecularGlossiness => {
                if let Some(params) = material.specular_glossiness() {
                    bind(output, TextureSlot::Diffuse, params.diffuse_texture.as_ref());
                    bind(
                        output,
                        TextureSlot::SpecularGlossiness,
                        params.specular_glossiness_texture.as_ref(),
                    );
                }
            }
            ShadingModel::Unlit => {}
        }
    }

    fn alpha(material: &MaterialDescriptor, output: &mut VariantOutput) {
        match material.alpha_mode() {
            AlphaMode::Mask => {
                output.define("ALPHAMODE_MASK");
                output.uniforms.set("alphaCutoff", material.alpha_cutoff());
            }
            AlphaMode::Opaque => output.define("ALPHAMODE_OPAQUE"),
            AlphaMode::Blend => {}
        }
    }

    fn shading_model(material: &MaterialDescriptor, output: &mut VariantOutput) {
        match material.shading_model() {
            ShadingModel::MetallicRoughness => {
                output.define("MATERIAL_METALLICROUGHNESS");
                let params = material.metallic_roughness().cloned().unwrap_or_default();
                output.uniforms.set("baseColorFactor", params.base_color_factor);
                output.uniforms.set("metallicFactor", params.metallic_factor);
                output.uniforms.set("roughnessFactor", params.roughness_factor);
            }
            ShadingModel::SpecularGlossiness => {
                output.define("MATERIAL_SPECULARGLOSSINESS");
                let params = material.specular_glossiness().cloned().unwrap_or_default();
                output.uniforms.set("diffuseFactor", params.diffuse_factor);
                output.uniforms.set("specularFactor", params.specular_factor);
                output.uniforms.set("glossinessFactor", params.glossiness_factor);
            }
            ShadingModel::Unlit => output.define("MATERIAL_UNLIT"),
        }
        output.uniforms.set("emissiveFactor", material.emissive_factor());
    }
}

/// Emit the map define, UV transform, binding and per-texture uniforms for one slot
fn bind(output: &mut VariantOutput, slot: TextureSlot, reference: Option<&TextureReference>) {
    let Some(reference) = reference else {
        return;
    };

    output.define(slot.map_define());
    let uv = TextureTransformResolver::resolve(slot, reference, output);
    output.texture_bindings.push(TextureBinding {
        sampler_name: slot.sampler_name(),
        image: reference.image,
        uv_channel: uv.uv_channel,
        uv_transform: uv.transform,
    });

    let channel = i32::try_from(uv.uv_channel).unwrap_or(i32::MAX);
    output.uniforms.set(slot.uv_set_uniform(), channel);

    match slot {
        TextureSlot::Normal => output.uniforms.set("normalScale", reference.scale),
        TextureSlot::Occlusion => output.uniforms.set("occlusionStrength", reference.strength),
        TextureSlot::ClearcoatNormal => {
            output.uniforms.set("clearcoatNormalScale", reference.scale);
        }
        _ => {}
    }
}

fn contribute_clearcoat(blocks: &FeatureBlocks, output: &mut VariantOutput) {
    let Some(clearcoat) = &blocks.clearcoat else {
        return;
    };
    bind(output, TextureSlot::Clearcoat, clearcoat.texture.as_ref());
    bind(output, TextureSlot::ClearcoatRoughness, clearcoat.roughness_texture.as_ref());
    bind(output, TextureSlot::ClearcoatNormal, clearcoat.normal_texture.as_ref());
    output.uniforms.set("clearcoatFactor", clearcoat.factor);
    output.uniforms.set("clearcoatRoughnessFactor", clearcoat.roughness_factor);
}

fn contribute_pbr_specular(blocks: &FeatureBlocks, output: &mut VariantOutput) {
    let Some(specular) = &blocks.pbr_specular else {
        return;
    };
    bind(output, TextureSlot::PbrSpecular, specular.texture.as_ref());
    bind(output, TextureSlot::PbrSpecularColor, specular.color_texture.as_ref());
    output.uniforms.set("pbrSpecularFactor", specular.specular_factor);
    output.uniforms.set("pbrSpecularColorFactor", specular.specular_color_factor);
}

fn contribute_sheen(blocks: &FeatureBlocks, output: &mut VariantOutput) {
    let Some(sheen) = &blocks.sheen else {
        return;
    };
    bind(output, TextureSlot::SheenRoughness, sheen.roughness_texture.as_ref());
    bind(output, TextureSlot::SheenColor, sheen.color_texture.as_ref());
    output.uniforms.set("sheenRoughnessFactor", sheen.roughness_factor);
    output.uniforms.set("sheenColorFactor", sheen.color_factor);
}

fn contribute_transmission(blocks: &FeatureBlocks, output: &mut VariantOutput) {
    let Some(transmission) = &blocks.transmission else {
        return;
    };
    bind(output, TextureSlot::Transmission, transmission.texture.as_ref());
    output.uniforms.set("transmissionFactor", transmission.factor);
}

fn contribute_volume(blocks: &FeatureBlocks, output: &mut VariantOutput) {
    let Some(volume) = &blocks.volume else {
        return;
    };
    bind(output, TextureSlot::Thickness, volume.texture.as_ref());
    output.uniforms.set("attenuationColor", volume.attenuation_color);
    output.uniforms.set("attenuationDistance", volume.attenuation_distance);
    output.uniforms.set("thicknessFactor", volume.thickness_factor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec3, Vec4};
    use crate::material::{CapabilityResolver, DefaultMaterialFactory, ImageHandle};
    use crate::variant::output::UniformValue;
    use serde_json::json;

    fn resolve(record: serde_json::Value) -> MaterialDescriptor {
        CapabilityResolver::resolve(&record).unwrap()
    }

    #[test]
    fn test_default_material_variant() {
        for toggles in [RenderToggles::new(), RenderToggles::without_material_features()] {
            let output = VariantCompiler::compile(&DefaultMaterialFactory::create(), &toggles);
            assert_eq!(output.shader_identifier, "pbr.frag");
            assert_eq!(output.defines, vec!["MATERIAL_METALLICROUGHNESS"]);
            assert_eq!(
                output.uniforms.names().collect::<Vec<_>>(),
                vec!["baseColorFactor", "metallicFactor", "roughnessFactor", "emissiveFactor"]
            );
            assert_eq!(
                output.uniforms.get("baseColorFactor"),
                Some(&UniformValue::Vec4(Vec4::new(1.0, 1.0, 1.0, 1.0)))
            );
            assert_eq!(output.uniforms.get("metallicFactor"), Some(&UniformValue::Float(1.0)));
            assert_eq!(output.uniforms.get("roughnessFactor"), Some(&UniformValue::Float(1.0)));
            assert_eq!(
                output.uniforms.get("emissiveFactor"),
                Some(&UniformValue::Vec3(Vec3::zeros()))
            );
            assert!(output.texture_bindings.is_empty());
        }
    }

    #[test]
    fn test_define_order() {
        let material = resolve(json!({
            "normalTexture": { "index": 0, "scale": 0.5 },
            "occlusionTexture": { "index": 1, "strength": 0.7 },
            "pbrMetallicRoughness": {
                "baseColorTexture": { "index": 2 },
                "metallicRoughnessTexture": { "index": 3, "texCoord": 1 }
            },
            "extensions": {
                "KHR_materials_volume": {},
                "KHR_materials_sheen": {},
                "KHR_materials_clearcoat": {},
                "KHR_materials_transmission": {},
                "KHR_materials_specular": {}
            }
        }));

        let output = VariantCompiler::compile(&material, &RenderToggles::default());
        assert_eq!(
            output.defines,
            vec![
                "HAS_NORMAL_MAP",
                "HAS_OCCLUSION_MAP",
                "HAS_BASE_COLOR_MAP",
                "HAS_METALLIC_ROUGHNESS_MAP",
                "ALPHAMODE_OPAQUE",
                "MATERIAL_METALLICROUGHNESS",
                "MATERIAL_CLEARCOAT",
                "MATERIAL_PBRSPECULAR",
                "MATERIAL_SHEEN",
                "MATERIAL_TRANSMISSION",
                "MATERIAL_VOLUME",
            ]
        );

        let samplers: Vec<_> = output.texture_bindings.iter().map(|b| b.sampler_name).collect();
        assert_eq!(
            samplers,
            vec!["normalSampler", "occlusionSampler", "baseColorSampler", "metallicRoughnessSampler"]
        );
        assert_eq!(output.texture_bindings[3].uv_channel, 1);
        assert_eq!(output.uniforms.get("metallicRoughnessUVSet"), Some(&UniformValue::Int(1)));
        assert_eq!(output.uniforms.get("normalScale"), Some(&UniformValue::Float(0.5)));
        assert_eq!(output.uniforms.get("occlusionStrength"), Some(&UniformValue::Float(0.7)));
    }

    #[test]
    fn test_clearcoat_toggle_gating() {
        let material = resolve(json!({
            "pbrMetallicRoughness": {},
            "extensions": {
                "KHR_materials_clearcoat": { "clearcoatFactor": 0.5, "clearcoatRoughnessFactor": 0.0 }
            }
        }));

        let off = VariantCompiler::compile(&material, &RenderToggles::new().with_clearcoat(false));
        assert!(!off.has_define("MATERIAL_CLEARCOAT"));
        assert!(!off.uniforms.names().any(|name| name.starts_with("clearcoat")));

        let on = VariantCompiler::compile(&material, &RenderToggles::new());
        assert!(on.has_define("MATERIAL_CLEARCOAT"));
        assert_eq!(on.uniforms.get("clearcoatFactor"), Some(&UniformValue::Float(0.5)));
        assert_eq!(on.uniforms.get("clearcoatRoughnessFactor"), Some(&UniformValue::Float(0.0)));
    }

    #[test]
    fn test_volume_follows_transmission_toggle() {
        let material = resolve(json!({
            "extensions": {
                "KHR_materials_transmission": { "transmissionFactor": 1.0 },
                "KHR_materials_volume": { "thicknessFactor": 0.2 }
            }
        }));

        let off = VariantCompiler::compile(&material, &RenderToggles::new().with_transmission(false));
        assert!(!off.has_define("MATERIAL_TRANSMISSION"));
        assert!(!off.has_define("MATERIAL_VOLUME"));
        assert!(!off.uniforms.contains("thicknessFactor"));

        let on = VariantCompiler::compile(&material, &RenderToggles::new());
        assert!(on.has_define("MATERIAL_VOLUME"));
        assert_eq!(on.uniforms.get("thicknessFactor"), Some(&UniformValue::Float(0.2)));
        assert_eq!(on.uniforms.get("transmissionFactor"), Some(&UniformValue::Float(1.0)));
    }

    #[test]
    fn test_toggle_without_capability_contributes_nothing() {
        let material = resolve(json!({ "pbrMetallicRoughness": {} }));
        let output = VariantCompiler::compile(&material, &RenderToggles::new());
        assert_eq!(output.defines, vec!["ALPHAMODE_OPAQUE", "MATERIAL_METALLICROUGHNESS"]);
    }

    #[test]
    fn test_alpha_modes() {
        let mask = resolve(json!({ "alphaMode": "MASK", "alphaCutoff": 0.3 }));
        let output = VariantCompiler::compile(&mask, &RenderToggles::new());
        assert!(output.has_define("ALPHAMODE_MASK"));
        assert_eq!(output.uniforms.get("alphaCutoff"), Some(&UniformValue::Float(0.3)));

        let opaque = resolve(json!({ "alphaMode": "OPAQUE", "alphaCutoff": 0.3 }));
        let output = VariantCompiler::compile(&opaque, &RenderToggles::new());
        assert!(output.has_define("ALPHAMODE_OPAQUE"));
        assert!(!output.uniforms.contains("alphaCutoff"));

        let blend = resolve(json!({ "alphaMode": "BLEND" }));
        let output = VariantCompiler::compile(&blend, &RenderToggles::new());
        assert!(!output.defines.iter().any(|d| d.starts_with("ALPHAMODE_")));
    }

    #[test]
    fn test_specular_glossiness_model() {
        let material = resolve(json!({
            "extensions": {
                "KHR_materials_pbrSpecularGlossiness": {
                    "diffuseTexture": { "index": 5 },
                    "glossinessFactor": 0.25
                }
            }
        }));

        let output = VariantCompiler::compile(&material, &RenderToggles::new());
        assert_eq!(
            output.defines,
            vec!["HAS_DIFFUSE_MAP", "ALPHAMODE_OPAQUE", "MATERIAL_SPECULARGLOSSINESS"]
        );
        assert_eq!(output.texture_bindings[0].image, ImageHandle(5));
        assert_eq!(output.uniforms.get("glossinessFactor"), Some(&UniformValue::Float(0.25)));
        assert_eq!(
            output.uniforms.get("specularFactor"),
            Some(&UniformValue::Vec3(Vec3::new(1.0, 1.0, 1.0)))
        );
    }

    #[test]
    fn test_unlit_model_only_emissive() {
        let material = resolve(json!({
            "emissiveFactor": [0.1, 0.2, 0.3],
            "extensions": { "KHR_materials_unlit": {} }
        }));

        let output = VariantCompiler::compile(&material, &RenderToggles::new());
        assert_eq!(output.defines, vec!["ALPHAMODE_OPAQUE", "MATERIAL_UNLIT"]);
        assert_eq!(output.uniforms.names().collect::<Vec<_>>(), vec!["emissiveFactor"]);
    }

    #[test]
    fn test_feature_textures_bound_with_block() {
        let material = resolve(json!({
            "extensions": {
                "KHR_materials_sheen": {
                    "sheenColorTexture": {
                        "index": 9,
                        "extensions": { "KHR_texture_transform": { "scale": [2.0, 2.0] } }
                    }
                }
            }
        }));

        let on = VariantCompiler::compile(&material, &RenderToggles::new());
        let sheen_at = on.defines.iter().position(|d| d == "MATERIAL_SHEEN").unwrap();
        assert_eq!(on.defines[sheen_at + 1], "HAS_SHEEN_COLOR_MAP");
        assert_eq!(on.defines[sheen_at + 2], "HAS_SHEENCOLOR_UV_TRANSFORM");
        assert_eq!(on.texture_bindings.len(), 1);
        assert_eq!(on.texture_bindings[0].sampler_name, "sheenColorSampler");
        assert!(on.texture_bindings[0].uv_transform.is_some());

        let off = VariantCompiler::compile(&material, &RenderToggles::new().with_sheen(false));
        assert!(off.texture_bindings.is_empty());
        assert!(!off.uniforms.contains("sheenColorUVTransform"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let material = resolve(json!({
            "alphaMode": "MASK",
            "emissiveTexture": { "index": 1, "extensions": { "KHR_texture_transform": { "rotation": 0.3 } } },
            "extensions": { "KHR_materials_clearcoat": { "clearcoatFactor": 1.0 } }
        }));
        let toggles = RenderToggles::new();
        assert_eq!(
            VariantCompiler::compile(&material, &toggles),
            VariantCompiler::compile(&material, &toggles)
        );
    }
}
