//! Variant report rendering

use std::fmt;

use material_variants::material::MaterialDescriptor;
use material_variants::variant::{UniformValue, VariantOutput};
use serde_json::{json, Value};

/// One compiled material, ready for printing
pub struct VariantReport<'a> {
    /// Index in the document, `None` for the default material
    pub index: Option<usize>,
    /// Source descriptor
    pub material: &'a MaterialDescriptor,
    /// Compiled variant
    pub output: VariantOutput,
}

impl VariantReport<'_> {
    fn title(&self) -> String {
        let name = self.material.name().unwrap_or("<unnamed>");
        match self.index {
            Some(index) => format!("#{} {}", index, name),
            None => format!("default {}", name),
        }
    }

    /// JSON object for machine consumption
    pub fn to_json(&self) -> Value {
        let uniforms: serde_json::Map<String, Value> = self
            .output
            .uniforms
            .iter()
            .map(|(name, value)| (name.to_string(), uniform_json(value)))
            .collect();
        let textures: Vec<Value> = self
            .output
            .texture_bindings
            .iter()
            .map(|binding| {
                json!({
                    "sampler": binding.sampler_name,
                    "image": binding.image.0,
                    "uvChannel": binding.uv_channel,
                    "uvTransform": binding.uv_transform.as_ref().map(|m| uniform_json(&UniformValue::Mat3(*m))),
                })
            })
            .collect();

        json!({
            "index": self.index,
            "name": self.material.name(),
            "shader": self.output.shader_identifier,
            "defines": self.output.defines,
            "uniforms": uniforms,
            "textures": textures,
        })
    }
}

impl fmt::Display for VariantReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({:?})", self.title(), self.material.shading_model())?;
        writeln!(f, "  shader: {}", self.output.shader_identifier)?;
        writeln!(f, "  defines:")?;
        for define in &self.output.defines {
            writeln!(f, "    {}", define)?;
        }
        writeln!(f, "  uniforms:")?;
        for (name, value) in self.output.uniforms.iter() {
            writeln!(f, "    {} = {}", name, value)?;
        }
        if !self.output.texture_bindings.is_empty() {
            writeln!(f, "  textures:")?;
            for binding in &self.output.texture_bindings {
                writeln!(
                    f,
                    "    {} <- image {} (uv {}{})",
                    binding.sampler_name,
                    binding.image.0,
                    binding.uv_channel,
                    if binding.uv_transform.is_some() { ", transformed" } else { "" }
                )?;
            }
        }
        Ok(())
    }
}

fn uniform_json(value: &UniformValue) -> Value {
    match value {
        UniformValue::Float(v) => json!(v),
        UniformValue::Int(v) => json!(v),
        UniformValue::Vec3(v) => json!([v.x, v.y, v.z]),
        UniformValue::Vec4(v) => json!([v.x, v.y, v.z, v.w]),
        UniformValue::Mat3(m) => json!([
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]),
    }
}
