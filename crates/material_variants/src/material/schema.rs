//! Typed field access over raw glTF JSON objects
//!
//! [`FieldReader`] wraps one JSON object and reads optional fields with a
//! default, reporting [`SchemaError`] with a dotted field path when a present
//! field has the wrong type or arity.

use serde_json::{Map, Value};

use super::texture::{ImageHandle, TextureReference, UvTransform};
use crate::foundation::math::{Vec2, Vec3, Vec4};

/// KHR_texture_transform extension key
pub const TEXTURE_TRANSFORM_EXTENSION: &str = "KHR_texture_transform";

/// Malformed field inside a material record
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Expected a JSON object
    #[error("{field}: expected an object")]
    NotAnObject {
        /// Dotted path of the offending field
        field: String,
    },

    /// Present field has the wrong JSON type
    #[error("{field}: expected {expected}")]
    WrongType {
        /// Dotted path of the offending field
        field: String,
        /// Human-readable expected type
        expected: &'static str,
    },

    /// Vector field has the wrong number of components
    #[error("{field}: expected {expected} components, found {found}")]
    WrongArity {
        /// Dotted path of the offending field
        field: String,
        /// Required component count
        expected: usize,
        /// Component count in the record
        found: usize,
    },

    /// Required field is absent
    #[error("{field}: required field missing")]
    MissingField {
        /// Dotted path of the missing field
        field: String,
    },

    /// Field has the right type but an unsupported value
    #[error("{field}: unsupported value {value}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// The rejected value
        value: String,
    },
}

/// Reader over one JSON object with a known path
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    path: &'a str,
}

impl<'a> FieldReader<'a> {
    /// Wrap `value`, which must be an object
    pub fn new(value: &'a Value, path: &'a str) -> Result<Self, SchemaError> {
        match value {
            Value::Object(object) => Ok(Self { object, path }),
            _ => Err(SchemaError::NotAnObject {
                field: display_path(path),
            }),
        }
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.object.contains_key(key)
    }

    /// Raw value of `key`
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key)
    }

    /// Keys present in this object, in document order
    pub fn keys(&self) -> impl Iterator<Item = &'a String> + 'a {
        self.object.keys()
    }

    /// Dotted path of `key` under this object
    pub fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Optional number, `default` when absent
    pub fn f32_or(&self, key: &str, default: f32) -> Result<f32, SchemaError> {
        self.get(key)
            .map_or(Ok(default), |value| self.number(key, value))
    }

    /// Optional boolean, `default` when absent
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, SchemaError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(_) => Err(self.wrong_type(key, "a boolean")),
        }
    }

    /// Optional string
    pub fn str_opt(&self, key: &str) -> Result<Option<&'a str>, SchemaError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.as_str())),
            Some(_) => Err(self.wrong_type(key, "a string")),
        }
    }

    /// Optional non-negative integer
    pub fn u32_opt(&self, key: &str) -> Result<Option<u32>, SchemaError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a non-negative integer")),
        }
    }

    /// Optional 2-vector, `default` when absent
    pub fn vec2_or(&self, key: &str, default: Vec2) -> Result<Vec2, SchemaError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => {
                let [x, y] = self.components::<2>(key, value)?;
                Ok(Vec2::new(x, y))
            }
        }
    }

    /// Optional 3-vector, `default` when absent
    pub fn vec3_or(&self, key: &str, default: Vec3) -> Result<Vec3, SchemaError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => {
                let [x, y, z] = self.components::<3>(key, value)?;
                Ok(Vec3::new(x, y, z))
            }
        }
    }

    /// Optional 4-vector, `default` when absent
    pub fn vec4_or(&self, key: &str, default: Vec4) -> Result<Vec4, SchemaError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => {
                let [x, y, z, w] = self.components::<4>(key, value)?;
                Ok(Vec4::new(x, y, z, w))
            }
        }
    }

    /// Optional nested object; `path_buf` receives the nested path
    pub fn object_opt<'b>(
        &self,
        key: &str,
        path_buf: &'b mut String,
    ) -> Result<Option<FieldReader<'b>>, SchemaError>
    where
        'a: 'b,
    {
        match self.get(key) {
            None => Ok(None),
            Some(value) => {
                *path_buf = self.field_path(key);
                FieldReader::new(value, path_buf).map(Some)
            }
        }
    }

    /// Optional glTF textureInfo (including normal/occlusion variants)
    pub fn texture_opt(&self, key: &str) -> Result<Option<TextureReference>, SchemaError> {
        let mut path = String::new();
        let Some(info) = self.object_opt(key, &mut path)? else {
            return Ok(None);
        };

        let index = info.u32_opt("index")?.ok_or_else(|| SchemaError::MissingField {
            field: info.field_path("index"),
        })?;

        let mut reference = TextureReference::new(ImageHandle(index));
        reference.uv_channel = info.u32_opt("texCoord")?.unwrap_or(0);
        reference.scale = info.f32_or("scale", 1.0)?;
        reference.strength = info.f32_or("strength", 1.0)?;

        let mut extensions_path = String::new();
        if let Some(extensions) = info.object_opt("extensions", &mut extensions_path)? {
            let mut transform_path = String::new();
            if let Some(transform) =
                extensions.object_opt(TEXTURE_TRANSFORM_EXTENSION, &mut transform_path)?
            {
                reference.transform = Some(UvTransform {
                    offset: transform.vec2_or("offset", Vec2::zeros())?,
                    rotation: transform.f32_or("rotation", 0.0)?,
                    scale: transform.vec2_or("scale", Vec2::new(1.0, 1.0))?,
                    tex_coord: transform.u32_opt("texCoord")?,
                });
            }
        }

        Ok(Some(reference))
    }

    fn number(&self, key: &str, value: &Value) -> Result<f32, SchemaError> {
        value
            .as_f64()
            .map(|n| n as f32)
            .ok_or_else(|| self.wrong_type(key, "a number"))
    }

    fn components<const N: usize>(&self, key: &str, value: &Value) -> Result<[f32; N], SchemaError> {
        let Value::Array(items) = value else {
            return Err(self.wrong_type(key, "an array of numbers"));
        };
        if items.len() != N {
            return Err(SchemaError::WrongArity {
                field: self.field_path(key),
                expected: N,
                found: items.len(),
            });
        }

        let mut out = [0.0; N];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item
                .as_f64()
                .ok_or_else(|| self.wrong_type(key, "an array of numbers"))? as f32;
        }
        Ok(out)
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> SchemaError {
        SchemaError::WrongType {
            field: self.field_path(key),
            expected,
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<material>".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_absent() {
        let value = json!({});
        let reader = FieldReader::new(&value, "").unwrap();
        assert_eq!(reader.f32_or("x", 0.25).unwrap(), 0.25);
        assert!(!reader.bool_or("flag", false).unwrap());
        assert_eq!(reader.vec3_or("c", Vec3::new(1.0, 2.0, 3.0)).unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert!(reader.texture_opt("tex").unwrap().is_none());
    }

    #[test]
    fn test_wrong_arity_reports_path() {
        let value = json!({ "color": [1.0, 0.5] });
        let reader = FieldReader::new(&value, "extensions.KHR_materials_sheen").unwrap();
        let err = reader.vec3_or("color", Vec3::zeros()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongArity {
                field: "extensions.KHR_materials_sheen.color".to_string(),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn test_wrong_type() {
        let value = json!({ "factor": "high", "list": [1.0, "x", 3.0] });
        let reader = FieldReader::new(&value, "").unwrap();
        assert!(matches!(reader.f32_or("factor", 0.0), Err(SchemaError::WrongType { .. })));
        assert!(matches!(
            reader.vec3_or("list", Vec3::zeros()),
            Err(SchemaError::WrongType { .. })
        ));
    }

    #[test]
    fn test_not_an_object() {
        let value = json!([1, 2]);
        assert_eq!(
            FieldReader::new(&value, "").unwrap_err(),
            SchemaError::NotAnObject { field: "<material>".to_string() }
        );
    }

    #[test]
    fn test_texture_with_transform() {
        let value = json!({
            "tex": {
                "index": 4,
                "texCoord": 1,
                "extensions": {
                    "KHR_texture_transform": { "offset": [0.5, 0.0], "texCoord": 2 }
                }
            }
        });
        let reader = FieldReader::new(&value, "").unwrap();
        let texture = reader.texture_opt("tex").unwrap().unwrap();
        assert_eq!(texture.image, ImageHandle(4));
        assert_eq!(texture.uv_channel, 1);
        let transform = texture.transform.unwrap();
        assert_eq!(transform.offset, Vec2::new(0.5, 0.0));
        assert_eq!(transform.scale, Vec2::new(1.0, 1.0));
        assert_eq!(transform.tex_coord, Some(2));
    }

    #[test]
    fn test_texture_requires_index() {
        let value = json!({ "tex": { "texCoord": 0 } });
        let reader = FieldReader::new(&value, "").unwrap();
        assert_eq!(
            reader.texture_opt("tex").unwrap_err(),
            SchemaError::MissingField { field: "tex.index".to_string() }
        );
    }
}
