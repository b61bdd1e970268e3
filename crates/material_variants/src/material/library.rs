//! Document-level material loading
//!
//! Resolves the `materials` array of a glTF JSON document. Records that fail
//! to resolve degrade to the default material so a single malformed entry
//! never aborts the asset; the failures are kept for reporting.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::descriptor::MaterialDescriptor;
use super::material_factory::DefaultMaterialFactory;
use super::resolver::CapabilityResolver;
use super::schema::SchemaError;

/// Errors that prevent a document from being read at all
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    /// Document file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document text is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document structure is not a glTF document
    #[error("Document error: {0}")]
    Schema(#[from] SchemaError),
}

/// A material record that failed to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialFailure {
    /// Index in the document's `materials` array
    pub index: usize,
    /// Why the record was rejected
    pub error: SchemaError,
}

/// Resolved materials of one glTF document
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    materials: Vec<MaterialDescriptor>,
    fallback: MaterialDescriptor,
    failures: Vec<MaterialFailure>,
}

impl MaterialLibrary {
    /// Resolve every material in a glTF JSON document
    ///
    /// A document without a `materials` array yields an empty library.
    pub fn from_gltf_json(text: &str) -> Result<Self, LibraryError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_document(&document)
    }

    /// Read and resolve a `.gltf` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        log::debug!("Loading materials from {:?}", path);
        let text = fs::read_to_string(path)?;
        Self::from_gltf_json(&text)
    }

    /// Resolve every material in an already parsed document
    pub fn from_document(document: &Value) -> Result<Self, LibraryError> {
        let Value::Object(root) = document else {
            return Err(SchemaError::NotAnObject {
                field: "<document>".to_string(),
            }
            .into());
        };

        let records: &[Value] = match root.get("materials") {
            None => &[],
            Some(Value::Array(records)) => records,
            Some(_) => {
                return Err(SchemaError::WrongType {
                    field: "materials".to_string(),
                    expected: "an array",
                }
                .into())
            }
        };

        let mut library = Self::new();
        for (index, record) in records.iter().enumerate() {
            match CapabilityResolver::resolve(record) {
                Ok(material) => library.materials.push(material),
                Err(error) => {
                    log::warn!(
                        "Material {} failed to resolve ({}); using the default material",
                        index,
                        error
                    );
                    library.materials.push(library.fallback.clone());
                    library.failures.push(MaterialFailure { index, error });
                }
            }
        }

        Ok(library)
    }

    /// Create an empty library
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            fallback: DefaultMaterialFactory::create(),
            failures: Vec::new(),
        }
    }

    /// Material for a surface's material index
    ///
    /// `None` or an out-of-range index yields the default material.
    pub fn material(&self, index: Option<usize>) -> &MaterialDescriptor {
        index
            .and_then(|i| self.materials.get(i))
            .unwrap_or(&self.fallback)
    }

    /// The default material handed out for unassigned surfaces
    pub const fn default_material(&self) -> &MaterialDescriptor {
        &self.fallback
    }

    /// Records that were replaced by the default material
    pub fn failures(&self) -> &[MaterialFailure] {
        &self.failures
    }

    /// Number of materials in the document
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the document declared no materials
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate materials in document order
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDescriptor> {
        self.materials.iter()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::descriptor::{MaterialOrigin, ShadingModel};
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "asset": { "version": "2.0" },
        "materials": [
            { "name": "red", "pbrMetallicRoughness": { "baseColorFactor": [1, 0, 0, 1] } },
            { "name": "broken", "emissiveFactor": [1, 1] },
            { "name": "flat", "extensions": { "KHR_materials_unlit": {} } }
        ]
    }"#;

    #[test]
    fn test_resolves_in_document_order() {
        let library = MaterialLibrary::from_gltf_json(DOCUMENT).unwrap();
        assert_eq!(library.len(), 3);

        let names: Vec<_> = library.iter().map(MaterialDescriptor::name).collect();
        assert_eq!(names, vec![Some("red"), Some("Default Material"), Some("flat")]);
        assert_eq!(library.material(Some(2)).shading_model(), ShadingModel::Unlit);
    }

    #[test]
    fn test_failed_record_degrades_to_default() {
        let library = MaterialLibrary::from_gltf_json(DOCUMENT).unwrap();
        assert_eq!(library.material(Some(1)).origin(), MaterialOrigin::Fallback);

        let failures = library.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 1);
        assert!(matches!(failures[0].error, SchemaError::WrongArity { .. }));
    }

    #[test]
    fn test_missing_index_uses_default() {
        let library = MaterialLibrary::from_gltf_json(DOCUMENT).unwrap();
        assert_eq!(library.material(None), library.default_material());
        assert_eq!(library.material(Some(42)), library.default_material());
    }

    #[test]
    fn test_document_without_materials() {
        let library = MaterialLibrary::from_gltf_json(r#"{ "asset": {} }"#).unwrap();
        assert!(library.is_empty());
        assert_eq!(library.material(Some(0)).origin(), MaterialOrigin::Fallback);
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(matches!(
            MaterialLibrary::from_gltf_json("[1, 2]"),
            Err(LibraryError::Schema(SchemaError::NotAnObject { .. }))
        ));
        assert!(matches!(
            MaterialLibrary::from_gltf_json(r#"{ "materials": {} }"#),
            Err(LibraryError::Schema(SchemaError::WrongType { .. }))
        ));
        assert!(matches!(
            MaterialLibrary::from_gltf_json("{"),
            Err(LibraryError::Json(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".gltf").tempfile().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let library = MaterialLibrary::from_file(file.path()).unwrap();
        assert_eq!(library.len(), 3);

        assert!(matches!(
            MaterialLibrary::from_file("does/not/exist.gltf"),
            Err(LibraryError::Io(_))
        ));
    }
}
