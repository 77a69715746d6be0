//! Type and endpoint metadata for one generation pass.
//!
//! The manifest carries what a host framework would otherwise provide through
//! reflection: the declared properties of each schema type and the
//! controller/action behind each operation.
//!
//! ```json
//! {
//!   "camelCasePropertyNames": true,
//!   "types": {
//!     "User": [
//!       { "name": "Id" },
//!       { "name": "Age", "explicitRequired": true },
//!       { "name": "Score", "optionalWrapper": true }
//!     ]
//!   },
//!   "operations": [
//!     {
//!       "path": "/users/{id}",
//!       "method": "get",
//!       "action": { "kind": "controller", "controller": "Users", "action": "GetUserAsync" }
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::types::{ActionDescriptor, PropertyDescriptor};

/// Metadata and settings for one generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Manifest {
    /// Whether schema property keys are camel-cased property names.
    #[serde(default = "default_camel_case")]
    pub camel_case_property_names: bool,
    /// Declared properties per schema name.
    #[serde(default)]
    pub types: BTreeMap<String, Vec<PropertyDescriptor>>,
    /// Endpoint identity per operation.
    #[serde(default)]
    pub operations: Vec<OperationEntry>,
}

fn default_camel_case() -> bool {
    true
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            camel_case_property_names: default_camel_case(),
            types: BTreeMap::new(),
            operations: Vec::new(),
        }
    }
}

/// The action behind the operation at `method path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationEntry {
    pub path: String,
    pub method: String,
    pub action: ActionDescriptor,
}

impl Manifest {
    /// Load a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::FileNotFound` or `FilterError::ReadError` if the
    /// file can't be read, `FilterError::InvalidManifest` if it doesn't parse.
    pub fn from_path(path: &Path) -> Result<Self, FilterError> {
        if !path.exists() {
            return Err(FilterError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| FilterError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, FilterError> {
        serde_json::from_str(content).map_err(|source| FilterError::InvalidManifest { source })
    }

    /// Declared properties of the type behind schema `name`.
    pub fn properties(&self, name: &str) -> Option<&[PropertyDescriptor]> {
        self.types.get(name).map(Vec::as_slice)
    }

    /// The action for the operation at `path`, matching `method` case-insensitively.
    pub fn action(&self, path: &str, method: &str) -> Option<&ActionDescriptor> {
        self.operations
            .iter()
            .find(|op| op.path == path && op.method.eq_ignore_ascii_case(method))
            .map(|op| &op.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_to_camel_case() {
        let manifest = Manifest::from_json_str("{}").unwrap();
        assert!(manifest.camel_case_property_names);
        assert!(manifest.types.is_empty());
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn parses_types_and_operations() {
        let manifest = Manifest::from_json_str(
            r#"{
                "camelCasePropertyNames": false,
                "types": {
                    "User": [{ "name": "Id" }, { "name": "Score", "optionalWrapper": true }]
                },
                "operations": [{
                    "path": "/users",
                    "method": "GET",
                    "action": { "kind": "controller", "controller": "Users", "action": "ListAsync" }
                }]
            }"#,
        )
        .unwrap();

        assert!(!manifest.camel_case_property_names);
        let props = manifest.properties("User").unwrap();
        assert_eq!(props.len(), 2);
        assert!(props[1].optional_wrapper);
        assert!(manifest.properties("Order").is_none());

        assert_eq!(
            manifest.action("/users", "get"),
            Some(&ActionDescriptor::controller("Users", "ListAsync"))
        );
        assert!(manifest.action("/users", "post").is_none());
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = Manifest::from_json_str(r#"{ "camelCase": true }"#);
        assert!(matches!(result, Err(FilterError::InvalidManifest { .. })));
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"types": {{"Order": [{{"name": "Total"}}]}}}}"#).unwrap();

        let manifest = Manifest::from_path(file.path()).unwrap();
        assert_eq!(manifest.properties("Order").unwrap()[0].name, "Total");
    }

    #[test]
    fn from_path_missing_file() {
        let result = Manifest::from_path(Path::new("/nonexistent/manifest.json"));
        assert!(matches!(result, Err(FilterError::FileNotFound { .. })));
    }
}
