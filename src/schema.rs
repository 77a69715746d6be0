//! Draft schema for a single type.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::FilterError;
use crate::types::json_type_name;

/// The draft schema the generator built for one type.
///
/// Property schemas are held as-is. The required-set is insert-only and only
/// accepts names that already exist in the property mapping, so it can never
/// reference a field the schema doesn't describe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    properties: Map<String, Value>,
    required: Option<BTreeSet<String>>,
}

impl SchemaNode {
    /// A schema with the given properties and no required-set.
    pub fn new(properties: Map<String, Value>) -> Self {
        Self {
            properties,
            required: None,
        }
    }

    /// A schema with property keys mapped to empty schemas.
    pub fn with_property_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties = keys
            .into_iter()
            .map(|k| (k.into(), Value::Object(Map::new())))
            .collect();
        Self::new(properties)
    }

    /// Read the `properties` and `required` keywords of a JSON schema object.
    ///
    /// `path` is the JSON Pointer of `schema`, used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidSchema` if `properties` is not an object
    /// or `required` is not an array of strings.
    pub fn from_json(schema: &Map<String, Value>, path: &str) -> Result<Self, FilterError> {
        let properties = match schema.get("properties") {
            None => Map::new(),
            Some(Value::Object(props)) => props.clone(),
            Some(other) => {
                return Err(FilterError::InvalidSchema {
                    path: format!("{}/properties", path),
                    message: format!("expected object, got {}", json_type_name(other)),
                })
            }
        };

        let required = match schema.get("required") {
            None => None,
            Some(Value::Array(items)) => {
                let mut set = BTreeSet::new();
                for (i, item) in items.iter().enumerate() {
                    let name = item.as_str().ok_or_else(|| FilterError::InvalidSchema {
                        path: format!("{}/required/{}", path, i),
                        message: format!("expected string, got {}", json_type_name(item)),
                    })?;
                    set.insert(name.to_string());
                }
                Some(set)
            }
            Some(other) => {
                return Err(FilterError::InvalidSchema {
                    path: format!("{}/required", path),
                    message: format!("expected array, got {}", json_type_name(other)),
                })
            }
        };

        Ok(Self {
            properties,
            required,
        })
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// The required-set, or `None` if the schema never had one.
    pub fn required(&self) -> Option<&BTreeSet<String>> {
        self.required.as_ref()
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.required.as_ref().is_some_and(|r| r.contains(key))
    }

    /// Add `key` to the required-set, creating the set if needed.
    ///
    /// Returns true if the key was newly inserted. Keys that are not in the
    /// property mapping are refused and leave the schema untouched.
    pub fn insert_required(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if !self.properties.contains_key(&key) {
            return false;
        }
        self.required.get_or_insert_with(BTreeSet::new).insert(key)
    }

    /// Write the required-set back into a JSON schema object.
    ///
    /// Entries already listed in `schema["required"]` keep their position and
    /// new entries are appended in sorted order. Nothing is written when the
    /// required-set was never created.
    pub fn write_required(&self, schema: &mut Map<String, Value>) {
        let Some(required) = &self.required else {
            return;
        };

        let mut merged: Vec<Value> = match schema.get("required") {
            Some(Value::Array(existing)) => existing
                .iter()
                .filter(|v| v.as_str().is_some_and(|s| required.contains(s)))
                .cloned()
                .collect(),
            _ => Vec::new(),
        };

        for key in required {
            if !merged.iter().any(|v| v.as_str() == Some(key.as_str())) {
                merged.push(Value::String(key.clone()));
            }
        }

        schema.insert("required".to_string(), Value::Array(merged));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn insert_creates_set_lazily() {
        let mut node = SchemaNode::with_property_keys(["id"]);
        assert!(node.required().is_none());

        assert!(node.insert_required("id"));
        assert!(!node.insert_required("id"));
        assert_eq!(node.required().unwrap().len(), 1);
    }

    #[test]
    fn insert_refuses_unknown_key() {
        let mut node = SchemaNode::with_property_keys(["id"]);
        assert!(!node.insert_required("internal"));
        assert!(node.required().is_none());
    }

    #[test]
    fn from_json_reads_properties_and_required() {
        let schema = object(json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" }
            },
            "required": ["name"]
        }));
        let node = SchemaNode::from_json(&schema, "/components/schemas/User").unwrap();

        assert!(node.has_property("id"));
        assert!(node.is_required("name"));
        assert!(!node.is_required("id"));
    }

    #[test]
    fn from_json_rejects_non_string_required() {
        let schema = object(json!({
            "properties": { "id": {} },
            "required": ["id", 3]
        }));
        let err = SchemaNode::from_json(&schema, "/definitions/User").unwrap_err();
        match err {
            FilterError::InvalidSchema { path, .. } => {
                assert_eq!(path, "/definitions/User/required/1")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_json_rejects_array_properties() {
        let schema = object(json!({ "properties": [] }));
        let result = SchemaNode::from_json(&schema, "");
        assert!(matches!(result, Err(FilterError::InvalidSchema { .. })));
    }

    #[test]
    fn write_required_preserves_existing_order() {
        let mut schema = object(json!({
            "type": "object",
            "properties": { "a": {}, "b": {}, "c": {} },
            "required": ["c", "a"]
        }));
        let mut node = SchemaNode::from_json(&schema, "").unwrap();
        node.insert_required("b");
        node.write_required(&mut schema);

        assert_eq!(schema["required"], json!(["c", "a", "b"]));
    }

    #[test]
    fn write_required_skips_absent_set() {
        let mut schema = object(json!({ "properties": { "a": {} } }));
        let node = SchemaNode::from_json(&schema, "").unwrap();
        node.write_required(&mut schema);

        assert!(schema.get("required").is_none());
    }
}
