//! Required-property inference for value-typed properties.
//!
//! Value types (integers, booleans, dates, enums, structs) cannot be absent
//! unless wrapped in a nullable container, so their schema properties are
//! marked required without the author having to annotate each one.

use crate::schema::SchemaNode;
use crate::types::{NamingPolicy, PropertyDescriptor};

/// Adds non-nullable value-typed properties of a type to its schema's
/// required-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequiredPropertyAnnotator {
    naming: NamingPolicy,
}

impl RequiredPropertyAnnotator {
    /// Create an annotator.
    ///
    /// With `camel_case_names` set, schema keys are expected to be the
    /// camel-cased property names. The generator's naming strategy can't be
    /// discovered from the schema, so it has to be passed in.
    pub fn new(camel_case_names: bool) -> Self {
        Self::with_policy(NamingPolicy::from_camel_case_flag(camel_case_names))
    }

    pub fn with_policy(naming: NamingPolicy) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> NamingPolicy {
        self.naming
    }

    /// Mark the eligible properties of one type as required in `schema`.
    ///
    /// Properties without a matching key in the schema are skipped; those are
    /// excluded from serialization and must not become required. Returns the
    /// number of keys newly added to the required-set.
    pub fn annotate(&self, properties: &[PropertyDescriptor], schema: &mut SchemaNode) -> usize {
        let mut added = 0;

        for property in properties {
            let key = self.naming.schema_key(&property.name);

            if !schema.has_property(&key) {
                log::trace!("skipping {}: not in schema", property.name);
                continue;
            }

            if !is_required(property) {
                log::trace!("skipping {}: nullable or explicitly required", property.name);
                continue;
            }

            if schema.insert_required(key.as_str()) {
                log::trace!("marked {} required", key);
                added += 1;
            }
        }

        log::debug!(
            "inferred {} required properties from {} candidates",
            added,
            properties.len()
        );
        added
    }
}

/// A property is inferred required unless its type is a nullable wrapper or
/// its author already marked it required.
fn is_required(property: &PropertyDescriptor) -> bool {
    !property.optional_wrapper && !property.explicit_required
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn value_properties_become_required() {
        let props = [
            PropertyDescriptor::new("Id"),
            PropertyDescriptor::new("Name").optional(),
            PropertyDescriptor::new("Count"),
        ];
        // Name is excluded from the schema by the generator
        let mut schema = SchemaNode::with_property_keys(["Id", "Count"]);

        let added = RequiredPropertyAnnotator::new(false).annotate(&props, &mut schema);

        assert_eq!(added, 2);
        assert_eq!(schema.required(), Some(&set(&["Id", "Count"])));
    }

    #[test]
    fn nullable_and_explicit_markers_excluded() {
        let props = [
            PropertyDescriptor::new("Age").explicitly_required(),
            PropertyDescriptor::new("Score").optional(),
        ];
        let mut schema = SchemaNode::with_property_keys(["age", "score"]);

        let added = RequiredPropertyAnnotator::new(true).annotate(&props, &mut schema);

        assert_eq!(added, 0);
        assert!(schema.required().map_or(true, |r| r.is_empty()));
    }

    #[test]
    fn property_missing_from_schema_skipped() {
        let props = [PropertyDescriptor::new("Id"), PropertyDescriptor::new("Internal")];
        let mut schema = SchemaNode::with_property_keys(["id"]);

        RequiredPropertyAnnotator::new(true).annotate(&props, &mut schema);

        let required = schema.required().unwrap();
        assert!(!required.contains("internal"));
        assert!(!required.contains("Internal"));
        assert_eq!(required, &set(&["id"]));
    }

    #[test]
    fn camel_case_policy_maps_keys() {
        let props = [PropertyDescriptor::new("UserId")];

        let mut camel = SchemaNode::with_property_keys(["userId"]);
        RequiredPropertyAnnotator::new(true).annotate(&props, &mut camel);
        assert_eq!(camel.required(), Some(&set(&["userId"])));

        let mut verbatim = SchemaNode::with_property_keys(["UserId"]);
        RequiredPropertyAnnotator::new(false).annotate(&props, &mut verbatim);
        assert_eq!(verbatim.required(), Some(&set(&["UserId"])));
    }

    #[test]
    fn policy_mismatch_adds_nothing() {
        let props = [PropertyDescriptor::new("UserId")];
        let mut schema = SchemaNode::with_property_keys(["UserId"]);

        RequiredPropertyAnnotator::new(true).annotate(&props, &mut schema);

        assert!(schema.required().is_none());
    }

    #[test]
    fn annotate_is_idempotent() {
        let props = [PropertyDescriptor::new("Id"), PropertyDescriptor::new("Count")];
        let annotator = RequiredPropertyAnnotator::new(false);
        let mut once = SchemaNode::with_property_keys(["Id", "Count"]);
        annotator.annotate(&props, &mut once);

        let mut twice = once.clone();
        let added = annotator.annotate(&props, &mut twice);

        assert_eq!(added, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn explicit_marker_not_added_again() {
        let props = [PropertyDescriptor::new("Age").explicitly_required()];
        let mut schema = SchemaNode::with_property_keys(["Age"]);
        schema.insert_required("Age");

        let added = RequiredPropertyAnnotator::new(false).annotate(&props, &mut schema);

        assert_eq!(added, 0);
        assert_eq!(schema.required(), Some(&set(&["Age"])));
    }

    #[test]
    fn nullable_with_explicit_marker_not_added() {
        let props = [PropertyDescriptor::new("Score").optional().explicitly_required()];
        let mut schema = SchemaNode::with_property_keys(["Score"]);

        RequiredPropertyAnnotator::new(false).annotate(&props, &mut schema);

        assert!(schema.required().is_none());
    }

    #[test]
    fn required_is_subset_of_properties() {
        let props = [
            PropertyDescriptor::new("A"),
            PropertyDescriptor::new("B"),
            PropertyDescriptor::new("C").optional(),
            PropertyDescriptor::new("D"),
        ];
        let mut schema = SchemaNode::with_property_keys(["A", "C"]);

        RequiredPropertyAnnotator::new(false).annotate(&props, &mut schema);

        for key in schema.required().unwrap() {
            assert!(schema.has_property(key), "{key} not in properties");
        }
    }
}
