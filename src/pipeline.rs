//! Running the filters over a whole OpenAPI document.
//!
//! A host generator calls the filters once per operation and once per type at
//! its own extension points. This module plays that host role for a document
//! that has already been generated, taking the per-type and per-operation
//! metadata from a [`Manifest`].

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FilterError;
use crate::manifest::Manifest;
use crate::operation::{ErrorResponseFilter, OperationIdFilter};
use crate::required::RequiredPropertyAnnotator;
use crate::schema::SchemaNode;
use crate::types::{json_type_name, FilterKind, NamingPolicy, PropertyDescriptor, HTTP_METHODS};

/// The filters to run over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    enabled: BTreeSet<FilterKind>,
    /// Overrides the manifest's naming setting when set.
    naming: Option<NamingPolicy>,
}

impl FilterSet {
    /// An empty set; nothing runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every filter, with schema keys following the manifest's naming setting.
    pub fn all() -> Self {
        Self {
            enabled: FilterKind::ALL.into_iter().collect(),
            naming: None,
        }
    }

    /// Flag error responses for AutoRest-compatible client generation.
    pub fn autorest_compatible(self) -> Self {
        self.with(FilterKind::ErrorResponses)
    }

    /// Mark non-nullable value-typed properties as required.
    pub fn value_type_properties_required(mut self, camel_case_names: bool) -> Self {
        self.naming = Some(NamingPolicy::from_camel_case_flag(camel_case_names));
        self.with(FilterKind::RequiredValueTypes)
    }

    /// Derive operation ids from controller and action names.
    pub fn operation_ids_from_controller_action(self) -> Self {
        self.with(FilterKind::OperationIds)
    }

    pub fn with(mut self, kind: FilterKind) -> Self {
        self.enabled.insert(kind);
        self
    }

    pub fn without(mut self, kind: FilterKind) -> Self {
        self.enabled.remove(&kind);
        self
    }

    /// Force the naming policy used for schema keys.
    pub fn naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = Some(naming);
        self
    }

    pub fn is_enabled(&self, kind: FilterKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Run the enabled filters over `document` in place.
    ///
    /// Operations are found under `paths`, schemas under
    /// `components.schemas` (OpenAPI 3) and `definitions` (Swagger 2).
    /// Missing sections are skipped, as are operations and types the manifest
    /// has no metadata for.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidDocument` if the document root is not an
    /// object, or `FilterError::InvalidSchema` if a schema annotated by the
    /// manifest has malformed `properties` or `required`. Every schema is
    /// checked before anything is modified, so on error `document` is left
    /// unchanged.
    pub fn apply(
        &self,
        document: &mut Value,
        manifest: &Manifest,
    ) -> Result<ApplyReport, FilterError> {
        let root = match document {
            Value::Object(root) => root,
            other => {
                return Err(FilterError::InvalidDocument {
                    message: format!("expected object at root, got {}", json_type_name(other)),
                })
            }
        };

        let pending = if self.is_enabled(FilterKind::RequiredValueTypes) {
            collect_schemas(root, manifest)?
        } else {
            Vec::new()
        };

        let mut report = ApplyReport::default();

        if let Some(Value::Object(paths)) = root.get_mut("paths") {
            self.apply_paths(paths, manifest, &mut report);
        }

        if !pending.is_empty() {
            let naming = self.naming.unwrap_or(NamingPolicy::from_camel_case_flag(
                manifest.camel_case_property_names,
            ));
            let annotator = RequiredPropertyAnnotator::with_policy(naming);

            for PendingSchema {
                section,
                name,
                properties,
                mut node,
            } in pending
            {
                log::debug!("annotating {}/{}", section.pointer(), escape_pointer(&name));
                report.required_added += annotator.annotate(properties, &mut node);
                report.schemas_annotated += 1;

                if let Some(Value::Object(schema)) =
                    section.schemas_mut(root).and_then(|s| s.get_mut(&name))
                {
                    node.write_required(schema);
                }
            }
        }

        log::info!(
            "{} operations: {} error responses flagged, {} operation ids set; {} schemas: {} required keys added",
            report.operations,
            report.error_responses_flagged,
            report.operation_ids_set,
            report.schemas_annotated,
            report.required_added
        );

        Ok(report)
    }

    fn apply_paths(
        &self,
        paths: &mut Map<String, Value>,
        manifest: &Manifest,
        report: &mut ApplyReport,
    ) {
        let error_responses = self.is_enabled(FilterKind::ErrorResponses);
        let operation_ids = self.is_enabled(FilterKind::OperationIds);

        for (path, item) in paths.iter_mut() {
            let Value::Object(item) = item else {
                continue;
            };

            for (method, operation) in item.iter_mut() {
                if !HTTP_METHODS.contains(&method.as_str()) {
                    continue;
                }
                let Value::Object(operation) = operation else {
                    continue;
                };

                report.operations += 1;

                if error_responses {
                    report.error_responses_flagged += ErrorResponseFilter.apply(operation);
                }

                if operation_ids {
                    if let Some(action) = manifest.action(path, method) {
                        if OperationIdFilter.apply(operation, action) {
                            report.operation_ids_set += 1;
                        }
                    }
                }
            }
        }
    }
}

/// Run every filter over `document`, taking naming from the manifest.
pub fn apply_document(
    document: &mut Value,
    manifest: &Manifest,
) -> Result<ApplyReport, FilterError> {
    FilterSet::all().apply(document, manifest)
}

/// Where a document keeps its named schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaSection {
    /// `components.schemas` (OpenAPI 3)
    Components,
    /// `definitions` (Swagger 2)
    Definitions,
}

impl SchemaSection {
    const ALL: [SchemaSection; 2] = [SchemaSection::Components, SchemaSection::Definitions];

    fn pointer(&self) -> &'static str {
        match self {
            SchemaSection::Components => "/components/schemas",
            SchemaSection::Definitions => "/definitions",
        }
    }

    fn schemas<'a>(&self, root: &'a Map<String, Value>) -> Option<&'a Map<String, Value>> {
        match self {
            SchemaSection::Components => root.get("components")?.get("schemas")?.as_object(),
            SchemaSection::Definitions => root.get("definitions")?.as_object(),
        }
    }

    fn schemas_mut<'a>(
        &self,
        root: &'a mut Map<String, Value>,
    ) -> Option<&'a mut Map<String, Value>> {
        match self {
            SchemaSection::Components => root
                .get_mut("components")?
                .get_mut("schemas")?
                .as_object_mut(),
            SchemaSection::Definitions => root.get_mut("definitions")?.as_object_mut(),
        }
    }
}

/// A schema read from the document, waiting to be annotated.
struct PendingSchema<'m> {
    section: SchemaSection,
    name: String,
    properties: &'m [PropertyDescriptor],
    node: SchemaNode,
}

/// Read every schema the manifest has metadata for, without modifying the
/// document.
fn collect_schemas<'m>(
    root: &Map<String, Value>,
    manifest: &'m Manifest,
) -> Result<Vec<PendingSchema<'m>>, FilterError> {
    let mut pending = Vec::new();

    for section in SchemaSection::ALL {
        let Some(schemas) = section.schemas(root) else {
            continue;
        };

        for (name, schema) in schemas {
            let Some(properties) = manifest.properties(name) else {
                continue;
            };
            let Value::Object(schema) = schema else {
                continue;
            };

            let path = format!("{}/{}", section.pointer(), escape_pointer(name));
            pending.push(PendingSchema {
                section,
                name: name.clone(),
                properties,
                node: SchemaNode::from_json(schema, &path)?,
            });
        }
    }

    Ok(pending)
}

/// Escape a key for use in a JSON Pointer (`~` -> `~0`, `/` -> `~1`).
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// What a filter run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Operations visited.
    pub operations: usize,
    pub error_responses_flagged: usize,
    pub operation_ids_set: usize,
    /// Schemas the manifest had type metadata for.
    pub schemas_annotated: usize,
    /// Keys newly added to required-sets.
    pub required_added: usize,
}
