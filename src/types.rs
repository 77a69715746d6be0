//! Core types shared by the filters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Vendor extension flagging error responses for AutoRest-style generators.
pub const ERROR_RESPONSE_EXTENSION: &str = "x-ms-error-response";

/// HTTP methods that may appear as operation keys of a path item.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A property of a type, as seen by reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Declared property name (before any naming policy is applied).
    pub name: String,
    /// The declared type wraps a value that may be absent (`Nullable<T>`, `Option<T>`).
    #[serde(default)]
    pub optional_wrapper: bool,
    /// The author already marked the property as required.
    #[serde(default)]
    pub explicit_required: bool,
}

impl PropertyDescriptor {
    /// A plain value-typed property with no markers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional_wrapper: false,
            explicit_required: false,
        }
    }

    /// Mark the declared type as a nullable wrapper.
    pub fn optional(mut self) -> Self {
        self.optional_wrapper = true;
        self
    }

    /// Mark the property as explicitly required by its author.
    pub fn explicitly_required(mut self) -> Self {
        self.explicit_required = true;
        self
    }
}

/// How reflected property names map to schema property keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamingPolicy {
    /// Schema keys equal the reflected names.
    #[default]
    Verbatim,
    /// Schema keys are the camel-cased reflected names.
    CamelCase,
}

impl NamingPolicy {
    /// Create a policy from a camel-case flag (true = CamelCase, false = Verbatim).
    pub fn from_camel_case_flag(camel_case: bool) -> Self {
        if camel_case {
            NamingPolicy::CamelCase
        } else {
            NamingPolicy::Verbatim
        }
    }

    /// Returns the schema key for a reflected property name.
    pub fn schema_key(&self, name: &str) -> String {
        match self {
            NamingPolicy::Verbatim => name.to_string(),
            NamingPolicy::CamelCase => crate::naming::to_camel_case(name),
        }
    }
}

/// Identity of the endpoint an operation was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActionDescriptor {
    /// An action method on a controller.
    Controller { controller: String, action: String },
    /// Any other endpoint (pages, minimal handlers, ...).
    Other,
}

impl ActionDescriptor {
    pub fn controller(controller: impl Into<String>, action: impl Into<String>) -> Self {
        ActionDescriptor::Controller {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

/// The filters a [`FilterSet`](crate::FilterSet) can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    /// Flag 4xx/5xx responses with [`ERROR_RESPONSE_EXTENSION`].
    ErrorResponses,
    /// Rewrite `operationId` from controller and action names.
    OperationIds,
    /// Mark non-nullable value-typed properties as required.
    RequiredValueTypes,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [
        FilterKind::ErrorResponses,
        FilterKind::OperationIds,
        FilterKind::RequiredValueTypes,
    ];
}
