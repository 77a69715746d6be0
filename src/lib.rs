//! OpenAPI document filters
//!
//! Post-processing filters for OpenAPI documents produced by a schema
//! generator:
//!
//! - [`RequiredPropertyAnnotator`] marks non-nullable value-typed properties as
//!   required, so authors don't have to annotate every such property by hand.
//! - [`ErrorResponseFilter`] flags 4xx/5xx responses with the
//!   `x-ms-error-response` vendor extension.
//! - [`OperationIdFilter`] names operations `{Controller}_{Action}`.
//!
//! Each filter is a plain function a host calls at its own extension point.
//! [`FilterSet`] runs them over a whole document using a [`Manifest`] for the
//! type and endpoint metadata.
//!
//! # Example
//!
//! ```
//! use openapi_filters::{PropertyDescriptor, RequiredPropertyAnnotator, SchemaNode};
//!
//! let properties = [
//!     PropertyDescriptor::new("UserId"),
//!     PropertyDescriptor::new("Score").optional(),
//! ];
//! let mut schema = SchemaNode::with_property_keys(["userId", "score"]);
//!
//! RequiredPropertyAnnotator::new(true).annotate(&properties, &mut schema);
//!
//! assert!(schema.is_required("userId"));
//! assert!(!schema.is_required("score"));
//! ```
//!
//! # Eligibility
//!
//! | Declared property | Schema key present | Result |
//! |-------------------|--------------------|--------|
//! | value type | yes | added to `required` |
//! | nullable wrapper | yes | left alone |
//! | explicitly required | yes | left alone |
//! | any | no | left alone |

mod error;
mod loader;
mod manifest;
mod naming;
mod operation;
mod pipeline;
mod required;
mod schema;
mod types;

pub use error::FilterError;
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use manifest::{Manifest, OperationEntry};
pub use naming::to_camel_case;
pub use operation::{operation_id, ErrorResponseFilter, OperationIdFilter};
pub use pipeline::{apply_document, ApplyReport, FilterSet};
pub use required::RequiredPropertyAnnotator;
pub use schema::SchemaNode;
pub use types::{
    json_type_name, ActionDescriptor, FilterKind, NamingPolicy, PropertyDescriptor,
    ERROR_RESPONSE_EXTENSION, HTTP_METHODS,
};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
