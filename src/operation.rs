//! Filters applied to individual operation objects.

use serde_json::{Map, Value};

use crate::types::{ActionDescriptor, ERROR_RESPONSE_EXTENSION};

/// Flags client and server error responses with [`ERROR_RESPONSE_EXTENSION`].
///
/// Code generators that understand the extension treat flagged responses as
/// errors rather than alternate success payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorResponseFilter;

impl ErrorResponseFilter {
    /// Flag every response whose status key starts with `4` or `5`.
    ///
    /// Range keys such as `4XX` qualify; `default` does not. `$ref` responses
    /// are skipped: siblings of `$ref` are ignored by OpenAPI 3.0 tooling, so
    /// the flag belongs on the shared response under `components`. Returns
    /// the number of responses flagged.
    pub fn apply(&self, operation: &mut Map<String, Value>) -> usize {
        let Some(Value::Object(responses)) = operation.get_mut("responses") else {
            return 0;
        };

        let mut flagged = 0;
        for (status, response) in responses.iter_mut() {
            if !is_error_status(status) {
                continue;
            }
            if let Value::Object(response) = response {
                if response.contains_key("$ref") {
                    log::debug!("skipping {} response: $ref", status);
                    continue;
                }
                response.insert(ERROR_RESPONSE_EXTENSION.to_string(), Value::Bool(true));
                flagged += 1;
            }
        }
        flagged
    }
}

fn is_error_status(status: &str) -> bool {
    status.starts_with('4') || status.starts_with('5')
}

/// Derives `operationId` from the controller and action an operation was
/// generated from.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationIdFilter;

impl OperationIdFilter {
    /// Set `operationId` to `{controller}_{action}` with `Async` removed from
    /// the action name.
    ///
    /// Non-controller endpoints are left alone. Returns true if the operation
    /// id was set.
    pub fn apply(&self, operation: &mut Map<String, Value>, action: &ActionDescriptor) -> bool {
        let Some(id) = operation_id(action) else {
            return false;
        };
        log::trace!("operationId -> {}", id);
        operation.insert("operationId".to_string(), Value::String(id));
        true
    }
}

/// The operation id for an action, if it is a controller action.
pub fn operation_id(action: &ActionDescriptor) -> Option<String> {
    match action {
        ActionDescriptor::Controller { controller, action } => {
            Some(format!("{}_{}", controller, action.replace("Async", "")))
        }
        ActionDescriptor::Other => None,
    }
}
