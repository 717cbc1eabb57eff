//! The dynamic document model and the pieces of it the resolver inspects.
//!
//! Documents are plain [`serde_json::Value`] trees. This module knows how to
//! recognise a reference marker (`{"$ref": "..."}`) and how to evaluate a
//! JSON Pointer against a document.

pub use serde_json::Value;

use crate::error::{ResolveError, Result};

/// The object key that marks a JSON Reference.
pub const REF_KEY: &str = "$ref";

/// Returns the reference target if `value` is a reference marker.
///
/// Only objects are inspected. A `$ref` whose value is not a string is a
/// [`ResolveError::MalformedReference`] rather than an ordinary object.
pub fn reference_target(value: &Value) -> Result<Option<&str>> {
    let Value::Object(map) = value else {
        return Ok(None);
    };

    match map.get(REF_KEY) {
        None => Ok(None),
        Some(Value::String(target)) => Ok(Some(target.as_str())),
        Some(other) => Err(ResolveError::MalformedReference {
            kind: kind_name(other),
        }),
    }
}

/// Evaluates an RFC 6901 JSON Pointer against `document`.
///
/// The empty pointer addresses the whole document.
pub fn evaluate_pointer<'a>(document: &'a Value, pointer: &str) -> Result<&'a Value> {
    document
        .pointer(pointer)
        .ok_or_else(|| ResolveError::PointerNotFound {
            pointer: pointer.to_string(),
        })
}

/// Human-readable name of a value's JSON kind.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
