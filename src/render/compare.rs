use serde_json::Value;

/// Return true if the given value is truthy.
///
/// A value is falsy when it is absent, null, `false`, or an empty sequence.
/// Every other value is truthy, including empty text, zero, and empty objects.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(bo)) => *bo,
        Some(Value::Array(ar)) => !ar.is_empty(),
        Some(_) => true,
    }
}
