use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// A profile sub-object as it arrives on the wire: a flat field-to-value map.
pub type FieldMap = Map<String, Value>;

/// Overlay `incoming` onto `existing`, one level deep. Keys only in
/// `existing` are preserved, keys in `incoming` win, nested values are
/// replaced wholesale rather than merged recursively.
pub fn shallow_merge(existing: Option<&FieldMap>, incoming: Option<&FieldMap>) -> FieldMap {
    let mut merged = existing.cloned().unwrap_or_default();
    if let Some(incoming) = incoming {
        for (key, value) in incoming {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Merge an incoming partial payload into a stored sub-object.
///
/// The stored value is flattened to its wire map (unset fields omitted),
/// overlaid with the payload, and decoded back into the typed sub-object.
/// Decoding drops keys outside the schema and rejects invalid enum values.
pub fn merge_section<T>(existing: Option<&T>, incoming: Option<&FieldMap>) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
{
    let existing_map = match existing {
        Some(section) => match serde_json::to_value(section)
            .map_err(|e| AppError::Validation(e.to_string()))?
        {
            Value::Object(map) => Some(map),
            _ => None,
        },
        None => None,
    };
    let merged = shallow_merge(existing_map.as_ref(), incoming);
    serde_json::from_value(Value::Object(merged)).map_err(|e| AppError::Validation(e.to_string()))
}
