//! JSON codec entry points.
//!
//! Decoding is strict about structure (nulls, required fields, choice
//! conflicts, unknown resource types) and permissive about content: fields
//! beyond the transcribed core are preserved verbatim through each struct's
//! flattened carrier and re-emitted on encode.
//!
//! Errors carry a dotted path rooted at the resource type, produced with
//! `serde_path_to_error` plus a pre-pass null walk.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A concrete resource struct with a fixed `resourceType` discriminant.
///
/// Concrete structs do not store the discriminant; the per-version `Resource`
/// enum tag (or this trait, for typed decode/encode) is the single source of
/// truth.
pub trait TypedResource: Serialize + DeserializeOwned {
    const TYPE: &'static str;
}

/// Decode a version's `Resource` enum (or any wire struct) from bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    decode_value(serde_json::from_slice(bytes)?)
}

/// Decode from an already-parsed JSON value.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    let root = root_label(&value);
    reject_nulls(&value, &root)?;
    deserialize_tracked(&root, value)
}

/// Typed decode into a concrete resource, checking `resourceType`.
pub fn decode_as<T: TypedResource>(bytes: &[u8]) -> Result<T> {
    decode_value_as(serde_json::from_slice(bytes)?)
}

/// Typed decode from an already-parsed JSON value.
pub fn decode_value_as<T: TypedResource>(mut value: Value) -> Result<T> {
    let root = T::TYPE;
    reject_nulls(&value, root)?;
    let Some(object) = value.as_object_mut() else {
        return Err(Error::Schema {
            path: root.to_string(),
            message: "expected a JSON object".to_string(),
        });
    };
    match object.remove("resourceType") {
        Some(Value::String(actual)) if actual == T::TYPE => {}
        Some(Value::String(actual)) => {
            return Err(Error::Schema {
                path: format!("{root}.resourceType"),
                message: format!("expected `{}`, got `{actual}`", T::TYPE),
            });
        }
        Some(_) => {
            return Err(Error::Schema {
                path: format!("{root}.resourceType"),
                message: "resourceType must be a string".to_string(),
            });
        }
        None => {
            return Err(Error::Schema {
                path: root.to_string(),
                message: "missing resourceType".to_string(),
            });
        }
    }
    deserialize_tracked(root, value)
}

/// Encode a version's `Resource` enum (the tag is emitted by the enum).
pub fn encode<T: Serialize>(resource: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(resource)?)
}

/// Encode to an owned JSON value.
pub fn encode_value<T: Serialize>(resource: &T) -> Result<Value> {
    Ok(serde_json::to_value(resource)?)
}

/// Encode a concrete resource, prepending its `resourceType`.
pub fn encode_as<T: TypedResource>(resource: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&encode_value_as(resource)?)?)
}

/// Encode a concrete resource to a JSON value, prepending `resourceType`.
pub fn encode_value_as<T: TypedResource>(resource: &T) -> Result<Value> {
    let body = serde_json::to_value(resource)?;
    let Value::Object(body) = body else {
        return Err(Error::EncodeInvariant(format!(
            "{} did not encode to a JSON object",
            T::TYPE
        )));
    };
    let mut map = Map::with_capacity(body.len() + 1);
    map.insert(
        "resourceType".to_string(),
        Value::String(T::TYPE.to_string()),
    );
    map.extend(body);
    Ok(Value::Object(map))
}

fn deserialize_tracked<T: DeserializeOwned>(root: &str, value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|err| classify(root, err))
}

fn root_label(value: &Value) -> String {
    value
        .get("resourceType")
        .and_then(Value::as_str)
        .unwrap_or("<root>")
        .to_string()
}

/// `null` is not a valid FHIR value. The one exception is beneath
/// `_`-prefixed keys, where primitive-companion arrays pad with null; those
/// subtrees are preserved opaquely and never merged.
fn reject_nulls(value: &Value, path: &str) -> Result<()> {
    match value {
        Value::Null => Err(Error::NullValue {
            path: path.to_string(),
        }),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| reject_nulls(item, &format!("{path}[{i}]"))),
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| !key.starts_with('_'))
            .try_for_each(|(key, item)| reject_nulls(item, &format!("{path}.{key}"))),
        _ => Ok(()),
    }
}

/// Sorts a raw serde failure into the codec's error taxonomy.
fn classify(root: &str, err: serde_path_to_error::Error<serde_json::Error>) -> Error {
    let track = err.path().to_string();
    let message = err.into_inner().to_string();
    let path = if track.is_empty() || track == "." {
        root.to_string()
    } else {
        format!("{root}.{track}")
    };

    if message.contains("conflicting choice fields") {
        let path = match element_of(&message) {
            Some(element) => format!("{path}.{element}"),
            None => path,
        };
        return Error::ChoiceConflict { path, message };
    }
    if let Some(rest) = message.strip_prefix("unknown variant `") {
        if let Some(resource_type) = rest.split('`').next() {
            return Error::UnknownResourceType {
                path,
                resource_type: resource_type.to_string(),
            };
        }
    }
    if message.contains("invalid ") && message.contains(" literal `") {
        return Error::PrimitiveParse { path, message };
    }
    Error::Schema { path, message }
}

/// Pulls the element name out of a choice-conflict message.
fn element_of(message: &str) -> Option<&str> {
    let rest = message.split("for element `").nth(1)?;
    rest.split('`').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_are_rejected_with_a_path() {
        let value = json!({"resourceType": "Patient", "name": [{"family": null}]});
        let err = decode_value::<Value>(value).unwrap_err();
        assert!(matches!(err, Error::NullValue { ref path } if path == "Patient.name[0].family"));
    }

    #[test]
    fn null_under_companion_keys_is_tolerated() {
        let value = json!({
            "resourceType": "Patient",
            "given": ["a", "b"],
            "_given": [null, {"id": "g2"}]
        });
        assert!(decode_value::<Value>(value).is_ok());
    }
}
