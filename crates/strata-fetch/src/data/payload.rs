use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::json_kind;
use crate::error::FetchError;

/// A decoded response body: always a JSON array or a JSON object.
///
/// Serializes back to exactly the JSON it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Array(Vec<Value>),
    Object(Map<String, Value>),
}

impl Payload {
    /// Decode `bytes` as JSON and check its shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::try_from(value)
    }

    /// Number of elements (array) or entries (object).
    pub fn len(&self) -> usize {
        match self {
            Payload::Array(items) => items.len(),
            Payload::Object(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Array(_) => "array",
            Payload::Object(_) => "object",
        }
    }

    /// Approximate size in bytes: the length of the compact JSON text.
    pub fn approx_size(&self) -> usize {
        serde_json::to_string(self).map(|s| s.len()).unwrap_or(0)
    }

    pub fn into_value(self) -> Value {
        match self {
            Payload::Array(items) => Value::Array(items),
            Payload::Object(map) => Value::Object(map),
        }
    }
}

impl TryFrom<Value> for Payload {
    type Error = FetchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => Ok(Payload::Array(items)),
            Value::Object(map) => Ok(Payload::Object(map)),
            other => Err(FetchError::UnexpectedShape {
                found: json_kind(&other),
            }),
        }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self { payload.into_value() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_and_object_accepted() {
        let array = Payload::try_from(json!([{"id": 1, "name": "test"}])).unwrap();
        assert_eq!(array.kind(), "array");
        assert_eq!(array.len(), 1);

        let object = Payload::try_from(json!({"id": 1, "name": "test"})).unwrap();
        assert_eq!(object.kind(), "object");
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_scalars_rejected() {
        for (value, kind) in [
            (json!("not a list or dict"), "string"),
            (json!(42), "number"),
            (json!(null), "null"),
            (json!(false), "boolean"),
        ] {
            match Payload::try_from(value) {
                Err(FetchError::UnexpectedShape { found }) => assert_eq!(found, kind),
                other => panic!("expected shape error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_serializes_to_original_json() {
        let original = json!({"b": [1, 2, {"c": null}], "a": "x"});
        let payload = Payload::try_from(original.clone()).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), original);
        assert_eq!(payload.into_value(), original);
    }

    #[test]
    fn test_from_slice_rejects_bad_json() {
        assert!(matches!(Payload::from_slice(b"{not json"), Err(FetchError::Decode(_))));
        assert!(matches!(Payload::from_slice(b""), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_from_slice_rejects_trailing_garbage() {
        assert!(matches!(Payload::from_slice(b"[1, 2] extra"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_approx_size_matches_compact_text() {
        let payload = Payload::from_slice(b"[ 1 , 2 ]").unwrap();
        assert_eq!(payload.approx_size(), "[1,2]".len());
    }

    #[test]
    fn test_empty_payloads() {
        assert!(Payload::from_slice(b"[]").unwrap().is_empty());
        assert!(Payload::from_slice(b"{}").unwrap().is_empty());
    }
}
