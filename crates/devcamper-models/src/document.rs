//! Conversions between typed models and stored JSON documents.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde_json::{Map, Value};

/// A model stored in its own collection.
pub trait Model: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;
}

pub fn from_document<T: DeserializeOwned>(doc: Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(doc))
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&42).is_err());
        assert_eq!(to_document(&json!({"a": 1})).unwrap()["a"], json!(1));
    }
}
