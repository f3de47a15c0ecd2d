// Validating parsers and JSON Schema documents for protocol I/O

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A payload that does not conform to a domain schema.
///
/// `path` names the offending field (`ingredients[1].quantity`); it is empty when the
/// value as a whole has the wrong shape. Missing fields are reported at the enclosing
/// object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {schema}: {}", describe(.path, .message))]
pub struct SchemaValidationError {
    pub schema: &'static str,
    pub path: String,
    pub message: String,
}

fn describe(path: &str, message: &str) -> String {
    if path.is_empty() {
        message.to_string()
    } else {
        format!("`{}` {}", path, message)
    }
}

impl SchemaValidationError {
    pub fn new(schema: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            schema,
            path: path.into(),
            message: message.into(),
        }
    }

    fn from_path_error(schema: &'static str, err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        // The root renders as "."
        let path = match err.path().to_string() {
            root if root == "." => String::new(),
            path => path,
        };
        Self::new(schema, path, err.into_inner().to_string())
    }
}

/// A deserializable type with a published JSON Schema.
///
/// Unknown fields are ignored and absent optional fields read as `None`.
pub trait Schema: DeserializeOwned {
    /// Human readable schema name used in validation errors
    const NAME: &'static str;

    /// JSON Schema document describing the accepted shape
    fn json_schema() -> Value;

    /// Parse an untyped value into `Self`.
    fn parse(value: &Value) -> Result<Self, SchemaValidationError> {
        deserialize(value, Self::NAME)
    }
}

/// Parse a JSON array of `T`, reporting element failures as `[i].field`.
pub fn parse_list<T: Schema>(value: &Value) -> Result<Vec<T>, SchemaValidationError> {
    deserialize(value, T::NAME)
}

fn deserialize<T: DeserializeOwned>(value: &Value, schema: &'static str) -> Result<T, SchemaValidationError> {
    serde_path_to_error::deserialize(value)
        .map_err(|err| SchemaValidationError::from_path_error(schema, err))
}

// Helper functions for building JSON Schema documents

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

pub fn json_schema_array(items: Value, description: &str) -> Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize)]
    struct Sample {
        #[allow(dead_code)]
        id: String,
        quantity: Option<f64>,
    }

    impl Schema for Sample {
        const NAME: &'static str = "Sample";

        fn json_schema() -> Value {
            json_schema_object(json!({ "id": json_schema_string("An id") }), vec!["id"])
        }
    }

    #[test]
    fn test_rejects_non_object() {
        let err = Sample::parse(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, "");
        assert!(err.to_string().starts_with("invalid Sample: invalid type: sequence"));
    }

    #[test]
    fn test_reports_missing_and_mistyped_fields() {
        let err = Sample::parse(&json!({ "id": 7 })).unwrap_err();
        assert_eq!(err.path, "id");
        assert_eq!(err.message, "invalid type: integer `7`, expected a string");

        let err = Sample::parse(&json!({ "quantity": 1 })).unwrap_err();
        assert_eq!(err.path, "");
        assert_eq!(err.to_string(), "invalid Sample: missing field `id`");
    }

    #[test]
    fn test_absent_optional_is_none() {
        let sample = Sample::parse(&json!({ "id": "a", "extra": true })).unwrap();
        assert_eq!(sample.quantity, None);
    }

    #[test]
    fn test_parse_list_reports_index() {
        let err = parse_list::<Sample>(&json!([{ "id": "a" }, { "id": "b", "quantity": "x" }])).unwrap_err();
        assert_eq!(err.schema, "Sample");
        assert_eq!(err.path, "[1].quantity");
    }

    #[test]
    fn test_json_schema_object_shape() {
        let schema = json_schema_object(json!({ "id": json_schema_string("An id") }), vec!["id"]);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["id"]));
        assert_eq!(schema["properties"]["id"]["type"], "string");
    }
}
