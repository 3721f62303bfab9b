//! Tool invocation requests.

use crate::error::ToolError;
use ferret_models::llm::ToolCall;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A request to run one tool, correlated with the model's tool call.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolInvocation {
    /// Correlation id; the tool result message carries the same id.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// Arguments as a JSON object map.
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    /// Creates a new invocation.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Creates an invocation from a model tool call.
    ///
    /// A `null` argument value is treated as an empty object, since some
    /// models omit arguments for parameterless calls.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidArguments`] if the arguments are neither an
    /// object nor `null`.
    pub fn from_call(call: &ToolCall) -> Result<Self, ToolError> {
        match &call.function.arguments {
            Value::Object(map) => Ok(Self::new(&call.id, &call.function.name, map.clone())),
            Value::Null => Ok(Self::new(&call.id, &call.function.name, Map::new())),
            other => Err(ToolError::invalid_arguments(format!(
                "arguments must be an object, got {other}"
            ))),
        }
    }

    /// Returns the arguments as a JSON value.
    #[must_use]
    pub fn arguments_value(&self) -> Value {
        Value::Object(self.arguments.clone())
    }
}

/// Deserializes tool arguments into a typed parameter struct.
///
/// # Errors
///
/// Returns [`ToolError::InvalidArguments`] if deserialization fails.
pub fn parse_arguments<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args)
        .map_err(|err| ToolError::invalid_arguments(format!("failed to parse arguments: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn from_call_keeps_correlation_id() {
        let call = ToolCall::new("call_7", "read_text_file", json!({"path": "/tmp/a"}));
        let invocation = ToolInvocation::from_call(&call).unwrap();

        assert_eq!(invocation.id, "call_7");
        assert_eq!(invocation.name, "read_text_file");
        assert_eq!(invocation.arguments_value(), json!({"path": "/tmp/a"}));
    }

    #[test]
    fn from_call_accepts_null_arguments() {
        let call = ToolCall::new("c", "noop", Value::Null);
        let invocation = ToolInvocation::from_call(&call).unwrap();
        assert!(invocation.arguments.is_empty());
    }

    #[test]
    fn from_call_rejects_non_objects() {
        let call = ToolCall::new("c", "noop", json!(["not", "an", "object"]));
        let err = ToolInvocation::from_call(&call).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn parse_arguments_reports_bad_types() {
        #[derive(Debug, Deserialize)]
        struct Params {
            #[expect(dead_code, reason = "only deserialization is exercised")]
            limit: u32,
        }

        let err = parse_arguments::<Params>(json!({"limit": "many"})).unwrap_err();
        assert!(err.to_string().contains("failed to parse arguments"));
    }
}
