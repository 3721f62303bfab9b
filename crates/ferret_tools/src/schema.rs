//! Schema derivation for tool parameters.
//!
//! Tool inputs are described by a parameter struct deriving
//! [`JsonSchema`]. [`tool_definition`] turns that struct into the
//! [`ToolDefinition`] advertised to the model and used by the registry for
//! argument validation.

use ferret_models::llm::ToolDefinition;
use schemars::{JsonSchema, schema_for};
use serde_json::Value;

/// Root-level keys that carry no meaning for tool input and confuse some providers.
const STRIPPED_KEYS: &[&str] = &["$schema", "title"];

/// Builds a [`ToolDefinition`] whose parameters schema is derived from `T`.
///
/// Field doc comments become property descriptions, `#[serde(default)]`
/// fields become optional, and additional properties are rejected.
#[must_use]
pub fn tool_definition<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let mut schema = serde_json::to_value(schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));

    if let Some(obj) = schema.as_object_mut() {
        for key in STRIPPED_KEYS {
            obj.remove(*key);
        }
        obj.insert("additionalProperties".to_string(), Value::Bool(false));
        obj.entry("properties")
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        parameters: schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[expect(dead_code, reason = "schema-only fixture")]
    struct SearchParams {
        /// The search query.
        query: String,
        /// Max results to return.
        #[serde(default)]
        limit: Option<u32>,
    }

    #[test]
    fn derives_object_schema_from_struct() {
        let def = tool_definition::<SearchParams>("search", "Search documents.");

        assert_eq!(def.name, "search");
        assert_eq!(def.description, "Search documents.");
        assert_eq!(def.parameters["type"], "object");
        assert_eq!(
            def.parameters["properties"]["query"]["description"],
            "The search query."
        );
        assert_eq!(def.parameters["required"], serde_json::json!(["query"]));
        assert_eq!(def.parameters["additionalProperties"], false);
        assert!(def.parameters.get("$schema").is_none());
        assert!(def.parameters.get("title").is_none());
    }
}
