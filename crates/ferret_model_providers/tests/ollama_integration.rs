//! Integration tests for the Ollama provider.
//!
//! These tests are ignored by default because they require:
//! - A running Ollama server (`OLLAMA_HOST`, default `http://localhost:11434`)
//! - The model named by `FERRET_TEST_MODEL` pulled locally (default `devstral`)
//!
//! To run these tests:
//! ```sh
//! cargo test -p ferret_model_providers --test ollama_integration -- --ignored
//! ```

use ferret_model_providers::ollama::{self, OllamaProvider};
use ferret_models::ModelRegistry;
use ferret_models::llm::{GenerationError, GenerationRequest, Llm, ToolDefinition};
use serde_json::json;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

fn get_llm(model: &str) -> Llm {
    INIT.call_once(|| {
        let _ = dotenvy::dotenv();
    });
    let base_url =
        std::env::var("OLLAMA_HOST").unwrap_or_else(|_| ollama::DEFAULT_BASE_URL.to_string());

    let mut registry = ModelRegistry::new();
    registry.register_llm_provider(ollama::PROVIDER_NAME, Arc::new(OllamaProvider::new(base_url)));
    registry
        .llm(&format!("{}/{model}", ollama::PROVIDER_NAME))
        .expect("model id should be valid")
}

fn test_model() -> String {
    std::env::var("FERRET_TEST_MODEL").unwrap_or_else(|_| "devstral".to_string())
}

#[tokio::test]
#[ignore = "requires a running Ollama server"]
async fn test_basic_generation() {
    let llm = get_llm(&test_model());
    let response = llm
        .generate(GenerationRequest::new("Reply with exactly the word: hello").temperature(0.0))
        .await
        .expect("generation should succeed");

    assert!(response.text().to_lowercase().contains("hello"), "got: {}", response.text());
}

#[tokio::test]
#[ignore = "requires a running Ollama server"]
async fn test_tool_calling() {
    let llm = get_llm(&test_model());
    let request = GenerationRequest::with_system(
        "You can read files with the read_text_file tool.",
        "What is in the file /tmp/fixture/a.txt?",
    )
    .tool(ToolDefinition {
        name: "read_text_file".to_string(),
        description: "Read the full contents of a UTF-8 text file at an absolute path.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"],
            "additionalProperties": false
        }),
    })
    .temperature(0.0);

    let response = llm.generate(request).await.expect("generation should succeed");
    let calls = response.tool_calls();
    assert!(!calls.is_empty(), "expected a tool call, got: {}", response.text());
    assert_eq!(calls[0].function.name, "read_text_file");
    assert!(!calls[0].id.is_empty());
}

#[tokio::test]
#[ignore = "requires a running Ollama server"]
async fn test_unknown_model_is_provider_error() {
    let llm = get_llm("ferret-no-such-model");
    let err = llm
        .generate(GenerationRequest::new("hi"))
        .await
        .expect_err("unknown model should fail");

    assert!(matches!(err, GenerationError::Provider { status: Some(404), .. }), "got: {err}");
}
