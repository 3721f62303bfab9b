//! Integration tests for the `ferret_tools` crate.

use core::future::Future;
use core::pin::Pin;
use core::time::Duration;
use ferret_models::llm::{ToolCall, ToolDefinition};
use ferret_tools::{Tool, ToolError, ToolInvocation, ToolRegistry, parse_arguments, tool_definition};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + 'a>>;

// ─────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────

struct ManualTool;

impl Tool for ManualTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "manual_tool".to_string(),
            description: "A manually implemented tool.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string" }
                },
                "required": ["input"]
            }),
        }
    }

    fn execute(&self, args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let input = args
                .get("input")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ToolError::invalid_arguments("Missing 'input'"))?;
            Ok(json!({ "result": format!("echo: {}", input) }))
        })
    }
}

#[derive(Deserialize, JsonSchema)]
struct CountParams {
    /// How many items to count.
    count: u32,
    /// Optional label.
    #[serde(default)]
    label: Option<String>,
}

/// Records how often it ran, so tests can prove validation short-circuits.
struct CountingTool {
    runs: Arc<AtomicUsize>,
}

impl Tool for CountingTool {
    fn definition(&self) -> ToolDefinition {
        tool_definition::<CountParams>("count", "Counts things.")
    }

    fn execute(&self, args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            self.runs.fetch_add(1, Ordering::SeqCst);
            let params: CountParams = parse_arguments(args)?;
            Ok(json!({
                "count": params.count,
                "label": params.label.unwrap_or_default(),
            }))
        })
    }
}

struct SlowTool;

impl Tool for SlowTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "slow".to_string(),
            description: "Sleeps for a long time.".to_string(),
            parameters: json!({ "type": "object", "properties": {} }),
        }
    }

    fn execute(&self, _args: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Value::Null)
        })
    }
}

fn invocation(name: &str, args: Value) -> ToolInvocation {
    ToolInvocation::from_call(&ToolCall::new("call_1", name, args)).unwrap()
}

// ─────────────────────────────────────────────────────────────────────
// 1. Registration and lookup
// ─────────────────────────────────────────────────────────────────────

#[test]
fn registry_register_get_has_names() {
    let mut registry = ToolRegistry::new();
    registry.register(ManualTool);

    assert!(registry.has("manual_tool"));
    assert!(!registry.has("nonexistent"));
    assert!(registry.get("manual_tool").is_some());
    assert!(registry.get("nonexistent").is_none());
    assert_eq!(registry.names(), vec!["manual_tool"]);
}

#[test]
fn registry_definitions_keep_registration_order() {
    let mut registry = ToolRegistry::new();
    registry.register(ManualTool);
    registry.register(CountingTool {
        runs: Arc::default(),
    });

    let names: Vec<String> = registry
        .definitions()
        .into_iter()
        .map(|def| def.name)
        .collect();
    assert_eq!(names, vec!["manual_tool", "count"]);
}

#[test]
#[should_panic(expected = "already registered")]
fn registry_duplicate_registration_panics() {
    let mut registry = ToolRegistry::new();
    registry.register(ManualTool);
    registry.register(ManualTool);
}

struct BrokenSchemaTool;

impl Tool for BrokenSchemaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "broken".to_string(),
            description: "Declares a schema that does not compile.".to_string(),
            parameters: json!({ "type": "no-such-type" }),
        }
    }

    fn execute(&self, _args: Value) -> ToolFuture<'_> {
        Box::pin(async move { Ok(Value::Null) })
    }
}

#[test]
fn try_register_reports_bad_definitions() {
    let mut registry = ToolRegistry::new();
    registry.try_register(ManualTool).unwrap();

    let err = registry.try_register(ManualTool).unwrap_err();
    assert!(matches!(err, ToolError::InvalidDefinition(_)), "{err}");

    let err = registry.try_register(BrokenSchemaTool).unwrap_err();
    assert!(err.to_string().contains("invalid parameter schema"), "{err}");
    assert_eq!(registry.names(), vec!["manual_tool"]);
}

// ─────────────────────────────────────────────────────────────────────
// 2. Execution
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn registry_execute_by_name() {
    let mut registry = ToolRegistry::new();
    registry.register(ManualTool);

    let result = registry
        .execute(&invocation("manual_tool", json!({"input": "test"})))
        .await
        .unwrap();
    assert_eq!(result["result"], "echo: test");
}

#[tokio::test]
async fn registry_unknown_tool_error() {
    let registry = ToolRegistry::new();
    let err = registry
        .execute(&invocation("nonexistent", json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "nonexistent"));
    assert!(err.to_string().contains("Unknown tool"), "got: {err}");
}

#[tokio::test]
async fn registry_applies_serde_defaults() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut registry = ToolRegistry::new();
    registry.register(CountingTool { runs: runs.clone() });

    let result = registry
        .execute(&invocation("count", json!({"count": 3})))
        .await
        .unwrap();
    assert_eq!(result, json!({"count": 3, "label": ""}));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// ─────────────────────────────────────────────────────────────────────
// 3. Schema validation
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn invalid_arguments_never_reach_the_tool() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut registry = ToolRegistry::new();
    registry.register(CountingTool { runs: runs.clone() });

    for args in [
        json!({}),
        json!({"count": "three"}),
        json!({"count": 1, "unexpected": true}),
    ] {
        let err = registry
            .execute(&invocation("count", args.clone()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ToolError::InvalidArguments(_)),
            "{args} should be rejected, got {err}"
        );
    }

    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

// ─────────────────────────────────────────────────────────────────────
// 4. Timeout
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn slow_tools_time_out() {
    let mut registry = ToolRegistry::new().with_timeout(Duration::from_millis(20));
    registry.register(SlowTool);

    let err = registry
        .execute(&invocation("slow", json!({})))
        .await
        .unwrap_err();
    match err {
        ToolError::Timeout { tool, after } => {
            assert_eq!(tool, "slow");
            assert_eq!(after, Duration::from_millis(20));
        }
        other => panic!("expected timeout, got {other}"),
    }
}
