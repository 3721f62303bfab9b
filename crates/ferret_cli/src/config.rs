//! Command line arguments and resolved application settings.

use anyhow::{Context as _, bail};
use clap::Parser;
use core::time::Duration;
use ferret_agent::{DEFAULT_MAX_TOOL_ROUNDS, QuitWords};
use ferret_core::{TracingConfig, TracingFormat};
use ferret_model_providers::ollama;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "ollama/devstral";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Interactive coding assistant with read-only access to one directory.
#[derive(Debug, Parser)]
#[command(name = "ferret", version)]
#[command(about = "Chat with a local model that can read a sandboxed project directory")]
pub struct Args {
    /// Directory the assistant may read. Defaults to the current directory.
    #[arg(long, env = "FERRET_SANDBOX", value_name = "DIR")]
    pub sandbox: Option<PathBuf>,

    /// Model to use, as `provider/model`.
    #[arg(long, env = "FERRET_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Address of the Ollama server.
    #[arg(long = "ollama-url", env = "OLLAMA_HOST", default_value = ollama::DEFAULT_BASE_URL)]
    pub ollama_url: String,

    /// Sampling temperature.
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Word that ends the session (repeatable). Defaults to quit, exit and q.
    #[arg(long = "quit-word", value_name = "WORD")]
    pub quit_words: Vec<String>,

    /// Seconds a single tool call may run.
    #[arg(long, default_value_t = 30)]
    pub tool_timeout_secs: u64,

    /// Model rounds allowed per turn.
    #[arg(long, default_value_t = DEFAULT_MAX_TOOL_ROUNDS)]
    pub max_tool_rounds: usize,

    /// Log level (error, warn, info, debug, trace). `RUST_LOG` overrides it.
    #[arg(long, default_value = "warn")]
    pub log_level: Level,

    /// Log format (pretty, compact, json).
    #[arg(long, default_value = "pretty")]
    pub log_format: TracingFormat,

    /// Also log span enter and exit events.
    #[arg(long)]
    pub log_spans: bool,

    /// Streamable HTTP endpoint of an MCP server whose tools (e.g. web or
    /// documentation search) are offered to the model.
    #[arg(long = "mcp-url", env = "FERRET_MCP_URL", value_name = "URL")]
    pub mcp_url: Option<String>,
}

/// The sandbox directory that will be used, plus a message if the requested
/// one had to be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxChoice {
    /// Absolute sandbox root.
    pub root: PathBuf,
    /// Set when the requested directory was unusable.
    pub fallback_reason: Option<String>,
}

/// Picks the sandbox root: the requested directory if it exists, otherwise `cwd`.
///
/// Relative requests are taken relative to `cwd`.
pub fn resolve_sandbox_root(requested: Option<&Path>, cwd: &Path) -> SandboxChoice {
    let Some(requested) = requested else {
        return SandboxChoice {
            root: cwd.to_path_buf(),
            fallback_reason: None,
        };
    };

    let candidate = if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        cwd.join(requested)
    };

    if candidate.is_dir() {
        SandboxChoice {
            root: candidate,
            fallback_reason: None,
        }
    } else {
        let problem = if candidate.exists() {
            "is not a directory"
        } else {
            "does not exist"
        };
        SandboxChoice {
            root: cwd.to_path_buf(),
            fallback_reason: Some(format!(
                "Sandbox path {} {problem}; using {} instead",
                candidate.display(),
                cwd.display()
            )),
        }
    }
}

/// Adds a scheme to bare `host:port` addresses, as accepted by `OLLAMA_HOST`.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Sandbox root selection.
    pub sandbox: SandboxChoice,
    /// Model id, `provider/model`.
    pub model: String,
    /// Ollama server address with scheme.
    pub ollama_url: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Words that end the session.
    pub quit_words: QuitWords,
    /// Per-call tool timeout.
    pub tool_timeout: Duration,
    /// Model rounds allowed per turn.
    pub max_tool_rounds: usize,
    /// Remote MCP endpoint, if any.
    pub mcp_url: Option<String>,
    /// Logging setup.
    pub tracing: TracingConfig,
}

impl AppConfig {
    /// Validates `args`. `rust_log` is the value of `RUST_LOG`, if set.
    pub fn from_args(args: Args, cwd: &Path, rust_log: Option<String>) -> anyhow::Result<Self> {
        if !args.temperature.is_finite() || args.temperature < 0.0 {
            bail!("temperature must be a non-negative number, got {}", args.temperature);
        }
        if args.tool_timeout_secs == 0 {
            bail!("--tool-timeout-secs must be at least 1");
        }
        if args.max_tool_rounds == 0 {
            bail!("--max-tool-rounds must be at least 1");
        }
        let (provider, model) = args
            .model
            .split_once('/')
            .with_context(|| format!("model '{}' must look like provider/model", args.model))?;
        if provider.is_empty() || model.is_empty() {
            bail!("model '{}' must look like provider/model", args.model);
        }

        let mcp_url = match args.mcp_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Some(url.to_string())
            }
            Some(url) => bail!("--mcp-url must be an http(s) URL, got '{url}'"),
        };

        let quit_words = if args.quit_words.is_empty() {
            QuitWords::default()
        } else {
            QuitWords::new(&args.quit_words)
        };

        let mut tracing = TracingConfig::default()
            .with_level(args.log_level)
            .with_format(args.log_format)
            .with_span_events(args.log_spans);
        if let Some(filter) = rust_log.filter(|filter| !filter.trim().is_empty()) {
            tracing = tracing.with_env_filter(filter);
        }

        Ok(Self {
            sandbox: resolve_sandbox_root(args.sandbox.as_deref(), cwd),
            model: args.model,
            ollama_url: normalize_base_url(&args.ollama_url),
            temperature: args.temperature,
            quit_words,
            tool_timeout: Duration::from_secs(args.tool_timeout_secs),
            max_tool_rounds: args.max_tool_rounds,
            mcp_url,
            tracing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["ferret"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn missing_sandbox_falls_back_to_cwd() {
        let cwd = tempfile::tempdir().unwrap();
        let missing = cwd.path().join("nope");

        let choice = resolve_sandbox_root(Some(&missing), cwd.path());
        assert_eq!(choice.root, cwd.path());
        assert!(choice.fallback_reason.unwrap().contains("does not exist"));
    }

    #[test]
    fn file_sandbox_falls_back_to_cwd() {
        let cwd = tempfile::tempdir().unwrap();
        let file = cwd.path().join("a.txt");
        std::fs::write(&file, "hello").unwrap();

        let choice = resolve_sandbox_root(Some(&file), cwd.path());
        assert_eq!(choice.root, cwd.path());
        assert!(choice.fallback_reason.unwrap().contains("is not a directory"));
    }

    #[test]
    fn existing_sandbox_is_used() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::create_dir(cwd.path().join("project")).unwrap();

        let absolute = resolve_sandbox_root(Some(&cwd.path().join("project")), cwd.path());
        assert_eq!(absolute.root, cwd.path().join("project"));
        assert!(absolute.fallback_reason.is_none());

        let relative = resolve_sandbox_root(Some(Path::new("project")), cwd.path());
        assert_eq!(relative.root, cwd.path().join("project"));
    }

    #[test]
    fn no_sandbox_uses_cwd() {
        let choice = resolve_sandbox_root(None, Path::new("/work"));
        assert_eq!(choice.root, PathBuf::from("/work"));
        assert!(choice.fallback_reason.is_none());
    }

    #[test]
    fn base_url_gets_a_scheme() {
        assert_eq!(normalize_base_url("localhost:11434"), "http://localhost:11434");
        assert_eq!(normalize_base_url("https://ollama.lan/"), "https://ollama.lan");
    }

    #[test]
    fn defaults() {
        let cwd = tempfile::tempdir().unwrap();
        let config = AppConfig::from_args(
            Args {
                sandbox: None,
                model: DEFAULT_MODEL.to_string(),
                ollama_url: ollama::DEFAULT_BASE_URL.to_string(),
                temperature: DEFAULT_TEMPERATURE,
                quit_words: Vec::new(),
                tool_timeout_secs: 30,
                max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
                log_level: Level::WARN,
                log_format: TracingFormat::Pretty,
                log_spans: false,
                mcp_url: None,
            },
            cwd.path(),
            None,
        )
        .unwrap();

        assert_eq!(config.sandbox.root, cwd.path());
        assert_eq!(config.model, "ollama/devstral");
        assert_eq!(config.quit_words, QuitWords::default());
        assert_eq!(config.tool_timeout, Duration::from_secs(30));
        assert!(config.tracing.env_filter.is_none());
        assert!(!config.tracing.span_events);
        assert!(config.mcp_url.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let args = parse(&[
            "--quit-word",
            "bye",
            "--quit-word",
            "stop",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--temperature",
            "0.7",
            "--log-spans",
            "--mcp-url",
            "https://docs.example.com/mcp",
        ]);
        let config = AppConfig::from_args(args, Path::new("/"), Some("ferret_agent=trace".into()))
            .unwrap();

        assert!(config.quit_words.matches("BYE"));
        assert!(!config.quit_words.matches("quit"));
        assert_eq!(config.tracing.level, Level::DEBUG);
        assert_eq!(config.tracing.format, TracingFormat::Json);
        assert_eq!(config.tracing.env_filter.as_deref(), Some("ferret_agent=trace"));
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.tracing.span_events);
        assert_eq!(config.mcp_url.as_deref(), Some("https://docs.example.com/mcp"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for extra in [
            &["--model", "devstral"][..],
            &["--model", "ollama/"][..],
            &["--tool-timeout-secs", "0"][..],
            &["--max-tool-rounds", "0"][..],
            &["--temperature=-1"][..],
            &["--mcp-url", "docs.example.com/mcp"][..],
        ] {
            let args = parse(extra);
            assert!(
                AppConfig::from_args(args, Path::new("/"), None).is_err(),
                "{extra:?} should be rejected"
            );
        }
    }
}
