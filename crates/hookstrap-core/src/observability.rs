//! Observability: tracing init and the tool-invocation audit log.
//!
//! Uses config::ObservabilityConfig for HOOKSTRAP_QUIET, LOG_LEVEL, LOG_JSON, AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// Initialize tracing. Call once at process startup, after `.env` is loaded.
///
/// Log lines go to stderr so stdout stays reserved for status messages.
/// `RUST_LOG`, when set, takes precedence over HOOKSTRAP_LOG_LEVEL.
pub fn init_tracing(cfg: &ObservabilityConfig) {
    let level = cfg.filter_directive();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn append_jsonl(path: &Path, record: &serde_json::Value) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(mut f) => {
            if let Ok(line) = serde_json::to_string(record) {
                let _ = writeln!(f, "{}", line);
            }
        }
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "Audit log not writable"),
    }
}

fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn tool_started_record(program: &str, args: &[String], cwd: &str) -> serde_json::Value {
    json!({
        "ts": now_ts(),
        "event": "tool_started",
        "program": program,
        "args": args,
        "cwd": cwd,
    })
}

fn tool_completed_record(program: &str, exit_code: Option<i32>, duration_ms: u64) -> serde_json::Value {
    json!({
        "ts": now_ts(),
        "event": "tool_completed",
        "program": program,
        "exit_code": exit_code,
        "duration_ms": duration_ms,
        "success": exit_code == Some(0),
    })
}

/// Audit: tool_started (right before spawn)
pub fn audit_tool_started(program: &str, args: &[String], cwd: &str) {
    if let Some(path) = ObservabilityConfig::from_env().audit_log.as_deref() {
        append_jsonl(path, &tool_started_record(program, args, cwd));
    }
}

/// Audit: tool_completed. `exit_code` is None when the child was killed by a signal
/// or never started.
pub fn audit_tool_completed(program: &str, exit_code: Option<i32>, duration_ms: u64) {
    if let Some(path) = ObservabilityConfig::from_env().audit_log.as_deref() {
        append_jsonl(path, &tool_completed_record(program, exit_code, duration_ms));
    }
}
