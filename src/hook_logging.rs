//! Debug hook event logging.
//!
//! When `debug_logging` is enabled in `.cursor/loop-hooks.yaml`, every hook
//! invocation is appended as a JSONL line to `.cursor/hook-events.jsonl`,
//! together with the decision it produced and any error that was swallowed
//! on the way. The decision printed on stdout is never affected.

use crate::config::ProjectConfig;
use crate::hooks::Decision;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log file path relative to the project root.
pub const HOOK_EVENTS_PATH: &str = ".cursor/hook-events.jsonl";

/// Log a hook event if debug logging is enabled.
///
/// Errors are silently ignored: logging must never break hook execution.
pub fn log_hook_event_in(hook_type: &str, raw_input: &str, decision: &Decision, base_dir: &Path) {
    // A missing or unparsable config leaves logging off.
    let Ok(Some(config)) = ProjectConfig::load_from(base_dir) else {
        return;
    };

    if !config.debug_logging {
        return;
    }

    write_hook_event(hook_type, raw_input, decision, base_dir);
}

/// Path of the event log for a base directory.
pub fn hook_events_path(base_dir: &Path) -> PathBuf {
    base_dir.join(HOOK_EVENTS_PATH)
}

/// Write the hook event to the log file.
fn write_hook_event(hook_type: &str, raw_input: &str, decision: &Decision, base_dir: &Path) {
    let log_path = hook_events_path(base_dir);

    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let timestamp = chrono::Utc::now().to_rfc3339();

    // Embed the input as JSON when it parses, otherwise as the raw string.
    let input_value: serde_json::Value = serde_json::from_str(raw_input)
        .unwrap_or_else(|_| serde_json::Value::String(raw_input.to_string()));

    let detail = match decision {
        Decision::Stop(reason) => reason.detail(),
        Decision::Continue(_) => None,
    };

    let entry = serde_json::json!({
        "timestamp": timestamp,
        "hook_type": hook_type,
        "input": input_value,
        "decision": decision.label(),
        "detail": detail,
    });

    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let _ = writeln!(file, "{entry}");
}
