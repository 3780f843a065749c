//! Shared output layer: human text or stable JSON for every command.

use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human separators.
pub const RULE_WIDTH: usize = 72;

/// Write a section heading followed by a separator.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    /// Fixed one-line description of the error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
            suggestion: None,
            error_code: None,
        }
    }

    /// Build from a core error code so scripts get the stable `E####` id.
    pub fn from_code(message: impl Into<String>, code: sprintboard_core::ErrorCode) -> Self {
        Self {
            message: message.into(),
            kind: Some(code.message().to_string()),
            suggestion: code.hint().map(String::from),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode the value is serialized with `serde_json`; otherwise
/// `human_fn` produces the text.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_rendered(mode, value, human_fn, &mut out)
}

fn write_rendered<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, out)?,
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({ "error": error });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            match (&error.error_code, &error.kind) {
                (Some(code), Some(kind)) => writeln!(out, "error[{code}]: {kind}: {}", error.message)?,
                _ => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintboard_core::ErrorCode;

    #[test]
    fn json_mode_writes_value() {
        let mut buf = Vec::new();
        write_rendered(OutputMode::Json, &serde_json::json!({"a": 1}), |_, _| Ok(()), &mut buf)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn human_mode_uses_closure() {
        let mut buf = Vec::new();
        write_rendered(OutputMode::Human, &3, |v, w| writeln!(w, "value={v}"), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "value=3\n");
    }

    #[test]
    fn cli_error_from_code_carries_hint() {
        let err = CliError::from_code("boom", ErrorCode::ProjectNotConfigured);
        assert_eq!(err.error_code.as_deref(), Some("E1002"));
        assert_eq!(err.kind.as_deref(), Some("No project configured"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn human_error_names_code_and_kind() {
        let err = CliError::from_code("no project or sprint configured", ErrorCode::ProjectNotConfigured);
        let mut buf = Vec::new();
        write_error(OutputMode::Human, &err, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("error[E1002]: No project configured: no project or sprint configured\n"));
        assert!(text.contains("  suggestion: "));
    }

    #[test]
    fn human_error_without_code_is_plain() {
        let mut buf = Vec::new();
        write_error(OutputMode::Human, &CliError::new("boom"), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "error: boom\n");
    }

    #[test]
    fn json_error_is_wrapped() {
        let err = CliError::from_code("bad lane", ErrorCode::InvalidEnumValue);
        let mut buf = Vec::new();
        write_error(OutputMode::Json, &err, &mut buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["error"]["error_code"], "E2003");
        assert_eq!(parsed["error"]["kind"], "Invalid status/priority/lane value");
    }
}
