use serde::Serialize;

use super::json::to_json;

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Tty,
    Json,
}

/// Detect the appropriate output mode.
pub fn detect_output_mode(json_flag: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }
    OutputMode::Tty
}

/// Render `value` as pretty JSON or with the given TTY formatter.
pub fn render<T: Serialize>(mode: OutputMode, value: &T, tty: impl FnOnce(&T) -> String) -> String {
    match mode {
        OutputMode::Json => to_json(value),
        OutputMode::Tty => tty(value),
    }
}
