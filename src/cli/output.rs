//! Rendering of command results for people and for scripts.

use std::io::{self, Write};

use serde::Serialize;

/// A command result that can be shown as text or as JSON.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` to stdout in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = render(&mut stdout, result, json_mode) {
        tracing::debug!(error = %err, "Failed to write command output");
    }
}

fn render<W: Write, T: CommandOutput>(out: &mut W, result: &T, json_mode: bool) -> io::Result<()> {
    if json_mode {
        serde_json::to_writer_pretty(&mut *out, &result.to_json())?;
        writeln!(out)
    } else {
        writeln!(out, "{}", result.to_human())
    }
}
