use crate::cli::OutputFormat;
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

pub fn emit_value(value: &Value, format: OutputFormat, compact: bool, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Json => {
            if compact {
                serde_json::to_writer(&mut handle, value)?;
            } else {
                serde_json::to_writer_pretty(&mut handle, value)?;
            }
            handle.write_all(b"\n")?;
        }
        OutputFormat::Text => {
            if let Value::Object(map) = value {
                for (key, entry) in map {
                    match entry {
                        Value::String(text) => writeln!(handle, "{key}: {text}")?,
                        other => writeln!(handle, "{key}: {other}")?,
                    }
                }
            } else {
                writeln!(handle, "{value}")?;
            }
        }
    }
    Ok(())
}
