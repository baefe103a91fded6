//! Rendering and emission of bundles (made by FontLab https://www.fontlab.com/)

use std::io::Write;
use std::sync::OnceLock;

use anyhow::{anyhow, Result};
use regex::Regex;

use crate::bundle::FileRecord;

/// Variable name used by the demo loader.
pub const DEFAULT_VAR_NAME: &str = "demos";

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern compiles")
    })
}

/// Reject names that would not form a valid `var` declaration.
pub fn validate_var_name(name: &str) -> Result<()> {
    if identifier_pattern().is_match(name) {
        Ok(())
    } else {
        Err(anyhow!("invalid variable name: {name:?}"))
    }
}

/// Render `var <name> = [...];` with a compact JSON array, preserving order.
pub fn render_assignment(records: &[FileRecord], var_name: &str) -> Result<String> {
    validate_var_name(var_name)?;
    let json = serde_json::to_string(records)?;
    Ok(format!("var {var_name} = {json};"))
}

/// Write the assignment statement followed by a newline.
pub fn write_assignment(records: &[FileRecord], var_name: &str, mut w: impl Write) -> Result<()> {
    let text = render_assignment(records, var_name)?;
    w.write_all(text.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Write records as a bare compact JSON array.
pub fn write_json(records: &[FileRecord], mut w: impl Write) -> Result<()> {
    serde_json::to_writer(&mut w, records)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Write records as newline-delimited JSON (NDJSON).
pub fn write_ndjson(records: &[FileRecord], mut w: impl Write) -> Result<()> {
    for item in records {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}
