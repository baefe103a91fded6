//! Base64 encoding of script contents (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Read the whole file and return its bytes as padded standard base64.
///
/// The file is opened, read and closed before this returns. A file that
/// vanished after discovery surfaces here as an error.
pub fn encode_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_content(content: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(content)
        .context("content is not valid base64")
}
