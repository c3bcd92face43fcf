//! Hex helpers for register buffers given on the command line

use crate::error::{CoilflowError, Result};

/// Encode bytes to a lowercase hex string
/// Example: [0x97, 0x00, 0x00, 0x00] -> "97000000"
pub fn encode(data: &[u8]) -> String {
    ::hex::encode(data)
}

/// Decode a hex string such as `"0x9700"`, `"97 00"` or `"97:00"`
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '_')
        .collect();

    if digits.is_empty() {
        return Err(CoilflowError::ParseError(format!(
            "Hex input '{input}' contains no digits"
        )));
    }

    ::hex::decode(&digits)
        .map_err(|e| CoilflowError::ParseError(format!("Invalid hex input '{input}': {e}")))
}
