//! Hex parsing and formatting for report bytes and USB IDs

use crate::error::CliError;

/// Parses `"01 ff 0A"`, `"01ff0a"` or `"0x01,0xff"` style byte strings.
pub fn parse_bytes(input: &str) -> Result<Vec<u8>, CliError> {
    let digits: String = input
        .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.trim_start_matches("0x").trim_start_matches("0X"))
        .map(|chunk| {
            if chunk.len() == 1 {
                format!("0{chunk}")
            } else {
                chunk.to_string()
            }
        })
        .collect();

    ::hex::decode(&digits).map_err(|e| CliError::InvalidHex(format!("{e} in {input:?}")))
}

/// Parses a 16-bit ID written as `054C` or `0x054c`.
pub fn parse_id(input: &str) -> Result<u16, CliError> {
    let digits = input.trim_start_matches("0x").trim_start_matches("0X");
    if digits.is_empty() {
        return Err(CliError::InvalidHex(input.to_string()));
    }
    let padded = format!("{digits:0>4}");
    let mut id = [0u8; 2];
    ::hex::decode_to_slice(&padded, &mut id)
        .map_err(|e| CliError::InvalidHex(format!("{e} in {input:?}")))?;
    Ok(u16::from_be_bytes(id))
}

/// Space-separated lowercase hex.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| ::hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}
