//! Hex byte parsing and formatting for command arguments and scripts.

/// Parse hex bytes. Tokens may be separated by whitespace or commas, may
/// carry a `0x` prefix, and may hold several bytes (`b562`).
pub fn parse_bytes(input: &str) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    for token in input.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        if digits.is_empty() {
            return Err(format!("invalid hex token: {token}"));
        }
        let bytes = hex::decode(digits).map_err(|err| format!("invalid hex token {token}: {err}"))?;
        out.extend(bytes);
    }
    Ok(out)
}

/// Parse exactly one hex byte.
pub fn parse_byte(input: &str) -> Result<u8, String> {
    match parse_bytes(input)?.as_slice() {
        [byte] => Ok(*byte),
        _ => Err(format!("expected a single hex byte, got: {input}")),
    }
}

/// Space-separated uppercase hex.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .chunks(1)
        .map(hex::encode_upper)
        .collect::<Vec<_>>()
        .join(" ")
}
