//! Symbol-name escaping for index keys, and shard file naming.
//!
//! Mirrors the transform the documentation generator applies when it turns a
//! symbol name into a lookup key: `uart_get_errors` → `uart_5fget_5ferrors`.

/// Escape a symbol name into its lookup-key form.
///
/// - ASCII alphanumerics are lowercased and pass through
/// - non-ASCII characters pass through unchanged
/// - every other character becomes `_` + two lowercase hex digits
pub fn escape_symbol(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else if !c.is_ascii() {
            key.push(c);
        } else {
            key.push('_');
            let code = c as u32;
            key.push(hex_digit(code >> 4));
            key.push(hex_digit(code & 0xf));
        }
    }
    key
}

/// Invert [`escape_symbol`], recovering a readable (lowercased) name.
///
/// Malformed escapes pass through untouched, so any key produces some
/// output. Case information is lost in escaping and cannot be restored.
pub fn unescape_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '_' && i + 2 < chars.len() {
            if let (Some(hi), Some(lo)) = (chars[i + 1].to_digit(16), chars[i + 2].to_digit(16)) {
                if let Some(c) = char::from_u32(hi * 16 + lo) {
                    out.push(c);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Split a serialized key into its escaped-key part and numeric id.
///
/// `uart_5finit_22809` → `("uart_5finit", 22809)`. The id segment is the
/// trailing all-digit underscore segment; the generator always appends one.
pub fn split_record_id(serialized: &str) -> Option<(&str, u64)> {
    let pos = serialized.rfind('_')?;
    let digits = &serialized[pos + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = digits.parse().ok()?;
    Some((&serialized[..pos], id))
}

/// Partition character of a symbol: the first character of its name,
/// lowercased. Determines which shard the record lands in.
pub fn partition_char(name: &str) -> char {
    name.chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .unwrap_or('_')
}

/// File name of a shard partition: stem plus two-digit lowercase hex rank
/// (`functions`, 0x11 → `functions_11.js`).
pub fn shard_file_name(stem: &str, rank: usize) -> String {
    format!("{}_{:02x}.js", stem, rank)
}

fn hex_digit(v: u32) -> char {
    char::from_digit(v, 16).unwrap_or('0')
}
