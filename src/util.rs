//! Small byte/text helpers shared across the crate.

/// Remove a final '\r' from a byte slice
#[inline]
pub(crate) fn trim_cr(line: &[u8]) -> &[u8] {
    if let Some((&b'\r', remaining)) = line.split_last() {
        remaining
    } else {
        line
    }
}

/// Decode a byte slice as Latin-1: one `char` per byte, so the resulting
/// string is 8-bit clean and decoding never fails.
#[inline]
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    if bytes.is_ascii() {
        // ASCII is valid UTF-8, lossy conversion copies it unchanged
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Latin-1 byte length of a string, or `None` if any char is above U+00FF.
#[inline]
pub(crate) fn latin1_len(s: &str) -> Option<usize> {
    if s.is_ascii() {
        return Some(s.len());
    }
    let mut len = 0;
    for ch in s.chars() {
        if ch as u32 > 0xFF {
            return None;
        }
        len += 1;
    }
    Some(len)
}

/// Append a string to `out` as Latin-1 bytes. The caller must have checked
/// the string with `latin1_len` first; chars above U+00FF are truncated.
#[inline]
pub(crate) fn push_latin1(out: &mut Vec<u8>, s: &str) {
    if s.is_ascii() {
        out.extend_from_slice(s.as_bytes());
    } else {
        out.extend(s.chars().map(|c| c as u8));
    }
}

/// Encode a string as Latin-1, or `None` if any char is above U+00FF.
#[inline]
pub(crate) fn encode_latin1(s: &str) -> Option<Vec<u8>> {
    let len = latin1_len(s)?;
    let mut out = Vec::with_capacity(len);
    push_latin1(&mut out, s);
    Some(out)
}

/// Limit a string to `max_chars` characters, appending "..." if it was cut.
/// Used to keep offending input out of error messages at full length.
pub(crate) fn shorten(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_cr() {
        assert_eq!(trim_cr(b"abc\r"), b"abc");
        assert_eq!(trim_cr(b"abc"), b"abc");
        assert_eq!(trim_cr(b"\r"), b"");
        assert_eq!(trim_cr(b""), b"");
        // only one \r is removed
        assert_eq!(trim_cr(b"abc\r\r"), b"abc\r");
    }

    #[test]
    fn latin1_roundtrip() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let decoded = decode_latin1(&bytes);
        assert_eq!(decoded.chars().count(), 256);
        assert_eq!(latin1_len(&decoded), Some(256));
        assert_eq!(encode_latin1(&decoded), Some(bytes));
    }

    #[test]
    fn latin1_rejects_wide_chars() {
        assert_eq!(latin1_len("r€ad"), None);
        assert_eq!(encode_latin1("r€ad"), None);
        assert_eq!(latin1_len("réad"), Some(4));
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("abcdef", 6), "abcdef");
        assert_eq!(shorten("abcdefg", 6), "abc...");
        assert_eq!(shorten("", 10), "");
    }
}
