//! Byte decoding for uploaded files.

/// Text encoding a payload was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode bytes as UTF-8, falling back to Latin-1 when they are not valid UTF-8.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback never fails.
pub fn decode(bytes: &[u8]) -> (String, Encoding) {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => (text.to_string(), Encoding::Utf8),
        Err(_) => (body.iter().map(|&b| b as char).collect(), Encoding::Latin1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let (text, enc) = decode("Gender\nFemme\u{e9}\n".as_bytes());
        assert_eq!(enc, Encoding::Utf8);
        assert!(text.contains('\u{e9}'));
    }

    #[test]
    fn test_bom_stripped() {
        let (text, enc) = decode(b"\xEF\xBB\xBFAge\n30\n");
        assert_eq!(enc, Encoding::Utf8);
        assert!(text.starts_with("Age"));
    }

    #[test]
    fn test_latin1_fallback() {
        // 0xE9 alone is not valid UTF-8.
        let (text, enc) = decode(b"Country\nM\xE9xico\n");
        assert_eq!(enc, Encoding::Latin1);
        assert!(text.contains("M\u{e9}xico"));
    }
}
