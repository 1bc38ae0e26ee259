//! Byte-to-text decoding and text-to-byte encoding for files and stdin.
//!
//! Stdout is always written in the native representation; these conversions
//! apply only to file reads, stdin reads, and `--outFile` writes.

use std::borrow::Cow;

use clap::ValueEnum;
use encoding_rs::{UTF_8, UTF_16LE, WINDOWS_1252};

/// Supported character encodings. Aliases mirror the names accepted by the
/// traditional tool (`utf-8`, `ucs2`, `binary`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Encoding {
    /// 7-bit ASCII, decoded as Latin-1
    Ascii,
    #[default]
    #[value(alias = "utf-8")]
    Utf8,
    #[value(alias = "ucs2", alias = "ucs-2")]
    Utf16le,
    #[value(alias = "binary")]
    Latin1,
}

impl Encoding {
    /// Decode raw bytes into text. Malformed sequences become U+FFFD rather
    /// than failing, matching lenient terminal-tool behavior.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => {
                let (text, _, _) = UTF_8.decode(bytes);
                text.into_owned()
            }
            Encoding::Utf16le => {
                let (text, _, _) = UTF_16LE.decode(bytes);
                text.into_owned()
            }
            Encoding::Ascii | Encoding::Latin1 => {
                let (text, _, _) = WINDOWS_1252.decode(bytes);
                text.into_owned()
            }
        }
    }

    /// Encode text for an output file opened with this encoding.
    pub fn encode<'a>(self, text: &'a str) -> Cow<'a, [u8]> {
        match self {
            Encoding::Utf8 => Cow::Borrowed(text.as_bytes()),
            Encoding::Utf16le => {
                let mut bytes = Vec::with_capacity(text.len() * 2);
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                Cow::Owned(bytes)
            }
            Encoding::Ascii | Encoding::Latin1 => {
                let (bytes, _, _) = WINDOWS_1252.encode(text);
                Cow::Owned(bytes.into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_round_trip() {
        let text = "foo bar …";
        let bytes = Encoding::Utf8.encode(text);
        assert_eq!(Encoding::Utf8.decode(&bytes), text);
    }

    #[test]
    fn test_utf16le_decode() {
        // "foo" as little-endian UTF-16 code units
        let bytes = [b'f', 0, b'o', 0, b'o', 0];
        assert_eq!(Encoding::Utf16le.decode(&bytes), "foo");
    }

    #[test]
    fn test_utf16le_encode() {
        let bytes = Encoding::Utf16le.encode("fo");
        assert_eq!(&*bytes, &[b'f', 0, b'o', 0]);
    }

    #[test]
    fn test_latin1_decode() {
        // 0xE9 is é in Latin-1
        assert_eq!(Encoding::Latin1.decode(&[0xE9]), "é");
    }

    #[test]
    fn test_utf8_decode_is_lossy() {
        let decoded = Encoding::Utf8.decode(&[0xFF, b'a']);
        assert!(decoded.contains('\u{FFFD}'));
        assert!(decoded.ends_with('a'));
    }
}
