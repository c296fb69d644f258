//! Character Set Handling
//!
//! Resolves charset labels, detects byte order marks and decodes raw input
//! bytes into text for decoders that read textual formats.

use crate::error::EncodingError;
use std::fmt;
use std::str::FromStr;

/// Character sets understood by the byte-stream input path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    #[default]
    Utf8,
    /// UTF-16 with byte order taken from the BOM (big-endian without one)
    Utf16,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1
    Latin1,
    UsAscii,
}

impl Charset {
    /// Canonical label, as reported in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Latin1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
        }
    }

    /// Resolve a charset label, ignoring case, `-` and `_`
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Ok(Charset::Utf8),
            "utf16" => Ok(Charset::Utf16),
            "utf16le" => Ok(Charset::Utf16Le),
            "utf16be" => Ok(Charset::Utf16Be),
            "iso88591" | "latin1" | "l1" => Ok(Charset::Latin1),
            "usascii" | "ascii" => Ok(Charset::UsAscii),
            _ => Err(EncodingError::Unsupported(label.to_string())),
        }
    }

    /// Detect a charset from a byte order mark, if one is present
    pub fn detect_bom(input: &[u8]) -> Option<Self> {
        match input {
            [0xEF, 0xBB, 0xBF, ..] => Some(Charset::Utf8),
            [0xFF, 0xFE, ..] => Some(Charset::Utf16Le),
            [0xFE, 0xFF, ..] => Some(Charset::Utf16Be),
            _ => None,
        }
    }

    /// Number of bytes per code unit (used by decoders to keep reads aligned)
    pub fn unit_width(self) -> usize {
        match self {
            Charset::Utf16 | Charset::Utf16Le | Charset::Utf16Be => 2,
            _ => 1,
        }
    }

    /// Decode bytes in this charset into a string
    ///
    /// A leading BOM matching the charset is skipped.
    pub fn decode(self, input: &[u8]) -> Result<String, EncodingError> {
        match self {
            Charset::Utf8 => {
                let bytes = input.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(input);
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|e| self.malformed(e.to_string()))
            }
            Charset::Utf16 => match Charset::detect_bom(input) {
                Some(Charset::Utf16Le) => Charset::Utf16Le.decode(input),
                _ => Charset::Utf16Be.decode(input),
            },
            Charset::Utf16Le => {
                let bytes = input.strip_prefix(&[0xFF, 0xFE]).unwrap_or(input);
                self.decode_utf16(bytes, u16::from_le_bytes)
            }
            Charset::Utf16Be => {
                let bytes = input.strip_prefix(&[0xFE, 0xFF]).unwrap_or(input);
                self.decode_utf16(bytes, u16::from_be_bytes)
            }
            // Every Latin-1 byte maps to the code point of the same value
            Charset::Latin1 => Ok(input.iter().map(|&b| b as char).collect()),
            Charset::UsAscii => match input.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(self.malformed(format!("non-ASCII byte at offset {}", pos))),
                None => Ok(input.iter().map(|&b| b as char).collect()),
            },
        }
    }

    /// Encode a string in this charset (UTF-16 without BOM)
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Utf16 | Charset::Utf16Be => {
                Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            }
            Charset::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Charset::Latin1 | Charset::UsAscii => {
                let limit = if self == Charset::Latin1 { 0xFF } else { 0x7F };
                text.chars()
                    .map(|c| {
                        u8::try_from(u32::from(c))
                            .ok()
                            .filter(|b| u32::from(*b) <= limit)
                            .ok_or_else(|| self.malformed(format!("'{}' is not representable", c)))
                    })
                    .collect()
            }
        }
    }

    fn decode_utf16(self, bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, EncodingError> {
        if bytes.len() % 2 != 0 {
            return Err(self.malformed("odd number of bytes".to_string()));
        }

        let code_units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|chunk| to_unit([chunk[0], chunk[1]]))
            .collect();

        String::from_utf16(&code_units).map_err(|e| self.malformed(e.to_string()))
    }

    fn malformed(self, reason: String) -> EncodingError {
        EncodingError::Malformed {
            charset: self.label(),
            reason,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Charset {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Charset::from_label(s)
    }
}
