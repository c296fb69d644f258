//! Decode Input
//!
//! [`InputSource`] is what callers hand in: raw bytes in some character set,
//! or text that is already decoded. [`DataInput`] is the buffered, position
//! tracking stream a decoder consumes incrementally across invocations.

use crate::core::Charset;
use memchr::memchr;
use std::fmt;
use std::io::{self, Read};

/// Buffer size for reading chunks
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Input handed to the decode driver
pub enum InputSource<'a> {
    /// Raw bytes; `None` means "use the host-declared content encoding"
    Bytes {
        reader: Box<dyn Read + Send + 'a>,
        charset: Option<Charset>,
    },
    /// Already decoded text, supplied as UTF-8
    Text(Box<dyn Read + Send + 'a>),
}

impl<'a> InputSource<'a> {
    /// Byte stream with no declared charset
    pub fn bytes<R: Read + Send + 'a>(reader: R) -> Self {
        InputSource::Bytes {
            reader: Box::new(reader),
            charset: None,
        }
    }

    /// In-memory bytes with no declared charset
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self::bytes(bytes)
    }

    /// Pre-decoded text
    pub fn text(text: &'a str) -> Self {
        InputSource::Text(Box::new(text.as_bytes()))
    }

    /// Pre-decoded text read incrementally (UTF-8)
    pub fn text_reader<R: Read + Send + 'a>(reader: R) -> Self {
        InputSource::Text(Box::new(reader))
    }

    /// Declare the charset of a byte stream; no effect on text input
    pub fn with_charset(self, charset: Charset) -> Self {
        match self {
            InputSource::Bytes { reader, .. } => InputSource::Bytes {
                reader,
                charset: Some(charset),
            },
            text => text,
        }
    }
}

impl fmt::Debug for InputSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Bytes { charset, .. } => f.debug_struct("Bytes").field("charset", charset).finish(),
            InputSource::Text(_) => f.write_str("Text"),
        }
    }
}

/// How the bytes of a [`DataInput`] are to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    /// Raw bytes in the given charset
    Bytes(Charset),
    /// Text already decoded by the caller, re-encoded as UTF-8
    Decoded,
}

/// Buffered input stream shared by successive decode invocations
pub struct DataInput<'a> {
    reader: Box<dyn Read + Send + 'a>,
    buffer: Vec<u8>,
    pos: usize,
    end: usize,
    eof: bool,
    /// Bytes consumed so far
    position: u64,
    encoding: InputEncoding,
}

impl<'a> DataInput<'a> {
    /// Open an input source, falling back to `default_charset` for undeclared byte streams
    pub fn new(source: InputSource<'a>, default_charset: Charset) -> Self {
        let (reader, encoding) = match source {
            InputSource::Bytes { reader, charset } => {
                (reader, InputEncoding::Bytes(charset.unwrap_or(default_charset)))
            }
            InputSource::Text(reader) => (reader, InputEncoding::Decoded),
        };
        Self::with_capacity(reader, encoding, DEFAULT_BUFFER_SIZE)
    }

    fn with_capacity(reader: Box<dyn Read + Send + 'a>, encoding: InputEncoding, capacity: usize) -> Self {
        DataInput {
            reader,
            buffer: vec![0u8; capacity.max(1)],
            pos: 0,
            end: 0,
            eof: false,
            position: 0,
            encoding,
        }
    }

    pub fn encoding(&self) -> InputEncoding {
        self.encoding
    }

    /// Charset the bytes are in; pre-decoded text is UTF-8
    pub fn charset(&self) -> Charset {
        match self.encoding {
            InputEncoding::Bytes(charset) => charset,
            InputEncoding::Decoded => Charset::Utf8,
        }
    }

    /// Whether the caller supplied already decoded text
    pub fn is_decoded(&self) -> bool {
        self.encoding == InputEncoding::Decoded
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Fill the buffer from the reader
    pub fn fill_buffer(&mut self) -> io::Result<bool> {
        if self.eof {
            return Ok(false);
        }

        // Compact: move remaining data to start
        if self.pos > 0 {
            let remaining = self.end - self.pos;
            if remaining > 0 {
                self.buffer.copy_within(self.pos..self.end, 0);
            }
            self.end = remaining;
            self.pos = 0;
        }

        if self.end == self.buffer.len() {
            self.buffer.resize(self.buffer.len() * 2, 0);
        }

        let read = loop {
            match self.reader.read(&mut self.buffer[self.end..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if read == 0 {
            self.eof = true;
            Ok(false)
        } else {
            self.end += read;
            Ok(true)
        }
    }

    /// Get current buffered data as a slice
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[self.pos..self.end]
    }

    /// Consume n bytes from the buffer
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.end - self.pos);
        self.pos += n;
        self.position += n as u64;
    }

    /// Whether any unconsumed input remains, reading ahead if needed
    pub fn has_data(&mut self) -> io::Result<bool> {
        while self.pos == self.end {
            if !self.fill_buffer()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the input is exhausted
    pub fn is_eof(&self) -> bool {
        self.eof && self.pos >= self.end
    }

    /// Move bytes into `out` up to and including `delimiter`
    ///
    /// Matches are only recognised at offsets that are a multiple of `align`
    /// from where `out` started, so multi-byte code units are not split.
    /// The delimiter is consumed but not copied. Returns `false` when input
    /// ran out before a delimiter was found (everything read stays in `out`).
    pub fn read_until(&mut self, delimiter: &[u8], align: usize, out: &mut Vec<u8>) -> io::Result<bool> {
        let start = out.len();
        let align = align.max(1);

        loop {
            if !self.has_data()? {
                return Ok(false);
            }

            if delimiter.len() == 1 && align == 1 {
                let available = self.buffered();
                match memchr(delimiter[0], available) {
                    Some(i) => {
                        out.extend_from_slice(&available[..i]);
                        self.consume(i + 1);
                        return Ok(true);
                    }
                    None => {
                        let n = available.len();
                        out.extend_from_slice(available);
                        self.consume(n);
                    }
                }
                continue;
            }

            let mut taken = 0;
            let mut found = false;
            for &b in &self.buffer[self.pos..self.end] {
                out.push(b);
                taken += 1;
                let len = out.len() - start;
                if len >= delimiter.len() && len % align == 0 && out.ends_with(delimiter) {
                    found = true;
                    break;
                }
            }
            self.consume(taken);

            if found {
                out.truncate(out.len() - delimiter.len());
                return Ok(true);
            }
        }
    }

    /// Read all remaining content into a Vec
    pub fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut result = Vec::new();

        // First, copy buffered data
        result.extend_from_slice(self.buffered());
        let buffered = self.end - self.pos;
        self.consume(buffered);

        // Then read the rest
        let rest = self.reader.read_to_end(&mut result)?;
        self.position += rest as u64;
        self.eof = true;

        Ok(result)
    }
}

impl fmt::Debug for DataInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataInput")
            .field("encoding", &self.encoding)
            .field("position", &self.position)
            .field("eof", &self.is_eof())
            .finish()
    }
}
