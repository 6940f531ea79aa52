//! Line-based codec for tokio.
//!
//! Reads and writes newline-terminated lines with a length ceiling. Bytes
//! that are not UTF-8 (Latin-1 MOTDs are common) are replaced with U+FFFD
//! rather than failing the stream.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use tracing::debug;

use crate::error;

/// Line-based codec that handles newline-terminated messages.
///
/// The default ceiling is [`crate::MAX_IRC_LINE_LEN`], which leaves room for
/// IRCv3 tags on top of the classic 512-byte body.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
}

impl LineCodec {
    /// Create a new codec with the default line ceiling.
    pub fn new() -> Self {
        Self::with_max_len(crate::MAX_IRC_LINE_LEN)
    }

    /// Create a new codec with custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        // Look for newline starting from where we left off
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(error::ProtocolError::MessageTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            let data = match std::str::from_utf8(&line) {
                Ok(text) => text.to_owned(),
                Err(e) => {
                    debug!(valid_up_to = e.valid_up_to(), "replacing non-UTF-8 bytes in line");
                    String::from_utf8_lossy(&line).into_owned()
                }
            };

            Ok(Some(data))
        } else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();

            if src.len() > self.max_len {
                return Err(error::ProtocolError::MessageTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }

            Ok(None)
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend(msg.into_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("PING :test\r\n".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line_then_rest() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"later\r\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some("PING :later\r\n".to_string())
        );
    }

    #[test]
    fn test_decode_too_long() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\n");

        let result = codec.decode(&mut buf);
        assert!(matches!(
            result,
            Err(error::ProtocolError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_decode_latin1_is_lossy() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b":irc.test 372 checker :- Bienvenue \xe0 tous\r\nPING :x\r\n"[..]);

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(":irc.test 372 checker :- Bienvenue \u{FFFD} tous\r\n".to_string())
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :x\r\n".to_string()));
    }

    #[test]
    fn test_encode() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode("PONG :test\r\n".to_string(), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"PONG :test\r\n");
    }
}
