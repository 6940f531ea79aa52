//! IRC message codec for tokio.
//!
//! Encodes and decodes [`Message`] values on top of [`LineCodec`].
//!
//! A line that does not parse is logged and dropped; the next line is
//! decoded as usual. Only framing and I/O errors end the stream.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::error;
use crate::line::LineCodec;
use crate::message::Message;

/// Tokio codec for encoding/decoding IRC messages.
///
/// Blank lines (a bare `\r\n`, which some servers emit as keepalive) and
/// unparsable lines are skipped.
#[derive(Default)]
pub struct IrcCodec {
    inner: LineCodec,
}

impl IrcCodec {
    /// Create a new codec with the default line ceiling.
    pub fn new() -> Self {
        Self {
            inner: LineCodec::new(),
        }
    }

    /// Create a new codec with custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            inner: LineCodec::with_max_len(max_len),
        }
    }

    /// Sanitize outgoing message data.
    ///
    /// - Truncates at first line ending
    /// - Rejects NUL and other control characters apart from the terminator
    pub fn sanitize(mut data: String) -> error::Result<String> {
        if let Some((pos, len)) = ["\r\n", "\r", "\n"]
            .iter()
            .flat_map(|needle| data.find(needle).map(|pos| (pos, needle.len())))
            .min_by_key(|&(pos, _)| pos)
        {
            data.truncate(pos + len);
        }

        if let Some(ch) = data
            .chars()
            .find(|&ch| ch.is_control() && ch != '\r' && ch != '\n' && !is_format_code(ch))
        {
            return Err(error::ProtocolError::IllegalControlChar(ch));
        }

        Ok(data)
    }
}

/// mIRC formatting codes (bold, color, reset, ...) are legal in text.
fn is_format_code(ch: char) -> bool {
    matches!(
        ch,
        '\x02' | '\x03' | '\x04' | '\x0f' | '\x11' | '\x16' | '\x1d' | '\x1e' | '\x1f'
    )
}

impl Decoder for IrcCodec {
    type Item = Message;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Message>> {
        while let Some(line) = self.inner.decode(src)? {
            let body = line.trim_end_matches(['\r', '\n']);
            if body.is_empty() {
                continue;
            }
            match body.parse::<Message>() {
                Ok(msg) => return Ok(Some(msg)),
                Err(e) if e.is_recoverable() => debug!(error = %e, "skipping unparsable line"),
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

impl Encoder<Message> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        let sanitized = Self::sanitize(msg.to_string())?;
        self.inner.encode(sanitized, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, Response};

    #[test]
    fn test_sanitize_truncates_newline() {
        let result = IrcCodec::sanitize("PRIVMSG #test :hello\r\nworld".to_string());
        assert_eq!(result.unwrap(), "PRIVMSG #test :hello\r\n");
    }

    #[test]
    fn test_sanitize_rejects_nul() {
        let result = IrcCodec::sanitize("WHOIS do\0ug\r\n".to_string());
        assert!(matches!(
            result,
            Err(error::ProtocolError::IllegalControlChar('\0'))
        ));
    }

    #[test]
    fn test_sanitize_allows_formatting() {
        let result = IrcCodec::sanitize("QUIT :\x02bye\x0f\r\n".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from("\r\n\r\n:irc.test 001 checker :Welcome\r\n");

        let msg = codec.decode(&mut buf).unwrap().unwrap();
        assert!(matches!(
            msg.command,
            Command::Response(Response::RPL_WELCOME, _)
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_skips_garbage_lines() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from(
            &b"@@@ ::: !!\r\n:irc.test 372 checker :- Bienvenue \xe0 tous\r\nPING :irc.test\r\n"[..],
        );

        let motd = codec.decode(&mut buf).unwrap().unwrap();
        assert!(matches!(motd.command, Command::Response(Response::RPL_MOTD, _)));

        let ping = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(ping.command, Command::PING("irc.test".into(), None));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_garbage_then_partial_line_waits() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::from("12 nonsense\r\nPING :la");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"ter\r\n");
        let ping = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(ping.command, Command::PING("later".into(), None));
    }

    #[test]
    fn test_oversized_line_is_still_fatal() {
        let mut codec = IrcCodec::with_max_len(16);
        let mut buf = BytesMut::from("PRIVMSG #chan :far too long for the limit\r\n");

        assert!(matches!(
            codec.decode(&mut buf),
            Err(error::ProtocolError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_encode_message() {
        let mut codec = IrcCodec::new();
        let mut buf = BytesMut::new();

        codec.encode(Message::stats("u"), &mut buf).unwrap();
        assert_eq!(&buf[..], b"STATS u\r\n");
    }
}
