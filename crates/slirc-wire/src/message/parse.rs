//! `FromStr` for [`Message`]: split the line, then type the command.

use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};

use super::nom_parser::split_line;
use super::types::Message;

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        if s.trim_end_matches(['\r', '\n']).is_empty() {
            return Err(ProtocolError::InvalidMessage {
                string: s.to_owned(),
                cause: MessageParseError::EmptyMessage,
            });
        }

        split_line(s)
            .and_then(|line| Message::new(line.source, line.command, line.params.to_vec()))
            .map_err(|cause| ProtocolError::InvalidMessage {
                string: s.to_owned(),
                cause,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::{Prefix, Response};

    #[test]
    fn test_parse_simple_ping() {
        let msg: Message = "PING :server\r\n".parse().unwrap();
        assert_eq!(msg.command, Command::PING("server".into(), None));
    }

    #[test]
    fn test_parse_numeric_response() {
        let msg: Message = ":server.example 001 nick :Welcome to IRC\r\n".parse().unwrap();
        assert!(matches!(
            msg.command,
            Command::Response(Response::RPL_WELCOME, _)
        ));
        assert_eq!(
            msg.prefix,
            Some(Prefix::ServerName("server.example".into()))
        );
    }

    #[test]
    fn test_parse_error_command() {
        let msg: Message = "ERROR :Closing Link: 127.0.0.1 (Ping timeout)\r\n"
            .parse()
            .unwrap();
        assert_eq!(
            msg.command,
            Command::ERROR("Closing Link: 127.0.0.1 (Ping timeout)".into())
        );
    }

    #[test]
    fn test_parse_tagged_line_drops_tags() {
        let msg: Message = "@time=2023-01-01T00:00:00Z :srv.example PONG srv.example :tok\r\n"
            .parse()
            .unwrap();
        assert_eq!(
            msg.command,
            Command::PONG("srv.example".into(), Some("tok".into()))
        );
    }

    #[test]
    fn test_parse_empty_message() {
        let result: Result<Message, _> = "".parse();
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidMessage {
                cause: MessageParseError::EmptyMessage,
                ..
            })
        ));
        assert!("\r\n".parse::<Message>().is_err());
    }

    #[test]
    fn test_parse_garbage_reports_position() {
        let result: Result<Message, _> = ":lonely.prefix".parse();
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidMessage {
                cause: MessageParseError::ParseContext { .. },
                ..
            })
        ));
    }
}
