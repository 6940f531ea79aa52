//! IRC command parsing implementation.

use super::Command;
use crate::error::MessageParseError;

fn raw(cmd: &str, args: Vec<&str>) -> Command {
    Command::Raw(
        cmd.to_owned(),
        args.into_iter().map(|s| s.to_owned()).collect(),
    )
}

impl Command {
    /// Parse a command from its name and arguments.
    ///
    /// Known commands with an unexpected argument count degrade to
    /// [`Command::Raw`] instead of failing, so a quirky server line never
    /// aborts a session.
    #[must_use = "command parsing result should be handled"]
    pub fn new(cmd: &str, args: Vec<&str>) -> Result<Command, MessageParseError> {
        if cmd.is_empty() {
            return Err(MessageParseError::InvalidCommand);
        }

        let cmd_upper = cmd.to_ascii_uppercase();
        let result = match (cmd_upper.as_str(), args.len()) {
            ("NICK", 1) => Command::NICK(args[0].to_owned()),
            ("USER", 4) => {
                Command::USER(args[0].to_owned(), args[1].to_owned(), args[3].to_owned())
            }
            ("QUIT", 0) => Command::QUIT(None),
            ("QUIT", 1) => Command::QUIT(Some(args[0].to_owned())),
            ("WHOIS", 1) => Command::WHOIS(None, args[0].to_owned()),
            ("WHOIS", 2) => Command::WHOIS(Some(args[0].to_owned()), args[1].to_owned()),
            ("STATS", 0) => Command::STATS(None, None),
            ("STATS", 1) => Command::STATS(Some(args[0].to_owned()), None),
            ("STATS", 2) => Command::STATS(Some(args[0].to_owned()), Some(args[1].to_owned())),
            ("PING", 1) => Command::PING(args[0].to_owned(), None),
            ("PING", 2) => Command::PING(args[0].to_owned(), Some(args[1].to_owned())),
            ("PONG", 1) => Command::PONG(args[0].to_owned(), None),
            ("PONG", 2) => Command::PONG(args[0].to_owned(), Some(args[1].to_owned())),
            ("ERROR", 1) => Command::ERROR(args[0].to_owned()),
            _ => match cmd.parse() {
                Ok(resp) => Command::Response(
                    resp,
                    args.into_iter().map(|s| s.to_owned()).collect(),
                ),
                Err(_) => raw(cmd, args),
            },
        };

        Ok(result)
    }
}
