use crate::command::Command;
use crate::error::MessageParseError;
use crate::prefix::Prefix;

/// An owned IRC message.
///
/// # Example
///
/// ```
/// use slirc_wire::Message;
///
/// let msg: Message = ":irc.example.com 401 checker ghost :No such nick".parse().unwrap();
/// assert_eq!(msg.param(1), Some("ghost"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Message prefix/source (e.g., `nick!user@host`).
    pub prefix: Option<Prefix>,
    /// The IRC command and its parameters.
    pub command: Command,
}

impl Message {
    /// Create a new message from raw components.
    pub fn new(
        prefix: Option<&str>,
        command: &str,
        args: Vec<&str>,
    ) -> Result<Message, MessageParseError> {
        let prefix = prefix.map(Prefix::try_from_str).transpose()?;

        Ok(Message {
            prefix,
            command: Command::new(command, args)?,
        })
    }

    /// Get a numeric reply parameter by position.
    ///
    /// Returns `None` for non-numeric messages.
    pub fn param(&self, index: usize) -> Option<&str> {
        match &self.command {
            Command::Response(_, args) | Command::Raw(_, args) => {
                args.get(index).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Create a NICK message to change nickname
    #[must_use]
    pub fn nick<N>(nickname: N) -> Self
    where
        N: Into<String>,
    {
        Command::NICK(nickname.into()).into()
    }

    /// Create a USER message for registration
    #[must_use]
    pub fn user<U, R>(username: U, realname: R) -> Self
    where
        U: Into<String>,
        R: Into<String>,
    {
        Command::USER(username.into(), "0".into(), realname.into()).into()
    }

    /// Create a WHOIS query for a nickname
    #[must_use]
    pub fn whois<N>(nickname: N) -> Self
    where
        N: Into<String>,
    {
        Command::WHOIS(None, nickname.into()).into()
    }

    /// Create a STATS query (e.g. `u` for uptime)
    #[must_use]
    pub fn stats<Q>(query: Q) -> Self
    where
        Q: Into<String>,
    {
        Command::STATS(Some(query.into()), None).into()
    }

    /// Create a PONG message answering a PING token
    #[must_use]
    pub fn pong<S>(token: S) -> Self
    where
        S: Into<String>,
    {
        Command::PONG(token.into(), None).into()
    }

    /// Create a QUIT message
    #[must_use]
    pub fn quit() -> Self {
        Command::QUIT(None).into()
    }

    /// Set the prefix/source of this message
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

impl From<Command> for Message {
    fn from(cmd: Command) -> Message {
        Message {
            prefix: None,
            command: cmd,
        }
    }
}
