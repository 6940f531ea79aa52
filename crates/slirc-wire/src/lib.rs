//! # slirc-wire
//!
//! The client side of the IRC wire format: just enough of RFC 2812 to
//! register with a server, issue queries, and read numeric replies.
//!
//! ## Features
//!
//! - Nom-based line parser tolerant of IRCv3 tags and multiple spaces
//! - Typed [`Command`] and numeric [`Response`] model
//! - Tokio [`IrcCodec`] and a framed [`Transport`] over any byte stream
//!
//! ## Parsing
//!
//! ```rust
//! use slirc_wire::{Command, Message, Response};
//!
//! let msg: Message = ":irc.example.com 001 checker :Welcome".parse().unwrap();
//! assert!(matches!(msg.command, Command::Response(Response::RPL_WELCOME, _)));
//! ```
//!
//! ## Building
//!
//! ```rust
//! use slirc_wire::Message;
//!
//! assert_eq!(Message::whois("doug").to_string(), "WHOIS doug\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod irc;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod prefix;
pub mod response;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::command::Command;
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::irc::IrcCodec;
pub use self::message::Message;
pub use self::prefix::Prefix;
pub use self::response::Response;
#[cfg(feature = "tokio")]
pub use self::transport::{Transport, MAX_IRC_LINE_LEN};
