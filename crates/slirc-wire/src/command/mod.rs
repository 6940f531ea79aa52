//! IRC command types.
//!
//! Type-safe representations of the commands a probing client sends or
//! has to recognise from the server. Unknown commands are captured in the
//! `Raw` variant and numerics in `Response`.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol

mod parse;
mod serialize;

use crate::response::Response;

/// IRC command with its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    // === Connection Registration (RFC 2812 Section 3.1) ===
    /// `NICK nickname`
    NICK(String),
    /// `USER username mode realname`
    USER(String, String, String),
    /// `QUIT [message]`
    QUIT(Option<String>),

    // === User Queries (RFC 2812 Section 3.6) ===
    /// `WHOIS [target] masks`
    WHOIS(Option<String>, String),

    // === Server Queries (RFC 2812 Section 3.4) ===
    /// `STATS [query [target]]`
    STATS(Option<String>, Option<String>),

    // === Miscellaneous (RFC 2812 Section 3.7) ===
    /// `PING server1 [server2]`
    PING(String, Option<String>),
    /// `PONG server1 [server2]`
    PONG(String, Option<String>),
    /// `ERROR message`
    ERROR(String),

    /// Numeric reply with its parameters.
    Response(Response, Vec<String>),
    /// Any command not modelled above, including unknown numerics.
    Raw(String, Vec<String>),
}

impl Command {
    /// The numeric reply code and parameters, if this is a known numeric.
    pub fn as_response(&self) -> Option<(Response, &[String])> {
        match self {
            Command::Response(resp, args) => Some((*resp, args.as_slice())),
            _ => None,
        }
    }
}
