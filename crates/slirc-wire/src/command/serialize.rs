use std::fmt;

use super::Command;

/// Check if a string needs colon-prefixing as a trailing IRC argument.
fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Write a command, colon-prefixing the last argument only when required.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((trailing, middle)) = args.split_last() {
        for param in middle {
            write!(f, " {}", param)?;
        }
        f.write_str(" ")?;
        if needs_colon_prefix(trailing) {
            f.write_str(":")?;
        }
        f.write_str(trailing)?;
    }
    Ok(())
}

/// Write a command with a freeform (always colon-prefixed) trailing argument.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((trailing, middle)) = args.split_last() {
        for param in middle {
            write!(f, " {}", param)?;
        }
        write!(f, " :{}", trailing)?;
    }
    Ok(())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::USER(u, m, r) => write_cmd_freeform(f, "USER", &[u, m, "*", r]),
            Command::QUIT(Some(m)) => write_cmd_freeform(f, "QUIT", &[m]),
            Command::QUIT(None) => write_cmd(f, "QUIT", &[]),
            Command::WHOIS(Some(t), m) => write_cmd(f, "WHOIS", &[t, m]),
            Command::WHOIS(None, m) => write_cmd(f, "WHOIS", &[m]),
            Command::STATS(Some(q), Some(t)) => write_cmd(f, "STATS", &[q, t]),
            Command::STATS(Some(q), None) => write_cmd(f, "STATS", &[q]),
            Command::STATS(None, _) => write_cmd(f, "STATS", &[]),
            Command::PING(s, Some(t)) => write_cmd(f, "PING", &[s, t]),
            Command::PING(s, None) => write_cmd(f, "PING", &[s]),
            Command::PONG(s, Some(t)) => write_cmd(f, "PONG", &[s, t]),
            Command::PONG(s, None) => write_cmd(f, "PONG", &[s]),
            Command::ERROR(m) => write_cmd_freeform(f, "ERROR", &[m]),
            Command::Response(resp, args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd(f, &resp.to_string(), &args)
            }
            Command::Raw(cmd, args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd(f, cmd, &args)
            }
        }
    }
}
