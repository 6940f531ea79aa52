use std::sync::OnceLock;

use regex::Regex;

use crate::error::CheckFailure;

/// ASCII digits only.
const UPTIME_PATTERN: &str = r"Server up ([0-9]+) days, ([0-9]{2}):([0-9]{2}):([0-9]{2})";

static UPTIME_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn uptime_regex() -> Option<&'static Regex> {
    UPTIME_RE
        .get_or_init(|| Regex::new(UPTIME_PATTERN).ok())
        .as_ref()
}

/// Parse a `242 RPL_STATSUPTIME` text into seconds of uptime.
///
/// The pattern may appear anywhere in the text. A day count too large for
/// a `u32` is reported as a number conversion failure.
pub fn parse_uptime(text: &str) -> Result<u64, CheckFailure> {
    let caps = uptime_regex()
        .and_then(|re| re.captures(text))
        .ok_or(CheckFailure::StatsUnparsable)?;

    let days = u64::from(caps[1].parse::<u32>()?);
    let hours: u64 = caps[2].parse()?;
    let minutes: u64 = caps[3].parse()?;
    let seconds: u64 = caps[4].parse()?;

    Ok(((days * 24 + hours) * 60 + minutes) * 60 + seconds)
}
