//! Prerelease markers for the alpha → beta → rc channel progression
//!
//! A marker is always `<channel>.<sequence>` with a sequence of at least 1,
//! e.g. `alpha.1`, `beta.3`, `rc.2`. Channels are fixed policy; custom
//! identifiers are rejected.

use crate::error::{RelmError, Result};
use std::fmt;
use std::str::FromStr;

/// Parse a run of ASCII digits
///
/// Unlike `u64::from_str` this rejects a leading `+`.
pub(crate) fn parse_numeric(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Prerelease channel, ordered by maturity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Alpha,
    Beta,
    Rc,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Alpha => "alpha",
            Channel::Beta => "beta",
            Channel::Rc => "rc",
        }
    }
}

impl FromStr for Channel {
    type Err = RelmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "alpha" => Ok(Channel::Alpha),
            "beta" => Ok(Channel::Beta),
            "rc" => Ok(Channel::Rc),
            other => Err(RelmError::parse(format!(
                "Unknown prerelease channel: '{}' (expected alpha, beta or rc)",
                other
            ))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prerelease marker attached to a version
///
/// Ordering follows channel rank first, then sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    pub channel: Channel,
    pub sequence: u64,
}

impl PreRelease {
    /// Create a new marker
    pub fn new(channel: Channel, sequence: u64) -> Self {
        PreRelease { channel, sequence }
    }

    /// First marker on a channel (`<channel>.1`)
    pub fn first(channel: Channel) -> Self {
        PreRelease::new(channel, 1)
    }

    /// Parse a marker such as `beta.2`
    pub fn parse(s: &str) -> Result<Self> {
        let (channel, sequence) = s.split_once('.').ok_or_else(|| {
            RelmError::parse(format!(
                "Invalid prerelease marker: '{}' - expected <channel>.<n>",
                s
            ))
        })?;

        let channel: Channel = channel.parse()?;
        let sequence = parse_numeric(sequence).ok_or_else(|| {
            RelmError::parse(format!("Invalid prerelease sequence: '{}'", sequence))
        })?;

        if sequence == 0 {
            return Err(RelmError::parse(format!(
                "Prerelease sequence must start at 1: '{}'",
                s
            )));
        }

        Ok(PreRelease { channel, sequence })
    }

    /// Next marker on the same channel, `None` once the sequence is exhausted
    pub fn increment(&self) -> Option<Self> {
        let sequence = self.sequence.checked_add(1)?;
        Some(PreRelease {
            channel: self.channel,
            sequence,
        })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.channel, self.sequence)
    }
}
