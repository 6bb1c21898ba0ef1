//! Semantic versions and the release bump state machine
//!
//! Stable versions advance with `major`/`minor`/`patch`. Entering a
//! prerelease channel from a stable version always bumps the patch component
//! first (`1.0.0` + `alpha` → `1.0.1-alpha.1`). Channels only advance forward:
//! alpha → beta → rc → release.

use crate::domain::prerelease::{parse_numeric, Channel, PreRelease};
use crate::error::{RelmError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version with an optional prerelease marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<PreRelease>,
}

impl Version {
    /// Create a new stable version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Same numeric triple with a prerelease marker attached
    pub fn with_pre(self, pre: PreRelease) -> Self {
        Version {
            pre: Some(pre),
            ..self
        }
    }

    /// Same numeric triple with the prerelease marker dropped
    pub fn base(&self) -> Self {
        Version::new(self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// Parse `N.N.N` or `N.N.N-channel.N`
    ///
    /// A two-component core (`N.N`) is accepted and read as `N.N.0`.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (core, pre) = match trimmed.split_once('-') {
            Some((core, pre)) => (core, Some(PreRelease::parse(pre)?)),
            None => (trimmed, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(RelmError::parse(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                s
            )));
        }

        let component = |label: &str, raw: &str| {
            parse_numeric(raw).ok_or_else(|| {
                RelmError::parse(format!("Invalid {} version: '{}' in '{}'", label, raw, s))
            })
        };

        let major = component("major", parts[0])?;
        let minor = component("minor", parts[1])?;
        let patch = match parts.get(2) {
            Some(raw) => component("patch", raw)?,
            None => 0,
        };

        Ok(Version {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Apply a bump according to the release transition table
    ///
    /// A component already at `u64::MAX` cannot advance and yields an
    /// [RelmError::InvalidTransition].
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let base = self.base();
        let step = |n: u64| n.checked_add(1).ok_or_else(|| self.invalid(kind));

        let next = match (kind, self.pre) {
            (BumpKind::Major, _) => Version::new(step(base.major)?, 0, 0),
            (BumpKind::Minor, _) => Version::new(base.major, step(base.minor)?, 0),
            (BumpKind::Patch, _) => Version::new(base.major, base.minor, step(base.patch)?),

            // Entering a channel from stable bumps the patch before seeding `.1`
            (BumpKind::Alpha | BumpKind::Beta | BumpKind::Rc, None) => {
                let channel = kind.channel().ok_or_else(|| self.invalid(kind))?;
                Version::new(base.major, base.minor, step(base.patch)?)
                    .with_pre(PreRelease::first(channel))
            }
            (BumpKind::Release, None) => Version::new(base.major, base.minor, step(base.patch)?),

            (BumpKind::Alpha | BumpKind::Beta | BumpKind::Rc, Some(current)) => {
                let channel = kind.channel().ok_or_else(|| self.invalid(kind))?;
                match channel.cmp(&current.channel) {
                    Ordering::Equal => {
                        let pre = current.increment().ok_or_else(|| self.invalid(kind))?;
                        base.with_pre(pre)
                    }
                    Ordering::Greater => base.with_pre(PreRelease::first(channel)),
                    Ordering::Less => return Err(self.invalid(kind)),
                }
            }
            (BumpKind::Release, Some(_)) => base,
        };

        Ok(next)
    }

    fn invalid(&self, kind: BumpKind) -> RelmError {
        RelmError::transition(self.to_string(), kind.as_str())
    }

    /// Equivalent `semver::Version`, used for precedence comparisons
    pub fn to_semver(&self) -> semver::Version {
        let pre = match self.pre {
            Some(pre) => semver::Prerelease::new(&pre.to_string()).unwrap_or_default(),
            None => semver::Prerelease::EMPTY,
        };

        semver::Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre,
            build: semver::BuildMetadata::EMPTY,
        }
    }
}

impl FromStr for Version {
    type Err = RelmError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Semver precedence: numeric triple, then stable above any prerelease,
// then channel rank and numeric sequence.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_semver().cmp(&other.to_semver())
    }
}

/// Requested release transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    Alpha,
    Beta,
    Rc,
    Release,
}

impl BumpKind {
    pub const ALL: [BumpKind; 7] = [
        BumpKind::Major,
        BumpKind::Minor,
        BumpKind::Patch,
        BumpKind::Alpha,
        BumpKind::Beta,
        BumpKind::Rc,
        BumpKind::Release,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Alpha => "alpha",
            BumpKind::Beta => "beta",
            BumpKind::Rc => "rc",
            BumpKind::Release => "release",
        }
    }

    /// Prerelease channel this kind targets, if any
    pub fn channel(&self) -> Option<Channel> {
        match self {
            BumpKind::Alpha => Some(Channel::Alpha),
            BumpKind::Beta => Some(Channel::Beta),
            BumpKind::Rc => Some(Channel::Rc),
            _ => None,
        }
    }
}

impl FromStr for BumpKind {
    type Err = RelmError;

    fn from_str(s: &str) -> Result<Self> {
        BumpKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                RelmError::parse(format!(
                    "Unknown bump kind: '{}' (expected one of major, minor, patch, alpha, beta, rc, release)",
                    s
                ))
            })
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bump a version string, returning the next version string
pub fn bump_version_string(current: &str, kind: BumpKind) -> Result<String> {
    Ok(Version::parse(current)?.bump(kind)?.to_string())
}
