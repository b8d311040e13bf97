//! OSGi versions: `major[.minor[.micro[.qualifier]]]`.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    InvalidVersion { text: String, reason: String },
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionError::InvalidVersion { text, reason } => {
                write!(f, "invalid version '{text}': {reason}")
            }
        }
    }
}

impl std::error::Error for VersionError {}

/// A package or bundle version. Ordered by major, minor, micro, then
/// qualifier text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub qualifier: String,
}

impl Version {
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: String::new(),
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parses a version. Empty or all-whitespace text is `0.0.0`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Version::default());
        }
        let invalid = |reason: String| VersionError::InvalidVersion {
            text: text.to_string(),
            reason,
        };
        let mut parts = trimmed.splitn(4, '.');
        let mut number = |name: &str| -> Result<u32, VersionError> {
            match parts.next() {
                None => Ok(0),
                Some(part) => part
                    .parse::<u32>()
                    .map_err(|err| invalid(format!("{name} component '{part}': {err}"))),
            }
        };
        let major = number("major")?;
        let minor = number("minor")?;
        let micro = number("micro")?;
        let qualifier = parts.next().unwrap_or_default().to_string();
        if !qualifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(invalid(format!("qualifier '{qualifier}' has invalid characters")));
        }
        Ok(Version {
            major,
            minor,
            micro,
            qualifier,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}
