use std::fmt;

use osgi_jmx::CodecError;

use crate::filter::FilterError;
use crate::version::VersionError;

/// Errors raised by the management mirrors.
#[derive(Debug)]
pub enum MirrorError {
    /// A value or table could not be encoded or decoded.
    Codec(CodecError),
    /// A filter argument is not a valid LDAP filter.
    Filter(FilterError),
    /// A version argument could not be parsed.
    Version(VersionError),
    /// The named role exists but is not a user (or group).
    NotAUser(String),
    /// The named role exists but is not a group.
    NotAGroup(String),
    /// No role with this name exists.
    RoleNotFound(String),
    /// No service with this id is registered.
    ServiceNotFound(i64),
    /// No configuration with this pid exists.
    ConfigurationNotFound(String),
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorError::Codec(e) => write!(f, "codec error: {e}"),
            MirrorError::Filter(e) => write!(f, "filter error: {e}"),
            MirrorError::Version(e) => write!(f, "version error: {e}"),
            MirrorError::NotAUser(name) => write!(f, "not a user: {name}"),
            MirrorError::NotAGroup(name) => write!(f, "not a group: {name}"),
            MirrorError::RoleNotFound(name) => write!(f, "role '{name}' not found"),
            MirrorError::ServiceNotFound(id) => write!(f, "service <{id}> does not exist"),
            MirrorError::ConfigurationNotFound(pid) => {
                write!(f, "configuration '{pid}' not found")
            }
        }
    }
}

impl std::error::Error for MirrorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MirrorError::Codec(e) => Some(e),
            MirrorError::Filter(e) => Some(e),
            MirrorError::Version(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for MirrorError {
    fn from(err: CodecError) -> Self {
        MirrorError::Codec(err)
    }
}

impl From<FilterError> for MirrorError {
    fn from(err: FilterError) -> Self {
        MirrorError::Filter(err)
    }
}

impl From<VersionError> for MirrorError {
    fn from(err: VersionError) -> Self {
        MirrorError::Version(err)
    }
}
