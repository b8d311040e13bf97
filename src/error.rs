use std::fmt;

/// Errors produced while encoding or decoding property values and records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value under `key` has a runtime kind with no tag mapping.
    UnsupportedValueKind { key: String, kind: String },
    /// The tag does not follow `<Array|Vector> of <kind>` or a bare scalar name.
    MalformedTypeTag { tag: String, reason: &'static str },
    /// A bare tag token is not one of the scalar kind names.
    UnknownScalarKind(String),
    /// An array or vector element token is not a known kind name.
    UnknownElementKind(String),
    /// A known kind was used where it is not allowed (a primitive in a vector).
    UnsupportedElementKind(String),
    /// An element's text could not be parsed as its declared kind.
    ElementParseFailure {
        kind: &'static str,
        token: String,
        reason: String,
    },
    /// A composite record item holds a value outside its domain.
    InvalidItem { item: &'static str, reason: String },
}

impl CodecError {
    /// True for failures raised while parsing the type tag itself.
    pub fn is_tag_error(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedTypeTag { .. }
                | CodecError::UnknownScalarKind(_)
                | CodecError::UnknownElementKind(_)
                | CodecError::UnsupportedElementKind(_)
        )
    }

    /// True for failures raised while parsing value text.
    pub fn is_element_error(&self) -> bool {
        matches!(self, CodecError::ElementParseFailure { .. })
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnsupportedValueKind { key, kind } => {
                write!(f, "unsupported value kind '{kind}' for property '{key}'")
            }
            CodecError::MalformedTypeTag { tag, reason } => {
                write!(f, "malformed type tag '{tag}': {reason}")
            }
            CodecError::UnknownScalarKind(token) => write!(f, "unknown scalar kind '{token}'"),
            CodecError::UnknownElementKind(token) => write!(f, "unknown element kind '{token}'"),
            CodecError::UnsupportedElementKind(token) => {
                write!(f, "element kind '{token}' is not allowed here")
            }
            CodecError::ElementParseFailure {
                kind,
                token,
                reason,
            } => write!(f, "cannot parse '{token}' as {kind}: {reason}"),
            CodecError::InvalidItem { item, reason } => {
                write!(f, "invalid item '{item}': {reason}")
            }
        }
    }
}

impl std::error::Error for CodecError {}
