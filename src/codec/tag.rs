//! The type-tag grammar.
//!
//! ```text
//! type      ::= scalar-name | "Array of " element | "Vector of " scalar-name
//! element   ::= scalar-name | primitive-name
//! ```
//!
//! Tags are parsed token by token over whitespace-separated tokens. Tokens
//! after the kind token are ignored.

use std::fmt;
use std::str::FromStr;

use super::kind::{ElementKind, PrimitiveKind, ScalarKind};
use crate::error::CodecError;

const ARRAY: &str = "Array";
const VECTOR: &str = "Vector";
const OF: &str = "of";

/// Shape and kind of an encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Scalar(ScalarKind),
    Array(ElementKind),
    Vector(ScalarKind),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Scalar(kind) => write!(f, "{kind}"),
            TypeTag::Array(element) => write!(f, "{ARRAY} {OF} {element}"),
            TypeTag::Vector(kind) => write!(f, "{VECTOR} {OF} {kind}"),
        }
    }
}

impl FromStr for TypeTag {
    type Err = CodecError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let mut tokens = tag.split_whitespace();
        let Some(first) = tokens.next() else {
            return Err(malformed(tag, "type is empty"));
        };
        match first {
            ARRAY => {
                let element = kind_token(
                    tag,
                    &mut tokens,
                    "expected <scalar>|<primitive> after 'Array of'",
                )?;
                ElementKind::from_name(element)
                    .map(TypeTag::Array)
                    .ok_or_else(|| CodecError::UnknownElementKind(element.to_string()))
            }
            VECTOR => {
                let element = kind_token(tag, &mut tokens, "expected <scalar> after 'Vector of'")?;
                if let Some(kind) = ScalarKind::from_name(element) {
                    Ok(TypeTag::Vector(kind))
                } else if PrimitiveKind::from_name(element).is_some() {
                    Err(CodecError::UnsupportedElementKind(element.to_string()))
                } else {
                    Err(CodecError::UnknownElementKind(element.to_string()))
                }
            }
            scalar => ScalarKind::from_name(scalar)
                .map(TypeTag::Scalar)
                .ok_or_else(|| CodecError::UnknownScalarKind(scalar.to_string())),
        }
    }
}

/// Consumes the mandatory `of` token and returns the kind token after it.
fn kind_token<'a>(
    tag: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
    missing_kind: &'static str,
) -> Result<&'a str, CodecError> {
    if tokens.next() != Some(OF) {
        return Err(malformed(tag, "expected 'of'"));
    }
    tokens.next().ok_or_else(|| malformed(tag, missing_kind))
}

fn malformed(tag: &str, reason: &'static str) -> CodecError {
    CodecError::MalformedTypeTag {
        tag: tag.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tag: &str) -> Result<TypeTag, CodecError> {
        tag.parse()
    }

    #[test]
    fn test_display_spelling() {
        assert_eq!(
            TypeTag::Array(ElementKind::Primitive(PrimitiveKind::Int)).to_string(),
            "Array of int"
        );
        assert_eq!(TypeTag::Vector(ScalarKind::String).to_string(), "Vector of String");
        assert_eq!(TypeTag::Scalar(ScalarKind::BigDecimal).to_string(), "BigDecimal");
    }

    #[test]
    fn test_parse_every_form() {
        assert_eq!(parse("Integer").unwrap(), TypeTag::Scalar(ScalarKind::Integer));
        assert_eq!(
            parse("Array of String").unwrap(),
            TypeTag::Array(ElementKind::Scalar(ScalarKind::String))
        );
        assert_eq!(
            parse("Array of boolean").unwrap(),
            TypeTag::Array(ElementKind::Primitive(PrimitiveKind::Boolean))
        );
        assert_eq!(parse("Vector of Long").unwrap(), TypeTag::Vector(ScalarKind::Long));
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        assert_eq!(
            parse("  Array\tof   short ").unwrap(),
            TypeTag::Array(ElementKind::Primitive(PrimitiveKind::Short))
        );
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        assert_eq!(parse("String value").unwrap(), TypeTag::Scalar(ScalarKind::String));
    }

    #[test]
    fn test_missing_of_is_malformed() {
        assert!(matches!(
            parse("Array int"),
            Err(CodecError::MalformedTypeTag { .. })
        ));
        assert!(matches!(parse("Vector"), Err(CodecError::MalformedTypeTag { .. })));
    }

    #[test]
    fn test_missing_element_is_malformed() {
        assert!(matches!(
            parse("Array of"),
            Err(CodecError::MalformedTypeTag { .. })
        ));
    }

    #[test]
    fn test_empty_tag_is_malformed() {
        assert!(matches!(parse("   "), Err(CodecError::MalformedTypeTag { .. })));
    }

    #[test]
    fn test_unknown_kinds() {
        assert_eq!(
            parse("Frobnicate"),
            Err(CodecError::UnknownScalarKind("Frobnicate".into()))
        );
        assert_eq!(
            parse("Array of Frob"),
            Err(CodecError::UnknownElementKind("Frob".into()))
        );
        assert_eq!(parse("int"), Err(CodecError::UnknownScalarKind("int".into())));
    }

    #[test]
    fn test_vector_rejects_primitives() {
        assert_eq!(
            parse("Vector of int"),
            Err(CodecError::UnsupportedElementKind("int".into()))
        );
        assert_eq!(
            parse("Vector of Frob"),
            Err(CodecError::UnknownElementKind("Frob".into()))
        );
    }
}
