//! Table to dictionary decoding.

use std::fmt::Display;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::encode::ELEMENT_SEPARATOR;
use super::kind::{ElementKind, PrimitiveKind, ScalarKind};
use super::table::{PropertyRow, PropertyTable};
use super::tag::TypeTag;
use super::value::{PrimitiveArray, Properties, PropertyValue, Scalar, ScalarArray};
use crate::error::CodecError;

/// Decodes every row of `table` into a dictionary.
///
/// Fails on the first row that cannot be decoded; no partial dictionary is
/// returned.
pub fn decode_table(table: &PropertyTable) -> Result<Properties, CodecError> {
    table.rows().map(decode_row).collect()
}

/// Decodes one row into its key and value.
pub fn decode_row(row: &PropertyRow) -> Result<(String, PropertyValue), CodecError> {
    let value = decode_value(&row.type_tag, &row.value)?;
    Ok((row.key.clone(), value))
}

/// Parses `type_tag` and decodes `value` according to it.
pub fn decode_value(type_tag: &str, value: &str) -> Result<PropertyValue, CodecError> {
    let tag: TypeTag = type_tag.parse()?;
    decode_tagged(tag, value)
}

/// Decodes `value` against an already parsed tag.
pub fn decode_tagged(tag: TypeTag, value: &str) -> Result<PropertyValue, CodecError> {
    match tag {
        TypeTag::Scalar(kind) => parse_scalar(kind, value).map(PropertyValue::Scalar),
        TypeTag::Array(ElementKind::Primitive(kind)) => {
            parse_primitive_array(kind, value).map(PropertyValue::PrimitiveArray)
        }
        TypeTag::Array(ElementKind::Scalar(kind)) => {
            parse_scalar_array(kind, value).map(PropertyValue::ScalarArray)
        }
        TypeTag::Vector(kind) => elements(value)
            .map(|token| parse_scalar(kind, token).map(PropertyValue::Scalar))
            .collect::<Result<Vec<_>, _>>()
            .map(PropertyValue::Vector),
    }
}

/// Parses the whole of `text` as a value of `kind`.
///
/// `Boolean` is lenient: any text other than `true` (ignoring ASCII case) is
/// `false`. `Character` keeps only the first character.
pub fn parse_scalar(kind: ScalarKind, text: &str) -> Result<Scalar, CodecError> {
    let name = kind.name();
    Ok(match kind {
        ScalarKind::String => Scalar::String(text.to_string()),
        ScalarKind::Integer => Scalar::Integer(parse_native(name, text)?),
        ScalarKind::Long => Scalar::Long(parse_native(name, text)?),
        ScalarKind::Float => Scalar::Float(parse_native(name, text)?),
        ScalarKind::Double => Scalar::Double(parse_native(name, text)?),
        ScalarKind::Byte => Scalar::Byte(parse_native(name, text)?),
        ScalarKind::Short => Scalar::Short(parse_native(name, text)?),
        ScalarKind::Character => Scalar::Character(parse_char(name, text)?),
        ScalarKind::Boolean => Scalar::Boolean(parse_bool(text)),
        ScalarKind::BigDecimal => Scalar::BigDecimal(parse_native::<BigDecimal>(name, text)?),
        ScalarKind::BigInteger => Scalar::BigInteger(parse_native::<BigInt>(name, text)?),
    })
}

fn parse_primitive_array(kind: PrimitiveKind, value: &str) -> Result<PrimitiveArray, CodecError> {
    let name = kind.name();
    Ok(match kind {
        PrimitiveKind::Int => PrimitiveArray::Int(parse_list(value, |t| parse_native(name, t))?),
        PrimitiveKind::Long => PrimitiveArray::Long(parse_list(value, |t| parse_native(name, t))?),
        PrimitiveKind::Float => {
            PrimitiveArray::Float(parse_list(value, |t| parse_native(name, t))?)
        }
        PrimitiveKind::Double => {
            PrimitiveArray::Double(parse_list(value, |t| parse_native(name, t))?)
        }
        PrimitiveKind::Byte => PrimitiveArray::Byte(parse_list(value, |t| parse_native(name, t))?),
        PrimitiveKind::Short => {
            PrimitiveArray::Short(parse_list(value, |t| parse_native(name, t))?)
        }
        PrimitiveKind::Char => PrimitiveArray::Char(parse_list(value, |t| parse_char(name, t))?),
        PrimitiveKind::Boolean => {
            PrimitiveArray::Boolean(parse_list(value, |t| Ok(parse_bool(t)))?)
        }
    })
}

fn parse_scalar_array(kind: ScalarKind, value: &str) -> Result<ScalarArray, CodecError> {
    let name = kind.name();
    Ok(match kind {
        ScalarKind::String => ScalarArray::String(parse_list(value, |t| Ok(t.to_string()))?),
        ScalarKind::Integer => ScalarArray::Integer(parse_list(value, |t| parse_native(name, t))?),
        ScalarKind::Long => ScalarArray::Long(parse_list(value, |t| parse_native(name, t))?),
        ScalarKind::Float => ScalarArray::Float(parse_list(value, |t| parse_native(name, t))?),
        ScalarKind::Double => ScalarArray::Double(parse_list(value, |t| parse_native(name, t))?),
        ScalarKind::Byte => ScalarArray::Byte(parse_list(value, |t| parse_native(name, t))?),
        ScalarKind::Short => ScalarArray::Short(parse_list(value, |t| parse_native(name, t))?),
        ScalarKind::Character => {
            ScalarArray::Character(parse_list(value, |t| parse_char(name, t))?)
        }
        ScalarKind::Boolean => ScalarArray::Boolean(parse_list(value, |t| Ok(parse_bool(t)))?),
        ScalarKind::BigDecimal => {
            ScalarArray::BigDecimal(parse_list(value, |t| parse_native(name, t))?)
        }
        ScalarKind::BigInteger => {
            ScalarArray::BigInteger(parse_list(value, |t| parse_native(name, t))?)
        }
    })
}

/// Splits an element list. Zero-length pieces are skipped, the rest trimmed.
fn elements(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(ELEMENT_SEPARATOR)
        .filter(|piece| !piece.is_empty())
        .map(str::trim)
}

fn parse_list<T>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    elements(value).map(parse).collect()
}

fn parse_native<T>(kind: &'static str, text: &str) -> Result<T, CodecError>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse::<T>()
        .map_err(|err| CodecError::ElementParseFailure {
            kind,
            token: text.to_string(),
            reason: err.to_string(),
        })
}

fn parse_char(kind: &'static str, text: &str) -> Result<char, CodecError> {
    text.chars()
        .next()
        .ok_or_else(|| CodecError::ElementParseFailure {
            kind,
            token: text.to_string(),
            reason: "empty value".to_string(),
        })
}

fn parse_bool(text: &str) -> bool {
    text.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_integer() {
        assert_eq!(decode_value("Integer", "42").unwrap(), PropertyValue::from(42));
    }

    #[test]
    fn test_decode_primitive_array_trims_elements() {
        assert_eq!(
            decode_value("Array of int", "1, 2 ,3").unwrap(),
            PropertyValue::PrimitiveArray(PrimitiveArray::Int(vec![1, 2, 3]))
        );
    }

    #[test]
    fn test_decode_empty_list_is_empty() {
        assert_eq!(
            decode_value("Array of double", "").unwrap(),
            PropertyValue::PrimitiveArray(PrimitiveArray::Double(vec![]))
        );
        assert_eq!(decode_value("Vector of Integer", "").unwrap(), PropertyValue::Vector(vec![]));
    }

    #[test]
    fn test_decode_skips_empty_pieces() {
        assert_eq!(
            decode_value("Array of String", "a,,b").unwrap(),
            PropertyValue::ScalarArray(ScalarArray::String(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn test_boolean_is_lenient() {
        assert_eq!(decode_value("Boolean", "TRUE").unwrap(), PropertyValue::from(true));
        assert_eq!(decode_value("Boolean", "yes").unwrap(), PropertyValue::from(false));
        assert_eq!(
            decode_value("Array of boolean", "true,garbage").unwrap(),
            PropertyValue::PrimitiveArray(PrimitiveArray::Boolean(vec![true, false]))
        );
    }

    #[test]
    fn test_character_takes_first_char() {
        assert_eq!(
            decode_value("Character", "xyz").unwrap(),
            PropertyValue::Scalar(Scalar::Character('x'))
        );
        let err = decode_value("Character", "").unwrap_err();
        assert!(err.is_element_error());
    }

    #[test]
    fn test_scalar_is_not_trimmed() {
        let err = decode_value("Integer", " 42").unwrap_err();
        assert!(matches!(
            err,
            CodecError::ElementParseFailure { kind: "Integer", .. }
        ));
    }

    #[test]
    fn test_element_failure_names_token() {
        let err = decode_value("Array of long", "1,two,3").unwrap_err();
        match err {
            CodecError::ElementParseFailure { kind, token, .. } => {
                assert_eq!(kind, "long");
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_byte_range_is_checked() {
        assert!(decode_value("Byte", "128").is_err());
        assert_eq!(
            decode_value("Byte", "-128").unwrap(),
            PropertyValue::Scalar(Scalar::Byte(-128))
        );
    }

    #[test]
    fn test_tag_errors_surface_before_values() {
        let err = decode_value("Array int", "not,numbers").unwrap_err();
        assert!(err.is_tag_error());
    }

    #[test]
    fn test_decode_table_fails_whole() {
        let table: PropertyTable = vec![
            PropertyRow::new("good", "1", "Integer"),
            PropertyRow::new("bad", "x", "Integer"),
        ]
        .into();
        assert!(decode_table(&table).is_err());
    }
}
