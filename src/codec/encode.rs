//! Dictionary to table encoding.

use std::fmt::Display;

use super::kind::{ElementKind, ScalarKind};
use super::table::{PropertyRow, PropertyTable};
use super::tag::TypeTag;
use super::value::{PrimitiveArray, Properties, PropertyValue, ScalarArray};
use crate::error::CodecError;

/// Separator between array and vector elements in the Value column.
pub const ELEMENT_SEPARATOR: char = ',';

/// Encodes every entry of `properties` into a fresh table.
///
/// Fails on the first entry that cannot be encoded; no partial table is
/// returned.
pub fn encode_table(properties: &Properties) -> Result<PropertyTable, CodecError> {
    properties
        .iter()
        .map(|(key, value)| encode(key, value))
        .collect()
}

/// Encodes a single property into its (Key, Value, Type) row.
pub fn encode(key: &str, value: &PropertyValue) -> Result<PropertyRow, CodecError> {
    let (text, tag) = encode_value(key, value)?;
    Ok(PropertyRow::new(key, text, tag.to_string()))
}

/// Returns the Value text and the type tag for `value`.
///
/// `key` is only used to name the property in errors.
pub fn encode_value(key: &str, value: &PropertyValue) -> Result<(String, TypeTag), CodecError> {
    match value {
        PropertyValue::Scalar(scalar) => Ok((scalar.to_string(), TypeTag::Scalar(scalar.kind()))),
        PropertyValue::PrimitiveArray(array) => Ok((
            join_primitive_array(array),
            TypeTag::Array(ElementKind::Primitive(array.kind())),
        )),
        PropertyValue::ScalarArray(array) => Ok((
            join_scalar_array(array),
            TypeTag::Array(ElementKind::Scalar(array.kind())),
        )),
        PropertyValue::Vector(elements) => encode_vector(key, elements),
        PropertyValue::Dictionary(_) => Err(unsupported(key, value)),
    }
}

fn encode_vector(key: &str, elements: &[PropertyValue]) -> Result<(String, TypeTag), CodecError> {
    // Element kind comes from the first element only; an empty vector is
    // tagged as a vector of strings.
    let kind = match elements.first() {
        None => ScalarKind::String,
        Some(PropertyValue::Scalar(scalar)) => scalar.kind(),
        Some(other) => return Err(unsupported_element(key, other)),
    };
    let mut text = String::new();
    for (i, element) in elements.iter().enumerate() {
        let PropertyValue::Scalar(scalar) = element else {
            return Err(unsupported_element(key, element));
        };
        if i > 0 {
            text.push(ELEMENT_SEPARATOR);
        }
        text.push_str(&scalar.to_string());
    }
    Ok((text, TypeTag::Vector(kind)))
}

fn join<T: Display>(items: &[T]) -> String {
    let mut text = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            text.push(ELEMENT_SEPARATOR);
        }
        text.push_str(&item.to_string());
    }
    text
}

fn join_primitive_array(array: &PrimitiveArray) -> String {
    match array {
        PrimitiveArray::Int(v) => join(v),
        PrimitiveArray::Long(v) => join(v),
        PrimitiveArray::Float(v) => join(v),
        PrimitiveArray::Double(v) => join(v),
        PrimitiveArray::Byte(v) => join(v),
        PrimitiveArray::Short(v) => join(v),
        PrimitiveArray::Char(v) => join(v),
        PrimitiveArray::Boolean(v) => join(v),
    }
}

fn join_scalar_array(array: &ScalarArray) -> String {
    match array {
        ScalarArray::String(v) => join(v),
        ScalarArray::Integer(v) => join(v),
        ScalarArray::Long(v) => join(v),
        ScalarArray::Float(v) => join(v),
        ScalarArray::Double(v) => join(v),
        ScalarArray::Byte(v) => join(v),
        ScalarArray::Short(v) => join(v),
        ScalarArray::Character(v) => join(v),
        ScalarArray::Boolean(v) => join(v),
        ScalarArray::BigDecimal(v) => join(v),
        ScalarArray::BigInteger(v) => join(v),
    }
}

fn unsupported(key: &str, value: &PropertyValue) -> CodecError {
    CodecError::UnsupportedValueKind {
        key: key.to_string(),
        kind: value.kind_name(),
    }
}

fn unsupported_element(key: &str, element: &PropertyValue) -> CodecError {
    CodecError::UnsupportedValueKind {
        key: key.to_string(),
        kind: format!("Vector of {}", element.kind_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::value::Scalar;

    #[test]
    fn test_encode_scalar_row() {
        let row = encode("count", &PropertyValue::from(42)).unwrap();
        assert_eq!(row, PropertyRow::new("count", "42", "Integer"));
    }

    #[test]
    fn test_encode_primitive_array() {
        let row = encode("ids", &PrimitiveArray::Int(vec![1, 2, 3]).into()).unwrap();
        assert_eq!(row.value, "1,2,3");
        assert_eq!(row.type_tag, "Array of int");
    }

    #[test]
    fn test_encode_empty_array() {
        let row = encode("none", &PrimitiveArray::Long(vec![]).into()).unwrap();
        assert_eq!(row.value, "");
        assert_eq!(row.type_tag, "Array of long");
    }

    #[test]
    fn test_encode_vector_uses_first_element_kind() {
        let vector = PropertyValue::Vector(vec![
            Scalar::Long(5).into(),
            Scalar::String("x".into()).into(),
        ]);
        let row = encode("mixed", &vector).unwrap();
        assert_eq!(row.type_tag, "Vector of Long");
        assert_eq!(row.value, "5,x");
    }

    #[test]
    fn test_encode_empty_vector_defaults_to_string() {
        let row = encode("empty", &PropertyValue::Vector(vec![])).unwrap();
        assert_eq!(row.type_tag, "Vector of String");
        assert_eq!(row.value, "");
    }

    #[test]
    fn test_encode_dictionary_is_unsupported() {
        let err = encode("nested", &PropertyValue::Dictionary(Properties::new())).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedValueKind {
                key: "nested".into(),
                kind: "Dictionary".into(),
            }
        );
    }

    #[test]
    fn test_encode_vector_of_arrays_is_unsupported() {
        let vector = PropertyValue::Vector(vec![PrimitiveArray::Int(vec![1]).into()]);
        let err = encode("v", &vector).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedValueKind {
                key: "v".into(),
                kind: "Vector of int[]".into(),
            }
        );
    }

    #[test]
    fn test_encode_table_aborts_on_failure() {
        let mut properties = Properties::new();
        properties.insert("a".into(), PropertyValue::from(1));
        properties.insert("b".into(), PropertyValue::Dictionary(Properties::new()));
        properties.insert("c".into(), PropertyValue::from(3));
        assert!(encode_table(&properties).is_err());
    }

    #[test]
    fn test_encode_table_one_row_per_key() {
        let mut properties = Properties::new();
        properties.insert("name".into(), PropertyValue::from("alice"));
        properties.insert("active".into(), PropertyValue::from(true));
        let table = encode_table(&properties).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("active").unwrap().value, "true");
        assert_eq!(table.get("name").unwrap().type_tag, "String");
    }
}
