//! Runtime-native property values.
//!
//! A host dictionary maps string keys to [`PropertyValue`]s. The codec maps
//! scalars, dense arrays and vectors of scalars; nested dictionaries are a
//! runtime shape the tabular format cannot express.

use std::collections::BTreeMap;
use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::kind::{ElementKind, PrimitiveKind, ScalarKind};

/// A host property dictionary.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single value of one of the eleven scalar kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Byte(i8),
    Short(i16),
    Character(char),
    Boolean(bool),
    BigDecimal(BigDecimal),
    BigInteger(BigInt),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Long(_) => ScalarKind::Long,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Double(_) => ScalarKind::Double,
            Scalar::Byte(_) => ScalarKind::Byte,
            Scalar::Short(_) => ScalarKind::Short,
            Scalar::Character(_) => ScalarKind::Character,
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::BigDecimal(_) => ScalarKind::BigDecimal,
            Scalar::BigInteger(_) => ScalarKind::BigInteger,
        }
    }

    /// Returns the string slice if this is a String scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(value) => Some(value),
            _ => None,
        }
    }
}

/// Natural text form of the value; this is the Value column of an encoded row.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(v) => f.write_str(v),
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Long(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Double(v) => write!(f, "{v}"),
            Scalar::Byte(v) => write!(f, "{v}"),
            Scalar::Short(v) => write!(f, "{v}"),
            Scalar::Character(v) => write!(f, "{v}"),
            Scalar::Boolean(v) => write!(f, "{v}"),
            Scalar::BigDecimal(v) => write!(f, "{v}"),
            Scalar::BigInteger(v) => write!(f, "{v}"),
        }
    }
}

/// A dense array of an unboxed kind (`Array of int`, `Array of char`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveArray {
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Char(Vec<char>),
    Boolean(Vec<bool>),
}

impl PrimitiveArray {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveArray::Int(_) => PrimitiveKind::Int,
            PrimitiveArray::Long(_) => PrimitiveKind::Long,
            PrimitiveArray::Float(_) => PrimitiveKind::Float,
            PrimitiveArray::Double(_) => PrimitiveKind::Double,
            PrimitiveArray::Byte(_) => PrimitiveKind::Byte,
            PrimitiveArray::Short(_) => PrimitiveKind::Short,
            PrimitiveArray::Char(_) => PrimitiveKind::Char,
            PrimitiveArray::Boolean(_) => PrimitiveKind::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimitiveArray::Int(v) => v.len(),
            PrimitiveArray::Long(v) => v.len(),
            PrimitiveArray::Float(v) => v.len(),
            PrimitiveArray::Double(v) => v.len(),
            PrimitiveArray::Byte(v) => v.len(),
            PrimitiveArray::Short(v) => v.len(),
            PrimitiveArray::Char(v) => v.len(),
            PrimitiveArray::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Boxes every element, in order.
    pub fn to_scalars(&self) -> Vec<Scalar> {
        match self {
            PrimitiveArray::Int(v) => v.iter().copied().map(Scalar::Integer).collect(),
            PrimitiveArray::Long(v) => v.iter().copied().map(Scalar::Long).collect(),
            PrimitiveArray::Float(v) => v.iter().copied().map(Scalar::Float).collect(),
            PrimitiveArray::Double(v) => v.iter().copied().map(Scalar::Double).collect(),
            PrimitiveArray::Byte(v) => v.iter().copied().map(Scalar::Byte).collect(),
            PrimitiveArray::Short(v) => v.iter().copied().map(Scalar::Short).collect(),
            PrimitiveArray::Char(v) => v.iter().copied().map(Scalar::Character).collect(),
            PrimitiveArray::Boolean(v) => v.iter().copied().map(Scalar::Boolean).collect(),
        }
    }
}

/// A dense array of a boxed kind (`Array of String`, `Array of Integer`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarArray {
    String(Vec<String>),
    Integer(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Character(Vec<char>),
    Boolean(Vec<bool>),
    BigDecimal(Vec<BigDecimal>),
    BigInteger(Vec<BigInt>),
}

impl ScalarArray {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarArray::String(_) => ScalarKind::String,
            ScalarArray::Integer(_) => ScalarKind::Integer,
            ScalarArray::Long(_) => ScalarKind::Long,
            ScalarArray::Float(_) => ScalarKind::Float,
            ScalarArray::Double(_) => ScalarKind::Double,
            ScalarArray::Byte(_) => ScalarKind::Byte,
            ScalarArray::Short(_) => ScalarKind::Short,
            ScalarArray::Character(_) => ScalarKind::Character,
            ScalarArray::Boolean(_) => ScalarKind::Boolean,
            ScalarArray::BigDecimal(_) => ScalarKind::BigDecimal,
            ScalarArray::BigInteger(_) => ScalarKind::BigInteger,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScalarArray::String(v) => v.len(),
            ScalarArray::Integer(v) => v.len(),
            ScalarArray::Long(v) => v.len(),
            ScalarArray::Float(v) => v.len(),
            ScalarArray::Double(v) => v.len(),
            ScalarArray::Byte(v) => v.len(),
            ScalarArray::Short(v) => v.len(),
            ScalarArray::Character(v) => v.len(),
            ScalarArray::Boolean(v) => v.len(),
            ScalarArray::BigDecimal(v) => v.len(),
            ScalarArray::BigInteger(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every element as a [`Scalar`], in order.
    pub fn to_scalars(&self) -> Vec<Scalar> {
        match self {
            ScalarArray::String(v) => v.iter().cloned().map(Scalar::String).collect(),
            ScalarArray::Integer(v) => v.iter().copied().map(Scalar::Integer).collect(),
            ScalarArray::Long(v) => v.iter().copied().map(Scalar::Long).collect(),
            ScalarArray::Float(v) => v.iter().copied().map(Scalar::Float).collect(),
            ScalarArray::Double(v) => v.iter().copied().map(Scalar::Double).collect(),
            ScalarArray::Byte(v) => v.iter().copied().map(Scalar::Byte).collect(),
            ScalarArray::Short(v) => v.iter().copied().map(Scalar::Short).collect(),
            ScalarArray::Character(v) => v.iter().copied().map(Scalar::Character).collect(),
            ScalarArray::Boolean(v) => v.iter().copied().map(Scalar::Boolean).collect(),
            ScalarArray::BigDecimal(v) => v.iter().cloned().map(Scalar::BigDecimal).collect(),
            ScalarArray::BigInteger(v) => v.iter().cloned().map(Scalar::BigInteger).collect(),
        }
    }
}

/// A value held in a host property dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(Scalar),
    PrimitiveArray(PrimitiveArray),
    ScalarArray(ScalarArray),
    /// Ordered collection. Its element kind is the kind of its first element.
    Vector(Vec<PropertyValue>),
    /// Nested dictionary. Present in some hosts, never encodable.
    Dictionary(Properties),
}

impl PropertyValue {
    /// Shorthand for a String scalar.
    pub fn string(value: impl Into<String>) -> Self {
        PropertyValue::Scalar(Scalar::String(value.into()))
    }

    /// Human-readable runtime kind, used when reporting unsupported values.
    pub fn kind_name(&self) -> String {
        match self {
            PropertyValue::Scalar(scalar) => scalar.kind().name().to_string(),
            PropertyValue::PrimitiveArray(array) => format!("{}[]", array.kind()),
            PropertyValue::ScalarArray(array) => format!("{}[]", array.kind()),
            PropertyValue::Vector(_) => "Vector".to_string(),
            PropertyValue::Dictionary(_) => "Dictionary".to_string(),
        }
    }

    /// Element kind of an array value, `None` for other shapes.
    pub fn array_element(&self) -> Option<ElementKind> {
        match self {
            PropertyValue::PrimitiveArray(array) => Some(ElementKind::Primitive(array.kind())),
            PropertyValue::ScalarArray(array) => Some(ElementKind::Scalar(array.kind())),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            PropertyValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Returns string elements of an `Array of String`.
    pub fn as_string_array(&self) -> Option<&[String]> {
        match self {
            PropertyValue::ScalarArray(ScalarArray::String(values)) => Some(values),
            _ => None,
        }
    }
}

impl From<Scalar> for PropertyValue {
    fn from(value: Scalar) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<PrimitiveArray> for PropertyValue {
    fn from(value: PrimitiveArray) -> Self {
        PropertyValue::PrimitiveArray(value)
    }
}

impl From<ScalarArray> for PropertyValue {
    fn from(value: ScalarArray) -> Self {
        PropertyValue::ScalarArray(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::string(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Scalar(Scalar::String(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Scalar(Scalar::Integer(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Scalar(Scalar::Long(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Scalar(Scalar::Double(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Scalar(Scalar::Boolean(value))
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::ScalarArray(ScalarArray::String(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scalar_text_forms() {
        assert_eq!(Scalar::Integer(-42).to_string(), "-42");
        assert_eq!(Scalar::Boolean(true).to_string(), "true");
        assert_eq!(Scalar::Character('q').to_string(), "q");
        assert_eq!(Scalar::Double(2.5).to_string(), "2.5");
        assert_eq!(
            Scalar::BigInteger(BigInt::from_str("123456789012345678901234567890").unwrap())
                .to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PropertyValue::from(7).kind_name(), "Integer");
        assert_eq!(
            PropertyValue::from(PrimitiveArray::Int(vec![1])).kind_name(),
            "int[]"
        );
        assert_eq!(
            PropertyValue::Dictionary(Properties::new()).kind_name(),
            "Dictionary"
        );
    }

    #[test]
    fn test_array_boxing_preserves_order() {
        let array = PrimitiveArray::Short(vec![3, 1, 2]);
        assert_eq!(
            array.to_scalars(),
            vec![Scalar::Short(3), Scalar::Short(1), Scalar::Short(2)]
        );
        assert_eq!(array.len(), 3);
    }
}
