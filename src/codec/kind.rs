//! Scalar and primitive kinds, and the name table shared by encode and decode.
//!
//! Every kind name that appears in a type tag is resolved through the two
//! static tables below. `name()` and `from_name()` both read the same table,
//! so the text written by the encoder is always the text accepted by the
//! decoder.

use std::fmt;

/// One of the eleven boxed value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    String,
    Integer,
    Long,
    Float,
    Double,
    Byte,
    Short,
    Character,
    Boolean,
    BigDecimal,
    BigInteger,
}

/// One of the eight unboxed kinds. Only valid as the element of an array tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Int,
    Long,
    Float,
    Double,
    Byte,
    Short,
    Char,
    Boolean,
}

const SCALAR_NAMES: [(ScalarKind, &str); 11] = [
    (ScalarKind::String, "String"),
    (ScalarKind::Integer, "Integer"),
    (ScalarKind::Long, "Long"),
    (ScalarKind::Float, "Float"),
    (ScalarKind::Double, "Double"),
    (ScalarKind::Byte, "Byte"),
    (ScalarKind::Short, "Short"),
    (ScalarKind::Character, "Character"),
    (ScalarKind::Boolean, "Boolean"),
    (ScalarKind::BigDecimal, "BigDecimal"),
    (ScalarKind::BigInteger, "BigInteger"),
];

const PRIMITIVE_NAMES: [(PrimitiveKind, &str); 8] = [
    (PrimitiveKind::Int, "int"),
    (PrimitiveKind::Long, "long"),
    (PrimitiveKind::Float, "float"),
    (PrimitiveKind::Double, "double"),
    (PrimitiveKind::Byte, "byte"),
    (PrimitiveKind::Short, "short"),
    (PrimitiveKind::Char, "char"),
    (PrimitiveKind::Boolean, "boolean"),
];

impl ScalarKind {
    /// All scalar kinds in table order.
    pub fn all() -> impl Iterator<Item = ScalarKind> {
        SCALAR_NAMES.iter().map(|(kind, _)| *kind)
    }

    /// Returns the type-tag spelling of this kind (e.g. `"Integer"`).
    pub fn name(self) -> &'static str {
        SCALAR_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    /// Resolves a type-tag token. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        SCALAR_NAMES
            .iter()
            .find(|(_, candidate)| *candidate == name)
            .map(|(kind, _)| *kind)
    }
}

impl PrimitiveKind {
    /// All primitive kinds in table order.
    pub fn all() -> impl Iterator<Item = PrimitiveKind> {
        PRIMITIVE_NAMES.iter().map(|(kind, _)| *kind)
    }

    /// Returns the type-tag spelling of this kind (e.g. `"int"`).
    pub fn name(self) -> &'static str {
        PRIMITIVE_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    /// Resolves a type-tag token. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVE_NAMES
            .iter()
            .find(|(_, candidate)| *candidate == name)
            .map(|(kind, _)| *kind)
    }

    /// The boxed kind whose text form and parser this primitive shares.
    pub fn boxed(self) -> ScalarKind {
        match self {
            PrimitiveKind::Int => ScalarKind::Integer,
            PrimitiveKind::Long => ScalarKind::Long,
            PrimitiveKind::Float => ScalarKind::Float,
            PrimitiveKind::Double => ScalarKind::Double,
            PrimitiveKind::Byte => ScalarKind::Byte,
            PrimitiveKind::Short => ScalarKind::Short,
            PrimitiveKind::Char => ScalarKind::Character,
            PrimitiveKind::Boolean => ScalarKind::Boolean,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The element of an `Array of` tag: either a boxed or an unboxed kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Scalar(ScalarKind),
    Primitive(PrimitiveKind),
}

impl ElementKind {
    /// Resolves an element token against both tables, scalars first.
    pub fn from_name(name: &str) -> Option<Self> {
        ScalarKind::from_name(name)
            .map(ElementKind::Scalar)
            .or_else(|| PrimitiveKind::from_name(name).map(ElementKind::Primitive))
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Scalar(kind) => kind.name(),
            ElementKind::Primitive(kind) => kind.name(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_names_are_bijective() {
        for kind in ScalarKind::all() {
            assert_eq!(ScalarKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ScalarKind::all().count(), 11);
    }

    #[test]
    fn test_primitive_names_are_bijective() {
        for kind in PrimitiveKind::all() {
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::all().count(), 8);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(ScalarKind::from_name("integer"), None);
        assert_eq!(ScalarKind::from_name("STRING"), None);
        assert_eq!(PrimitiveKind::from_name("Int"), None);
    }

    #[test]
    fn test_element_kind_resolution() {
        assert_eq!(
            ElementKind::from_name("Long"),
            Some(ElementKind::Scalar(ScalarKind::Long))
        );
        assert_eq!(
            ElementKind::from_name("long"),
            Some(ElementKind::Primitive(PrimitiveKind::Long))
        );
        assert_eq!(ElementKind::from_name("Frobnicate"), None);
    }

    #[test]
    fn test_primitive_boxing() {
        assert_eq!(PrimitiveKind::Char.boxed(), ScalarKind::Character);
        assert_eq!(PrimitiveKind::Int.boxed(), ScalarKind::Integer);
    }
}
