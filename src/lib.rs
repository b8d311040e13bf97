//! # osgi-jmx
//!
//! Property codec and open-type records for exposing an OSGi runtime through
//! JMX-style management clients.
//!
//! Management clients only understand a small set of open types, so the
//! values that can cross the boundary are restricted to simple types, arrays
//! of simple types and vectors of simple types. Host dictionaries are encoded
//! as a table with one row per key:
//!
//! | Item  | Type   |
//! |-------|--------|
//! | Key   | String |
//! | Value | String |
//! | Type  | String |
//!
//! The Type column follows this grammar:
//!
//! ```text
//! type      ::= scalar | vector | array
//! scalar    ::= String | Integer | Long | Float | Double | Byte | Short |
//!               Character | Boolean | BigDecimal | BigInteger
//! primitive ::= int | long | float | double | byte | short | char | boolean
//! array     ::= Array of primitive | Array of scalar
//! vector    ::= Vector of scalar
//! ```
//!
//! Array and vector values are separated by `,`.
//!
//! ## Quick Start
//!
//! ```rust
//! use osgi_jmx::codec::{PrimitiveArray, Properties, PropertyValue, decode_table, encode_table};
//!
//! # fn main() -> Result<(), osgi_jmx::CodecError> {
//! let mut properties = Properties::new();
//! properties.insert("service.ranking".into(), PropertyValue::from(10));
//! properties.insert("ports".into(), PrimitiveArray::Int(vec![8080, 8443]).into());
//!
//! let table = encode_table(&properties)?;
//! let ports = table.get("ports").unwrap();
//! assert_eq!(ports.value, "8080,8443");
//! assert_eq!(ports.type_tag, "Array of int");
//!
//! assert_eq!(decode_table(&table)?, properties);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod records;
pub mod schema;

mod error;

pub use codec::{
    ElementKind, PrimitiveArray, PrimitiveKind, Properties, PropertyRow, PropertyTable,
    PropertyValue, Scalar, ScalarArray, ScalarKind, TypeTag,
};
pub use error::CodecError;

// Arbitrary-precision types carried by `Scalar::BigDecimal` and `Scalar::BigInteger`.
pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
