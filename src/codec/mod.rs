//! The property codec.
//!
//! Converts host dictionaries to the (Key, Value, Type) table and back. Only
//! scalars, arrays of scalars or primitives, and vectors of scalars can be
//! transferred; no attempt is made to serialize anything else.
//!
//! Array and vector elements are joined with `,` without escaping, so an
//! element whose text contains a comma does not survive a round trip.

pub mod decode;
pub mod encode;
pub mod kind;
pub mod table;
pub mod tag;
pub mod value;

pub use decode::{decode_row, decode_table, decode_tagged, decode_value, parse_scalar};
pub use encode::{encode, encode_table, encode_value};
pub use kind::{ElementKind, PrimitiveKind, ScalarKind};
pub use table::{PropertyRow, PropertyTable};
pub use tag::TypeTag;
pub use value::{PrimitiveArray, Properties, PropertyValue, Scalar, ScalarArray};
