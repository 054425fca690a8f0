//! Field type expressions: an optional `[]` array marker followed by a base
//! type name.
//!
//! ```text
//! int32        → TypeExpr { is_array: false, base: Primitive(Int32) }
//! []string     → TypeExpr { is_array: true,  base: Primitive(String) }
//! []Topic      → TypeExpr { is_array: true,  base: Record("Topic") }
//! ```
//!
//! Whether a record reference names a record that actually exists is decided
//! later, when the plan for a whole unit is built.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1},
    combinator::{all_consuming, opt, recognize},
    multi::many0,
    sequence::pair,
};

use crate::error::SchemaError;

/// Primitive wire kinds understood by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int8,
    Int16,
    Int32,
    Int64,
    String,
    Bytes,
    Uuid,
}

/// Schema spelling of each primitive kind.
const PRIMITIVES: [(&str, PrimitiveKind); 7] = [
    ("int8", PrimitiveKind::Int8),
    ("int16", PrimitiveKind::Int16),
    ("int32", PrimitiveKind::Int32),
    ("int64", PrimitiveKind::Int64),
    ("string", PrimitiveKind::String),
    ("bytes", PrimitiveKind::Bytes),
    ("uuid", PrimitiveKind::Uuid),
];

impl PrimitiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .map(|(_, kind)| *kind)
    }

    pub fn name(&self) -> &'static str {
        PRIMITIVES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(spelling, _)| *spelling)
            .unwrap_or("unknown")
    }

    /// Number of bytes on the wire, for kinds without a length prefix.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            PrimitiveKind::Int8 => Some(1),
            PrimitiveKind::Int16 => Some(2),
            PrimitiveKind::Int32 => Some(4),
            PrimitiveKind::Int64 => Some(8),
            PrimitiveKind::Uuid => Some(16),
            PrimitiveKind::String | PrimitiveKind::Bytes => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8 | PrimitiveKind::Int16 | PrimitiveKind::Int32 | PrimitiveKind::Int64
        )
    }

    /// Inclusive value range of an integer kind.
    pub fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            PrimitiveKind::Int8 => Some((i8::MIN.into(), i8::MAX.into())),
            PrimitiveKind::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            PrimitiveKind::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            PrimitiveKind::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

/// Base kind of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseKind {
    Primitive(PrimitiveKind),
    /// Reference to a common or inline record, by its declared base name.
    Record(String),
}

/// A parsed field type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    pub is_array: bool,
    pub base: BaseKind,
}

impl TypeExpr {
    /// Parse a raw type string.
    ///
    /// The whole string must match; an empty or non-identifier base fails with
    /// [`SchemaError::UnrecognizedType`].
    pub fn parse(raw: &str) -> Result<Self, SchemaError> {
        let (_, (marker, base)) = all_consuming(type_expr)(raw.trim())
            .map_err(|_| SchemaError::UnrecognizedType(raw.to_string()))?;

        let base = match PrimitiveKind::from_name(base) {
            Some(kind) => BaseKind::Primitive(kind),
            None => BaseKind::Record(base.to_string()),
        };
        Ok(TypeExpr {
            is_array: marker.is_some(),
            base,
        })
    }

    /// Base type name as written in the schema.
    pub fn base_name(&self) -> &str {
        match &self.base {
            BaseKind::Primitive(kind) => kind.name(),
            BaseKind::Record(name) => name,
        }
    }
}

/// `[]`? identifier
fn type_expr(input: &str) -> IResult<&str, (Option<&str>, &str)> {
    pair(opt(tag("[]")), identifier)(input)
}

/// Parse an identifier (alphanumeric + underscore, must start with alpha or _)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_primitives() {
        for (name, kind) in PRIMITIVES {
            let ty = TypeExpr::parse(name).unwrap();
            assert!(!ty.is_array);
            assert_eq!(ty.base, BaseKind::Primitive(kind));
            assert_eq!(ty.base_name(), name);
        }
    }

    #[test]
    fn parses_array_marker() {
        let ty = TypeExpr::parse("[]int64").unwrap();
        assert!(ty.is_array);
        assert_eq!(ty.base, BaseKind::Primitive(PrimitiveKind::Int64));
    }

    #[test]
    fn unknown_identifier_is_record_reference() {
        let ty = TypeExpr::parse("[]TopicData").unwrap();
        assert!(ty.is_array);
        assert_eq!(ty.base, BaseKind::Record("TopicData".to_string()));
    }

    #[test]
    fn rejects_empty_base() {
        assert_eq!(
            TypeExpr::parse("[]"),
            Err(SchemaError::UnrecognizedType("[]".to_string()))
        );
        assert!(TypeExpr::parse("").is_err());
    }

    #[test]
    fn rejects_nested_arrays_and_garbage() {
        assert!(TypeExpr::parse("[][]int32").is_err());
        assert!(TypeExpr::parse("int32[]").is_err());
        assert!(TypeExpr::parse("map<int32>").is_err());
    }

    #[test]
    fn uuid_is_sixteen_bytes_wide() {
        assert_eq!(PrimitiveKind::Uuid.fixed_width(), Some(16));
        assert_eq!(PrimitiveKind::Int8.fixed_width(), Some(1));
        assert_eq!(PrimitiveKind::String.fixed_width(), None);
    }
}
