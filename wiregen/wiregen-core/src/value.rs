//! Dynamic values produced when a compiled decode plan is interpreted.

use std::sync::Arc;

/// Decoded value of one field, array element or record.
/// Variants mirror the primitive kinds one to one; no lossy conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Uuid([u8; 16]),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    /// Record fields in declaration order, keyed by emitted field name.
    Record(Vec<(Arc<str>, Value)>),
    Array(Vec<Value>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Arc::from(b.as_ref()))
    }

    /// Look up a record field by its emitted (capitalized) name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields
                .iter()
                .find(|(field, _)| field.as_ref() == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(v) => Some(i64::from(*v)),
            Value::I16(v) => Some(i64::from(*v)),
            Value::I32(v) => Some(i64::from(*v)),
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::I8(_) => "I8",
            Value::I16(_) => "I16",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::Uuid(_) => "Uuid",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Record(_) => "Record",
            Value::Array(_) => "Array",
        }
    }
}
