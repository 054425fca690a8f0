//! Plan interpreter: decodes bytes straight from a [`UnitPlan`] into a
//! [`Value`] tree, following exactly the rules the emitter writes out.

use std::collections::HashMap;

use bytes::{Buf, Bytes};
use wiregen_core::{DefaultLiteral, PrimitiveKind, Value};
use wiregen_runtime::{
    COMPACT_NULL, DecodeError, MAX_NESTING_DEPTH, MAX_STRING_LENGTH, STRING_NULL_LENGTH,
    read_uvarint,
};

use crate::plan::{DecodeRule, FieldPlan, RecordPlan, UnitPlan};

/// Result of interpreting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub value: Value,
    /// Bytes consumed from the start of the input.
    pub consumed: usize,
}

/// Decode the unit's message record from `data` for `version`.
pub fn decode_message(plan: &UnitPlan, data: &[u8], version: i16) -> Result<Decoded, DecodeError> {
    decode_record(plan, plan.entry(), data, version)
}

/// Decode any record of `plan` from `data`.
pub fn decode_record(
    plan: &UnitPlan,
    record: &RecordPlan,
    data: &[u8],
    version: i16,
) -> Result<Decoded, DecodeError> {
    let mut interpreter = Interpreter::new(plan, Bytes::copy_from_slice(data), version);
    let value = interpreter.decode_record(record, 0)?;
    Ok(Decoded {
        value,
        consumed: interpreter.consumed(),
    })
}

struct Interpreter<'p> {
    records: HashMap<&'p str, &'p RecordPlan>,
    buf: Bytes,
    initial_len: usize,
    version: i16,
}

impl<'p> Interpreter<'p> {
    fn new(plan: &'p UnitPlan, buf: Bytes, version: i16) -> Self {
        let initial_len = buf.len();
        Self {
            records: plan.records.iter().map(|r| (r.name.as_str(), r)).collect(),
            buf,
            initial_len,
            version,
        }
    }

    fn consumed(&self) -> usize {
        self.initial_len - self.buf.remaining()
    }

    /// `depth` counts levels within a self-referencing cycle and only
    /// matters for records that have a depth decoder.
    fn decode_record(
        &mut self,
        record: &'p RecordPlan,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        if record.depth_decoder.is_some() && depth >= MAX_NESTING_DEPTH {
            return Err(DecodeError::nesting_too_deep(MAX_NESTING_DEPTH));
        }

        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            let value = if field.is_present(self.version) {
                self.decode_field(record, field, depth)?
            } else {
                self.fallback(field)
            };
            fields.push((field.ident.as_str().into(), value));
        }
        Ok(Value::Record(fields))
    }

    fn decode_field(
        &mut self,
        record: &'p RecordPlan,
        field: &FieldPlan,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        if !field.is_array {
            return self.decode_value(record, field, depth);
        }

        let count = read_uvarint(&mut self.buf)?;
        if count == COMPACT_NULL {
            return Err(DecodeError::unexpected_null(&field.ident));
        }
        let mut items = Vec::new();
        for _ in 0..count - 1 {
            items.push(self.decode_value(record, field, depth)?);
        }
        Ok(Value::Array(items))
    }

    fn decode_value(
        &mut self,
        record: &'p RecordPlan,
        field: &FieldPlan,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        match &field.rule {
            DecodeRule::Primitive(kind) => self.decode_primitive(*kind, field),
            DecodeRule::Record { type_name, .. } => {
                self.decode_nested(record, field, type_name, depth)
            }
        }
    }

    fn decode_primitive(
        &mut self,
        kind: PrimitiveKind,
        field: &FieldPlan,
    ) -> Result<Value, DecodeError> {
        Ok(match kind {
            PrimitiveKind::Int8 => Value::I8(self.buf.try_get_i8()?),
            PrimitiveKind::Int16 => Value::I16(self.buf.try_get_i16()?),
            PrimitiveKind::Int32 => Value::I32(self.buf.try_get_i32()?),
            PrimitiveKind::Int64 => Value::I64(self.buf.try_get_i64()?),
            PrimitiveKind::Uuid => {
                let mut uuid = [0u8; 16];
                self.buf.try_copy_to_slice(&mut uuid)?;
                Value::Uuid(uuid)
            }
            PrimitiveKind::String => {
                let len = self.buf.try_get_u16()?;
                if len == STRING_NULL_LENGTH {
                    return Err(DecodeError::unexpected_null(&field.ident));
                }
                if len > MAX_STRING_LENGTH {
                    return Err(DecodeError::invalid_length(&field.ident, len));
                }
                let raw = self.take(usize::from(len))?;
                Value::string(String::from_utf8_lossy(&raw))
            }
            PrimitiveKind::Bytes => {
                let len = read_uvarint(&mut self.buf)?;
                if len == COMPACT_NULL {
                    return Err(DecodeError::unexpected_null(&field.ident));
                }
                let raw = self.take((len - 1) as usize)?;
                Value::bytes(raw)
            }
        })
    }

    fn decode_nested(
        &mut self,
        record: &'p RecordPlan,
        field: &FieldPlan,
        type_name: &str,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        // Every referenced record is part of the plan.
        let nested = self.records[type_name];
        // Depth carries over only between records of a self-referencing
        // cycle; any other call starts a fresh count.
        let nested_depth = match (&record.depth_decoder, &nested.depth_decoder) {
            (Some(_), Some(_)) => depth + 1,
            _ => 0,
        };
        self.decode_record(nested, nested_depth)
            .map_err(|e| DecodeError::nested(&record.name, &field.ident, e))
    }

    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        if self.buf.remaining() < len {
            return Err(DecodeError::eof(len, self.buf.remaining()));
        }
        Ok(self.buf.copy_to_bytes(len))
    }

    /// Value of a field whose version guard does not hold.
    fn fallback(&self, field: &FieldPlan) -> Value {
        match &field.default {
            DefaultLiteral::String(s) => Value::string(s),
            DefaultLiteral::Int(v) => int_value(&field.rule, *v),
            DefaultLiteral::Absent => self.zero(field),
        }
    }

    fn zero(&self, field: &FieldPlan) -> Value {
        if field.is_array {
            return Value::Array(Vec::new());
        }
        self.zero_of(&field.rule)
    }

    fn zero_of(&self, rule: &DecodeRule) -> Value {
        match rule {
            DecodeRule::Primitive(PrimitiveKind::Uuid) => Value::Uuid([0; 16]),
            DecodeRule::Primitive(PrimitiveKind::String) => Value::string(""),
            DecodeRule::Primitive(PrimitiveKind::Bytes) => Value::bytes(b""),
            DecodeRule::Record { type_name, .. } => {
                let record = self.records[type_name.as_str()];
                Value::Record(
                    record
                        .fields
                        .iter()
                        .map(|f| (f.ident.as_str().into(), self.zero(f)))
                        .collect(),
                )
            }
            int => int_value(int, 0),
        }
    }
}

/// Integer value of the rule's width. Defaults were range-checked when the
/// plan was built.
fn int_value(rule: &DecodeRule, v: i64) -> Value {
    match rule {
        DecodeRule::Primitive(PrimitiveKind::Int8) => Value::I8(v as i8),
        DecodeRule::Primitive(PrimitiveKind::Int16) => Value::I16(v as i16),
        DecodeRule::Primitive(PrimitiveKind::Int32) => Value::I32(v as i32),
        _ => Value::I64(v),
    }
}
