//! Record discovery: flattens the message, its common records and every
//! inline nested record into one ordered list.
//!
//! # Order
//!
//! Depth-first, parent before child:
//!
//! 1. the message itself,
//! 2. inline records reachable from the message's fields (pre-order),
//! 3. each common record, followed by the inline records reachable from it.
//!
//! # Naming
//!
//! | Record  | Type name                        | Decoder                  |
//! |---------|----------------------------------|--------------------------|
//! | message | `<Message>`                      | `Read<Message>`          |
//! | common  | `<Name>`                         | `New<Capitalized Name>`  |
//! | inline  | `<Message><Capitalized BaseType>` | `New<Message><BaseType>` |
//!
//! Inline names are qualified with the message name so that two messages
//! declaring the same inline shape never collide. Within one unit, a name
//! registered twice is an error.

use std::collections::HashSet;

use wiregen_core::{BaseKind, CompileError, Field, Message, SchemaError, TypeExpr, capitalize};

/// Where a discovered record was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOrigin {
    Message,
    Common,
    /// Declared in place by `field` of record `parent`.
    Inline { parent: String, field: String },
}

/// One record requiring its own type definition and decoder.
#[derive(Debug, Clone)]
pub struct DiscoveredRecord<'a> {
    pub name: String,
    pub decoder_name: String,
    pub origin: RecordOrigin,
    /// The record's own version-gating string (common records only).
    pub versions: &'a str,
    pub fields: &'a [Field],
}

/// Type name of an inline record declared with base type `base`.
pub fn inline_record_name(message: &str, base: &str) -> String {
    format!("{message}{}", capitalize(base))
}

pub fn message_decoder_name(message: &str) -> String {
    format!("Read{message}")
}

/// Decoder of a common or inline record.
pub fn record_decoder_name(record: &str) -> String {
    format!("New{}", capitalize(record))
}

/// Depth-tracking twin of a decoder: `NewNode` → `NewNodeAtDepth`.
pub fn depth_decoder_name(decoder_name: &str) -> String {
    format!("{decoder_name}AtDepth")
}

/// Walk `message` and return every record to emit, in emission order.
pub fn discover_records(message: &Message) -> Result<Vec<DiscoveredRecord<'_>>, CompileError> {
    let mut walker = Walker {
        message: &message.name,
        records: Vec::new(),
        seen: HashSet::new(),
    };

    walker.register(DiscoveredRecord {
        name: message.name.clone(),
        decoder_name: message_decoder_name(&message.name),
        origin: RecordOrigin::Message,
        versions: "",
        fields: &message.fields,
    })?;
    walker.visit_fields(&message.name, &message.fields)?;

    for common in &message.common_records {
        walker.register(DiscoveredRecord {
            name: common.name.clone(),
            decoder_name: record_decoder_name(&common.name),
            origin: RecordOrigin::Common,
            versions: &common.versions,
            fields: &common.fields,
        })?;
        walker.visit_fields(&common.name, &common.fields)?;
    }

    Ok(walker.records)
}

struct Walker<'a> {
    message: &'a str,
    records: Vec<DiscoveredRecord<'a>>,
    seen: HashSet<String>,
}

impl<'a> Walker<'a> {
    fn register(&mut self, record: DiscoveredRecord<'a>) -> Result<(), CompileError> {
        if !self.seen.insert(record.name.clone()) {
            return Err(CompileError::DuplicateRecord {
                message: self.message.to_string(),
                name: record.name,
            });
        }
        self.records.push(record);
        Ok(())
    }

    fn visit_fields(&mut self, parent: &str, fields: &'a [Field]) -> Result<(), CompileError> {
        for field in fields.iter().filter(|f| f.is_inline_record()) {
            let ty = TypeExpr::parse(&field.type_name)
                .map_err(|e| CompileError::from_schema(parent, &field.name, e))?;
            let BaseKind::Record(base) = &ty.base else {
                // Nested fields on a primitive type cannot be represented.
                return Err(CompileError::from_schema(
                    parent,
                    &field.name,
                    SchemaError::UnrecognizedType(field.type_name.clone()),
                ));
            };

            let name = inline_record_name(self.message, base);
            self.register(DiscoveredRecord {
                name: name.clone(),
                decoder_name: record_decoder_name(&name),
                origin: RecordOrigin::Inline {
                    parent: parent.to_string(),
                    field: field.name.clone(),
                },
                versions: "",
                fields: &field.fields,
            })?;
            self.visit_fields(&name, &field.fields)?;
        }
        Ok(())
    }
}
