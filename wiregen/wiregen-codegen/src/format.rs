use std::fmt::{Display, Formatter, Result};

use wiregen_core::DefaultLiteral;

use crate::discovery::RecordOrigin;
use crate::plan::{FieldPlan, RecordPlan, UnitPlan};

/// Human-readable listing of a plan, one record per block:
///
/// ```text
/// message FooRequest (request)
/// imports: Buf, DecodeError, read_uvarint
///
/// record FooRequest -> ReadFooRequest
///     Topics: []FooRequestTopic  versions 0+
///     X: int32  versions 1  default 5
/// ```
impl Display for UnitPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.message_type.is_empty() {
            writeln!(f, "message {}", self.message_name)?;
        } else {
            writeln!(f, "message {} ({})", self.message_name, self.message_type)?;
        }

        let imports: Vec<String> = self.facilities.iter().map(|x| x.to_string()).collect();
        if imports.is_empty() {
            writeln!(f, "imports: none")?;
        } else {
            writeln!(f, "imports: {}", imports.join(", "))?;
        }

        for record in &self.records {
            writeln!(f)?;
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

impl Display for RecordPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "record {}", self.name)?;
        match &self.origin {
            RecordOrigin::Message => {}
            RecordOrigin::Common => match self.versions {
                Some(versions) => write!(f, " (common, versions {versions})")?,
                None => write!(f, " (common)")?,
            },
            RecordOrigin::Inline { parent, field } => write!(f, " (inline, {parent}.{field})")?,
        }
        writeln!(f, " -> {}", self.decoder_name)?;

        for field in &self.fields {
            writeln!(f, "    {field}")?;
        }
        Ok(())
    }
}

impl Display for FieldPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let array = if self.is_array { "[]" } else { "" };
        write!(f, "{}: {array}{}", self.ident, self.rule.kind_name())?;
        match self.guard {
            Some(guard) => write!(f, "  versions {guard}")?,
            None => write!(f, "  always")?,
        }
        match &self.default {
            DefaultLiteral::Absent => Ok(()),
            DefaultLiteral::String(s) => write!(f, "  default {s:?}"),
            DefaultLiteral::Int(v) => write!(f, "  default {v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiregen_core::{CommonRecord, Field, Message};

    use crate::plan::build_unit_plan;

    use super::*;

    #[test]
    fn lists_every_record() {
        let message = Message {
            message_type: "request".to_string(),
            name: "Foo".to_string(),
            fields: vec![
                Field::new("x", "int32", "1").with_default(DefaultLiteral::Int(5)),
                Field::new("parts", "[]Part", "0+")
                    .with_fields(vec![Field::new("id", "int8", "")]),
                Field::new("owner", "Owner", "0+"),
            ],
            common_records: vec![CommonRecord {
                name: "Owner".to_string(),
                versions: "2+".to_string(),
                fields: vec![Field::new("name", "string", "0+")],
            }],
            ..Message::default()
        };
        let text = build_unit_plan(&message).unwrap().to_string();
        let expected = "\
message Foo (request)
imports: Buf, DecodeError, read_uvarint

record Foo -> ReadFoo
    X: int32  versions 1  default 5
    Parts: []FooPart  versions 0+
    Owner: Owner  versions 0+

record FooPart (inline, Foo.parts) -> NewFooPart
    Id: int8  always

record Owner (common, versions 2+) -> NewOwner
    Name: string  versions 0+
";
        assert_eq!(text, expected);
    }
}
