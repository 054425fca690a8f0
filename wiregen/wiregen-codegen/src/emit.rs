//! Rust source emission.
//!
//! A unit renders as:
//!
//! ```text
//! // Code generated by wiregen from `Foo`. DO NOT EDIT.
//! // module: <module_name>
//!
//! use <runtime>::Buf;            // only the facilities in use
//!
//! pub struct Foo { .. }          // one struct + decoder per record,
//! pub fn ReadFoo(..) { .. }      // in discovery order
//! ```
//!
//! The output carries no inner attributes so it can be pulled in with
//! `include!`. Every decoder takes `(buf: &mut &[u8], version: i16)` and
//! advances `buf` past exactly the bytes it consumed. A record that contains
//! itself through an array also gets a private `<Decoder>AtDepth` twin that
//! fails with `DecodeError::NestingTooDeep` past `MAX_NESTING_DEPTH` levels.
//! Standard library types are spelled by full path, so a record named after
//! a prelude type does not shadow them.

use wiregen_core::{DefaultLiteral, PrimitiveKind, VersionPredicate};

use crate::CompileOptions;
use crate::discovery::RecordOrigin;
use crate::plan::{DecodeRule, FieldPlan, RecordPlan, UnitPlan};
use crate::source::SourceWriter;

pub fn render_unit(plan: &UnitPlan, options: &CompileOptions) -> String {
    let mut w = SourceWriter::new();
    w.line(format_args!(
        "// Code generated by wiregen from `{}`. DO NOT EDIT.",
        plan.message_name
    ));
    w.line(format_args!("// module: {}", options.module_name));

    if !plan.facilities.is_empty() {
        w.blank();
        for facility in plan.facilities.iter() {
            w.line(format_args!(
                "use {}::{};",
                options.runtime_crate,
                facility.runtime_item()
            ));
        }
    }

    for record in &plan.records {
        w.blank();
        render_struct(&mut w, plan, record);
        w.blank();
        render_decoder(&mut w, plan, record, &options.runtime_crate);
    }

    w.finish()
}

fn render_struct(w: &mut SourceWriter, plan: &UnitPlan, record: &RecordPlan) {
    match &record.origin {
        RecordOrigin::Message if plan.message_type.is_empty() => {
            w.line(format_args!("/// `{}` message.", record.name));
        }
        RecordOrigin::Message => {
            w.line(format_args!(
                "/// `{}` message ({}).",
                record.name, plan.message_type
            ));
        }
        RecordOrigin::Common => {
            w.line(format_args!("/// Common record `{}`.", record.name));
            if let Some(versions) = record.versions {
                w.line("///");
                w.line(format_args!("/// Declared for versions `{versions}`."));
            }
        }
        RecordOrigin::Inline { parent, field } => {
            w.line(format_args!(
                "/// Inline record declared by field `{field}` of `{parent}`."
            ));
        }
    }
    w.line("#[allow(non_snake_case, non_camel_case_types)]");
    w.line("#[derive(Debug, Clone, Default, PartialEq, Eq)]");
    w.open(format_args!("pub struct {} {{", record.name));
    for field in &record.fields {
        if let Some(about) = &field.about {
            for line in about.lines() {
                let doc = format!("/// {line}");
                w.line(doc.trim_end());
            }
        }
        w.line(format_args!("pub {}: {},", field.ident, field.rust_type()));
    }
    w.close("}");
}

fn render_decoder(w: &mut SourceWriter, plan: &UnitPlan, record: &RecordPlan, runtime: &str) {
    let returns = format!("::core::result::Result<{}, {runtime}::DecodeError>", record.name);
    w.line(format_args!(
        "/// Decode `{}` for protocol `version`, advancing `buf` past it.",
        record.name
    ));

    let Some(depth_decoder) = &record.depth_decoder else {
        w.line(DECODER_LINTS);
        w.open(format_args!(
            "pub fn {}(buf: &mut &[u8], version: i16) -> {returns} {{",
            record.decoder_name
        ));
        render_body(w, plan, record);
        w.close("}");
        return;
    };

    w.line("#[allow(non_snake_case)]");
    w.open(format_args!(
        "pub fn {}(buf: &mut &[u8], version: i16) -> {returns} {{",
        record.decoder_name
    ));
    w.line(format_args!("{depth_decoder}(buf, version, 0)"));
    w.close("}");
    w.blank();
    w.line(DECODER_LINTS);
    w.open(format_args!(
        "fn {depth_decoder}(buf: &mut &[u8], version: i16, depth: usize) -> {returns} {{"
    ));
    w.open(format_args!("if depth >= {runtime}::MAX_NESTING_DEPTH {{"));
    w.line(format_args!(
        "return Err({runtime}::DecodeError::nesting_too_deep({runtime}::MAX_NESTING_DEPTH));"
    ));
    w.close("}");
    render_body(w, plan, record);
    w.close("}");
}

const DECODER_LINTS: &str =
    "#[allow(non_snake_case, unused_variables, unused_mut, clippy::field_reassign_with_default)]";

fn render_body(w: &mut SourceWriter, plan: &UnitPlan, record: &RecordPlan) {
    w.line(format_args!(
        "let mut res: {} = ::core::default::Default::default();",
        record.name
    ));
    for field in &record.fields {
        render_field(w, plan, record, field);
    }
    w.line("Ok(res)");
}

fn render_field(w: &mut SourceWriter, plan: &UnitPlan, record: &RecordPlan, field: &FieldPlan) {
    let Some(guard) = field.read_guard() else {
        render_read(w, plan, record, field);
        return;
    };

    w.open(format_args!("if {} {{", guard_condition(&guard)));
    render_read(w, plan, record, field);
    if let Some(fallback) = default_assignment(field) {
        w.reopen("} else {");
        w.line(fallback);
    }
    w.close("}");
}

fn guard_condition(guard: &VersionPredicate) -> String {
    match *guard {
        VersionPredicate::Exact(n) => format!("version == {n}"),
        VersionPredicate::Minimum(n) => format!("version >= {n}"),
        VersionPredicate::Range { lo, hi } => format!("({lo}..={hi}).contains(&version)"),
    }
}

fn default_assignment(field: &FieldPlan) -> Option<String> {
    match &field.default {
        DefaultLiteral::Absent => None,
        DefaultLiteral::String(s) => Some(format!(
            "res.{} = ::std::string::String::from({s:?});",
            field.ident
        )),
        DefaultLiteral::Int(v) => Some(format!("res.{} = {v};", field.ident)),
    }
}

#[derive(Clone, Copy)]
enum Sink {
    Assign,
    Push,
}

fn render_read(w: &mut SourceWriter, plan: &UnitPlan, record: &RecordPlan, field: &FieldPlan) {
    if !field.is_array {
        render_value(w, plan, record, field, Sink::Assign);
        return;
    }

    w.open("{");
    w.line("let count = read_uvarint(buf)?;");
    w.open("if count == 0 {");
    w.line(format_args!(
        "return Err(DecodeError::unexpected_null({:?}));",
        field.ident
    ));
    w.close("}");
    w.open("for _ in 0..count - 1 {");
    render_value(w, plan, record, field, Sink::Push);
    w.close("}");
    w.close("}");
}

fn render_value(
    w: &mut SourceWriter,
    plan: &UnitPlan,
    record: &RecordPlan,
    field: &FieldPlan,
    sink: Sink,
) {
    let ident = &field.ident;
    let store = |expr: &str| match sink {
        Sink::Assign => format!("res.{ident} = {expr};"),
        Sink::Push => format!("res.{ident}.push({expr});"),
    };

    match &field.rule {
        DecodeRule::Primitive(PrimitiveKind::Int8) => w.line(store("buf.try_get_i8()?")),
        DecodeRule::Primitive(PrimitiveKind::Int16) => w.line(store("buf.try_get_i16()?")),
        DecodeRule::Primitive(PrimitiveKind::Int32) => w.line(store("buf.try_get_i32()?")),
        DecodeRule::Primitive(PrimitiveKind::Int64) => w.line(store("buf.try_get_i64()?")),
        DecodeRule::Primitive(PrimitiveKind::Uuid) => {
            w.open("{");
            w.line("let mut uuid = [0u8; 16];");
            w.line("buf.try_copy_to_slice(&mut uuid)?;");
            w.line(store("uuid"));
            w.close("}");
        }
        DecodeRule::Primitive(PrimitiveKind::String) => {
            w.open("{");
            w.line("let len = buf.try_get_u16()?;");
            w.open("if len == 0xFFFF {");
            w.line(format_args!(
                "return Err(DecodeError::unexpected_null({ident:?}));"
            ));
            w.close("}");
            w.open("if len > 0x7FFF {");
            w.line(format_args!(
                "return Err(DecodeError::invalid_length({ident:?}, len));"
            ));
            w.close("}");
            w.line("let len = usize::from(len);");
            render_remaining_check(w);
            w.line("let payload = buf.copy_to_bytes(len);");
            w.line(store(
                "::std::string::String::from_utf8_lossy(&payload).into_owned()",
            ));
            w.close("}");
        }
        DecodeRule::Primitive(PrimitiveKind::Bytes) => {
            w.open("{");
            w.line("let len = read_uvarint(buf)?;");
            w.open("if len == 0 {");
            w.line(format_args!(
                "return Err(DecodeError::unexpected_null({ident:?}));"
            ));
            w.close("}");
            w.line("let len = (len - 1) as usize;");
            render_remaining_check(w);
            w.line(store("buf.copy_to_bytes(len).to_vec()"));
            w.close("}");
        }
        DecodeRule::Record {
            type_name,
            decoder_name,
        } => {
            // Within a self-referencing cycle the depth carries over.
            let callee_depth = plan
                .record(type_name)
                .and_then(|callee| callee.depth_decoder.as_deref());
            let call = match (&record.depth_decoder, callee_depth) {
                (Some(_), Some(callee)) => format!("{callee}(buf, version, depth + 1)"),
                _ => format!("{decoder_name}(buf, version)"),
            };
            w.line(store(&format!(
                "{call}.map_err(|e| DecodeError::nested({:?}, {ident:?}, e))?",
                record.name
            )));
        }
    }
}

fn render_remaining_check(w: &mut SourceWriter) {
    w.open("if buf.remaining() < len {");
    w.line("return Err(DecodeError::eof(len, buf.remaining()));");
    w.close("}");
}
