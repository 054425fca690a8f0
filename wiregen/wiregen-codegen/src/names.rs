//! Identifier checks for the items a unit emits.

use std::{collections::HashSet, sync::LazyLock};

use wiregen_core::CompileError;

use crate::deps::FacilitySet;
use crate::plan::{FieldPlan, RecordPlan};

///
/// RESERVED_WORDS
/// names that cannot be used for an emitted struct, field or function
///

static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut words = Vec::new();

    // https://doc.rust-lang.org/reference/keywords.html
    words.extend(vec![
        "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
        "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
        "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
        "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
    ]);

    // primitive types, which a struct of the same name would shadow
    words.extend(vec![
        "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32",
        "u64", "u128", "usize", "f32", "f64",
    ]);

    words.into_iter().collect()
});

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(word)
}

/// ASCII identifier that is neither a lone `_` nor a reserved word.
pub fn is_usable_ident(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && word != "_"
        && !is_reserved_word(word)
}

pub(crate) fn check_field_ident(record: &str, field: &FieldPlan) -> Result<(), CompileError> {
    if is_usable_ident(&field.ident) {
        return Ok(());
    }
    Err(CompileError::UnusableFieldName {
        record: record.to_string(),
        field: field.name.clone(),
        ident: field.ident.clone(),
    })
}

/// Every struct and function a unit emits must be a usable identifier and
/// distinct from the other items and from the runtime imports.
pub(crate) fn check_unit_items(
    records: &[RecordPlan],
    facilities: FacilitySet,
) -> Result<(), CompileError> {
    let mut taken: HashSet<&str> = facilities.iter().map(|f| f.runtime_item()).collect();

    for record in records {
        let items = [
            Some(record.name.as_str()),
            Some(record.decoder_name.as_str()),
            record.depth_decoder.as_deref(),
        ];
        for item in items.into_iter().flatten() {
            if !is_usable_ident(item) || !taken.insert(item) {
                return Err(CompileError::UnusableRecordName {
                    record: record.name.clone(),
                    item: item.to_string(),
                });
            }
        }
    }
    Ok(())
}
