//! Read-only schema model for one message.
//!
//! Instances are built once by an outer loader (see `wiregen-json`) and
//! consumed entirely by a single compile pass.

/// Top-level message described by one schema document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Type category (`request`, `response`, `header`, ...). Carried through
    /// untouched; decoding does not depend on it.
    pub message_type: String,
    pub name: String,
    /// Version range the message is valid for. Not consumed by the compiler.
    pub valid_versions: String,
    /// Versions using the flexible encoding. Not consumed by the compiler.
    pub flexible_versions: String,
    pub fields: Vec<Field>,
    pub common_records: Vec<CommonRecord>,
}

/// A named record declared at message level and referenced by name from any
/// field in the unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommonRecord {
    pub name: String,
    pub versions: String,
    pub fields: Vec<Field>,
}

/// One field of a message, common record or inline record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field {
    pub name: String,
    /// Raw type expression, e.g. `int32`, `[]string`, `[]Topic`.
    pub type_name: String,
    /// Raw version-gating string, e.g. `0+`, `3`, `1-4`.
    pub versions: String,
    pub about: Option<String>,
    pub default: DefaultLiteral,
    pub ignorable: Option<bool>,
    /// Non-empty iff this field declares an inline record.
    pub fields: Vec<Field>,
}

impl Field {
    /// Build a plain field without description, default or nested fields.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        versions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            versions: versions.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, default: DefaultLiteral) -> Self {
        self.default = default;
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn is_inline_record(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// Default value assigned when a field's version predicate does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultLiteral {
    #[default]
    Absent,
    String(String),
    Int(i64),
}

impl DefaultLiteral {
    pub fn is_absent(&self) -> bool {
        matches!(self, DefaultLiteral::Absent)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            DefaultLiteral::Absent => "absent",
            DefaultLiteral::String(_) => "string literal",
            DefaultLiteral::Int(_) => "integer literal",
        }
    }
}

/// Uppercase the first character, leaving the rest untouched.
///
/// Used for every externally visible name the compiler derives from a schema.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
