//! Error types for schema interpretation and compilation.

/// Failure to interpret a single field attribute, before any record context
/// is known.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The type expression names nothing the compiler can resolve.
    #[error("unrecognized type '{0}'")]
    UnrecognizedType(String),

    /// The version-gating string matches none of `n`, `n+`, `lo-hi`.
    #[error("invalid version predicate '{0}'")]
    InvalidVersions(String),
}

/// Error returned when compiling one message schema.
///
/// Every variant names the record (and field, where there is one) that
/// caused compilation of the unit to stop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A field's type is neither a primitive nor a declared record.
    #[error("unrecognized type '{type_name}' for field '{field}' of '{record}'")]
    UnrecognizedType {
        record: String,
        field: String,
        type_name: String,
    },

    /// A default literal does not fit the field's resolved kind.
    #[error("unsupported default value for field '{field}' of '{record}': {detail}")]
    UnsupportedDefaultValue {
        record: String,
        field: String,
        detail: String,
    },

    /// A field's version-gating string could not be parsed.
    #[error("invalid version predicate '{versions}' for field '{field}' of '{record}'")]
    InvalidVersions {
        record: String,
        field: String,
        versions: String,
    },

    /// A common record's own version-gating string could not be parsed.
    #[error("invalid version predicate '{versions}' on record '{record}'")]
    InvalidRecordVersions { record: String, versions: String },

    /// Two fields of one record map to the same emitted name.
    #[error("duplicate field '{field}' in '{record}'")]
    DuplicateField { record: String, field: String },

    /// Two records of one unit were assigned the same name.
    #[error("record '{name}' is declared more than once in '{message}'")]
    DuplicateRecord { message: String, name: String },

    /// A record contains itself through non-array fields and would have
    /// infinite size.
    #[error("record '{record}' contains itself through field '{field}'")]
    RecursiveRecord { record: String, field: String },

    /// A field's emitted name is not a usable Rust identifier.
    #[error("field '{field}' of '{record}' maps to '{ident}', which is not a usable identifier")]
    UnusableFieldName {
        record: String,
        field: String,
        ident: String,
    },

    /// A record needs an item name that is reserved or already taken in the
    /// unit.
    #[error("record '{record}' needs item '{item}', which is reserved or already defined")]
    UnusableRecordName { record: String, item: String },
}

impl CompileError {
    /// Attach record and field context to a field-level [`SchemaError`].
    pub fn from_schema(record: &str, field: &str, err: SchemaError) -> Self {
        match err {
            SchemaError::UnrecognizedType(type_name) => CompileError::UnrecognizedType {
                record: record.to_string(),
                field: field.to_string(),
                type_name,
            },
            SchemaError::InvalidVersions(versions) => CompileError::InvalidVersions {
                record: record.to_string(),
                field: field.to_string(),
                versions,
            },
        }
    }
}
