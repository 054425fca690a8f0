//! Errors raised by generated decode routines at runtime.

/// Reason an unsigned varint prefix could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VarintError {
    /// The continuation bit was still set after the maximum number of bytes,
    /// or the final byte carried bits beyond 32.
    #[error("varint exceeds 32 bits")]
    TooLong,

    /// Input ended while the continuation bit was set.
    #[error("input ended after {read} varint byte(s)")]
    Truncated { read: usize },
}

/// Error returned by every generated decode routine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A length or count prefix carried the null sentinel on a non-nullable
    /// field.
    #[error("non-nullable field '{field}' was serialized as null")]
    UnexpectedNull { field: String },

    /// A length prefix exceeds what its encoding allows.
    #[error("field '{field}' has invalid length {length}")]
    InvalidLength { field: String, length: u64 },

    /// A varint length or count prefix is malformed.
    #[error("problem reading unsigned varint: {0}")]
    VarintReadFailure(#[from] VarintError),

    /// The buffer ended before a fixed-width value or payload was complete.
    #[error("unexpected end of input: needed {requested} byte(s), {available} available")]
    UnexpectedEof { requested: usize, available: usize },

    /// Self-referencing records nested deeper than the decoder allows.
    #[error("record nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    /// A nested record failed to decode.
    #[error("problem decoding field '{field}' of '{record}': {source}")]
    Nested {
        record: String,
        field: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub fn unexpected_null(field: impl Into<String>) -> Self {
        Self::UnexpectedNull {
            field: field.into(),
        }
    }

    pub fn invalid_length(field: impl Into<String>, length: impl Into<u64>) -> Self {
        Self::InvalidLength {
            field: field.into(),
            length: length.into(),
        }
    }

    pub fn eof(requested: usize, available: usize) -> Self {
        Self::UnexpectedEof {
            requested,
            available,
        }
    }

    pub fn nesting_too_deep(limit: usize) -> Self {
        Self::NestingTooDeep { limit }
    }

    /// Wrap `source` with the referencing field and the record that owns it.
    pub fn nested(record: impl Into<String>, field: impl Into<String>, source: DecodeError) -> Self {
        Self::Nested {
            record: record.into(),
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Innermost error, skipping every [`DecodeError::Nested`] wrapper.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<bytes::TryGetError> for DecodeError {
    fn from(value: bytes::TryGetError) -> Self {
        Self::eof(value.requested, value.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_display_carries_context() {
        let err = DecodeError::nested(
            "FetchRequest",
            "Topics",
            DecodeError::unexpected_null("Partitions"),
        );
        let text = err.to_string();
        assert!(text.contains("'Topics'"));
        assert!(text.contains("'FetchRequest'"));
        assert!(text.contains("'Partitions'"));
    }

    #[test]
    fn root_cause_unwraps_every_level() {
        let err = DecodeError::nested(
            "A",
            "B",
            DecodeError::nested("AB", "C", DecodeError::eof(4, 1)),
        );
        assert_eq!(err.root_cause(), &DecodeError::eof(4, 1));
    }
}
