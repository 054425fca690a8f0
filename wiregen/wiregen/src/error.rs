//! Error types for the schema-directory generator.

use std::path::PathBuf;

use wiregen_core::CompileError;
use wiregen_json::LoadError;

/// Errors produced by [`Generator`](crate::Generator). Every variant names
/// the file it concerns.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Reading an input directory or schema, or writing an output file.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not a valid schema document.
    #[error("problem loading schema '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// The schema loaded but could not be compiled.
    #[error("problem compiling schema '{}': {source}", path.display())]
    Compile {
        path: PathBuf,
        #[source]
        source: CompileError,
    },

    /// Two schemas map to the same output file.
    #[error(
        "'{}' and '{}' both generate '{file_name}'",
        first.display(),
        second.display()
    )]
    DuplicateOutput {
        file_name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
