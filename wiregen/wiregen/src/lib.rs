mod error;
mod generator;

pub use error::GeneratorError;
pub use generator::{FailurePolicy, GenerateReport, Generator, GeneratorBuilder, UnitFailure};
pub use wiregen_codegen as codegen;
pub use wiregen_core as core;
pub use wiregen_json as json;
