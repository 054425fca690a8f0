//! The `wiregen` compiler proper.
//!
//! Key components:
//! - [`discovery`] — flattens a message's record tree into an ordered list
//! - [`plan`] — resolves types, predicates and defaults into a [`UnitPlan`]
//! - [`deps`] — minimal set of runtime facilities a unit needs
//! - [`names`] — identifier checks for emitted structs and functions
//! - [`emit`] — renders a [`UnitPlan`] as Rust source
//! - [`interpret`] — decodes bytes directly from a [`UnitPlan`]
//!
//! # Pipeline
//!
//! ```text
//! Message
//!   └─ discover_records   – flat, uniquely named record list
//!       └─ build_unit_plan – per-field decode rules + facilities
//!           ├─ render_unit   – generated Rust source
//!           └─ decode_message – Value (no code generation)
//! ```

pub mod deps;
pub mod discovery;
pub mod emit;
mod format;
pub mod interpret;
pub mod names;
pub mod plan;
mod source;

use convert_case::{Case, Casing};
use wiregen_core::{CompileError, Message};

pub use deps::{Facility, FacilitySet, collect_facilities};
pub use discovery::{DiscoveredRecord, RecordOrigin, discover_records};
pub use names::is_usable_ident;
pub use emit::render_unit;
pub use interpret::{Decoded, decode_message, decode_record};
pub use plan::{DecodeRule, FieldPlan, RecordPlan, UnitPlan, build_unit_plan};

/// Crate path generated code imports its facilities from, unless overridden.
pub const DEFAULT_RUNTIME_CRATE: &str = "wiregen_runtime";

/// Settings that shape the emitted source but not the decode semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Name written into the module-declaration header of every unit.
    pub module_name: String,
    /// Path generated code uses to reach `wiregen-runtime`.
    pub runtime_crate: String,
}

impl CompileOptions {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }

    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new("messages")
    }
}

/// Generated source for one message, ready to be written by the caller.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub message_name: String,
    /// Suggested file name: snake_case message name plus `.rs`.
    pub file_name: String,
    pub source: String,
    pub plan: UnitPlan,
}

/// Compile one message schema into generated source.
///
/// Any schema inconsistency aborts the whole unit; no partial output is
/// returned.
pub fn compile_message(
    message: &Message,
    options: &CompileOptions,
) -> Result<CompiledUnit, CompileError> {
    let plan = build_unit_plan(message)?;
    let source = render_unit(&plan, options);
    Ok(CompiledUnit {
        message_name: message.name.clone(),
        file_name: output_file_name(&message.name),
        source,
        plan,
    })
}

/// `FetchRequest` → `fetch_request.rs`
pub fn output_file_name(message_name: &str) -> String {
    format!("{}.rs", message_name.to_case(Case::Snake))
}
