//! Schema model and leaf grammars shared by every `wiregen` crate.
//!
//! This crate holds the read-only representation of one message schema
//! ([`Message`] / [`Field`] / [`CommonRecord`]), the two small grammars used
//! to interpret field attributes ([`TypeExpr`] and [`VersionPredicate`]) and
//! the dynamic [`Value`] produced when a compiled plan is interpreted.

mod error;
mod message;
mod type_expr;
mod value;
mod version;

pub use error::{CompileError, SchemaError};
pub use message::{CommonRecord, DefaultLiteral, Field, Message, capitalize};
pub use type_expr::{BaseKind, PrimitiveKind, TypeExpr};
pub use value::Value;
pub use version::VersionPredicate;
