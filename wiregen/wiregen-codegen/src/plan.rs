//! Decode-plan synthesis.
//!
//! Turns the discovered record list into a [`UnitPlan`]: every field gets a
//! resolved [`DecodeRule`], an optional version guard and a validated
//! default. Both the emitter and the interpreter consume this plan, so the
//! two can never disagree about what a field means.

use std::collections::{HashMap, HashSet};

use wiregen_core::{
    BaseKind, CompileError, DefaultLiteral, Field, Message, PrimitiveKind, SchemaError, TypeExpr,
    VersionPredicate, capitalize,
};

use crate::deps::{FacilitySet, collect_facilities};
use crate::names::{check_field_ident, check_unit_items};
use crate::discovery::{
    DiscoveredRecord, RecordOrigin, depth_decoder_name, discover_records, inline_record_name,
    record_decoder_name,
};

/// How one value (a scalar field or one array element) is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodeRule {
    Primitive(PrimitiveKind),
    /// Delegate to another record's decoder.
    Record {
        type_name: String,
        decoder_name: String,
    },
}

impl DecodeRule {
    /// Rust type of one decoded value, spelled so that no record name can
    /// shadow it.
    pub fn rust_type(&self) -> &str {
        match self {
            DecodeRule::Primitive(kind) => match kind {
                PrimitiveKind::Int8 => "i8",
                PrimitiveKind::Int16 => "i16",
                PrimitiveKind::Int32 => "i32",
                PrimitiveKind::Int64 => "i64",
                PrimitiveKind::Uuid => "[u8; 16]",
                PrimitiveKind::String => "::std::string::String",
                PrimitiveKind::Bytes => "::std::vec::Vec<u8>",
            },
            DecodeRule::Record { type_name, .. } => type_name,
        }
    }

    /// Schema spelling of the rule's kind.
    pub fn kind_name(&self) -> &str {
        match self {
            DecodeRule::Primitive(kind) => kind.name(),
            DecodeRule::Record { type_name, .. } => type_name,
        }
    }

    pub fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            DecodeRule::Primitive(kind) => kind.integer_range(),
            DecodeRule::Record { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    /// Name as declared in the schema.
    pub name: String,
    /// Emitted (capitalized) name.
    pub ident: String,
    pub is_array: bool,
    pub rule: DecodeRule,
    /// `None` when the field is read in every version.
    pub guard: Option<VersionPredicate>,
    /// Validated against `rule`; only meaningful when `guard` is set.
    pub default: DefaultLiteral,
    pub about: Option<String>,
}

impl FieldPlan {
    /// Rust type of the emitted struct member.
    pub fn rust_type(&self) -> String {
        if self.is_array {
            format!("::std::vec::Vec<{}>", self.rule.rust_type())
        } else {
            self.rule.rust_type().to_string()
        }
    }

    /// Predicate that actually gates the read. A minimum of zero or less
    /// gates nothing: the field is read for every version value.
    pub fn read_guard(&self) -> Option<VersionPredicate> {
        self.guard.filter(|guard| !guard.is_unconditional())
    }

    /// Whether the field is read for `version`.
    pub fn is_present(&self, version: i16) -> bool {
        self.read_guard().is_none_or(|guard| guard.matches(version))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPlan {
    pub name: String,
    pub decoder_name: String,
    pub origin: RecordOrigin,
    /// Set when the record can reach itself through array fields. Its
    /// decoder then delegates to this depth-tracking function.
    pub depth_decoder: Option<String>,
    /// Declared version range of a common record. Documented, never gating.
    pub versions: Option<VersionPredicate>,
    pub fields: Vec<FieldPlan>,
}

/// Everything needed to emit or interpret one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPlan {
    pub message_name: String,
    pub message_type: String,
    /// Emission order; the message record is always first.
    pub records: Vec<RecordPlan>,
    pub facilities: FacilitySet,
}

impl UnitPlan {
    /// The message record.
    pub fn entry(&self) -> &RecordPlan {
        &self.records[0]
    }

    pub fn record(&self, name: &str) -> Option<&RecordPlan> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// Resolve every record of `message` into a [`UnitPlan`].
pub fn build_unit_plan(message: &Message) -> Result<UnitPlan, CompileError> {
    let discovered = discover_records(message)?;

    let commons: HashMap<&str, &DiscoveredRecord<'_>> = discovered
        .iter()
        .filter(|r| r.origin == RecordOrigin::Common)
        .map(|r| (r.name.as_str(), r))
        .collect();

    let mut records = discovered
        .iter()
        .map(|record| plan_record(&message.name, record, &commons))
        .collect::<Result<Vec<_>, _>>()?;

    reject_recursive_records(&records)?;
    mark_depth_decoders(&mut records);
    let facilities = collect_facilities(&records);
    check_unit_items(&records, facilities)?;

    Ok(UnitPlan {
        message_name: message.name.clone(),
        message_type: message.message_type.clone(),
        records,
        facilities,
    })
}

fn plan_record(
    message_name: &str,
    record: &DiscoveredRecord<'_>,
    commons: &HashMap<&str, &DiscoveredRecord<'_>>,
) -> Result<RecordPlan, CompileError> {
    let versions = match record.origin {
        RecordOrigin::Common => VersionPredicate::parse(record.versions).map_err(|_| {
            CompileError::InvalidRecordVersions {
                record: record.name.clone(),
                versions: record.versions.to_string(),
            }
        })?,
        _ => None,
    };

    let mut idents = HashSet::new();
    let mut fields = Vec::with_capacity(record.fields.len());
    for field in record.fields {
        let planned = plan_field(message_name, &record.name, field, commons)?;
        check_field_ident(&record.name, &planned)?;
        if !idents.insert(planned.ident.clone()) {
            return Err(CompileError::DuplicateField {
                record: record.name.clone(),
                field: field.name.clone(),
            });
        }
        fields.push(planned);
    }

    Ok(RecordPlan {
        name: record.name.clone(),
        decoder_name: record.decoder_name.clone(),
        origin: record.origin.clone(),
        depth_decoder: None,
        versions,
        fields,
    })
}

fn plan_field(
    message_name: &str,
    record_name: &str,
    field: &Field,
    commons: &HashMap<&str, &DiscoveredRecord<'_>>,
) -> Result<FieldPlan, CompileError> {
    let context = |err: SchemaError| CompileError::from_schema(record_name, &field.name, err);
    let unrecognized = || context(SchemaError::UnrecognizedType(field.type_name.clone()));

    let ty = TypeExpr::parse(&field.type_name).map_err(context)?;
    let guard = VersionPredicate::parse(&field.versions).map_err(context)?;

    let rule = match (&ty.base, field.is_inline_record()) {
        (BaseKind::Primitive(kind), false) => DecodeRule::Primitive(*kind),
        (BaseKind::Primitive(_), true) => return Err(unrecognized()),
        (BaseKind::Record(base), true) => {
            let type_name = inline_record_name(message_name, base);
            DecodeRule::Record {
                decoder_name: record_decoder_name(&type_name),
                type_name,
            }
        }
        (BaseKind::Record(base), false) => match commons.get(base.as_str()) {
            Some(common) => DecodeRule::Record {
                type_name: common.name.clone(),
                decoder_name: common.decoder_name.clone(),
            },
            None => return Err(unrecognized()),
        },
    };

    let default = validate_default(record_name, field, ty.is_array, &rule)?;

    Ok(FieldPlan {
        name: field.name.clone(),
        ident: capitalize(&field.name),
        is_array: ty.is_array,
        rule,
        guard,
        default,
        about: field.about.clone(),
    })
}

/// Strings fit only string fields; integers only integer fields of a width
/// that can hold them. Arrays and records take no default.
fn validate_default(
    record_name: &str,
    field: &Field,
    is_array: bool,
    rule: &DecodeRule,
) -> Result<DefaultLiteral, CompileError> {
    let unsupported = |detail: String| CompileError::UnsupportedDefaultValue {
        record: record_name.to_string(),
        field: field.name.clone(),
        detail,
    };
    let mismatch = || {
        unsupported(format!(
            "{} is not valid for type '{}'",
            field.default.kind_name(),
            field.type_name
        ))
    };

    match &field.default {
        DefaultLiteral::Absent => Ok(DefaultLiteral::Absent),
        _ if is_array => Err(mismatch()),
        DefaultLiteral::String(_) if *rule == DecodeRule::Primitive(PrimitiveKind::String) => {
            Ok(field.default.clone())
        }
        DefaultLiteral::String(_) => Err(mismatch()),
        DefaultLiteral::Int(value) => match rule.integer_range() {
            Some((lo, hi)) if (lo..=hi).contains(value) => Ok(field.default.clone()),
            Some(_) => Err(unsupported(format!(
                "{value} does not fit in {}",
                rule.kind_name()
            ))),
            None => Err(mismatch()),
        },
    }
}

/// A record reachable from itself through scalar record fields would need
/// infinite storage. Array fields break the cycle.
fn reject_recursive_records(records: &[RecordPlan]) -> Result<(), CompileError> {
    let by_name = index_records(records);
    for root in records {
        if let Some(field) = self_reference(root, &by_name, false) {
            return Err(CompileError::RecursiveRecord {
                record: root.name.clone(),
                field: field.ident.clone(),
            });
        }
    }
    Ok(())
}

/// Records that reach themselves through arrays decode input of unbounded
/// depth, so their decoders count nesting levels.
fn mark_depth_decoders(records: &mut [RecordPlan]) {
    let depth_decoders: Vec<Option<String>> = {
        let by_name = index_records(records);
        records
            .iter()
            .map(|record| {
                self_reference(record, &by_name, true)
                    .map(|_| depth_decoder_name(&record.decoder_name))
            })
            .collect()
    };

    for (record, depth_decoder) in records.iter_mut().zip(depth_decoders) {
        record.depth_decoder = depth_decoder;
    }
}

fn index_records(records: &[RecordPlan]) -> HashMap<&str, &RecordPlan> {
    records.iter().map(|r| (r.name.as_str(), r)).collect()
}

/// Field through which `root` reaches itself again, if any.
fn self_reference<'a>(
    root: &RecordPlan,
    by_name: &HashMap<&str, &'a RecordPlan>,
    through_arrays: bool,
) -> Option<&'a FieldPlan> {
    let mut stack: Vec<&str> = vec![root.name.as_str()];
    let mut visited: HashSet<&str> = HashSet::new();
    while let Some(current) = stack.pop() {
        let Some(record) = by_name.get(current).copied() else {
            continue;
        };
        for field in record.fields.iter() {
            if field.is_array && !through_arrays {
                continue;
            }
            let DecodeRule::Record { type_name, .. } = &field.rule else {
                continue;
            };
            if type_name == &root.name {
                return Some(field);
            }
            if visited.insert(type_name.as_str()) {
                stack.push(type_name.as_str());
            }
        }
    }
    None
}
