//! Runtime facilities a generated unit depends on.
//!
//! A unit imports only what its fields actually use, so an all-integer
//! message pulls in nothing but [`Buf`](bytes::Buf).

use std::fmt::{Display, Formatter};

use wiregen_core::PrimitiveKind;

use crate::plan::{DecodeRule, FieldPlan, RecordPlan};

/// One importable runtime facility. Ordering is the import order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facility {
    /// Big-endian fixed-width reads (`bytes::Buf`).
    BigEndian,
    /// Constructing [`DecodeError`](wiregen_runtime::DecodeError) values.
    ErrorConstruction,
    /// Unsigned varint length and count prefixes.
    LengthDelimited,
}

impl Facility {
    pub const ALL: [Facility; 3] = [
        Facility::BigEndian,
        Facility::ErrorConstruction,
        Facility::LengthDelimited,
    ];

    /// Item re-exported by `wiregen-runtime` that provides this facility.
    pub fn runtime_item(&self) -> &'static str {
        match self {
            Facility::BigEndian => "Buf",
            Facility::ErrorConstruction => "DecodeError",
            Facility::LengthDelimited => "read_uvarint",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl Display for Facility {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.runtime_item())
    }
}

/// Small ordered set of [`Facility`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FacilitySet(u8);

impl FacilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, facility: Facility) {
        self.0 |= facility.bit();
    }

    pub fn union(self, other: FacilitySet) -> FacilitySet {
        FacilitySet(self.0 | other.0)
    }

    pub fn contains(&self, facility: Facility) -> bool {
        self.0 & facility.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in import order.
    pub fn iter(&self) -> impl Iterator<Item = Facility> + '_ {
        Facility::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Facility> for FacilitySet {
    fn from_iter<I: IntoIterator<Item = Facility>>(iter: I) -> Self {
        let mut set = FacilitySet::new();
        for facility in iter {
            set.insert(facility);
        }
        set
    }
}

fn rule_facilities(rule: &DecodeRule) -> FacilitySet {
    use Facility::*;
    match rule {
        DecodeRule::Primitive(PrimitiveKind::String) => {
            [BigEndian, ErrorConstruction].into_iter().collect()
        }
        DecodeRule::Primitive(PrimitiveKind::Bytes) => Facility::ALL.into_iter().collect(),
        DecodeRule::Primitive(_) => [BigEndian].into_iter().collect(),
        DecodeRule::Record { .. } => [ErrorConstruction].into_iter().collect(),
    }
}

/// Facilities needed to decode one field.
pub fn field_facilities(field: &FieldPlan) -> FacilitySet {
    let element = rule_facilities(&field.rule);
    if field.is_array {
        element.union([Facility::LengthDelimited, Facility::ErrorConstruction].into_iter().collect())
    } else {
        element
    }
}

/// Union over every field of every record, inline records included.
pub fn collect_facilities(records: &[RecordPlan]) -> FacilitySet {
    records
        .iter()
        .flat_map(|record| record.fields.iter())
        .map(field_facilities)
        .fold(FacilitySet::new(), FacilitySet::union)
}

#[cfg(test)]
mod tests {
    use wiregen_core::DefaultLiteral;

    use super::*;

    fn field(kind: PrimitiveKind, is_array: bool) -> FieldPlan {
        record_field(DecodeRule::Primitive(kind), is_array)
    }

    fn record_field(rule: DecodeRule, is_array: bool) -> FieldPlan {
        FieldPlan {
            name: "f".to_string(),
            ident: "F".to_string(),
            is_array,
            rule,
            guard: None,
            default: DefaultLiteral::Absent,
            about: None,
        }
    }

    fn items(set: FacilitySet) -> Vec<&'static str> {
        set.iter().map(|f| f.runtime_item()).collect()
    }

    #[test]
    fn integers_need_only_big_endian() {
        assert_eq!(items(field_facilities(&field(PrimitiveKind::Int64, false))), vec!["Buf"]);
        assert_eq!(items(field_facilities(&field(PrimitiveKind::Uuid, false))), vec!["Buf"]);
    }

    #[test]
    fn string_needs_error_construction() {
        assert_eq!(
            items(field_facilities(&field(PrimitiveKind::String, false))),
            vec!["Buf", "DecodeError"]
        );
    }

    #[test]
    fn array_adds_length_prefix() {
        assert_eq!(
            items(field_facilities(&field(PrimitiveKind::Int32, true))),
            vec!["Buf", "DecodeError", "read_uvarint"]
        );
        let records = record_field(
            DecodeRule::Record {
                type_name: "T".to_string(),
                decoder_name: "NewT".to_string(),
            },
            true,
        );
        assert_eq!(
            items(field_facilities(&records)),
            vec!["DecodeError", "read_uvarint"]
        );
    }

    #[test]
    fn set_operations() {
        let mut set = FacilitySet::new();
        assert!(set.is_empty());
        set.insert(Facility::LengthDelimited);
        set.insert(Facility::LengthDelimited);
        assert_eq!(set.len(), 1);
        assert!(set.contains(Facility::LengthDelimited));
        assert!(!set.contains(Facility::BigEndian));
    }
}
