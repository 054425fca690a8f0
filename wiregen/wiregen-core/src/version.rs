//! Version-gating predicates.
//!
//! Three forms are recognized, tried in this order, each against the whole
//! (trimmed) string:
//!
//! | Form     | Example | Holds for version `v`  |
//! |----------|---------|------------------------|
//! | range    | `1-4`   | `1 <= v && v <= 4`     |
//! | minimum  | `3+`    | `v >= 3`               |
//! | exact    | `2`     | `v == 2`               |
//!
//! An empty string means "no predicate". Anything else is rejected rather
//! than treated as unconditional.

use std::fmt::{Display, Formatter};

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res},
    sequence::{separated_pair, terminated},
};

use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionPredicate {
    Exact(i16),
    Minimum(i16),
    Range { lo: i16, hi: i16 },
}

impl VersionPredicate {
    /// Parse a version-gating string. `Ok(None)` means the field has no
    /// predicate and is present in every version.
    pub fn parse(raw: &str) -> Result<Option<Self>, SchemaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let (_, predicate) = all_consuming(any_form)(trimmed)
            .map_err(|_| SchemaError::InvalidVersions(raw.to_string()))?;

        if let VersionPredicate::Range { lo, hi } = predicate
            && lo > hi
        {
            return Err(SchemaError::InvalidVersions(raw.to_string()));
        }
        Ok(Some(predicate))
    }

    pub fn matches(&self, version: i16) -> bool {
        match *self {
            VersionPredicate::Exact(n) => version == n,
            VersionPredicate::Minimum(n) => version >= n,
            VersionPredicate::Range { lo, hi } => lo <= version && version <= hi,
        }
    }

    /// True when the predicate holds for every non-negative version, so no
    /// guard needs to be emitted.
    pub fn is_unconditional(&self) -> bool {
        matches!(self, VersionPredicate::Minimum(n) if *n <= 0)
    }
}

impl Display for VersionPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionPredicate::Exact(n) => write!(f, "{n}"),
            VersionPredicate::Minimum(n) => write!(f, "{n}+"),
            VersionPredicate::Range { lo, hi } => write!(f, "{lo}-{hi}"),
        }
    }
}

fn any_form(input: &str) -> IResult<&str, VersionPredicate> {
    alt((range, minimum, exact))(input)
}

fn range(input: &str) -> IResult<&str, VersionPredicate> {
    map(separated_pair(version, char('-'), version), |(lo, hi)| {
        VersionPredicate::Range { lo, hi }
    })(input)
}

fn minimum(input: &str) -> IResult<&str, VersionPredicate> {
    map(terminated(version, char('+')), VersionPredicate::Minimum)(input)
}

fn exact(input: &str) -> IResult<&str, VersionPredicate> {
    map(version, VersionPredicate::Exact)(input)
}

fn version(input: &str) -> IResult<&str, i16> {
    map_res(digit1, str::parse::<i16>)(input)
}
