use wiregen_core::{
    BaseKind, CompileError, DefaultLiteral, Field, PrimitiveKind, SchemaError, TypeExpr,
    VersionPredicate, capitalize,
};

// ── version predicates ──────────────────────────────────────────────────

#[test]
fn predicate_boundaries_around_lo_and_hi() {
    let cases = [
        ("4", VersionPredicate::Exact(4), [(3, false), (4, true), (5, false)]),
        ("4+", VersionPredicate::Minimum(4), [(3, false), (4, true), (5, true)]),
        (
            "4-4",
            VersionPredicate::Range { lo: 4, hi: 4 },
            [(3, false), (4, true), (5, false)],
        ),
    ];
    for (raw, expected, checks) in cases {
        let predicate = VersionPredicate::parse(raw).unwrap().unwrap();
        assert_eq!(predicate, expected);
        for (version, holds) in checks {
            assert_eq!(predicate.matches(version), holds, "{raw} at {version}");
        }
    }
}

#[test]
fn wide_range_boundaries() {
    let p = VersionPredicate::parse("0-12").unwrap().unwrap();
    assert!(!p.matches(-1));
    assert!(p.matches(0));
    assert!(p.matches(12));
    assert!(!p.matches(13));
}

#[test]
fn none_is_not_a_predicate() {
    assert_eq!(
        VersionPredicate::parse("none"),
        Err(SchemaError::InvalidVersions("none".to_string()))
    );
}

// ── type expressions ────────────────────────────────────────────────────

#[test]
fn surrounding_whitespace_is_ignored() {
    let ty = TypeExpr::parse(" []bytes ").unwrap();
    assert!(ty.is_array);
    assert_eq!(ty.base, BaseKind::Primitive(PrimitiveKind::Bytes));
}

#[test]
fn primitive_names_are_case_sensitive() {
    let ty = TypeExpr::parse("Int32").unwrap();
    assert_eq!(ty.base, BaseKind::Record("Int32".to_string()));
}

#[test]
fn integer_ranges_match_widths() {
    assert_eq!(PrimitiveKind::Int8.integer_range(), Some((-128, 127)));
    assert_eq!(PrimitiveKind::Int16.integer_range(), Some((-32768, 32767)));
    assert_eq!(PrimitiveKind::Uuid.integer_range(), None);
    assert!(PrimitiveKind::Int64.is_integer());
    assert!(!PrimitiveKind::String.is_integer());
}

// ── model helpers ───────────────────────────────────────────────────────

#[test]
fn capitalize_only_touches_first_char() {
    assert_eq!(capitalize("replicaId"), "ReplicaId");
    assert_eq!(capitalize("ReplicaId"), "ReplicaId");
    assert_eq!(capitalize("x"), "X");
    assert_eq!(capitalize(""), "");
}

#[test]
fn field_builders() {
    let field = Field::new("topics", "[]Topic", "0+")
        .with_default(DefaultLiteral::Int(3))
        .with_fields(vec![Field::new("name", "string", "0+")]);
    assert!(field.is_inline_record());
    assert!(!field.default.is_absent());
    assert!(!Field::new("x", "int8", "0+").is_inline_record());
}

#[test]
fn schema_errors_gain_record_context() {
    let err = CompileError::from_schema(
        "FetchRequest",
        "topics",
        SchemaError::UnrecognizedType("[]Nope".to_string()),
    );
    assert_eq!(
        err.to_string(),
        "unrecognized type '[]Nope' for field 'topics' of 'FetchRequest'"
    );
}
