use wiregen_conformance::{
    INTS_ONLY_SOURCE,
    arrays_response::{ArraysResponse, ReadArraysResponse},
    defaults_request::{DefaultsRequest, ReadDefaultsRequest},
    fetch_request::{FetchRequest, FetchRequestFetchPartition, LeaderInfo, NewLeaderInfo, ReadFetchRequest},
    foo::{Foo, ReadFoo},
    ints_only::ReadIntsOnly,
    shadowing_request::{ReadShadowingRequest, ShadowingRequest},
    tree_response::{NewNode, Node, ReadTreeResponse},
};
use wiregen_runtime::{DecodeError, MAX_NESTING_DEPTH, VarintError};

fn string(s: &str) -> Vec<u8> {
    let mut out = (s.len() as u16).to_be_bytes().to_vec();
    out.extend_from_slice(s.as_bytes());
    out
}

// ── single field ────────────────────────────────────────────────────────

#[test]
fn foo_reads_four_big_endian_bytes() {
    let data = [0x00, 0x00, 0x01, 0x02, 0xAA];
    let mut buf = &data[..];
    let foo = ReadFoo(&mut buf, 0).unwrap();
    assert_eq!(foo, Foo { X: 0x0102 });
    assert_eq!(buf, &[0xAA]);
}

#[test]
fn foo_field_is_read_in_every_version() {
    let data = (-5i32).to_be_bytes();
    for version in [-1, 0, 7, i16::MAX] {
        let mut buf = &data[..];
        assert_eq!(ReadFoo(&mut buf, version).unwrap().X, -5);
        assert!(buf.is_empty());
    }
}

#[test]
fn foo_short_input_is_eof() {
    let mut buf: &[u8] = &[0x00, 0x01];
    assert_eq!(ReadFoo(&mut buf, 0), Err(DecodeError::eof(4, 2)));
}

// ── version gating and defaults ─────────────────────────────────────────

#[test]
fn version_zero_uses_defaults_and_reads_only_tail() {
    let mut buf: &[u8] = &[0x09];
    let req = ReadDefaultsRequest(&mut buf, 0).unwrap();
    assert_eq!(
        req,
        DefaultsRequest {
            Y: "abc".to_string(),
            N: -7,
            Window: 0,
            Tail: 9,
        }
    );
    assert!(buf.is_empty());
}

#[test]
fn version_one_reads_string_and_window() {
    let mut data = string("hi");
    data.extend_from_slice(&100i64.to_be_bytes());
    data.push(0x01);
    let mut buf = &data[..];
    let req = ReadDefaultsRequest(&mut buf, 1).unwrap();
    assert_eq!(req.Y, "hi");
    assert_eq!(req.N, -7);
    assert_eq!(req.Window, 100);
    assert_eq!(req.Tail, 1);
    assert!(buf.is_empty());
}

#[test]
fn version_three_reads_n_and_skips_window() {
    let data = [0x00, 0x05, 0x02];
    let mut buf = &data[..];
    let req = ReadDefaultsRequest(&mut buf, 3).unwrap();
    assert_eq!(req.Y, "abc");
    assert_eq!(req.N, 5);
    assert_eq!(req.Window, 0);
    assert_eq!(req.Tail, 2);
}

#[test]
fn null_string_is_rejected() {
    let mut buf: &[u8] = &[0xFF, 0xFF, 0x00];
    assert_eq!(
        ReadDefaultsRequest(&mut buf, 1),
        Err(DecodeError::unexpected_null("Y"))
    );
}

#[test]
fn oversized_string_length_is_rejected() {
    let mut buf: &[u8] = &[0x80, 0x01];
    assert_eq!(
        ReadDefaultsRequest(&mut buf, 1),
        Err(DecodeError::invalid_length("Y", 0x8001u16))
    );
}

// ── arrays, bytes and uuid ──────────────────────────────────────────────

fn arrays_v1() -> Vec<u8> {
    let mut data = vec![0x03];
    data.extend_from_slice(&7i32.to_be_bytes());
    data.extend_from_slice(&(-1i32).to_be_bytes());
    data.push(0x02);
    data.extend_from_slice(&string("n1"));
    data.push(0x03);
    data.extend_from_slice(&[0x02, 0xAB]);
    data.extend_from_slice(&[0x01]);
    data.extend_from_slice(&[0x11; 16]);
    data.extend_from_slice(&[0x04, 0x01, 0x02, 0x03]);
    data
}

#[test]
fn arrays_decode_in_wire_order() {
    let data = arrays_v1();
    let mut buf = &data[..];
    let res = ReadArraysResponse(&mut buf, 1).unwrap();
    assert_eq!(
        res,
        ArraysResponse {
            Ids: vec![7, -1],
            Names: vec!["n1".to_string()],
            Blobs: vec![vec![0xAB], vec![]],
            Id: [0x11; 16],
            Data: vec![1, 2, 3],
        }
    );
    assert!(buf.is_empty());
}

#[test]
fn gated_array_is_empty_when_absent() {
    let mut data = vec![0x01, 0x01];
    data.extend_from_slice(&[0x22; 16]);
    data.push(0x01);
    let mut buf = &data[..];
    let res = ReadArraysResponse(&mut buf, 0).unwrap();
    assert!(res.Ids.is_empty());
    assert!(res.Names.is_empty());
    assert!(res.Blobs.is_empty());
    assert_eq!(res.Id, [0x22; 16]);
    assert!(res.Data.is_empty());
}

#[test]
fn null_array_is_an_error() {
    let mut buf: &[u8] = &[0x00];
    assert_eq!(
        ReadArraysResponse(&mut buf, 0),
        Err(DecodeError::unexpected_null("Ids"))
    );
}

#[test]
fn null_bytes_is_an_error() {
    let mut data = vec![0x01, 0x01];
    data.extend_from_slice(&[0; 16]);
    data.push(0x00);
    let mut buf = &data[..];
    assert_eq!(
        ReadArraysResponse(&mut buf, 0),
        Err(DecodeError::unexpected_null("Data"))
    );
}

#[test]
fn malformed_count_prefix() {
    let mut buf: &[u8] = &[0x80];
    assert_eq!(
        ReadArraysResponse(&mut buf, 0),
        Err(DecodeError::VarintReadFailure(VarintError::Truncated { read: 1 }))
    );
}

// ── nested records ──────────────────────────────────────────────────────

fn fetch_v13() -> Vec<u8> {
    let mut data = 5i32.to_be_bytes().to_vec();
    data.push(0x02);
    data.extend_from_slice(&[0xAB; 16]);
    data.push(0x03);
    for partition in [0i32, 1] {
        data.extend_from_slice(&partition.to_be_bytes());
        data.extend_from_slice(&9i32.to_be_bytes());
        data.extend_from_slice(&2i32.to_be_bytes());
        data.extend_from_slice(&42i64.to_be_bytes());
    }
    data
}

#[test]
fn fetch_decodes_inline_and_common_records() {
    let data = fetch_v13();
    let mut buf = &data[..];
    let req: FetchRequest = ReadFetchRequest(&mut buf, 13).unwrap();
    assert!(buf.is_empty());

    assert_eq!(req.ReplicaId, 5);
    assert_eq!(req.Topics.len(), 1);
    let topic = &req.Topics[0];
    assert_eq!(topic.Topic, "");
    assert_eq!(topic.TopicId, [0xAB; 16]);
    assert_eq!(
        topic.Partitions[1],
        FetchRequestFetchPartition {
            Partition: 1,
            Epoch: 9,
            Leader: LeaderInfo {
                LeaderId: 2,
                LeaderEpoch: 42,
            },
        }
    );
}

#[test]
fn fetch_old_version_uses_epoch_default() {
    let mut data = 5i32.to_be_bytes().to_vec();
    data.push(0x02);
    data.extend_from_slice(&string("t"));
    data.push(0x02);
    data.extend_from_slice(&3i32.to_be_bytes());
    data.extend_from_slice(&2i32.to_be_bytes());
    data.extend_from_slice(&42i64.to_be_bytes());

    let mut buf = &data[..];
    let req = ReadFetchRequest(&mut buf, 4).unwrap();
    assert!(buf.is_empty());
    let topic = &req.Topics[0];
    assert_eq!(topic.Topic, "t");
    assert_eq!(topic.TopicId, [0; 16]);
    assert_eq!(topic.Partitions[0].Epoch, -1);
}

#[test]
fn nested_failure_carries_the_path() {
    let mut data = fetch_v13();
    data.truncate(data.len() - 3);
    let mut buf = &data[..];
    let err = ReadFetchRequest(&mut buf, 13).unwrap_err();

    let DecodeError::Nested { record, field, source } = &err else {
        panic!("expected nested error, got {err:?}");
    };
    assert_eq!(record, "FetchRequest");
    assert_eq!(field, "Topics");
    assert!(matches!(
        source.as_ref(),
        DecodeError::Nested { record, field, .. }
            if record == "FetchRequestFetchTopic" && field == "Partitions"
    ));
    assert_eq!(err.root_cause(), &DecodeError::eof(8, 5));
}

#[test]
fn common_record_decoder_is_public() {
    let mut data = 3i32.to_be_bytes().to_vec();
    data.extend_from_slice(&4i64.to_be_bytes());
    let mut buf = &data[..];
    assert_eq!(
        NewLeaderInfo(&mut buf, 0).unwrap(),
        LeaderInfo {
            LeaderId: 3,
            LeaderEpoch: 4,
        }
    );
}

// ── integer-only unit ───────────────────────────────────────────────────

#[test]
fn integer_only_unit_imports_only_buf() {
    let imports: Vec<&str> = INTS_ONLY_SOURCE
        .lines()
        .filter(|line| line.starts_with("use "))
        .collect();
    assert_eq!(imports, vec!["use wiregen_runtime::Buf;"]);
}

#[test]
fn integer_only_ranges() {
    let data = [0x01, 0x00, 0x02, 0, 0, 0, 0, 0, 0, 0, 0x03];
    let mut buf = &data[..];
    let v2 = ReadIntsOnly(&mut buf, 2).unwrap();
    assert_eq!((v2.A, v2.B, v2.C), (1, 2, 3));
    assert!(buf.is_empty());

    let mut buf = &data[..];
    let v4 = ReadIntsOnly(&mut buf, 4).unwrap();
    assert_eq!((v4.A, v4.B, v4.C), (1, 0, 0));
    assert_eq!(buf.len(), data.len() - 1);
}

// ── self-referencing records ────────────────────────────────────────────

/// `levels` nodes, each the only child of the one before.
fn chain(levels: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for level in 0..levels {
        data.push(level as u8);
        data.push(if level + 1 == levels { 0x01 } else { 0x02 });
    }
    data
}

#[test]
fn tree_decodes_children_in_order() {
    let data = [0x01, 0x03, 0x02, 0x01, 0x03, 0x01];
    let mut buf = &data[..];
    let tree = ReadTreeResponse(&mut buf, 0).unwrap();
    assert!(buf.is_empty());
    assert_eq!(
        tree.Root,
        Node {
            Value: 1,
            Children: vec![
                Node {
                    Value: 2,
                    Children: vec![],
                },
                Node {
                    Value: 3,
                    Children: vec![],
                },
            ],
        }
    );
}

#[test]
fn tree_at_the_nesting_limit() {
    let data = chain(MAX_NESTING_DEPTH);
    let mut buf = &data[..];
    let mut node = NewNode(&mut buf, 0).unwrap();
    assert!(buf.is_empty());

    let mut levels = 1;
    while let Some(child) = node.Children.pop() {
        assert_eq!(child.Value, levels as i8);
        node = child;
        levels += 1;
    }
    assert_eq!(levels, MAX_NESTING_DEPTH);
}

#[test]
fn tree_past_the_nesting_limit() {
    let data = chain(MAX_NESTING_DEPTH + 1);
    let mut buf = &data[..];
    let err = ReadTreeResponse(&mut buf, 0).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &DecodeError::nesting_too_deep(MAX_NESTING_DEPTH)
    );

    let hostile = [0x00, 0x02].repeat(20_000);
    let mut buf = &hostile[..];
    let err = ReadTreeResponse(&mut buf, 0).unwrap_err();
    assert!(matches!(
        &err,
        DecodeError::Nested { record, field, .. } if record == "TreeResponse" && field == "Root"
    ));
    assert_eq!(
        err.root_cause(),
        &DecodeError::nesting_too_deep(MAX_NESTING_DEPTH)
    );
}

// ── records named after prelude types ───────────────────────────────────

#[test]
fn prelude_named_records_decode() {
    let mut data = vec![0x00, 0x07];
    data.extend_from_slice(&string("ok"));
    data.push(0x05);
    data.push(0x02);
    data.extend_from_slice(&string("a"));

    let mut buf = &data[..];
    let req: ShadowingRequest = ReadShadowingRequest(&mut buf, 0).unwrap();
    assert!(buf.is_empty());
    assert_eq!(req.Result.Code, 7);
    assert_eq!(req.Label, "ok");
    assert_eq!(req.Tag.N, 5);
    assert_eq!(req.Items.len(), 1);
    assert_eq!(req.Items[0].Name, "a");
}
