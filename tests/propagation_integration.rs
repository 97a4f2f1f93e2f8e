//! Integration tests for cascade propagation
//!
//! These tests validate the reactive pipeline end to end:
//! - Reference vectors through real chains
//! - Depth-first, subscription-ordered fan-out
//! - Empty-input policy and error containment
//! - Teardown on disconnect and removal

mod common;

use bytes::Bytes;
use common::builders::{wire, ChainBuilder};
use common::recorders::{DisplayRecorder, EventLog};
use common::{display_text, output_bytes};
use gadgets_rs::pipeline::{DisplayState, GadgetKind, Pipeline, PortId};
use proptest::prelude::*;

#[test]
fn test_chain_builder_wires_each_step() {
    let (pipeline, ids) = ChainBuilder::new()
        .then(GadgetKind::HexEncode)
        .then(GadgetKind::Md5)
        .build();

    assert_eq!(ids.len(), 3);
    assert_eq!(
        pipeline.connections(),
        vec![
            (PortId::new(ids[0], 0), PortId::new(ids[1], 0)),
            (PortId::new(ids[1], 0), PortId::new(ids[2], 0)),
        ]
    );
}

#[test]
fn test_reference_vectors() {
    let cases = [
        (GadgetKind::HexEncode, "ABCD", "41424344"),
        (GadgetKind::Base64Encode, "ABCD", "QUJDRA=="),
        (GadgetKind::Base64Decode, "QUJDRA==", "ABCD"),
        (GadgetKind::Md5, "ABCD", "cb08ca4a7bb5f9683c19133a84872ca7"),
        (GadgetKind::Sha1, "ABCD", "fb2f85c88567f3c8ce9b799c7c54642d0c7b41f6"),
        (
            GadgetKind::Sha2,
            "ABCD",
            "e12e115acf4552b2568b55e93cbd39394c4ef81c82447fafc997882a02d23677",
        ),
        (GadgetKind::UrlEncode, "foo:bar", "foo%3Abar"),
        (GadgetKind::UrlDecode, "foo%3Abar", "foo:bar"),
        (GadgetKind::HtmlEncode, "foo&bar", "foo&amp;bar"),
        (GadgetKind::HtmlDecode, "foo&amp;bar", "foo&bar"),
    ];

    for (kind, input, expected) in cases {
        let (mut pipeline, ids) = ChainBuilder::new().then(kind).build();
        pipeline.edit(ids[0], input).unwrap();
        assert_eq!(
            display_text(&pipeline, ids[1]).as_deref(),
            Some(expected),
            "{}",
            kind.class_id()
        );
    }
}

#[test]
fn test_hex_decode_of_spaced_hex() {
    let (mut pipeline, ids) = ChainBuilder::new()
        .then(GadgetKind::HexDecode)
        .then(GadgetKind::HexDecode)
        .build();
    pipeline.edit(ids[0], "34313432 34333434").unwrap();

    assert_eq!(output_bytes(&pipeline, ids[1]), b"41424344");
    assert_eq!(output_bytes(&pipeline, ids[2]), b"ABCD");
    assert_eq!(display_text(&pipeline, ids[2]).as_deref(), Some("ABCD"));
}

#[test]
fn test_single_edit_resolves_whole_chain() {
    let (mut pipeline, ids) = ChainBuilder::new()
        .then(GadgetKind::Base64Encode)
        .then(GadgetKind::HexEncode)
        .then(GadgetKind::HexDecode)
        .then(GadgetKind::Base64Decode)
        .build();

    let report = pipeline.edit(ids[0], "round trip").unwrap();
    assert_eq!(report.visited(), ids.as_slice());
    assert_eq!(display_text(&pipeline, ids[4]).as_deref(), Some("round trip"));
}

#[test]
fn test_fan_out_order_is_depth_first() {
    let mut pipeline = Pipeline::new();
    let source = pipeline.place(GadgetKind::TextInput, 0, 0);
    let left = pipeline.place(GadgetKind::HexEncode, 20, 0);
    let left_leaf = pipeline.place(GadgetKind::Md5, 40, 0);
    let right = pipeline.place(GadgetKind::Base64Encode, 20, 10);
    let right_leaf = pipeline.place(GadgetKind::Sha1, 40, 10);
    wire(&mut pipeline, source, left);
    wire(&mut pipeline, source, right);
    wire(&mut pipeline, left, left_leaf);
    wire(&mut pipeline, right, right_leaf);

    let log = EventLog::new();
    let _subs = [
        log.watch_output(pipeline.gadget(source).unwrap(), "source"),
        log.watch_output(pipeline.gadget(left).unwrap(), "left"),
        log.watch_output(pipeline.gadget(left_leaf).unwrap(), "left_leaf"),
        log.watch_output(pipeline.gadget(right).unwrap(), "right"),
        log.watch_output(pipeline.gadget(right_leaf).unwrap(), "right_leaf"),
    ];

    let report = pipeline.edit(source, "ABCD").unwrap();
    assert_eq!(
        report.visited(),
        &[source, left, left_leaf, right, right_leaf]
    );
    assert_eq!(
        log.labels(),
        vec!["source", "left", "left_leaf", "right", "right_leaf"]
    );
}

#[test]
fn test_downstream_sees_resolved_upstream_value() {
    let (mut pipeline, ids) = ChainBuilder::new()
        .then(GadgetKind::HexEncode)
        .then(GadgetKind::HexDecode)
        .build();

    let log = EventLog::new();
    let _a = log.watch_output(pipeline.gadget(ids[1]).unwrap(), "hex");
    let _b = log.watch_output(pipeline.gadget(ids[2]).unwrap(), "decoded");

    pipeline.edit(ids[0], "hi").unwrap();
    pipeline.edit(ids[0], "yo").unwrap();
    assert_eq!(
        log.events(),
        vec![
            ("hex".to_string(), b"6869".to_vec()),
            ("decoded".to_string(), b"hi".to_vec()),
            ("hex".to_string(), b"796f".to_vec()),
            ("decoded".to_string(), b"yo".to_vec()),
        ]
    );
}

#[test]
fn test_empty_input_clears_stale_results() {
    let (mut pipeline, ids) = ChainBuilder::new()
        .then(GadgetKind::Sha2)
        .then(GadgetKind::HexEncode)
        .build();
    let recorder = DisplayRecorder::attach(pipeline.gadget(ids[2]).unwrap());

    pipeline.edit(ids[0], "ABCD").unwrap();
    assert!(display_text(&pipeline, ids[2]).is_some());

    pipeline.edit(ids[0], "").unwrap();
    for &id in &ids {
        assert_eq!(
            pipeline.gadget(id).unwrap().display().get(),
            DisplayState::Empty
        );
        assert!(output_bytes(&pipeline, id).is_empty());
    }
    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.last(), Some(DisplayState::Empty));
}

#[test]
fn test_transform_error_is_contained() {
    let mut pipeline = Pipeline::new();
    let source = pipeline.place(GadgetKind::TextInput, 0, 0);
    let decode = pipeline.place(GadgetKind::Base64Decode, 20, 0);
    let after = pipeline.place(GadgetKind::HexEncode, 40, 0);
    let sibling = pipeline.place(GadgetKind::UrlEncode, 20, 10);
    wire(&mut pipeline, source, decode);
    wire(&mut pipeline, decode, after);
    wire(&mut pipeline, source, sibling);

    let report = pipeline.edit(source, "not base64!").unwrap();
    assert_eq!(report.len(), 4);

    let state = pipeline.gadget(decode).unwrap().display().get();
    assert!(state.is_error(), "{:?}", state);
    assert!(output_bytes(&pipeline, decode).is_empty());
    assert_eq!(
        pipeline.gadget(after).unwrap().display().get(),
        DisplayState::Empty
    );
    assert_eq!(
        display_text(&pipeline, sibling).as_deref(),
        Some("not%20base64!")
    );

    // Recovers on the next valid input
    pipeline.edit(source, "QUJDRA==").unwrap();
    assert_eq!(display_text(&pipeline, decode).as_deref(), Some("ABCD"));
    assert_eq!(display_text(&pipeline, after).as_deref(), Some("41424344"));
}

#[test]
fn test_disconnect_and_reconnect() {
    let (mut pipeline, ids) = ChainBuilder::new().then(GadgetKind::Md5).build();
    pipeline.edit(ids[0], "ABCD").unwrap();
    let hashed = display_text(&pipeline, ids[1]);

    let input = PortId::new(ids[1], 0);
    pipeline.disconnect(input).unwrap();
    assert_eq!(display_text(&pipeline, ids[1]), None);
    assert!(pipeline.gadget(ids[1]).unwrap().inputs()[0].value().is_empty());

    pipeline.connect(PortId::new(ids[0], 0), input).unwrap();
    assert_eq!(display_text(&pipeline, ids[1]), hashed);
}

#[test]
fn test_removed_gadget_leaves_no_callbacks() {
    let (mut pipeline, ids) = ChainBuilder::new()
        .then(GadgetKind::HexEncode)
        .then(GadgetKind::Sha1)
        .build();
    let source_output = pipeline.gadget(ids[0]).unwrap().outputs()[0].value();
    assert!(source_output.is_empty());

    pipeline.remove_gadget(ids[1]).unwrap();
    assert!(pipeline.gadget(ids[0]).unwrap().outputs()[0]
        .subscribers()
        .is_empty());

    let report = pipeline.edit(ids[0], "ABCD").unwrap();
    assert_eq!(report.visited(), &[ids[0]]);
    assert_eq!(pipeline.gadget(ids[2]).unwrap().display().get(), DisplayState::Empty);
    assert_eq!(pipeline.topology().len(), 2);
}

#[test]
fn test_snapshot_json_round() {
    let (mut pipeline, ids) = ChainBuilder::new().then(GadgetKind::HtmlEncode).build();
    pipeline.edit(ids[0], Bytes::from_static(b"<b>")).unwrap();

    let json = pipeline.snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(value["nodes"][1]["class_id"], "web.html_encode");
    assert_eq!(value["nodes"][1]["display"]["message"], "&lt;b&gt;");
    assert_eq!(value["edges"][0]["to"]["index"], 0);
}

fn kind_strategy() -> impl Strategy<Value = GadgetKind> {
    prop::sample::select(
        GadgetKind::all()
            .iter()
            .copied()
            .filter(|k| !k.is_source())
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn test_propagation_is_deterministic(
        chain in prop::collection::vec(kind_strategy(), 1..6),
        inputs in prop::collection::vec("[ -~]{0,16}", 1..4)
    ) {
        let run = || {
            let mut builder = ChainBuilder::new();
            for kind in &chain {
                builder = builder.then(*kind);
            }
            let (mut pipeline, ids) = builder.build();
            for input in &inputs {
                pipeline.edit(ids[0], input.clone()).unwrap();
            }
            ids.iter()
                .map(|&id| {
                    let g = pipeline.gadget(id).unwrap();
                    (g.display().get(), g.outputs()[0].value())
                })
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn test_empty_input_anywhere_empties_downstream(
        chain in prop::collection::vec(kind_strategy(), 1..6)
    ) {
        let mut builder = ChainBuilder::new();
        for kind in &chain {
            builder = builder.then(*kind);
        }
        let (mut pipeline, ids) = builder.build();
        pipeline.edit(ids[0], "seed").unwrap();
        pipeline.edit(ids[0], "").unwrap();
        for &id in &ids {
            let g = pipeline.gadget(id).unwrap();
            prop_assert_eq!(g.display().get(), DisplayState::Empty);
            prop_assert!(g.outputs()[0].value().is_empty());
        }
    }
}
