// test-only module included via protocol/mod.rs
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::core::codec::PacketCodec;
use crate::core::vector::Vector3;
use crate::error::ProtocolError;
use crate::protocol::handler::PacketHandler;
use crate::protocol::packet::{DataPacket, Packet, Side};
use crate::protocol::packets::*;
use crate::protocol::registry::PacketRegistry;

/// Records which handler method ran and answers with a fixed verdict.
#[derive(Default)]
struct RecordingHandler {
    verdict: bool,
    calls: Vec<&'static str>,
    last_dimension: Option<ChangeDimensionPacket>,
}

impl RecordingHandler {
    fn answering(verdict: bool) -> Self {
        Self {
            verdict,
            ..Self::default()
        }
    }
}

impl PacketHandler for RecordingHandler {
    fn handle_change_dimension(&mut self, packet: &ChangeDimensionPacket) -> bool {
        self.calls.push("change_dimension");
        self.last_dimension = Some(packet.clone());
        self.verdict
    }

    fn handle_respawn(&mut self, _packet: &RespawnPacket) -> bool {
        self.calls.push("respawn");
        self.verdict
    }

    fn handle_set_difficulty(&mut self, _packet: &SetDifficultyPacket) -> bool {
        self.calls.push("set_difficulty");
        self.verdict
    }

    fn handle_request_chunk_radius(&mut self, _packet: &RequestChunkRadiusPacket) -> bool {
        self.calls.push("request_chunk_radius");
        self.verdict
    }
}

fn sample_dimension_change() -> ChangeDimensionPacket {
    ChangeDimensionPacket {
        dimension: 1,
        position: Vector3::new(10.5, 64.0, -3.25),
        respawn: true,
    }
}

#[test]
fn test_change_dimension_wire_image() {
    let registry = PacketRegistry::standard().unwrap();
    let server = PacketCodec::new(&registry, Side::Server);
    let client = PacketCodec::new(&registry, Side::Client);

    // =================== Encode on the server ===================
    let packet = sample_dimension_change();
    let bytes = server.encode(&packet.clone().into());

    let mut expected: Vec<u8> = vec![0x3d, 0x02];
    expected.extend_from_slice(&[0x00, 0x00, 0x28, 0x41]); // 10.5
    expected.extend_from_slice(&[0x00, 0x00, 0x80, 0x42]); // 64.0
    expected.extend_from_slice(&[0x00, 0x00, 0x50, 0xc0]); // -3.25
    expected.push(0x01);
    assert_eq!(&bytes[..], &expected[..]);

    // =================== Decode on the client ===================
    let decoded = client.decode(&expected).expect("decode");
    assert_eq!(decoded, DataPacket::ChangeDimension(packet));
}

#[test]
fn test_dispatch_returns_handler_verdict() {
    let registry = PacketRegistry::standard().unwrap();
    let server = PacketCodec::new(&registry, Side::Server);
    let client = PacketCodec::new(&registry, Side::Client);
    let bytes = server.encode(&sample_dimension_change().into());

    let mut accepting = RecordingHandler::answering(true);
    assert!(client.decode_and_dispatch(&bytes, &mut accepting).unwrap());
    assert_eq!(accepting.calls, vec!["change_dimension"]);
    assert_eq!(accepting.last_dimension, Some(sample_dimension_change()));

    let mut passing = RecordingHandler::answering(false);
    assert!(!client.decode_and_dispatch(&bytes, &mut passing).unwrap());
    assert_eq!(passing.calls, vec!["change_dimension"]);
}

#[test]
fn test_each_kind_reaches_its_own_method() {
    let registry = PacketRegistry::standard().unwrap();
    let server = PacketCodec::new(&registry, Side::Server);
    let client = PacketCodec::new(&registry, Side::Client);

    let to_client: Vec<DataPacket> = vec![
        sample_dimension_change().into(),
        SetDifficultyPacket { difficulty: 3 }.into(),
        RespawnPacket {
            position: Vector3::new(0.0, 70.0, 0.0),
            state: RespawnPacket::READY_TO_SPAWN,
            runtime_entity_id: 1,
        }
        .into(),
    ];
    let mut handler = RecordingHandler::answering(true);
    for packet in &to_client {
        let bytes = server.encode(packet);
        assert!(client.decode_and_dispatch(&bytes, &mut handler).unwrap());
    }
    assert_eq!(
        handler.calls,
        vec!["change_dimension", "set_difficulty", "respawn"]
    );

    let mut handler = RecordingHandler::answering(false);
    let bytes = client.encode(&RequestChunkRadiusPacket { radius: 12 }.into());
    assert!(!server.decode_and_dispatch(&bytes, &mut handler).unwrap());
    assert_eq!(handler.calls, vec!["request_chunk_radius"]);
}

#[test]
fn test_dispatch_through_trait_object() {
    let registry = PacketRegistry::standard().unwrap();
    let client = PacketCodec::new(&registry, Side::Client);
    let bytes = [SetDifficultyPacket::ID as u8, 0x01];

    let mut boxed: Box<dyn PacketHandler> = Box::new(RecordingHandler::answering(true));
    assert!(client.decode_and_dispatch(&bytes, boxed.as_mut()).unwrap());
    assert!(client.decode_and_dispatch(&bytes, &mut boxed).unwrap());
}

#[test]
fn test_trailing_byte_after_zero_packet() {
    let registry = PacketRegistry::standard().unwrap();
    let client = PacketCodec::new(&registry, Side::Client);

    let mut bytes: Vec<u8> = vec![0x3d, 0x00];
    bytes.extend_from_slice(&[0u8; 12]);
    bytes.push(0x00);
    assert_eq!(
        client.decode(&bytes).unwrap(),
        DataPacket::ChangeDimension(ChangeDimensionPacket::default())
    );

    bytes.push(0xff);
    let mut handler = RecordingHandler::answering(true);
    match client.decode_and_dispatch(&bytes, &mut handler) {
        Err(ProtocolError::TrailingData { id, remaining }) => {
            assert_eq!(id, 0x3d);
            assert_eq!(remaining, 1);
        }
        other => panic!("expected TrailingData, got {other:?}"),
    }
    assert!(handler.calls.is_empty(), "handler must not run");
}

#[test]
fn test_unknown_identifier_leaves_registry_alone() {
    let registry = PacketRegistry::standard().unwrap();
    let client = PacketCodec::new(&registry, Side::Client);
    let before = registry.ids();

    let mut handler = RecordingHandler::answering(true);
    assert!(matches!(
        client.decode_and_dispatch(&[0x7f, 0x00], &mut handler),
        Err(ProtocolError::UnrecognizedPacket { id: 0x7f })
    ));
    assert_eq!(registry.ids(), before);
    assert!(handler.calls.is_empty());
}

#[test]
fn test_payload_errors_propagate_unchanged() {
    let registry = PacketRegistry::standard().unwrap();
    let client = PacketCodec::new(&registry, Side::Client);

    // identifier + dimension, then only 5 of the 12 vector bytes
    let bytes: [u8; 7] = [0x3d, 0x02, 0, 0, 0, 0, 0];
    match client.decode(&bytes) {
        Err(ProtocolError::UnexpectedEof {
            offset,
            needed,
            remaining,
        }) => {
            assert_eq!(offset, 2);
            assert_eq!(needed, 12);
            assert_eq!(remaining, 5);
        }
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }

    let bytes: [u8; 6] = [0x3c, 0xff, 0xff, 0xff, 0xff, 0xff];
    assert!(matches!(
        client.decode(&bytes),
        Err(ProtocolError::MalformedVarint { offset: 1, .. })
    ));
}

#[test]
fn test_dispatch_batch_skips_unrecognized() {
    let registry = PacketRegistry::standard().unwrap();
    let server = PacketCodec::new(&registry, Side::Server);
    let client = PacketCodec::new(&registry, Side::Client);

    let first = server.encode(&sample_dimension_change().into());
    let second = server.encode(&SetDifficultyPacket { difficulty: 1 }.into());
    let unknown: [u8; 1] = [0x7e];
    let buffers: [&[u8]; 3] = [&first[..], &unknown[..], &second[..]];

    let mut handler = RecordingHandler::answering(true);
    let summary = client.dispatch_batch(buffers, &mut handler).unwrap();
    assert_eq!(summary.handled, 2);
    assert_eq!(summary.passed, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(handler.calls, vec!["change_dimension", "set_difficulty"]);
}

#[test]
fn test_dispatch_batch_stops_on_corrupt_buffer() {
    let registry = PacketRegistry::standard().unwrap();
    let client = PacketCodec::new(&registry, Side::Client);

    let good: [u8; 2] = [0x3c, 0x01];
    let truncated: [u8; 3] = [0x3d, 0x00, 0x00];
    let never_reached: [u8; 2] = [0x3c, 0x02];
    let buffers: [&[u8]; 3] = [&good[..], &truncated[..], &never_reached[..]];

    let mut handler = RecordingHandler::answering(false);
    let result = client.dispatch_batch(buffers, &mut handler);
    assert!(matches!(result, Err(ProtocolError::UnexpectedEof { .. })));
    assert_eq!(handler.calls, vec!["set_difficulty"]);
}
