#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use varstruct::{
    Codec, Record, StructCodec, Value, VarArray, VarBytes, VarString, Varint, U16Be, U8,
};

#[derive(Arbitrary, Debug)]
struct Input {
    kind: u8,
    port: u16,
    name: String,
    payload: Vec<u8>,
    counts: Vec<u16>,
    raw: Vec<u8>,
}

fn message_codec() -> StructCodec {
    StructCodec::builder()
        .field("kind", U8)
        .field("port", U16Be)
        .field("name", VarString::new(Varint))
        .field("payload", VarBytes::new(Varint))
        .field("counts", VarArray::new(Varint, U16Be))
        .build()
}

fuzz_target!(|input: Input| {
    let codec = message_codec();

    // Roundtrip: every representable record must encode to exactly
    // encode_size bytes and decode back to itself.
    let record = Record::new()
        .with("kind", input.kind)
        .with("port", input.port)
        .with("name", input.name.clone())
        .with("payload", Bytes::from(input.payload.clone()))
        .with(
            "counts",
            input.counts.iter().map(|&c| c.into()).collect::<Vec<Value>>(),
        );
    let encoded = codec.encode(&record);
    assert_eq!(encoded.len(), codec.encode_size(&record));
    let decoded = codec
        .decode(&encoded)
        .expect("failed to decode a successfully encoded record");
    assert_eq!(decoded, record);

    // Untrusted input: decoding arbitrary bytes must fail cleanly or
    // succeed, never panic or read past the buffer.
    let raw = Bytes::from(input.raw.clone());
    for offset in [0usize, 1, raw.len()] {
        let _ = codec.read(&raw, offset);
    }
});
