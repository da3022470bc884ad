//! Performance benchmarks for the SIA line pipeline.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench codec_bench
//! ```

use bytes::BytesMut;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sia_core::{AccountId, EncryptionKey};
use sia_protocol::builder::to_wire;
use sia_protocol::{
    AckTerminator, LineBuilder, MessageParser, Reply, SessionCipher, SiaCodec, checksum,
};
use std::hint::black_box;
use tokio_util::codec::Decoder;

fn plain_line() -> String {
    LineBuilder::new("ABC123")
        .sequence(2)
        .event(Some(1), "OP", "501")
        .timestamp("14:12:04,09-25-2019")
        .build()
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");

    for size in [16usize, 64, 256, 1024] {
        let body = vec![b'A'; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &body, |b, body| {
            b.iter(|| checksum::compute(black_box(body)));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(1));

    let line = plain_line();
    group.bench_function("plain_line", |b| {
        b.iter(|| MessageParser::parse(black_box(&line)).unwrap());
    });

    let key = EncryptionKey::parse("AAAAAAAAAAAAAAAA").unwrap();
    let cipher = SessionCipher::new(&key).unwrap();
    let encrypted = LineBuilder::new("ABC123")
        .event(Some(1), "OP", "501")
        .timestamp("14:12:04,09-25-2019")
        .build_encrypted(&cipher)
        .unwrap();
    group.bench_function("encrypted_line", |b| {
        b.iter(|| {
            let msg = MessageParser::parse(black_box(&encrypted)).unwrap();
            let plaintext = cipher.decrypt_hex(msg.cipher_text()).unwrap();
            MessageParser::parse_decrypted(&plaintext).unwrap()
        });
    });

    group.finish();
}

fn bench_decode_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_stream");

    let wire = to_wire(&plain_line());
    for batch in [1usize, 10, 100] {
        let mut stream = Vec::with_capacity(wire.len() * batch);
        for _ in 0..batch {
            stream.extend_from_slice(&wire);
        }

        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch), &stream, |b, stream| {
            b.iter(|| {
                let mut codec = SiaCodec::new();
                let mut buffer = BytesMut::from(&stream[..]);
                let mut count = 0;
                while let Some(item) = codec.decode(&mut buffer).unwrap() {
                    black_box(item.unwrap());
                    count += 1;
                }
                assert_eq!(count, batch);
            });
        });
    }

    group.finish();
}

fn bench_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("reply");
    group.throughput(Throughput::Elements(1));

    let account = AccountId::new("ABC123").unwrap();
    group.bench_function("plain_ack", |b| {
        b.iter(|| {
            Reply::ack("0002", account.clone(), AckTerminator::Plain).encode()
        });
    });
    group.bench_function("nak", |b| b.iter(|| Reply::nak().encode()));

    group.finish();
}

criterion_group!(
    benches,
    bench_checksum,
    bench_parse,
    bench_decode_stream,
    bench_reply
);
criterion_main!(benches);
