use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use twnet_codec::{
    Chunk, ControlMessage, CtrlMessage, Dispatcher, PacketCodec,
    protocol::{
        enums::ChatMode,
        message::{CtrlChallenge, MsgClSay, MsgSvChat},
        types::{ByteCursor, ByteWriter, Sequence, Token},
    },
};

fn chat_packet() -> Vec<Chunk> {
    (0..16)
        .map(|i| {
            Chunk::from_message(
                &MsgSvChat {
                    mode: ChatMode::All,
                    client_id: i,
                    target_id: -1,
                    message: "the quick brown fox jumps over the lazy tee".into(),
                },
                Some(Sequence::new(i as u16)),
            )
        })
        .collect()
}

fn bench_varint(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint");
    let values: Vec<i32> = (0..1024).map(|i| i * 7919 - 4_000_000).collect();
    let mut w = ByteWriter::new();
    for &v in &values {
        w.write_varint(v);
    }
    let encoded = w.into_vec();
    group.throughput(Throughput::Bytes(encoded.len() as u64));

    group.bench_function("encode_1024", |b| {
        b.iter(|| {
            let mut w = ByteWriter::with_capacity(encoded.len());
            for &v in &values {
                w.write_varint(black_box(v));
            }
            black_box(w.len());
        });
    });

    group.bench_function("decode_1024", |b| {
        b.iter(|| {
            let mut cur = ByteCursor::new(black_box(&encoded));
            while cur.has_remaining() {
                black_box(cur.read_varint().unwrap());
            }
        });
    });

    group.finish();
}

fn bench_packet(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet");
    let chunks = chat_packet();
    let codec = PacketCodec::default();
    let data = codec.pack_packet(&chunks).unwrap();
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("pack_16_chunks", |b| {
        b.iter(|| black_box(codec.pack_packet(black_box(&chunks)).unwrap()));
    });

    group.bench_function("unpack_16_chunks", |b| {
        b.iter(|| black_box(codec.unpack_packet(black_box(&data)).unwrap()));
    });

    group.bench_function("dispatch_16_chunks", |b| {
        let mut dispatcher = Dispatcher::default();
        b.iter(|| black_box(dispatcher.decode_packet(black_box(&data)).unwrap()));
    });

    group.finish();
}

fn bench_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("messages");

    let say = MsgClSay {
        mode: ChatMode::Team,
        target: -1,
        message: "gg".into(),
    };
    group.bench_function("pack_cl_say", |b| {
        b.iter(|| black_box(twnet_codec::NetMessage::pack(black_box(&say))));
    });

    let challenge = CtrlChallenge {
        token: Token::from_u32(0x1234_5678),
    }
    .pack(true);
    group.bench_function("unpack_challenge", |b| {
        b.iter(|| {
            let mut msg = ControlMessage::from(CtrlChallenge::default());
            black_box(msg.unpack(black_box(&challenge), true))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_varint, bench_packet, bench_messages);
criterion_main!(benches);
