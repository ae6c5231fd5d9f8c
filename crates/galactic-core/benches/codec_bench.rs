//! Criterion benchmarks for the GalacticBuf codec.
//!
//! Run with:
//! ```bash
//! cargo bench --package galactic-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use galactic_core::{decode_message, encode_message, Object, Value};

// ── Message fixtures ──────────────────────────────────────────────────────────

fn make_user() -> Object {
    let mut msg = Object::new();
    msg.insert("user_id".to_string(), Value::Int(1001));
    msg.insert("name".to_string(), Value::from("Alice"));
    msg.insert("scores".to_string(), Value::from(vec![100i64, 200, 300]));
    msg
}

fn make_trade(id: i64) -> Value {
    let mut trade = Object::new();
    trade.insert("trade_id".to_string(), Value::from(format!("trade-{id:06}")));
    trade.insert("buyer_id".to_string(), Value::from("buyer-7"));
    trade.insert("seller_id".to_string(), Value::from("seller-3"));
    trade.insert("price".to_string(), Value::Int(100 + id));
    trade.insert("quantity".to_string(), Value::Int(10));
    trade.insert("timestamp".to_string(), Value::Int(1_698_765_432_000 + id));
    Value::Object(trade)
}

fn make_trade_batch(count: i64) -> Object {
    let mut msg = Object::new();
    msg.insert(
        "trades".to_string(),
        Value::List((0..count).map(make_trade).collect()),
    );
    msg
}

fn fixtures() -> Vec<(&'static str, Object)> {
    vec![
        ("user", make_user()),
        ("trades(10)", make_trade_batch(10)),
        ("trades(100)", make_trade_batch(100)),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_message");
    for (name, msg) in fixtures() {
        group.bench_with_input(BenchmarkId::new("msg", name), &msg, |b, msg| {
            b.iter(|| encode_message(black_box(msg)).expect("encode must succeed"))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_message");
    for (name, msg) in fixtures() {
        let bytes = encode_message(&msg).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("msg", name), &bytes, |b, bytes| {
            b.iter(|| decode_message(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let msg = make_trade_batch(10);
    c.bench_function("encode_decode_roundtrip/trades(10)", |b| {
        b.iter(|| {
            let bytes = encode_message(black_box(&msg)).unwrap();
            decode_message(black_box(&bytes)).unwrap()
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_roundtrip);
criterion_main!(benches);
