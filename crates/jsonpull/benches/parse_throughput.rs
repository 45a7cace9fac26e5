#![allow(missing_docs)]
//! Benchmark – the pull-parser's throughput under whole-document, fully
//! incremental, and deeply-nested feeding patterns.

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonpull::{AllocObserver, ParseStatus, Parser, ParserOptions};

/// Produce a deterministic JSON document at least `target_len` bytes long.
///
/// `{"data":"aaaa…"}` — a single large string property, so the document
/// stays valid no matter how long the requested payload is.
fn make_json_payload(target_len: usize) -> String {
    let overhead = "{\"data\":\"\"}".len();
    assert!(target_len >= overhead, "target_len must be >= {overhead}");

    let content_len = target_len - overhead;
    let mut s = String::with_capacity(target_len);
    s.push_str("{\"data\":\"");
    s.extend(std::iter::repeat_n('a', content_len));
    s.push_str("\"}");
    debug_assert_eq!(s.len(), target_len);
    s
}

fn drain(parser: &mut Parser) -> usize {
    let mut produced = 0usize;
    loop {
        match parser.next() {
            Ok(ParseStatus::Token(_)) => produced += 1,
            Ok(ParseStatus::Complete | ParseStatus::MoreData) => break,
            Err(_) => break,
        }
    }
    produced
}

/// Feed `payload` in `parts` equally-sized chunks and drain every token that
/// becomes available after each chunk.
fn run_parser(payload: &str, parts: usize) -> usize {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);

    let mut parser = Parser::new(ParserOptions::default());
    let mut produced = 0usize;

    for chunk in payload.as_bytes().chunks(chunk_size) {
        parser.feed(chunk).unwrap();
        produced += drain(&mut parser);
    }
    parser.finish();
    produced += drain(&mut parser);

    produced
}

fn bench_whole_and_incremental(c: &mut Criterion) {
    let payload = make_json_payload(10_000);

    let mut group = c.benchmark_group("parse_throughput");
    for &parts in &[1usize, 100, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &p| {
            b.iter(|| {
                let count = run_parser(black_box(&payload), p);
                black_box(count);
            });
        });
    }
    group.finish();
}

/// Counts how many times a buffer grew, without recording individual sizes.
struct CountingObserver {
    count: std::sync::atomic::AtomicUsize,
}

impl AllocObserver for CountingObserver {
    fn on_grow(&self, _additional_bytes: usize) {
        self.count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    }
}

fn bench_deeply_nested(c: &mut Criterion) {
    let depth = 2_000usize;
    let mut document = "[".repeat(depth);
    document.push_str("0");
    document.push_str(&"]".repeat(depth));

    c.bench_function("parse_throughput/deeply_nested", |b| {
        b.iter(|| {
            let observer = CountingObserver {
                count: std::sync::atomic::AtomicUsize::new(0),
            };
            let mut parser = Parser::with_alloc_observer(
                ParserOptions {
                    max_depth: depth + 8,
                },
                observer,
            );
            parser.feed(document.as_bytes()).unwrap();
            parser.finish();
            let count = drain(&mut parser);
            black_box(count);
        });
    });
}

fn criterion() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5))
}

criterion_group! {
    name = benches;
    config = criterion();
    targets = bench_whole_and_incremental, bench_deeply_nested
}
criterion_main!(benches);
