use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use annograph::{build, build_batch, Config, ConfigBuilder};

fn bench_config() -> Config {
    ConfigBuilder::new()
        .with_text_key("text")
        .with_tokens_key("tokens")
        .with_metadata_key("meta")
        .with_token_keys("tok", "ini", "end")
        .with_annotation_keys("val", "ini", "end")
        .with_group("persons", "person")
        .with_group("pages", "page")
        .build()
        .unwrap()
}

/// A synthetic document of `count` tokens, with a person on every tenth token and a page per hundred tokens
fn make_document(count: usize) -> Value {
    let mut text = String::new();
    let mut tokens = Vec::with_capacity(count);
    let mut persons = Vec::new();
    let mut pages = Vec::new();
    for i in 0..count {
        if i > 0 {
            text.push(' ');
        }
        let begin = text.chars().count();
        let word = format!("wörd{}", i);
        text.push_str(&word);
        tokens.push(json!({"tok": word, "ini": begin, "end": text.chars().count()}));
        if i % 10 == 0 {
            persons.push(json!({"val": format!("P{}", i), "ini": i, "end": i}));
        }
        if i % 100 == 99 {
            pages.push(json!({"val": format!("{}", i / 100), "ini": i - 99, "end": i}));
        }
    }
    json!({
        "text": text,
        "tokens": tokens,
        "meta": {"title": "benchmark", "sura": 1},
        "persons": persons,
        "pages": pages
    })
}

pub fn bench_build(c: &mut Criterion) {
    let config = bench_config();
    let mut group = c.benchmark_group("build");
    for count in [100, 1000, 10000] {
        let json = make_document(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &json, |b, json| {
            b.iter(|| {
                let document = build(black_box(json), &config).unwrap();
                assert_eq!(document.tokens().len(), count);
            })
        });
    }
    group.finish();
}

pub fn bench_batch(c: &mut Criterion) {
    let config = bench_config();
    let batch: Vec<(String, Value)> = (0..64)
        .map(|i| (format!("doc{}", i), make_document(1000)))
        .collect();
    c.bench_function("build_batch_64x1000", |b| {
        b.iter(|| {
            let report = build_batch(black_box(&batch), &config);
            assert!(report.is_ok());
        })
    });
}

pub fn bench_lookup(c: &mut Criterion) {
    let config = bench_config();
    let document = build(&make_document(10000), &config).unwrap();
    let textlen = document.textlen();
    c.bench_function("token_at", |b| {
        b.iter(|| {
            let mut found = 0;
            for charpos in (0..textlen).step_by(97) {
                if document.token_at(black_box(charpos)).is_some() {
                    found += 1;
                }
            }
            assert!(found > 0);
        })
    });
}

criterion_group!(benches, bench_build, bench_batch, bench_lookup);
criterion_main!(benches);
