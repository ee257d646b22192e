use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use paperdex::core::config::EngineConfig;
use paperdex::core::types::Record;
use paperdex::index::index_builder::IndexBuilder;
use rand::Rng;
use serde_json::json;
use std::time::Duration;

const WORDS: [&str; 12] = [
    "deep", "graph", "learning", "neural", "the", "of", "transformer", "vision",
    "self-supervised", "diffusion", "networks", "attention",
];

fn create_corpus(size: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    (0..size)
        .map(|i| {
            let mut sentence = |len: usize| -> String {
                (0..len)
                    .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            Record {
                id: json!(i),
                title: sentence(10),
                abstract_text: sentence(120),
                conference: format!("CONF{}", i % 8),
                year: json!(2010 + (i % 15) as i64),
                order: i as i64,
                ..Record::default()
            }
        })
        .collect()
}

/// Benchmark index construction at several corpus sizes
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(10); // Large corpora take a while per iteration
    group.measurement_time(Duration::from_secs(10));

    for size in [1_000, 10_000, 50_000].iter() {
        let corpus = create_corpus(*size);
        group.throughput(Throughput::Elements(*size as u64));

        for parallel in [false, true] {
            let config = EngineConfig { parallel_analysis: parallel, ..EngineConfig::default() };
            let builder = IndexBuilder::new(&config);
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, size), &corpus, |b, corpus| {
                b.iter(|| black_box(builder.build(corpus.clone()).unwrap()));
            });
        }
    }

    group.finish();
}

/// Benchmark decoding plus indexing of a raw JSON snapshot
fn bench_build_from_json(c: &mut Criterion) {
    let corpus = serde_json::to_value(create_corpus(10_000)).unwrap();
    let builder = IndexBuilder::new(&EngineConfig::default());

    c.bench_function("index_build_from_json", |b| {
        b.iter(|| black_box(builder.build_from_value(corpus.clone()).unwrap()));
    });
}

criterion_group!(benches, bench_build, bench_build_from_json);
criterion_main!(benches);
