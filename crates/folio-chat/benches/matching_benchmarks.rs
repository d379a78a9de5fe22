//! Benchmarks for query matching and response selection.
//!
//! Response selection scans the whole catalogue with a word-level
//! Levenshtein match, so its cost grows with catalogue size. These benches
//! keep an eye on the per-query cost with the built-in content.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use folio_chat::{FuzzyMatcher, ResponseGenerator, TopicClassifier};

const QUERIES: &[&str] = &[
    "How many years of experience do you have?",
    "What is Mohamed's contact information?",
    "who are mohameds referenses?",
    "tell me about the tools from his last job",
    "Do you have a degree?",
    "hello there",
];

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein");

    group.bench_function("short_words", |b| {
        b.iter(|| FuzzyMatcher::distance("kitten", "sitting"))
    });

    group.bench_function("question_pair", |b| {
        b.iter(|| {
            FuzzyMatcher::matches_with(
                "what is mohameds contact informaton?",
                "What is Mohamed's contact information?",
                0.7,
            )
        })
    });

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    c.bench_function("analyze_query", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let analysis = TopicClassifier::analyze(QUERIES[idx % QUERIES.len()]);
            idx += 1;
            analysis
        });
    });
}

fn bench_generate_response(c: &mut Criterion) {
    let generator = ResponseGenerator::default();

    let mut group = c.benchmark_group("generate_response");
    group.measurement_time(Duration::from_secs(5));

    for (i, query) in QUERIES.iter().enumerate() {
        group.bench_function(format!("query_{i}"), |b| {
            b.iter(|| generator.generate_response(query))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_distance,
    bench_classification,
    bench_generate_response
);
criterion_main!(benches);
