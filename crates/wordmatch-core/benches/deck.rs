use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use wordmatch_core::deck::{build_deck, deal};
use wordmatch_core::words::{fallback_pairs, parse_word_pairs};
use wordmatch_core::WordPair;

fn many_pairs(count: usize) -> Vec<WordPair> {
    (0..count)
        .map(|i| WordPair::new(format!("word{i}"), format!("palabra{i}")))
        .collect()
}

fn bench_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    let mut rng = StdRng::seed_from_u64(0);

    let standard = fallback_pairs();
    group.bench_function("build/10 pairs", |b| {
        b.iter(|| build_deck(black_box(&standard)))
    });

    group.bench_function("deal/10 pairs", |b| {
        b.iter(|| deal(black_box(&standard), &mut rng))
    });

    let large = many_pairs(500);
    group.bench_function("deal/500 pairs", |b| {
        b.iter(|| deal(black_box(&large), &mut rng))
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_word_pairs");

    let plain = serde_json::to_string(&many_pairs(10)).unwrap();
    group.bench_function("plain array", |b| {
        b.iter(|| parse_word_pairs(black_box(&plain), 10))
    });

    let fenced = format!("```json\n{{\"pairs\": {plain}}}\n```");
    group.bench_function("fenced object", |b| {
        b.iter(|| parse_word_pairs(black_box(&fenced), 10))
    });

    group.finish();
}

criterion_group!(benches, bench_deal, bench_parse);
criterion_main!(benches);
