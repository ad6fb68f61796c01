use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trex_lex::tokenize;

const PATTERN: &str = r"(?<proto>[a-z]+)(:)(\d{2})|\p{Lu}+[^0-9p]*(?:x|y)?";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_mixed_pattern", |b| {
        b.iter(|| tokenize(black_box(PATTERN)).unwrap())
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
