use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trex_lex::tokenize;
use trex_par::parse;

const PATTERN: &str = r"(?<proto>[a-z]+)(:)(\d{2})|\p{Lu}+[^0-9p]*(?:x|y)?";

fn bench_parse(c: &mut Criterion) {
    let tokens = tokenize(PATTERN).unwrap();
    c.bench_function("parse_mixed_pattern", |b| {
        b.iter(|| parse(black_box(tokens.clone())).unwrap())
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
