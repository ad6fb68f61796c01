use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trex_nfa::{compile, run_match, run_search};
use trex_util::{Multiple, Options};

fn bench_match(c: &mut Criterion) {
    let opts = Options::default();
    let nfa = compile("(a?)(a?)(a*)(a*)", &opts).unwrap();
    c.bench_function("match_ambiguous_one", |b| {
        b.iter(|| run_match(&nfa, black_box("aaaa"), &opts).unwrap())
    });

    let all = Options {
        multiple: Multiple::All,
        ..Options::default()
    };
    c.bench_function("match_ambiguous_all", |b| {
        b.iter(|| run_match(&nfa, black_box("aaaa"), &all).unwrap())
    });
}

fn bench_search(c: &mut Criterion) {
    let opts = Options {
        multiple: Multiple::All,
        ..Options::default()
    };
    let nfa = compile("ana", &Options::default()).unwrap();
    c.bench_function("search_overlapping_all", |b| {
        b.iter(|| run_search(&nfa, black_box("banana bandana banana"), &opts).unwrap())
    });
}

criterion_group!(benches, bench_match, bench_search);
criterion_main!(benches);
