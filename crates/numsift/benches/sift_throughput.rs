use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use numsift::filter::{FilterConfig, run_filter_sync};
use numsift::patterns::{PatternKind, SpecialKind};
use numsift::{Token, extract_bytes};
use std::hint::black_box;

/// Build a CSV-like source with `rows` rows, roughly a third of them valid numbers.
fn create_source(rows: usize) -> Vec<u8> {
    let mut source = String::from("name,phone,notes\n");
    for i in 0..rows {
        match i % 3 {
            0 => source.push_str(&format!("user{},9{:09},ok\n", i, i)),
            1 => source.push_str(&format!("user{},{:010},bad prefix\n", i, i)),
            _ => source.push_str(&format!("user{}, 7{:09} ,\t\r\n", i, i * 7)),
        }
    }
    source.into_bytes()
}

fn create_tokens(count: usize) -> Vec<Token> {
    (0..count)
        .filter_map(|i| Token::parse(&format!("{}{:09}", 6 + i % 4, i * 7919 % 1_000_000_000)))
        .collect()
}

/// Benchmark: chunked extraction at several chunk sizes
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let source = create_source(100_000);
    group.throughput(Throughput::Bytes(source.len() as u64));

    for chunk_size in [512usize, 64 * 1024, 1024 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &chunk_size, |b, &size| {
            b.iter(|| extract_bytes(black_box(&source), size).map(|r| r.tokens.len()));
        });
    }

    group.finish();
}

/// Benchmark: filter runs with different category mixes
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let tokens = create_tokens(100_000);
    group.throughput(Throughput::Elements(tokens.len() as u64));

    let configs = [
        ("unconstrained", FilterConfig::new()),
        ("mirror", FilterConfig::new().with_pattern(PatternKind::Mirror)),
        ("fancy_sum", FilterConfig::new().with_special(SpecialKind::Fancy).with_target_sum("45", false)),
        ("search_xy", FilterConfig::new().with_search("77").with_special(SpecialKind::Xy)),
    ];

    for (name, config) in &configs {
        group.bench_function(*name, |b| {
            b.iter(|| run_filter_sync(black_box(&tokens), config, 1000, |_| {}));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_filter);
criterion_main!(benches);
