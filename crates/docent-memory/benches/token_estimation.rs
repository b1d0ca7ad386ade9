use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use docent_memory::document::{SplitterConfig, TextSplitter, page_metadata};
use docent_memory::estimate_tokens;
use std::hint::black_box;

fn generate_text(size: usize) -> String {
    let paragraph = "The quick brown fox jumps over the lazy dog. \
                     This sentence contains various English words and punctuation marks.\n";
    paragraph.repeat(size / paragraph.len() + 1)[..size].to_string()
}

fn token_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_tokens");

    for size in [1_000, 10_000, 100_000] {
        let input = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("ascii", size), &input, |b, input| {
            b.iter(|| estimate_tokens(black_box(input)));
        });
    }

    group.finish();
}

fn page_splitting(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_page");
    let splitter = TextSplitter::new(SplitterConfig::default());
    let metadata = page_metadata("bench.txt", 1);

    for size in [10_000, 100_000] {
        let input = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("ascii", size), &input, |b, input| {
            b.iter(|| splitter.split(black_box(input), &metadata));
        });
    }

    group.finish();
}

criterion_group!(benches, token_estimation, page_splitting);
criterion_main!(benches);
