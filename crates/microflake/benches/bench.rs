use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use microflake::{FlakeGenerator, FlakeId, MachineId};

// Number of IDs generated per benchmark iteration.
const TOTAL_IDS: usize = 4096;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = FlakeGenerator::new();
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate());
            }
        })
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(1));

    let id = FlakeId::from_parts(
        1_700_000_000_000_000,
        &MachineId::from_bytes([1, 2, 3, 4, 5, 6]),
        42,
        [9, 9, 9, 9],
    );
    group.bench_function("base62", |b| b.iter(|| black_box(id.encode())));
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));

    let encoded = FlakeGenerator::new().generate().encode();
    group.bench_function("base62", |b| {
        b.iter(|| black_box(FlakeId::decode(&encoded).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_generate, bench_encode, bench_decode);
criterion_main!(benches);
