//! Bulk Copy Benchmarks
//!
//! Overlapping moves inside one region against disjoint copies between two,
//! plus the cost of copying out versus borrowing a view.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use atomic_buffer::AtomicBuffer;

const REGION: usize = 64 * 1024;
const SIZES: &[usize] = &[64, 512, 4096, 32 * 1024];

fn bench_put_bytes(c: &mut Criterion) {
    let mut a = vec![0u8; REGION];
    let mut b = vec![0u8; REGION];
    let src = AtomicBuffer::wrap(&mut a);
    let dst = AtomicBuffer::wrap(&mut b);
    src.fill(0x3C);

    let mut group = c.benchmark_group("put_bytes");

    for &size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("disjoint", size), &size, |bench, &size| {
            bench.iter(|| dst.put_bytes(0, &src, 0, black_box(size)))
        });

        group.bench_with_input(BenchmarkId::new("overlap", size), &size, |bench, &size| {
            bench.iter(|| src.put_bytes(1, &src, 0, black_box(size)))
        });

        let payload = vec![0x7Eu8; size];
        group.bench_with_input(BenchmarkId::new("from_slice", size), &size, |bench, &size| {
            bench.iter(|| dst.put_bytes_array(0, &payload, 0, black_box(size)))
        });
    }

    group.finish();
}

fn bench_read_out(c: &mut Criterion) {
    let mut a = vec![0u8; REGION];
    let buffer = AtomicBuffer::wrap(&mut a);
    buffer.fill(0x11);

    let mut group = c.benchmark_group("read_out");

    for &size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("get_bytes", size), &size, |bench, &size| {
            let mut out = vec![0u8; size];
            bench.iter(|| {
                buffer.get_bytes(black_box(0), &mut out);
                out[size - 1]
            })
        });

        group.bench_with_input(
            BenchmarkId::new("get_bytes_array", size),
            &size,
            |bench, &size| {
                bench.iter(|| {
                    let view = buffer.get_bytes_array(black_box(0), size);
                    view.get_u8(size - 1)
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("set_memory", size), &size, |bench, &size| {
            bench.iter(|| buffer.set_memory(0, black_box(size), 0x22))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_put_bytes, bench_read_out);
criterion_main!(benches);
