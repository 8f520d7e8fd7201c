//! Read/write throughput per format
//!
//! Run with:
//!   cargo bench --bench format_throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mtxio::fields::{Gf2, Integers};
use mtxio::{
    BitVector, FormatTag, MatrixReader, MatrixTarget, MatrixWriter, RowMatrix, SparseVector,
    VectorPopulator,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_sparse(rows: usize, cols: usize, density: f64) -> RowMatrix<SparseVector<i64>> {
    let mut rng = StdRng::seed_from_u64(42);
    let populator = VectorPopulator::new(&Integers);
    let mut m = RowMatrix::with_shape(rows, cols);
    for i in 0..rows {
        let mut row = m.row_mut(i).unwrap();
        for j in 0..cols {
            if rng.gen_bool(density) {
                populator
                    .append(&mut row, j, rng.gen_range(-99..100))
                    .unwrap();
            }
        }
    }
    m
}

fn random_bits(rows: usize, cols: usize) -> RowMatrix<BitVector> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut m = RowMatrix::<BitVector>::with_shape(rows, cols);
    for i in 0..rows {
        let row = m.row_vector_mut(i).unwrap();
        for j in 0..cols {
            row.set(j, rng.gen_bool(0.5));
        }
    }
    m
}

fn bench_text_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_formats");
    let m = random_sparse(200, 200, 0.05);
    let writer = MatrixWriter::new(Integers);
    let reader = MatrixReader::new(Integers);

    for tag in [
        FormatTag::Guillaume,
        FormatTag::Turner,
        FormatTag::Matlab,
        FormatTag::Sage,
    ] {
        let text = writer.write_to_string(&m, tag).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("write", tag), &tag, |b, &tag| {
            b.iter(|| {
                let mut out = Vec::with_capacity(text.len());
                writer.write(&mut out, black_box(&m), tag).unwrap();
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("read", tag), &text, |b, text| {
            b.iter(|| {
                let mut back = RowMatrix::<SparseVector<i64>>::new();
                reader
                    .read(&mut black_box(text.as_bytes()), &mut back, FormatTag::Detect)
                    .unwrap();
                black_box(back);
            });
        });
    }
    group.finish();
}

#[cfg(feature = "png")]
fn bench_bitmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitmap");
    let writer = MatrixWriter::new(Gf2);
    let reader = MatrixReader::new(Gf2);

    for side in [64, 512] {
        let m = random_bits(side, side);
        let mut png = Vec::new();
        writer.write(&mut png, &m, FormatTag::Bitmap).unwrap();
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::new("write", side), &m, |b, m| {
            b.iter(|| {
                let mut out = Vec::with_capacity(png.len());
                writer.write(&mut out, black_box(m), FormatTag::Bitmap).unwrap();
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("read", side), &png, |b, png| {
            b.iter(|| {
                let mut back = RowMatrix::<BitVector>::new();
                reader
                    .read(&mut black_box(png.as_slice()), &mut back, FormatTag::Bitmap)
                    .unwrap();
                black_box(back);
            });
        });
    }
    group.finish();
}

#[cfg(not(feature = "png"))]
fn bench_bitmap(_: &mut Criterion) {}

criterion_group!(benches, bench_text_formats, bench_bitmap);
criterion_main!(benches);
