//! Read back the files produced by the write_matrix example, detecting
//! each format from its content

use mtxio::fields::{Gf2, Integers};
use mtxio::{
    FormatTag, MatrixReader, MatrixShape, MatrixWriter, RowMatrix, SparseBitVector, SparseVector,
};
use std::path::Path;
use std::time::Instant;

fn main() -> mtxio::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let reader = MatrixReader::new(Integers);
    let writer = MatrixWriter::new(Integers);
    for filename in [
        "example_matrix.sms",
        "example_matrix.m",
        "example_matrix.mpl",
        "example_matrix.sage",
    ] {
        if !Path::new(filename).exists() {
            println!("File '{filename}' not found!");
            println!("   Run 'cargo run --example write_matrix' first");
            return Ok(());
        }

        let start = Instant::now();
        let mut m = RowMatrix::<SparseVector<i64>>::new();
        let tag = reader.read_path(filename, &mut m, FormatTag::Detect)?;
        let nnz: usize = m.row_vectors().iter().map(SparseVector::nnz).sum();
        let (rows, cols) = m.dimensions();
        println!(
            "{filename}: {tag}, {rows} x {cols}, {nnz} non-zeros, read in {:.3}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        print!("{}", writer.write_to_string(&m, FormatTag::Pretty)?);
    }

    // Pretty output is display only.
    let mut m = RowMatrix::<SparseVector<i64>>::new();
    if let Err(e) = reader.read_path("example_matrix.txt", &mut m, FormatTag::Pretty) {
        println!("\nexample_matrix.txt: {e}");
    }

    if Path::new("example_matrix.png").exists() {
        let mut pattern = RowMatrix::<SparseBitVector>::new();
        let tag = MatrixReader::new(Gf2).read_path(
            "example_matrix.png",
            &mut pattern,
            FormatTag::Detect,
        )?;
        let ones: usize = pattern.row_vectors().iter().map(|r| r.indices().len()).sum();
        println!("\nexample_matrix.png: {tag}, {ones} set pixels");
    }
    Ok(())
}
