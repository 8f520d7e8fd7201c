//! Write one sparse integer matrix in every format mtxio knows

use mtxio::fields::{Gf2, Integers};
use mtxio::{
    Error, FormatTag, IoConfig, MatrixTarget, MatrixWriter, RowMatrix, SparseBitVector,
    SparseVector, VectorPopulator,
};
use std::time::Instant;

fn main() -> mtxio::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let n = 8;
    println!("Building {n} x {n} tridiagonal matrix...");
    let populator = VectorPopulator::new(&Integers);
    let mut m = RowMatrix::<SparseVector<i64>>::with_shape(n, n);
    for i in 0..n {
        let mut row = m.row_mut(i).ok_or_else(|| Error::invalid("row out of range"))?;
        if i > 0 {
            populator.append(&mut row, i - 1, -1)?;
        }
        populator.append(&mut row, i, 2)?;
        if i + 1 < n {
            populator.append(&mut row, i + 1, -1)?;
        }
    }

    let config = IoConfig::default().with_pretty_width(2);
    let writer = MatrixWriter::new(Integers).with_config(config);
    let start = Instant::now();
    for (tag, path) in [
        (FormatTag::Guillaume, "example_matrix.sms"),
        (FormatTag::Matlab, "example_matrix.m"),
        (FormatTag::Maple, "example_matrix.mpl"),
        (FormatTag::Sage, "example_matrix.sage"),
        (FormatTag::Pretty, "example_matrix.txt"),
    ] {
        writer.write_path(path, &m, tag)?;
        println!("   {tag:<9} -> {path}");
    }
    println!("Text formats written in {:?}", start.elapsed());

    println!("\nPretty rendering:");
    let pretty = writer.write_to_string(&m, MatrixWriter::<Integers>::DEFAULT_FORMAT)?;
    print!("{pretty}");

    // The bitmap carries only the nonzero pattern.
    let bits = VectorPopulator::new(&Gf2);
    let mut pattern = RowMatrix::<SparseBitVector>::with_shape(n, n);
    for (i, row) in m.row_vectors().iter().enumerate() {
        let mut target = pattern.row_mut(i).ok_or_else(|| Error::invalid("row out of range"))?;
        for &(j, _) in row.entries() {
            bits.append_bit(&mut target, j, true)?;
        }
    }
    let bitmap = MatrixWriter::new(Gf2);
    match bitmap.write_path("example_matrix.png", &pattern, FormatTag::Detect) {
        Ok(tag) => println!("\n   {tag:<9} -> example_matrix.png"),
        Err(e) if e.is_not_implemented() => println!("\nBitmap output unavailable: {e}"),
        Err(e) => return Err(e),
    }

    println!("\nRun 'cargo run --example read_matrix' to read them back!");
    Ok(())
}
