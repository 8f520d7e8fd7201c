//! Display-only tabular rendering
//!
//! Every row becomes `[ a . b ]` with cells right-aligned to a common
//! width and zeros shown as `.`. There is no reader for this layout.

use std::io::Write;

use mtxio_core::constants::PRETTY_ZERO;
use mtxio_core::{Field, MatrixSource};
use tracing::debug;

use super::{dense_row, for_each_nonzero};
use crate::config::IoConfig;
use crate::error::Result;

pub(crate) fn write<W, F, M>(out: &mut W, field: &F, config: &IoConfig, matrix: &M) -> Result<()>
where
    W: Write,
    F: Field,
    M: MatrixSource<F::Element>,
{
    let (rows, cols) = matrix.dimensions();
    let zero = field.zero();
    let one = field.one();

    // Zeros render as one char, so only stored nonzeros can widen a column.
    let mut cell = String::new();
    let mut width = config.pretty_width.max(1);
    for_each_nonzero(field, matrix, |_, _, a| {
        cell.clear();
        field.write_scalar(&mut cell, a)?;
        width = width.max(cell.chars().count());
        Ok(())
    })?;

    let mut line = String::new();
    for i in 0..rows {
        line.clear();
        line.push('[');
        for a in dense_row(matrix, i, &zero, &one)? {
            cell.clear();
            if field.is_zero(a) {
                cell.push(PRETTY_ZERO);
            } else {
                field.write_scalar(&mut cell, a)?;
            }
            line.push(' ');
            let pad = width.saturating_sub(cell.chars().count());
            line.extend(std::iter::repeat(' ').take(pad));
            line.push_str(&cell);
        }
        line.push_str(" ]\n");
        out.write_all(line.as_bytes())?;
    }
    debug!(rows, cols, width, "wrote pretty matrix");
    Ok(())
}
