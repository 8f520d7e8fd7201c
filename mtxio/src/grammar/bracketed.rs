//! Bracketed dense grammars: Maple, Matlab and Sage
//!
//! Every cell is written positionally. Readers have no header to go on,
//! so the width comes from the first row and the target grows one row at
//! a time. Rows without any cell are skipped, which means a matrix with
//! zero columns reads back as 0×0.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use mtxio_core::validation::check_dimension;
use mtxio_core::{Axis, Field, FormatTag, MatrixSource, MatrixTarget, MtxError, VectorPopulator};
use tracing::debug;

use super::{dense_row, parse_scalar};
use crate::config::IoConfig;
use crate::error::{Error, Result};
use crate::scanner::{TextScanner, Token};

/// Variant of the bracketed grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketStyle {
    /// `[[a, b], [c, d]]`
    Maple,
    /// `[a b; c d]`
    Matlab,
    /// One `[a b]` per line
    Sage,
}

impl BracketStyle {
    pub const fn tag(self) -> FormatTag {
        match self {
            BracketStyle::Maple => FormatTag::Maple,
            BracketStyle::Matlab => FormatTag::Matlab,
            BracketStyle::Sage => FormatTag::Sage,
        }
    }
}

/// Appends parsed rows to a target that starts out empty
struct RowGrower<'a, 'f, F: Field, M> {
    populator: &'a VectorPopulator<'f, F>,
    matrix: &'a mut M,
    axis: Axis,
    max_dimension: usize,
    width: Option<usize>,
    rows: usize,
}

impl<'a, 'f, F, M> RowGrower<'a, 'f, F, M>
where
    F: Field,
    M: MatrixTarget<F::Element>,
{
    fn new(populator: &'a VectorPopulator<'f, F>, matrix: &'a mut M, config: &IoConfig) -> Self {
        matrix.resize(0, 0);
        let axis = matrix.iteration_order().primary_axis();
        Self {
            populator,
            matrix,
            axis,
            max_dimension: config.max_dimension,
            width: None,
            rows: 0,
        }
    }

    fn push(&mut self, row: Vec<F::Element>) -> Result<()> {
        if row.is_empty() {
            return Ok(());
        }
        let width = match self.width {
            Some(width) => width,
            None => *self
                .width
                .insert(check_dimension(row.len(), self.max_dimension)?),
        };
        if row.len() != width {
            return Err(Error::invalid(format!(
                "{}: row {} has {} cells, expected {width}",
                MtxError::WidthMismatch,
                self.rows + 1,
                row.len()
            )));
        }
        let i = check_dimension(self.rows + 1, self.max_dimension)? - 1;
        self.matrix.resize(i + 1, width);
        match self.axis {
            Axis::Rows => {
                let mut vector = self
                    .matrix
                    .row_mut(i)
                    .ok_or_else(|| Error::invalid(format!("row {i} is not accessible")))?;
                for (j, a) in row.into_iter().enumerate() {
                    self.populator.append(&mut vector, j, a)?;
                }
            }
            Axis::Cols => {
                for (j, a) in row.into_iter().enumerate() {
                    let mut vector = self.matrix.col_mut(j).ok_or_else(|| {
                        Error::invalid(format!("column {j} is not accessible"))
                    })?;
                    self.populator.append(&mut vector, i, a)?;
                }
            }
        }
        self.rows += 1;
        Ok(())
    }
}

fn unexpected<R: BufRead>(
    scanner: &TextScanner<R>,
    found: Option<Token>,
    expected: &str,
) -> Error {
    let found = match found {
        Some(token) => token.describe(),
        None => "end of stream".to_string(),
    };
    scanner.error(Error::invalid(format!("expected {expected}, found {found}")))
}

/// Cells of one Maple row, after its opening bracket
fn read_maple_row<R: BufRead, F: Field>(
    scanner: &mut TextScanner<R>,
    field: &F,
) -> Result<Vec<F::Element>> {
    let mut row = Vec::new();
    if scanner.peek_token()? == Some(&Token::Close) {
        scanner.next_token()?;
        return Ok(row);
    }
    loop {
        match scanner.next_token()? {
            Some(Token::Atom(text)) => row.push(parse_scalar(field, scanner, &text)?),
            other => return Err(unexpected(scanner, other, "a scalar")),
        }
        match scanner.next_token()? {
            Some(Token::Comma) => continue,
            Some(Token::Close) => return Ok(row),
            other => return Err(unexpected(scanner, other, "',' or ']'")),
        }
    }
}

fn read_maple<R, F, M>(
    scanner: &mut TextScanner<R>,
    grower: &mut RowGrower<'_, '_, F, M>,
) -> Result<()>
where
    R: BufRead,
    F: Field,
    M: MatrixTarget<F::Element>,
{
    let field = grower.populator.field();
    scanner.expect(Token::Open)?;
    if scanner.peek_token()? == Some(&Token::Close) {
        scanner.next_token()?;
        return Ok(());
    }
    loop {
        scanner.expect(Token::Open)?;
        let row = read_maple_row(scanner, field)?;
        grower.push(row).map_err(|e| scanner.error(e))?;
        match scanner.next_token()? {
            Some(Token::Comma) => continue,
            Some(Token::Close) => return Ok(()),
            other => return Err(unexpected(scanner, other, "',' or ']'")),
        }
    }
}

fn read_matlab<R, F, M>(
    scanner: &mut TextScanner<R>,
    grower: &mut RowGrower<'_, '_, F, M>,
) -> Result<()>
where
    R: BufRead,
    F: Field,
    M: MatrixTarget<F::Element>,
{
    let field = grower.populator.field();
    scanner.expect(Token::Open)?;
    let mut row = Vec::new();
    loop {
        match scanner.next_token()? {
            Some(Token::Atom(text)) => row.push(parse_scalar(field, scanner, &text)?),
            Some(Token::Comma) => {}
            Some(Token::Semicolon) => {
                grower
                    .push(std::mem::take(&mut row))
                    .map_err(|e| scanner.error(e))?;
            }
            Some(Token::Close) => {
                return grower.push(row).map_err(|e| scanner.error(e));
            }
            other => return Err(unexpected(scanner, other, "a scalar, ';' or ']'")),
        }
    }
}

fn read_sage<R, F, M>(
    scanner: &mut TextScanner<R>,
    grower: &mut RowGrower<'_, '_, F, M>,
) -> Result<()>
where
    R: BufRead,
    F: Field,
    M: MatrixTarget<F::Element>,
{
    let field = grower.populator.field();
    loop {
        match scanner.next_token()? {
            None => return Ok(()),
            Some(Token::Open) => {}
            other => return Err(unexpected(scanner, other, "'['")),
        }
        let mut row = Vec::new();
        loop {
            match scanner.next_token()? {
                Some(Token::Atom(text)) => row.push(parse_scalar(field, scanner, &text)?),
                Some(Token::Comma) => {}
                Some(Token::Close) => break,
                other => return Err(unexpected(scanner, other, "a scalar or ']'")),
            }
        }
        grower.push(row).map_err(|e| scanner.error(e))?;
    }
}

pub(crate) fn read<R, F, M>(
    style: BracketStyle,
    scanner: &mut TextScanner<R>,
    populator: &VectorPopulator<'_, F>,
    config: &IoConfig,
    matrix: &mut M,
) -> Result<()>
where
    R: BufRead,
    F: Field,
    M: MatrixTarget<F::Element>,
{
    let mut grower = RowGrower::new(populator, matrix, config);
    match style {
        BracketStyle::Maple => read_maple(scanner, &mut grower)?,
        BracketStyle::Matlab => read_matlab(scanner, &mut grower)?,
        BracketStyle::Sage => read_sage(scanner, &mut grower)?,
    }
    debug!(
        format = %style.tag(),
        rows = grower.rows,
        cols = grower.width.unwrap_or(0),
        "read dense matrix"
    );
    Ok(())
}

pub(crate) fn write<W, F, M>(style: BracketStyle, out: &mut W, field: &F, matrix: &M) -> Result<()>
where
    W: Write,
    F: Field,
    M: MatrixSource<F::Element>,
{
    let (rows, cols) = matrix.dimensions();
    if rows == 0 {
        out.write_all(b"[]\n")?;
        return Ok(());
    }
    let (separator, open, close) = match style {
        BracketStyle::Maple => (", ", "[", "]"),
        BracketStyle::Matlab | BracketStyle::Sage => (" ", "", ""),
    };
    let zero = field.zero();
    let one = field.one();
    let mut line = String::new();
    for i in 0..rows {
        line.clear();
        line.push_str(match (style, i) {
            (BracketStyle::Maple, 0) => "[",
            (BracketStyle::Maple, _) => " ",
            (BracketStyle::Matlab, 0) => "[",
            (BracketStyle::Matlab, _) => " ",
            (BracketStyle::Sage, _) => "[",
        });
        line.push_str(open);
        for (j, a) in dense_row(matrix, i, &zero, &one)?.into_iter().enumerate() {
            if j > 0 {
                line.push_str(separator);
            }
            field.write_scalar(&mut line, a)?;
        }
        line.push_str(close);
        let last = i + 1 == rows;
        line.push_str(match (style, last) {
            (BracketStyle::Maple, false) => ",\n",
            (BracketStyle::Maple, true) => "]\n",
            (BracketStyle::Matlab, false) => ";\n",
            (BracketStyle::Matlab, true) => "]\n",
            (BracketStyle::Sage, _) => "]\n",
        });
        out.write_all(line.as_bytes())?;
    }
    debug!(format = %style.tag(), rows, cols, "wrote dense matrix");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{ColMatrix, RowMatrix};
    use mtxio_core::fields::Integers;
    use mtxio_core::{DenseVector, MatrixShape, Scalar, SparseVector};
    use std::io::Cursor;

    fn read_str<M: MatrixTarget<i64>>(style: BracketStyle, text: &str, m: &mut M) -> Result<()> {
        let populator = VectorPopulator::new(&Integers);
        let mut scanner = TextScanner::new(Cursor::new(text));
        read(style, &mut scanner, &populator, &IoConfig::default(), m)
    }

    fn write_str<M: MatrixSource<i64>>(style: BracketStyle, m: &M) -> String {
        let mut out = Vec::new();
        write(style, &mut out, &Integers, m).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> RowMatrix<DenseVector<i64>> {
        let mut m = RowMatrix::with_shape(2, 3);
        let populator = VectorPopulator::new(&Integers);
        for (i, j, v) in [(0, 0, 1), (0, 2, -2), (1, 1, 3)] {
            populator.append(&mut m.row_mut(i).unwrap(), j, v).unwrap();
        }
        m
    }

    #[test]
    fn test_writers() {
        let m = sample();
        assert_eq!(
            write_str(BracketStyle::Maple, &m),
            "[[1, 0, -2],\n [0, 3, 0]]\n"
        );
        assert_eq!(write_str(BracketStyle::Matlab, &m), "[1 0 -2;\n 0 3 0]\n");
        assert_eq!(write_str(BracketStyle::Sage, &m), "[1 0 -2]\n[0 3 0]\n");
        assert_eq!(
            write_str(BracketStyle::Sage, &RowMatrix::<DenseVector<i64>>::new()),
            "[]\n"
        );
    }

    #[test]
    fn test_readers_accept_writer_output() {
        let expected = sample();
        for style in [BracketStyle::Maple, BracketStyle::Matlab, BracketStyle::Sage] {
            let mut m = RowMatrix::<DenseVector<i64>>::new();
            read_str(style, &write_str(style, &expected), &mut m).unwrap();
            assert_eq!(m, expected, "{style:?}");
        }
    }

    #[test]
    fn test_matlab_accepts_commas_and_newlines() {
        let mut m = ColMatrix::<SparseVector<i64>>::new();
        read_str(BracketStyle::Matlab, "[1, 0\n 0, 4;\n5 6 7 8]", &mut m).unwrap();
        assert_eq!(m.dimensions(), (2, 4));
        assert!(matches!(m.entry(0, 0), Some(Scalar::Value(&1))));
        assert!(m.entry(0, 1).is_none());

        let mut m = RowMatrix::<DenseVector<i64>>::new();
        read_str(BracketStyle::Matlab, "[1 2; 3 4]", &mut m).unwrap();
        assert_eq!(m.row_vectors()[1].as_slice(), &[3, 4]);
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        for (style, text) in [
            (BracketStyle::Maple, "[[1, 2], [3]]"),
            (BracketStyle::Matlab, "[1 2; 3]"),
            (BracketStyle::Sage, "[1 2]\n[3 4 5]\n"),
        ] {
            let mut m = RowMatrix::<DenseVector<i64>>::new();
            let err = read_str(style, text, &mut m).unwrap_err();
            assert!(err.is_invalid_input(), "{style:?}: {err}");
            assert!(err.to_string().contains("first row"), "{err}");
        }
    }

    #[test]
    fn test_malformed_input() {
        for (style, text) in [
            (BracketStyle::Maple, "[[1, 2]"),
            (BracketStyle::Maple, "[[1 2]]"),
            (BracketStyle::Matlab, "[1 2"),
            (BracketStyle::Sage, "1 2\n"),
            (BracketStyle::Sage, "[1 x]\n"),
        ] {
            let mut m = RowMatrix::<DenseVector<i64>>::new();
            let err = read_str(style, text, &mut m).unwrap_err();
            assert!(err.is_invalid_input(), "{style:?} {text:?}: {err}");
        }
    }

    #[test]
    fn test_empty_matrices() {
        for (style, text) in [
            (BracketStyle::Maple, "[]"),
            (BracketStyle::Matlab, "[]"),
            (BracketStyle::Sage, "[]\n"),
            (BracketStyle::Sage, ""),
        ] {
            let mut m = RowMatrix::<DenseVector<i64>>::with_shape(2, 2);
            read_str(style, text, &mut m).unwrap();
            assert_eq!(m.dimensions(), (0, 0), "{style:?}");
        }
    }
}
