//! Text grammars
//!
//! Seven textual encodings share one read/write contract and differ only
//! in index base, coordinate list versus positional rows, delimiters and
//! the presence of a header or terminator:
//!
//! | Tag       | Kind       | Header  | Body                       | Base | End           |
//! |-----------|------------|---------|----------------------------|------|---------------|
//! | Turner    | coordinate | `R C`   | lines `r c v`              | 0    | end of stream |
//! | OneBased  | coordinate | `R C N` | exactly N lines `r c v`    | 1    | entry count   |
//! | Guillaume | coordinate | `R C T` | lines `r c v`              | 1    | line `0 0 0`  |
//! | Maple     | dense      | none    | `[[a, b], [c, d]]`         |      | closing `]`   |
//! | Matlab    | dense      | none    | `[a b; c d]`, `,` allowed  |      | closing `]`   |
//! | Sage      | dense      | none    | one `[a b]` line per row   |      | end of stream |
//! | Pretty    | dense      | none    | `[ a . b ]` lines          |      | write only    |

pub mod bracketed;
pub mod coordinate;
pub mod pretty;

use std::io::{BufRead, Write};

use mtxio_core::{Axis, Field, FormatTag, MatrixSource, VectorPopulator};
use mtxio_core::{MatrixTarget, Scalar};

pub use bracketed::BracketStyle;
pub use coordinate::CoordinateStyle;

use crate::config::IoConfig;
use crate::error::{Error, Result};
use crate::scanner::TextScanner;

/// Text grammar selected from a format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextGrammar {
    Coordinate(CoordinateStyle),
    Bracketed(BracketStyle),
    Pretty,
}

impl TextGrammar {
    /// Grammar for a text tag, `None` for bitmap and control tags
    pub const fn for_tag(tag: FormatTag) -> Option<Self> {
        let grammar = match tag {
            FormatTag::Turner => TextGrammar::Coordinate(CoordinateStyle::Turner),
            FormatTag::OneBased => TextGrammar::Coordinate(CoordinateStyle::OneBased),
            FormatTag::Guillaume => TextGrammar::Coordinate(CoordinateStyle::Guillaume),
            FormatTag::Maple => TextGrammar::Bracketed(BracketStyle::Maple),
            FormatTag::Matlab => TextGrammar::Bracketed(BracketStyle::Matlab),
            FormatTag::Sage => TextGrammar::Bracketed(BracketStyle::Sage),
            FormatTag::Pretty => TextGrammar::Pretty,
            FormatTag::Detect | FormatTag::Unknown | FormatTag::Bitmap => return None,
        };
        Some(grammar)
    }

    pub const fn tag(self) -> FormatTag {
        match self {
            TextGrammar::Coordinate(style) => style.tag(),
            TextGrammar::Bracketed(style) => style.tag(),
            TextGrammar::Pretty => FormatTag::Pretty,
        }
    }

    /// Populate `matrix` from `input`
    pub fn read<R, F, M>(
        self,
        input: R,
        populator: &VectorPopulator<'_, F>,
        config: &IoConfig,
        matrix: &mut M,
    ) -> Result<()>
    where
        R: BufRead,
        F: Field,
        M: MatrixTarget<F::Element>,
    {
        let mut scanner = TextScanner::new(input);
        match self {
            TextGrammar::Coordinate(style) => {
                coordinate::read(style, &mut scanner, populator, config, matrix)
            }
            TextGrammar::Bracketed(style) => {
                bracketed::read(style, &mut scanner, populator, config, matrix)
            }
            TextGrammar::Pretty => Err(Error::not_implemented(
                "pretty output has no reader",
            )),
        }
    }

    /// Emit `matrix` to `out`
    pub fn write<W, F, M>(self, out: &mut W, field: &F, config: &IoConfig, matrix: &M) -> Result<()>
    where
        W: Write,
        F: Field,
        M: MatrixSource<F::Element>,
    {
        match self {
            TextGrammar::Coordinate(style) => coordinate::write(style, out, field, config, matrix),
            TextGrammar::Bracketed(style) => bracketed::write(style, out, field, matrix),
            TextGrammar::Pretty => pretty::write(out, field, config, matrix),
        }
    }
}

fn inaccessible(axis: Axis, index: usize) -> Error {
    match axis {
        Axis::Rows => Error::invalid(format!("row {index} is not accessible")),
        Axis::Cols => Error::invalid(format!("column {index} is not accessible")),
    }
}

/// Visit every nonzero entry in the matrix's native order
///
/// Row-major sources are walked row by row, column-major-only sources
/// column by column. Indices passed to `f` are 0-based `(row, col)`.
pub(crate) fn for_each_nonzero<F, M>(
    field: &F,
    matrix: &M,
    mut f: impl FnMut(usize, usize, &F::Element) -> Result<()>,
) -> Result<()>
where
    F: Field,
    M: MatrixSource<F::Element>,
{
    let one = field.one();
    let axis = matrix.iteration_order().primary_axis();
    let count = match axis {
        Axis::Rows => matrix.rows(),
        Axis::Cols => matrix.cols(),
    };
    for outer in 0..count {
        let view = match axis {
            Axis::Rows => matrix.row(outer),
            Axis::Cols => matrix.col(outer),
        }
        .ok_or_else(|| inaccessible(axis, outer))?;
        for (inner, scalar) in view.entries() {
            let a = scalar.resolve(&one);
            if field.is_zero(a) {
                continue;
            }
            match axis {
                Axis::Rows => f(outer, inner, a)?,
                Axis::Cols => f(inner, outer, a)?,
            }
        }
    }
    Ok(())
}

/// Every cell of row `i`, zeros included
pub(crate) fn dense_row<'a, E, M>(
    matrix: &'a M,
    i: usize,
    zero: &'a E,
    one: &'a E,
) -> Result<Vec<&'a E>>
where
    M: MatrixSource<E>,
{
    let resolve = |scalar: Option<Scalar<'a, E>>| scalar.map_or(zero, |s| s.resolve(one));
    let cols = matrix.cols();
    match matrix.iteration_order().primary_axis() {
        Axis::Rows => {
            let view = matrix.row(i).ok_or_else(|| inaccessible(Axis::Rows, i))?;
            Ok((0..cols).map(|j| resolve(view.get(j))).collect())
        }
        Axis::Cols => (0..cols)
            .map(|j| {
                let view = matrix.col(j).ok_or_else(|| inaccessible(Axis::Cols, j))?;
                Ok(resolve(view.get(i)))
            })
            .collect(),
    }
}

/// Parse one scalar token, pointing errors at the scanner position
pub(crate) fn parse_scalar<R: BufRead, F: Field>(
    field: &F,
    scanner: &TextScanner<R>,
    token: &str,
) -> Result<F::Element> {
    field
        .parse_scalar(token)
        .ok_or_else(|| scanner.error(Error::invalid(format!("malformed scalar {token:?}"))))
}
