//! Coordinate list grammars: Turner, OneBased and Guillaume
//!
//! A dimension header followed by one `row col value` triple per line.
//! The three styles differ in index base, in the third header field and
//! in how the list ends.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use mtxio_core::constants::coordinate::{ONE_BASE, SENTINEL, TURNER_BASE};
use mtxio_core::validation::{check_coordinate, check_dimension, is_type_marker, parse_index};
use mtxio_core::{Axis, Field, FormatTag, MatrixSource, MatrixTarget, MtxError, VectorPopulator};
use tracing::debug;

use super::{for_each_nonzero, parse_scalar};
use crate::config::IoConfig;
use crate::error::{Error, Result};
use crate::scanner::TextScanner;

/// Variant of the coordinate grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateStyle {
    /// `R C` header, 0-based triples until end of stream
    Turner,
    /// `R C N` header, exactly N 1-based triples
    OneBased,
    /// `R C T` header, 1-based triples closed by `0 0 0`
    Guillaume,
}

impl CoordinateStyle {
    pub const fn base(self) -> usize {
        match self {
            CoordinateStyle::Turner => TURNER_BASE,
            CoordinateStyle::OneBased | CoordinateStyle::Guillaume => ONE_BASE,
        }
    }

    pub const fn tag(self) -> FormatTag {
        match self {
            CoordinateStyle::Turner => FormatTag::Turner,
            CoordinateStyle::OneBased => FormatTag::OneBased,
            CoordinateStyle::Guillaume => FormatTag::Guillaume,
        }
    }
}

#[derive(Debug)]
struct Header {
    rows: usize,
    cols: usize,
    /// Declared entry count, OneBased only
    entries: Option<usize>,
}

fn parse_header(style: CoordinateStyle, fields: &[&str], config: &IoConfig) -> Result<Header> {
    let expected = match style {
        CoordinateStyle::Turner => "`rows cols`",
        CoordinateStyle::OneBased => "`rows cols entries`",
        CoordinateStyle::Guillaume => "`rows cols marker`",
    };
    let malformed = || Error::invalid(format!("malformed header, expected {expected}"));

    let (dims, third) = match (style, fields) {
        (CoordinateStyle::Turner, [r, c]) => ((r, c), None),
        (CoordinateStyle::OneBased, [r, c, n]) => ((r, c), Some(parse_index(n)?)),
        (CoordinateStyle::Guillaume, [r, c, marker]) if is_type_marker(marker) => ((r, c), None),
        _ => return Err(malformed()),
    };
    let rows = parse_index(dims.0).map_err(|_| malformed())?;
    let cols = parse_index(dims.1).map_err(|_| malformed())?;
    Ok(Header {
        rows: check_dimension(rows, config.max_dimension)?,
        cols: check_dimension(cols, config.max_dimension)?,
        entries: third,
    })
}

/// One parsed body line; `None` for the Guillaume sentinel
fn parse_entry<R: BufRead, F: Field>(
    style: CoordinateStyle,
    scanner: &TextScanner<R>,
    field: &F,
    header: &Header,
) -> Result<Option<(usize, usize, F::Element)>> {
    let fields: Vec<&str> = scanner.fields().collect();
    let [r, c, v] = fields[..] else {
        return Err(scanner.error(Error::invalid(format!(
            "expected `row col value`, found {} fields",
            fields.len()
        ))));
    };
    let row = parse_index(r).map_err(|e| scanner.error(e))?;
    let col = parse_index(c).map_err(|e| scanner.error(e))?;
    if style == CoordinateStyle::Guillaume && row == 0 && col == 0 {
        let value = parse_scalar(field, scanner, v)?;
        if !field.is_zero(&value) {
            return Err(scanner.error(Error::invalid(format!(
                "entry (0, 0) outside {}x{} matrix; terminator is `{SENTINEL}`",
                header.rows, header.cols
            ))));
        }
        return Ok(None);
    }
    let (row, col) = check_coordinate(row, col, style.base(), header.rows, header.cols).map_err(
        |_| {
            scanner.error(Error::invalid(format!(
                "entry ({r}, {c}) outside {}x{} matrix",
                header.rows, header.cols
            )))
        },
    )?;
    let value = parse_scalar(field, scanner, v)?;
    Ok(Some((row, col, value)))
}

pub(crate) fn read<R, F, M>(
    style: CoordinateStyle,
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
    if !scanner.advance_record()? {
        return Err(scanner.error(Error::invalid("missing dimension header")));
    }
    let header = {
        let fields: Vec<&str> = scanner.fields().collect();
        parse_header(style, &fields, config).map_err(|e| scanner.error(e))?
    };

    matrix.resize(0, 0);
    matrix.resize(header.rows, header.cols);
    let axis = matrix.iteration_order().primary_axis();

    let mut count = 0usize;
    loop {
        if header.entries == Some(count) {
            break;
        }
        if !scanner.advance_record()? {
            match style {
                CoordinateStyle::Turner => break,
                CoordinateStyle::OneBased => {
                    return Err(scanner.error(Error::invalid(format!(
                        "{}: expected {} entries, found {count}",
                        MtxError::MissingTerminator,
                        header.entries.unwrap_or_default()
                    ))))
                }
                CoordinateStyle::Guillaume => {
                    return Err(scanner.error(Error::invalid(format!(
                        "{}: no `{SENTINEL}` line",
                        MtxError::MissingTerminator
                    ))))
                }
            }
        }
        let Some((row, col, value)) = parse_entry(style, scanner, populator.field(), &header)?
        else {
            break;
        };
        let (vector, index) = match axis {
            Axis::Rows => (matrix.row_mut(row), col),
            Axis::Cols => (matrix.col_mut(col), row),
        };
        let mut vector = vector
            .ok_or_else(|| scanner.error(Error::invalid("target vector is not accessible")))?;
        populator
            .append(&mut vector, index, value)
            .map_err(|e| scanner.error(e))?;
        count += 1;
    }

    debug!(
        format = %style.tag(),
        rows = header.rows,
        cols = header.cols,
        entries = count,
        "read coordinate matrix"
    );
    Ok(())
}

pub(crate) fn write<W, F, M>(
    style: CoordinateStyle,
    out: &mut W,
    field: &F,
    config: &IoConfig,
    matrix: &M,
) -> Result<()>
where
    W: Write,
    F: Field,
    M: MatrixSource<F::Element>,
{
    let (rows, cols) = matrix.dimensions();
    let mut line = String::new();
    match style {
        CoordinateStyle::Turner => writeln!(line, "{rows} {cols}")?,
        CoordinateStyle::OneBased => {
            let mut nnz = 0usize;
            for_each_nonzero(field, matrix, |_, _, _| {
                nnz += 1;
                Ok(())
            })?;
            writeln!(line, "{rows} {cols} {nnz}")?
        }
        CoordinateStyle::Guillaume => writeln!(line, "{rows} {cols} {}", config.guillaume_marker)?,
    }
    out.write_all(line.as_bytes())?;

    let base = style.base();
    let mut count = 0usize;
    for_each_nonzero(field, matrix, |i, j, a| {
        line.clear();
        write!(line, "{} {} ", i + base, j + base)?;
        field.write_scalar(&mut line, a)?;
        line.push('\n');
        out.write_all(line.as_bytes())?;
        count += 1;
        Ok(())
    })?;

    if style == CoordinateStyle::Guillaume {
        writeln!(out, "{SENTINEL}")?;
    }
    debug!(format = %style.tag(), rows, cols, entries = count, "wrote coordinate matrix");
    Ok(())
}
