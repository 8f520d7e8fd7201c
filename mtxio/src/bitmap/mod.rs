//! Bitmap read/write driven through a pluggable image container
//!
//! The row codec in `mtxio_core::bitmap` maps vector views to scanline
//! bytes. This module drives it one scanline at a time against a
//! [`BitmapContainer`], which owns the image framing. Only one scanline is
//! ever held in memory.

#[cfg(feature = "png")]
pub mod png;

use std::io::{Read, Write};
use std::marker::PhantomData;

use mtxio_core::bitmap::{check_iteration_order, check_vector_category, decode_row, encode_row};
use mtxio_core::validation::check_dimension;
use mtxio_core::{BitmapHeader, Field, MatrixShape, MatrixSource, MatrixTarget, VectorPopulator};
use tracing::{debug, trace};

use crate::config::IoConfig;
use crate::error::{Error, Result};

#[cfg(feature = "png")]
pub use self::png::PngContainer;

/// Receives decoded scanlines from a container
pub trait ScanlineSink {
    /// Called once with the image geometry, before any row
    fn begin(&mut self, header: BitmapHeader) -> Result<()>;

    /// Called once per scanline, top row first
    fn row(&mut self, index: usize, scanline: &[u8]) -> Result<()>;
}

/// Supplies scanlines to a container
pub trait ScanlineSource {
    fn header(&self) -> BitmapHeader;

    /// Render row `index` into `scanline`, which holds
    /// `header().scanline_len()` bytes
    fn fill_row(&mut self, index: usize, scanline: &mut [u8]) -> Result<()>;
}

/// Image framing around grayscale scanlines
///
/// Implementations decode or encode one scanline at a time and hand the
/// raw sample bytes to the callbacks. They never see matrix types.
pub trait BitmapContainer: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn read_scanlines(&self, input: &mut dyn Read, sink: &mut dyn ScanlineSink) -> Result<()>;

    fn write_scanlines(&self, out: &mut dyn Write, source: &mut dyn ScanlineSource)
        -> Result<()>;

    /// Reject geometry this container cannot encode, before any output
    fn check_header(&self, header: &BitmapHeader) -> Result<()> {
        let _ = header;
        Ok(())
    }
}

/// Reject matrices a bitmap cannot carry, before any I/O
pub fn check_capabilities<S: MatrixShape + ?Sized>(matrix: &S) -> Result<()> {
    let gate = check_vector_category(matrix.vector_category())
        .and_then(|()| check_iteration_order(matrix.iteration_order()));
    if let Err(err) = gate {
        debug!(
            category = ?matrix.vector_category(),
            order = ?matrix.iteration_order(),
            "bitmap rejected matrix capabilities"
        );
        return Err(err.into());
    }
    Ok(())
}

/// Everything [`write_bitmap`] would reject, checked without writing
pub fn check_writable<S: MatrixShape + ?Sized>(
    container: &dyn BitmapContainer,
    config: &IoConfig,
    matrix: &S,
) -> Result<()> {
    check_capabilities(matrix)?;
    let (rows, cols) = matrix.dimensions();
    container.check_header(&BitmapHeader::new(cols, rows, config.sample_depth))
}

/// Scanline sink writing rows straight into a target matrix
struct MatrixSink<'a, 'f, F: Field, M> {
    populator: &'a VectorPopulator<'f, F>,
    matrix: &'a mut M,
    max_dimension: usize,
    header: Option<BitmapHeader>,
    rows_seen: usize,
}

impl<F, M> ScanlineSink for MatrixSink<'_, '_, F, M>
where
    F: Field,
    M: MatrixTarget<F::Element>,
{
    fn begin(&mut self, header: BitmapHeader) -> Result<()> {
        if self.header.is_some() {
            return Err(Error::invalid("bitmap container reported two headers"));
        }
        check_dimension(header.height, self.max_dimension)?;
        check_dimension(header.width, self.max_dimension)?;
        self.matrix.resize(0, 0);
        self.matrix.resize(header.height, header.width);
        self.header = Some(header);
        Ok(())
    }

    fn row(&mut self, index: usize, scanline: &[u8]) -> Result<()> {
        let header = self
            .header
            .ok_or_else(|| Error::invalid("bitmap scanline before image header"))?;
        if index != self.rows_seen {
            return Err(Error::invalid(format!(
                "bitmap scanline {index} arrived, expected {}",
                self.rows_seen
            )));
        }
        if index >= header.height {
            return Err(Error::invalid(format!(
                "bitmap has more than the declared {} rows",
                header.height
            )));
        }
        let mut target = self
            .matrix
            .row_mut(index)
            .ok_or_else(|| Error::invalid(format!("row {index} is not accessible")))?;
        decode_row(
            scanline,
            header.width,
            header.depth,
            self.populator,
            &mut target,
        )?;
        trace!(row = index, "decoded scanline");
        self.rows_seen += 1;
        Ok(())
    }
}

/// Scanline source reading rows from a matrix
struct MatrixRows<'a, E, M> {
    matrix: &'a M,
    header: BitmapHeader,
    _element: PhantomData<fn() -> E>,
}

impl<E, M: MatrixSource<E>> ScanlineSource for MatrixRows<'_, E, M> {
    fn header(&self) -> BitmapHeader {
        self.header
    }

    fn fill_row(&mut self, index: usize, scanline: &mut [u8]) -> Result<()> {
        let view = self
            .matrix
            .row(index)
            .ok_or_else(|| Error::invalid(format!("row {index} is not accessible")))?;
        encode_row(&view, self.header.width, self.header.depth, scanline)?;
        Ok(())
    }
}

/// Populate `matrix` from a bitmap stream
pub fn read_bitmap<F, M>(
    container: &dyn BitmapContainer,
    input: &mut dyn Read,
    populator: &VectorPopulator<'_, F>,
    config: &IoConfig,
    matrix: &mut M,
) -> Result<()>
where
    F: Field,
    M: MatrixTarget<F::Element>,
{
    check_capabilities(&*matrix)?;
    let mut sink = MatrixSink {
        populator,
        matrix,
        max_dimension: config.max_dimension,
        header: None,
        rows_seen: 0,
    };
    container.read_scanlines(input, &mut sink)?;

    let header = sink
        .header
        .ok_or_else(|| Error::invalid("bitmap container produced no image header"))?;
    if sink.rows_seen != header.height {
        return Err(Error::invalid(format!(
            "bitmap declares {} rows but carried {}",
            header.height, sink.rows_seen
        )));
    }
    debug!(
        container = container.name(),
        rows = header.height,
        cols = header.width,
        depth = header.depth.bits(),
        "read bitmap matrix"
    );
    Ok(())
}

/// Emit `matrix` as a bitmap
pub fn write_bitmap<E, M>(
    container: &dyn BitmapContainer,
    out: &mut dyn Write,
    config: &IoConfig,
    matrix: &M,
) -> Result<()>
where
    M: MatrixSource<E>,
{
    check_writable(container, config, matrix)?;
    let (rows, cols) = matrix.dimensions();
    let mut source = MatrixRows {
        matrix,
        header: BitmapHeader::new(cols, rows, config.sample_depth),
        _element: PhantomData,
    };
    container.write_scanlines(out, &mut source)?;
    debug!(
        container = container.name(),
        rows,
        cols,
        depth = config.sample_depth.bits(),
        "wrote bitmap matrix"
    );
    Ok(())
}
