//! Scanline codec for zero-one matrices
//!
//! One pixel per matrix entry, one scanline per row. A set bit is a
//! nonzero sample and a clear bit is a zero sample. The container that
//! frames the scanlines lives in the std crate; this module only maps
//! between vector views and raw scanline bytes.

use crate::error::{MtxError, Result};
use crate::populate::VectorPopulator;
use crate::traits::{Field, IterationOrder};
use crate::vector::{VectorCategory, VectorView, VectorViewMut};

/// Bits per grayscale sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SampleDepth {
    /// Packed samples, most significant bit first
    #[default]
    One,
    /// One byte per sample, nonzero written as 255
    Eight,
}

impl SampleDepth {
    pub const fn bits(self) -> u8 {
        match self {
            SampleDepth::One => 1,
            SampleDepth::Eight => 8,
        }
    }

    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(SampleDepth::One),
            8 => Some(SampleDepth::Eight),
            _ => None,
        }
    }

    /// Bytes in one scanline of `width` samples
    pub const fn scanline_len(self, width: usize) -> usize {
        match self {
            SampleDepth::One => width.div_ceil(8),
            SampleDepth::Eight => width,
        }
    }
}

/// Image geometry as seen by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Columns of the matrix
    pub width: usize,
    /// Rows of the matrix
    pub height: usize,
    pub depth: SampleDepth,
}

impl BitmapHeader {
    pub const fn new(width: usize, height: usize, depth: SampleDepth) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub const fn scanline_len(&self) -> usize {
        self.depth.scanline_len(self.width)
    }
}

/// Bitmaps carry only zero-one vectors
pub const fn check_vector_category(category: VectorCategory) -> Result<()> {
    if category.is_zero_one() {
        Ok(())
    } else {
        Err(MtxError::UnsupportedVectorCategory)
    }
}

/// Scanlines are rows, so row access is required
pub const fn check_iteration_order(order: IterationOrder) -> Result<()> {
    if order.has_rows() {
        Ok(())
    } else {
        Err(MtxError::UnsupportedIterationOrder)
    }
}

/// Render one row into `scanline`
///
/// `scanline` must hold at least `depth.scanline_len(width)` bytes.
pub fn encode_row<E>(
    row: &VectorView<'_, E>,
    width: usize,
    depth: SampleDepth,
    scanline: &mut [u8],
) -> Result<()> {
    check_vector_category(row.category())?;
    let len = depth.scanline_len(width);
    if scanline.len() < len {
        return Err(MtxError::ScanlineTooShort);
    }
    let scanline = &mut scanline[..len];
    scanline.fill(0);
    for (index, _) in row.entries() {
        if index >= width {
            return Err(MtxError::IndexOutOfBounds);
        }
        match depth {
            SampleDepth::One => scanline[index / 8] |= 0x80 >> (index % 8),
            SampleDepth::Eight => scanline[index] = 0xFF,
        }
    }
    Ok(())
}

/// Populate `target` from one scanline
///
/// Set samples are pushed through the populator in column order, so
/// `target` is expected to start out all-zero.
pub fn decode_row<F: Field>(
    scanline: &[u8],
    width: usize,
    depth: SampleDepth,
    populator: &VectorPopulator<'_, F>,
    target: &mut VectorViewMut<'_, F::Element>,
) -> Result<()> {
    check_vector_category(target.category())?;
    if scanline.len() < depth.scanline_len(width) {
        return Err(MtxError::ScanlineTooShort);
    }
    for_each_set(scanline, width, depth, |index| {
        populator.append_bit(target, index, true)
    })
}

fn for_each_set(
    scanline: &[u8],
    width: usize,
    depth: SampleDepth,
    mut f: impl FnMut(usize) -> Result<()>,
) -> Result<()> {
    match depth {
        SampleDepth::One => {
            for (byte_index, &byte) in scanline[..width.div_ceil(8)].iter().enumerate() {
                if byte == 0 {
                    continue;
                }
                for bit in 0..8 {
                    let index = byte_index * 8 + bit;
                    if index < width && byte & (0x80 >> bit) != 0 {
                        f(index)?;
                    }
                }
            }
        }
        SampleDepth::Eight => {
            for (index, &byte) in scanline[..width].iter().enumerate() {
                if byte != 0 {
                    f(index)?;
                }
            }
        }
    }
    Ok(())
}
