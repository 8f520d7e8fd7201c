//! PNG container for grayscale bitmaps at depth 1 or 8

use std::io::{Read, Write};

use mtxio_core::{BitmapHeader, SampleDepth};
use png::{BitDepth, ColorType, Decoder, DecodingError, Encoder, EncodingError, Transformations};
use tracing::trace;

use super::{BitmapContainer, ScanlineSink, ScanlineSource};
use crate::error::{Error, Result};

/// Non-interlaced grayscale PNG
#[derive(Debug, Clone, Copy, Default)]
pub struct PngContainer;

fn decoding_error(err: DecodingError) -> Error {
    match err {
        DecodingError::IoError(e) => Error::Io(e),
        DecodingError::Format(e) => Error::invalid(format!("corrupt bitmap: {e}")),
        other => Error::container(other),
    }
}

fn encoding_error(err: EncodingError) -> Error {
    match err {
        EncodingError::IoError(e) => Error::Io(e),
        other => Error::container(other),
    }
}

fn png_dimension(value: usize, what: &str) -> Result<u32> {
    match u32::try_from(value) {
        Ok(0) => Err(Error::not_implemented(format!(
            "PNG cannot carry a matrix with zero {what}"
        ))),
        Ok(v) => Ok(v),
        Err(_) => Err(Error::not_implemented(format!(
            "PNG cannot carry {value} {what}"
        ))),
    }
}

impl BitmapContainer for PngContainer {
    fn name(&self) -> &'static str {
        "png"
    }

    fn read_scanlines(&self, input: &mut dyn Read, sink: &mut dyn ScanlineSink) -> Result<()> {
        let mut decoder = Decoder::new(input);
        decoder.set_transformations(Transformations::IDENTITY);
        let mut reader = decoder.read_info().map_err(decoding_error)?;

        let info = reader.info();
        if info.interlaced {
            return Err(Error::not_implemented("interlaced PNG bitmaps"));
        }
        if info.color_type != ColorType::Grayscale {
            return Err(Error::not_implemented(format!(
                "PNG color type {:?}, expected grayscale",
                info.color_type
            )));
        }
        let depth = match info.bit_depth {
            BitDepth::One => SampleDepth::One,
            BitDepth::Eight => SampleDepth::Eight,
            other => {
                return Err(Error::not_implemented(format!(
                    "PNG bit depth {other:?}, expected 1 or 8"
                )))
            }
        };
        let header = BitmapHeader::new(info.width as usize, info.height as usize, depth);
        trace!(width = header.width, height = header.height, "png header");
        sink.begin(header)?;

        let mut index = 0;
        while let Some(row) = reader.next_row().map_err(decoding_error)? {
            let scanline = row.data();
            if scanline.len() < header.scanline_len() {
                return Err(Error::invalid(format!(
                    "PNG scanline {index} holds {} bytes, expected {}",
                    scanline.len(),
                    header.scanline_len()
                )));
            }
            sink.row(index, scanline)?;
            index += 1;
        }
        Ok(())
    }

    fn check_header(&self, header: &BitmapHeader) -> Result<()> {
        png_dimension(header.width, "columns")?;
        png_dimension(header.height, "rows")?;
        Ok(())
    }

    fn write_scanlines(
        &self,
        out: &mut dyn Write,
        source: &mut dyn ScanlineSource,
    ) -> Result<()> {
        let header = source.header();
        let width = png_dimension(header.width, "columns")?;
        let height = png_dimension(header.height, "rows")?;

        let mut encoder = Encoder::new(out, width, height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(match header.depth {
            SampleDepth::One => BitDepth::One,
            SampleDepth::Eight => BitDepth::Eight,
        });
        let mut writer = encoder.write_header().map_err(encoding_error)?;
        {
            let mut stream = writer.stream_writer().map_err(encoding_error)?;
            let mut scanline = vec![0u8; header.scanline_len()];
            for index in 0..header.height {
                source.fill_row(index, &mut scanline)?;
                stream.write_all(&scanline)?;
            }
            stream.finish().map_err(encoding_error)?;
        }
        // IEND goes out when the writer drops.
        drop(writer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{read_bitmap, write_bitmap};
    use crate::config::IoConfig;
    use crate::matrix::RowMatrix;
    use mtxio_core::constants::BITMAP_SIGNATURE;
    use mtxio_core::fields::Gf2;
    use mtxio_core::{BitVector, HybridBitVector, MatrixTarget, VectorPopulator};

    fn diagonal(n: usize) -> RowMatrix<BitVector> {
        let populator = VectorPopulator::new(&Gf2);
        let mut m = RowMatrix::with_shape(n, n + 3);
        for i in 0..n {
            populator
                .append_bit(&mut MatrixTarget::<bool>::row_mut(&mut m, i).unwrap(), i, true)
                .unwrap();
        }
        m
    }

    #[test]
    fn test_png_roundtrip_both_depths() {
        for depth in [SampleDepth::One, SampleDepth::Eight] {
            let config = IoConfig::default().with_sample_depth(depth);
            let m = diagonal(10);
            let mut bytes = Vec::new();
            write_bitmap::<bool, _>(&PngContainer, &mut bytes, &config, &m).unwrap();
            assert_eq!(&bytes[..8], &BITMAP_SIGNATURE);

            let populator = VectorPopulator::new(&Gf2);
            let mut back = RowMatrix::<BitVector>::new();
            read_bitmap(&PngContainer, &mut bytes.as_slice(), &populator, &config, &mut back)
                .unwrap();
            assert_eq!(back, m);

            let mut runs = RowMatrix::<HybridBitVector>::new();
            read_bitmap(&PngContainer, &mut bytes.as_slice(), &populator, &config, &mut runs)
                .unwrap();
            assert_eq!(runs.row_vectors()[4].count_ones(), 1);
        }
    }

    #[test]
    fn test_zero_dimensions_not_representable() {
        let m = RowMatrix::<BitVector>::with_shape(0, 4);
        let mut bytes = Vec::new();
        let err = write_bitmap::<bool, _>(&PngContainer, &mut bytes, &IoConfig::default(), &m)
            .unwrap_err();
        assert!(err.is_not_implemented());
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_garbage_after_signature() {
        let mut bytes = BITMAP_SIGNATURE.to_vec();
        bytes.extend_from_slice(b"definitely not a chunk");
        let populator = VectorPopulator::new(&Gf2);
        let mut back = RowMatrix::<BitVector>::new();
        let result = read_bitmap(
            &PngContainer,
            &mut bytes.as_slice(),
            &populator,
            &IoConfig::default(),
            &mut back,
        );
        assert!(result.is_err());
    }
}
