//! Writing matrices in a chosen format

use std::io::Write;

use mtxio_core::{Field, FormatTag, MatrixShape, MatrixSource};

use crate::assembler::MatrixAssembler;
use crate::bitmap::BitmapContainer;
use crate::config::IoConfig;
use crate::error::{Error, Result};

/// Writes matrices over a field `F`
///
/// There is no detection on output; the caller names the format.
/// [`MatrixWriter::DEFAULT_FORMAT`] is the human-readable layout.
pub struct MatrixWriter<F> {
    field: F,
    config: IoConfig,
    container: Option<Box<dyn BitmapContainer>>,
}

impl<F: Field> MatrixWriter<F> {
    pub const DEFAULT_FORMAT: FormatTag = FormatTag::Pretty;

    /// Writer with default configuration and the PNG container when the
    /// `png` feature is on
    pub fn new(field: F) -> Self {
        Self {
            field,
            config: IoConfig::default(),
            container: crate::reader::default_container(),
        }
    }

    pub fn with_config(mut self, config: IoConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `container` for bitmap output
    pub fn with_bitmap_container(mut self, container: impl BitmapContainer + 'static) -> Self {
        self.container = Some(Box::new(container));
        self
    }

    /// Refuse bitmap output
    pub fn without_bitmap_container(mut self) -> Self {
        self.container = None;
        self
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn config(&self) -> &IoConfig {
        &self.config
    }

    fn assembler(&self) -> MatrixAssembler<'_, F> {
        MatrixAssembler::new(&self.field, &self.config, self.container.as_deref())
    }

    /// Check that `matrix` can be written as `tag` without writing anything
    pub fn check_write<S: MatrixShape + ?Sized>(&self, tag: FormatTag, matrix: &S) -> Result<()> {
        self.assembler().check_write(tag, matrix)
    }

    /// Emit `matrix` to `out` as `tag`
    ///
    /// Control tags and format/matrix pairings the format cannot carry fail
    /// with [`Error::NotImplemented`] before anything is written.
    pub fn write<W, M>(&self, out: &mut W, matrix: &M, tag: FormatTag) -> Result<()>
    where
        W: Write,
        M: MatrixSource<F::Element>,
    {
        self.config.validate()?;
        self.assembler().write(out, tag, matrix)?;
        out.flush()?;
        Ok(())
    }

    /// Render `matrix` in a text format
    pub fn write_to_string<M>(&self, matrix: &M, tag: FormatTag) -> Result<String>
    where
        M: MatrixSource<F::Element>,
    {
        if tag == FormatTag::Bitmap {
            return Err(Error::not_implemented("bitmap output is not text"));
        }
        let mut out = Vec::new();
        self.write(&mut out, matrix, tag)?;
        into_text(out)
    }
}

fn into_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::tests::RawContainer;
    use crate::matrix::{ColMatrix, RowMatrix};
    use crate::MatrixReader;
    use mtxio_core::fields::{Gf2, Integers, Modular};
    use mtxio_core::{
        BitVector, DenseVector, HybridBitVector, MatrixTarget, SparseVector, VectorPopulator,
    };

    fn identity(n: usize) -> RowMatrix<SparseVector<i64>> {
        let populator = VectorPopulator::new(&Integers);
        let mut m = RowMatrix::with_shape(n, n);
        for i in 0..n {
            populator.append(&mut m.row_mut(i).unwrap(), i, 1).unwrap();
        }
        m
    }

    #[test]
    fn test_non_utf8_output_is_io_error() {
        assert_eq!(into_text(b"[1 2]\n".to_vec()).unwrap(), "[1 2]\n");
        let err = into_text(vec![b'[', 0xff, b']']).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_guillaume_identity() {
        let writer = MatrixWriter::new(Integers);
        let text = writer
            .write_to_string(&identity(2), FormatTag::Guillaume)
            .unwrap();
        assert_eq!(text, "2 2 M\n1 1 1\n2 2 1\n0 0 0\n");
    }

    #[test]
    fn test_default_format_is_pretty() {
        let writer = MatrixWriter::new(Integers);
        let text = writer
            .write_to_string(&identity(2), MatrixWriter::<Integers>::DEFAULT_FORMAT)
            .unwrap();
        assert_eq!(text, "[ 1 . ]\n[ . 1 ]\n");
    }

    #[test]
    fn test_control_tags_write_nothing() {
        let writer = MatrixWriter::new(Integers);
        for tag in [FormatTag::Detect, FormatTag::Unknown] {
            let mut out = Vec::new();
            let err = writer.write(&mut out, &identity(1), tag).unwrap_err();
            assert!(err.is_not_implemented());
            assert!(out.is_empty());
        }
        assert!(writer
            .write_to_string(&identity(1), FormatTag::Bitmap)
            .unwrap_err()
            .is_not_implemented());
    }

    #[test]
    fn test_column_major_bitmap_writes_nothing() {
        let writer = MatrixWriter::new(Gf2).with_bitmap_container(RawContainer);
        let mut m = ColMatrix::<HybridBitVector>::with_shape(3, 3);
        VectorPopulator::new(&Gf2)
            .append_bit(&mut MatrixTarget::<bool>::col_mut(&mut m, 1).unwrap(), 2, true)
            .unwrap();
        let mut out = Vec::new();
        let err = writer.write(&mut out, &m, FormatTag::Bitmap).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(out.is_empty());
    }

    #[test]
    fn test_modular_roundtrip_through_matlab() {
        let field = Modular::new(7).unwrap();
        let mut m = RowMatrix::<DenseVector<u64>>::new();
        MatrixReader::new(field)
            .read(&mut "[1 -1; 9 0]".as_bytes(), &mut m, FormatTag::Matlab)
            .unwrap();
        let text = MatrixWriter::new(field)
            .write_to_string(&m, FormatTag::Matlab)
            .unwrap();
        assert_eq!(text, "[1 6;\n 2 0]\n");
    }

    #[test]
    fn test_bitmap_write_through_configured_container() {
        let writer = MatrixWriter::new(Gf2).with_bitmap_container(RawContainer);
        let mut m = RowMatrix::<BitVector>::with_shape(1, 3);
        m.row_vector_mut(0).unwrap().set(2, true);
        let mut out = Vec::new();
        writer.write(&mut out, &m, FormatTag::Bitmap).unwrap();
        assert_eq!(out.last(), Some(&0b0010_0000));
    }
}
