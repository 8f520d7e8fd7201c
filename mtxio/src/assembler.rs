//! Format dispatch shared by the reader and writer facades
//!
//! [`MatrixAssembler`] resolves a concrete [`FormatTag`] to a text grammar
//! or the bitmap path once per call and checks the matrix capabilities the
//! format needs before any byte moves.

use std::io::{BufRead, Write};

use mtxio_core::{Field, FormatTag, MatrixShape, MatrixSource, MatrixTarget, VectorPopulator};
use tracing::{debug, warn};

use crate::bitmap::{
    check_capabilities, check_writable, read_bitmap, write_bitmap, BitmapContainer,
};
use crate::config::IoConfig;
use crate::error::{Error, Result};
use crate::grammar::TextGrammar;

/// Borrowed view of everything one read or write needs
pub struct MatrixAssembler<'a, F> {
    field: &'a F,
    config: &'a IoConfig,
    container: Option<&'a dyn BitmapContainer>,
}

impl<'a, F: Field> MatrixAssembler<'a, F> {
    pub fn new(
        field: &'a F,
        config: &'a IoConfig,
        container: Option<&'a dyn BitmapContainer>,
    ) -> Self {
        Self {
            field,
            config,
            container,
        }
    }

    fn container(&self) -> Result<&'a dyn BitmapContainer> {
        self.container
            .ok_or_else(|| Error::not_implemented("no bitmap container configured"))
    }

    /// Check that `tag` can be read into `matrix`
    pub fn check_read<S: MatrixShape + ?Sized>(&self, tag: FormatTag, matrix: &S) -> Result<()> {
        let result = match tag {
            FormatTag::Bitmap => self.container().and_then(|_| check_capabilities(matrix)),
            FormatTag::Pretty => Err(Error::not_implemented("pretty output has no reader")),
            FormatTag::Detect | FormatTag::Unknown => Err(Error::not_implemented(format!(
                "cannot read format {tag}"
            ))),
            _ => Ok(()),
        };
        if let Err(err) = &result {
            warn!(format = %tag, error = %err, "read rejected");
        }
        result
    }

    /// Check that `matrix` can be written as `tag`
    pub fn check_write<S: MatrixShape + ?Sized>(&self, tag: FormatTag, matrix: &S) -> Result<()> {
        let result = match tag {
            FormatTag::Bitmap => self
                .container()
                .and_then(|container| check_writable(container, self.config, matrix)),
            FormatTag::Detect | FormatTag::Unknown => Err(Error::not_implemented(format!(
                "cannot write format {tag}"
            ))),
            _ => Ok(()),
        };
        if let Err(err) = &result {
            warn!(format = %tag, error = %err, "write rejected");
        }
        result
    }

    /// Populate `matrix` from `input` encoded as `tag`
    pub fn read<R, M>(&self, mut input: R, tag: FormatTag, matrix: &mut M) -> Result<()>
    where
        R: BufRead,
        M: MatrixTarget<F::Element>,
    {
        self.check_read(tag, &*matrix)?;
        let populator = VectorPopulator::new(self.field);
        debug!(format = %tag, category = ?matrix.vector_category(), "reading matrix");
        match TextGrammar::for_tag(tag) {
            Some(grammar) => grammar.read(input, &populator, self.config, matrix),
            None => read_bitmap(self.container()?, &mut input, &populator, self.config, matrix),
        }
    }

    /// Emit `matrix` to `out` encoded as `tag`
    pub fn write<W, M>(&self, out: &mut W, tag: FormatTag, matrix: &M) -> Result<()>
    where
        W: Write,
        M: MatrixSource<F::Element>,
    {
        self.check_write(tag, matrix)?;
        debug!(format = %tag, category = ?matrix.vector_category(), "writing matrix");
        match TextGrammar::for_tag(tag) {
            Some(grammar) => grammar.write(out, self.field, self.config, matrix),
            None => write_bitmap::<F::Element, M>(self.container()?, out, self.config, matrix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::tests::RawContainer;
    use crate::matrix::{ColMatrix, RowMatrix};
    use mtxio_core::fields::{Gf2, Integers};
    use mtxio_core::{BitVector, DenseVector, SparseVector};
    use std::io::Cursor;

    #[test]
    fn test_control_tags_rejected() {
        let config = IoConfig::default();
        let assembler = MatrixAssembler::new(&Integers, &config, None);
        let m = RowMatrix::<SparseVector<i64>>::with_shape(1, 1);
        for tag in [FormatTag::Detect, FormatTag::Unknown] {
            assert!(assembler.check_write(tag, &m).unwrap_err().is_not_implemented());
            assert!(assembler.check_read(tag, &m).unwrap_err().is_not_implemented());
        }
        assert!(assembler
            .check_read(FormatTag::Pretty, &m)
            .unwrap_err()
            .is_not_implemented());
        assert!(assembler.check_write(FormatTag::Pretty, &m).is_ok());
    }

    #[test]
    fn test_bitmap_needs_container() {
        let config = IoConfig::default();
        let m = RowMatrix::<BitVector>::with_shape(1, 1);
        let without = MatrixAssembler::new(&Gf2, &config, None);
        assert!(without
            .check_write(FormatTag::Bitmap, &m)
            .unwrap_err()
            .is_not_implemented());
        let with = MatrixAssembler::new(&Gf2, &config, Some(&RawContainer));
        assert!(with.check_write(FormatTag::Bitmap, &m).is_ok());
        let cols = ColMatrix::<BitVector>::with_shape(1, 1);
        assert!(with.check_write(FormatTag::Bitmap, &cols).is_err());
    }

    #[test]
    fn test_text_dispatch() {
        let config = IoConfig::default();
        let assembler = MatrixAssembler::new(&Integers, &config, None);
        let mut m = RowMatrix::<DenseVector<i64>>::new();
        assembler
            .read(Cursor::new("[1 2; 3 4]"), FormatTag::Matlab, &mut m)
            .unwrap();
        let mut out = Vec::new();
        assembler.write(&mut out, FormatTag::Turner, &m).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2 2\n0 0 1\n0 1 2\n1 0 3\n1 1 4\n"
        );
    }
}
