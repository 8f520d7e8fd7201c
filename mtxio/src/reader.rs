//! Reading matrices with optional format detection

use std::io::BufRead;

use mtxio_core::{Field, FormatTag, MatrixTarget};
use tracing::debug;

use crate::assembler::MatrixAssembler;
use crate::bitmap::BitmapContainer;
use crate::config::IoConfig;
use crate::detect::FormatDetector;
use crate::error::{Error, Result};

/// Reads matrices over a field `F`
///
/// ```rust
/// use mtxio::{FormatTag, MatrixReader, RowMatrix};
/// use mtxio::fields::Integers;
/// use mtxio::SparseVector;
///
/// let reader = MatrixReader::new(Integers);
/// let mut m = RowMatrix::<SparseVector<i64>>::new();
/// let mut input = "2 2 M\n1 2 3\n0 0 0\n".as_bytes();
/// let tag = reader.read(&mut input, &mut m, FormatTag::Detect).unwrap();
/// assert_eq!(tag, FormatTag::Guillaume);
/// ```
pub struct MatrixReader<F> {
    field: F,
    config: IoConfig,
    container: Option<Box<dyn BitmapContainer>>,
}

impl<F: Field> MatrixReader<F> {
    /// Reader with default configuration and the PNG container when the
    /// `png` feature is on
    pub fn new(field: F) -> Self {
        Self {
            field,
            config: IoConfig::default(),
            container: default_container(),
        }
    }

    pub fn with_config(mut self, config: IoConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `container` for bitmap input
    pub fn with_bitmap_container(mut self, container: impl BitmapContainer + 'static) -> Self {
        self.container = Some(Box::new(container));
        self
    }

    /// Refuse bitmap input
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

    /// Populate `matrix` from `input`
    ///
    /// With [`FormatTag::Detect`] the encoding is identified first. Returns
    /// the tag actually read. Detection failures leave `matrix` untouched;
    /// input errors found later may leave it partially populated.
    pub fn read<R, M>(&self, input: &mut R, matrix: &mut M, tag: FormatTag) -> Result<FormatTag>
    where
        R: BufRead,
        M: MatrixTarget<F::Element>,
    {
        self.config.validate()?;
        let assembler = self.assembler();
        match tag {
            FormatTag::Detect => {
                let detection = FormatDetector::new(self.config.detect_limit).detect(input)?;
                let tag = detection.tag;
                assembler.check_read(tag, &*matrix)?;
                assembler.read(detection.replay(&mut *input), tag, matrix)?;
                Ok(tag)
            }
            FormatTag::Unknown => Err(Error::not_implemented("cannot read format Unknown")),
            tag => {
                debug!(format = %tag, "reading with explicit format");
                assembler.read(&mut *input, tag, matrix)?;
                Ok(tag)
            }
        }
    }

    /// Identify the encoding of `input` without reading a matrix
    ///
    /// The detected prefix is consumed from `input`.
    pub fn detect<R: BufRead>(&self, input: &mut R) -> Result<FormatTag> {
        let detection = FormatDetector::new(self.config.detect_limit).detect(input)?;
        Ok(detection.tag)
    }
}

#[cfg(feature = "png")]
pub(crate) fn default_container() -> Option<Box<dyn BitmapContainer>> {
    Some(Box::new(crate::bitmap::PngContainer))
}

#[cfg(not(feature = "png"))]
pub(crate) fn default_container() -> Option<Box<dyn BitmapContainer>> {
    None
}
