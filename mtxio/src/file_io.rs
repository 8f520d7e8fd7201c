//! Path-based helpers for [`MatrixReader`] and [`MatrixWriter`]
//!
//! Reads map the file into memory when the `mmap` feature is enabled and
//! fall back to a buffered file otherwise. Writes always go through a
//! buffered file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mtxio_core::{Field, FormatTag, MatrixSource, MatrixTarget};
use tracing::debug;

use crate::error::{Error, Result};
use crate::{MatrixReader, MatrixWriter};

/// Guess a format from the extension of `path`
///
/// Returns [`FormatTag::Unknown`] for missing or unfamiliar extensions.
pub fn format_for_path<P: AsRef<Path>>(path: P) -> FormatTag {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(FormatTag::from_extension)
        .unwrap_or(FormatTag::Unknown)
}

impl<F: Field> MatrixReader<F> {
    /// Read the matrix stored at `path`
    pub fn read_path<P, M>(&self, path: P, matrix: &mut M, tag: FormatTag) -> Result<FormatTag>
    where
        P: AsRef<Path>,
        M: MatrixTarget<F::Element>,
    {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "reading matrix file");
        read_file(self, file, matrix, tag)
    }
}

#[cfg(feature = "mmap")]
fn read_file<F, M>(
    reader: &MatrixReader<F>,
    file: File,
    matrix: &mut M,
    tag: FormatTag,
) -> Result<FormatTag>
where
    F: Field,
    M: MatrixTarget<F::Element>,
{
    if file.metadata()?.len() == 0 {
        let mut empty: &[u8] = &[];
        return reader.read(&mut empty, matrix, tag);
    }
    // SAFETY: the mapping is read-only and dropped before this function
    // returns. Concurrent truncation of the file by another process is
    // outside what this crate can guard against.
    let map = unsafe { memmap2::Mmap::map(&file)? };
    let mut bytes: &[u8] = &map;
    reader.read(&mut bytes, matrix, tag)
}

#[cfg(not(feature = "mmap"))]
fn read_file<F, M>(
    reader: &MatrixReader<F>,
    file: File,
    matrix: &mut M,
    tag: FormatTag,
) -> Result<FormatTag>
where
    F: Field,
    M: MatrixTarget<F::Element>,
{
    reader.read(&mut std::io::BufReader::new(file), matrix, tag)
}

impl<F: Field> MatrixWriter<F> {
    /// Write `matrix` to `path`, creating or truncating the file
    ///
    /// With [`FormatTag::Detect`] the format is taken from the path's
    /// extension. Capability checks run before the file is created.
    pub fn write_path<P, M>(&self, path: P, matrix: &M, tag: FormatTag) -> Result<FormatTag>
    where
        P: AsRef<Path>,
        M: MatrixSource<F::Element>,
    {
        let path = path.as_ref();
        let tag = match tag {
            FormatTag::Detect => match format_for_path(path) {
                FormatTag::Unknown => {
                    return Err(Error::not_implemented(format!(
                        "no format known for {}",
                        path.display()
                    )))
                }
                guessed => guessed,
            },
            tag => tag,
        };
        self.check_write(tag, matrix)?;
        let mut out = BufWriter::new(File::create(path)?);
        debug!(path = %path.display(), format = %tag, "writing matrix file");
        self.write(&mut out, matrix, tag)?;
        out.flush()?;
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RowMatrix;
    use mtxio_core::fields::{Gf2, Integers};
    use mtxio_core::{BitVector, MatrixShape, SparseVector, VectorPopulator};
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mtxio-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path("a/b/c.sms"), FormatTag::Guillaume);
        assert_eq!(format_for_path("plot.png"), FormatTag::Bitmap);
        assert_eq!(format_for_path("noext"), FormatTag::Unknown);
    }

    #[test]
    fn test_path_roundtrip_by_extension() {
        let populator = VectorPopulator::new(&Integers);
        let mut m = RowMatrix::<SparseVector<i64>>::with_shape(3, 2);
        populator.append(&mut m.row_mut(2).unwrap(), 1, 8).unwrap();

        let path = scratch("roundtrip.sms");
        let tag = MatrixWriter::new(Integers)
            .write_path(&path, &m, FormatTag::Detect)
            .unwrap();
        assert_eq!(tag, FormatTag::Guillaume);

        let mut back = RowMatrix::<SparseVector<i64>>::new();
        let tag = MatrixReader::new(Integers)
            .read_path(&path, &mut back, FormatTag::Detect)
            .unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tag, FormatTag::Guillaume);
        assert_eq!(back, m);
    }

    #[test]
    fn test_empty_file_is_unrecognised() {
        let path = scratch("empty.txt");
        std::fs::write(&path, b"").unwrap();
        let mut back = RowMatrix::<SparseVector<i64>>::new();
        let err = MatrixReader::new(Integers)
            .read_path(&path, &mut back, FormatTag::Detect)
            .unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, Error::UnrecognisedFormat));
        assert_eq!(back.dimensions(), (0, 0));
    }

    #[test]
    fn test_rejected_write_creates_no_file() {
        let path = scratch("rejected.unknown");
        let m = RowMatrix::<SparseVector<i64>>::with_shape(1, 1);
        let err = MatrixWriter::new(Integers)
            .write_path(&path, &m, FormatTag::Detect)
            .unwrap_err();
        assert!(err.is_not_implemented());
        assert!(!path.exists());
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_empty_bitmap_creates_no_file() {
        let path = scratch("empty.png");
        let m = RowMatrix::<BitVector>::with_shape(0, 3);
        let err = MatrixWriter::new(Gf2)
            .write_path(&path, &m, FormatTag::Detect)
            .unwrap_err();
        assert!(err.is_not_implemented(), "{err}");
        assert!(!path.exists());
    }
}
