use crate::error::{AnnotateError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
pub enum Compression {
    None,
    GZ,
    BGZF,
}

/// look at the first bytes in the buffer to decide how the stream is compressed.
pub(crate) fn detect_compression<R: BufRead>(reader: &mut R) -> io::Result<Compression> {
    let buf = reader.fill_buf()?;
    if buf.len() < 2 || &buf[0..2] != b"\x1f\x8b" {
        return Ok(Compression::None);
    }
    // FEXTRA flag set and the BC subfield where bgzf puts it.
    if buf.len() >= 16 && buf[3] & 4 != 0 && &buf[12..16] == b"BC\x02\x00" {
        Ok(Compression::BGZF)
    } else {
        Ok(Compression::GZ)
    }
}

/// Open a text input, decompressing gzip and bgzf transparently.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let fh = File::open(path).map_err(|e| AnnotateError::io(path, e))?;
    let mut reader = BufReader::new(fh);
    let compression = detect_compression(&mut reader).map_err(|e| AnnotateError::io(path, e))?;
    log::debug!("opened {} with compression {:?}", path.display(), compression);
    Ok(match compression {
        Compression::None => Box::new(reader),
        // bgzf is a series of gzip members.
        Compression::GZ | Compression::BGZF => Box::new(BufReader::new(MultiGzDecoder::new(reader))),
    })
}

/// Reads a text input one line at a time, tracking the line number for error messages.
pub(crate) struct LineReader {
    reader: Box<dyn BufRead>,
    buf: String,
    line_number: u64,
    path: PathBuf,
}

impl LineReader {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Ok(LineReader {
            reader: open(path)?,
            buf: String::new(),
            line_number: 0,
            path: path.to_path_buf(),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Next line (1-based number, text without its terminator), or None at end of input.
    pub(crate) fn next_line(&mut self) -> Result<Option<(u64, &str)>> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;
                Ok(Some((
                    self.line_number,
                    self.buf.trim_end_matches(['\n', '\r']),
                )))
            }
            Err(e) => Err(AnnotateError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::{Cursor, Read, Write};

    #[test]
    fn test_detect_plain() {
        let mut rdr = Cursor::new(b"chr1\t1\t2\n".to_vec());
        assert_eq!(detect_compression(&mut rdr).unwrap(), Compression::None);
        let mut empty = Cursor::new(Vec::new());
        assert_eq!(detect_compression(&mut empty).unwrap(), Compression::None);
    }

    #[test]
    fn test_open_gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.gtf.gz");
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(b"chr1\tsrc\texon\t1\t10\t.\t+\t.\tgene_id \"G\";\n")
            .unwrap();
        std::fs::write(&path, enc.finish().unwrap()).unwrap();

        let mut raw = std::io::BufReader::new(File::open(&path).unwrap());
        assert_eq!(detect_compression(&mut raw).unwrap(), Compression::GZ);

        let mut s = std::string::String::new();
        open(&path).unwrap().read_to_string(&mut s).unwrap();
        assert!(s.starts_with("chr1\tsrc\texon"));
    }

    #[test]
    fn test_open_missing() {
        let e = open("does/not/exist.bed").err().unwrap();
        assert!(matches!(e, AnnotateError::Io { .. }));
    }
}
