use crate::bed::parse_coordinate;
use crate::error::{AnnotateError, Result};
use crate::position::Positioned;
use crate::sniff::LineReader;
use std::fmt;
use std::path::Path;

pub const GTF_COLUMNS: usize = 9;

/// A gene model record. GTF coordinates are 1-based and inclusive; `start` and
/// `end` are kept as written and converted only through [`Positioned`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtfRecord {
    pub seqname: String,
    pub source: String,
    pub feature: String,
    pub start: u64,
    pub end: u64,
    pub score: String,
    pub strand: String,
    pub frame: String,
    pub attributes: String,
}

impl GtfRecord {
    pub fn parse(path: &Path, line_number: u64, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        AnnotateError::check_columns(path, line_number, fields.len(), GTF_COLUMNS)?;
        let start = parse_coordinate(path, line_number, "start", fields[3])?;
        let end = parse_coordinate(path, line_number, "end", fields[4])?;
        if start == 0 || start > end {
            return Err(AnnotateError::malformed(
                path,
                line_number,
                format!("invalid 1-based feature range {}-{}", start, end),
            ));
        }
        Ok(GtfRecord {
            seqname: String::from(fields[0]),
            source: String::from(fields[1]),
            feature: String::from(fields[2]),
            start,
            end,
            score: String::from(fields[5]),
            strand: String::from(fields[6]),
            frame: String::from(fields[7]),
            attributes: String::from(fields[8]),
        })
    }
}

impl Positioned for GtfRecord {
    fn chrom(&self) -> &str {
        &self.seqname
    }

    fn start(&self) -> u64 {
        // gtf is 1-based.
        self.start - 1
    }

    fn stop(&self) -> u64 {
        self.end
    }
}

impl fmt::Display for GtfRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seqname,
            self.source,
            self.feature,
            self.start,
            self.end,
            self.score,
            self.strand,
            self.frame,
            self.attributes
        )
    }
}

/// Streams records from a (possibly gzipped) GTF, skipping comments and blank lines.
pub struct GtfReader {
    reader: LineReader,
}

impl GtfReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(GtfReader {
            reader: LineReader::open(path)?,
        })
    }
}

impl Iterator for GtfReader {
    type Item = Result<GtfRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.reader.path().to_path_buf();
        loop {
            return match self.reader.next_line() {
                Err(e) => Some(Err(e)),
                Ok(None) => None,
                Ok(Some((_, line))) if line.starts_with('#') || line.trim().is_empty() => {
                    continue
                }
                Ok(Some((line_number, line))) => Some(GtfRecord::parse(&path, line_number, line)),
            };
        }
    }
}
