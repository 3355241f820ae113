//! Readers for the amplicon panel and for the annotated panel written by [`crate::annotate`].

use crate::error::{AnnotateError, Result};
use crate::interval::{AnnotatedInterval, ExonAnnotation, Interval, NOT_FOUND};
use crate::sniff::LineReader;
use std::path::Path;

/// The token that marks a UCSC track definition line.
pub const TRACK_TOKEN: &str = "track";

/// number of columns in a panel file.
pub const BED_COLUMNS: usize = 6;
/// number of columns after gene_id and exon_number are appended.
pub const ANNOTATED_COLUMNS: usize = BED_COLUMNS + 2;

/// The leading track line of a panel file, kept verbatim (without its line terminator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine(pub String);

impl HeaderLine {
    /// Some if `line` is a track line.
    pub fn detect(line: &str) -> Option<Self> {
        if line.starts_with(TRACK_TOKEN) {
            Some(HeaderLine(String::from(line)))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A parsed panel: the optional track line and the amplicons in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    pub header: Option<HeaderLine>,
    pub intervals: Vec<Interval>,
}

pub(crate) fn parse_coordinate(path: &Path, line: u64, what: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        AnnotateError::malformed(path, line, format!("invalid {} {:?}", what, value))
    })
}

/// Parse one panel line. `line_number` is only used for error messages.
pub fn parse_interval(path: &Path, line_number: u64, line: &str) -> Result<Interval> {
    let fields: Vec<&str> = line.split('\t').collect();
    AnnotateError::check_columns(path, line_number, fields.len(), BED_COLUMNS)?;
    interval_from_fields(path, line_number, &fields)
}

fn interval_from_fields(path: &Path, line_number: u64, fields: &[&str]) -> Result<Interval> {
    let start = parse_coordinate(path, line_number, "start", fields[1])?;
    let stop = parse_coordinate(path, line_number, "end", fields[2])?;
    if start > stop {
        return Err(AnnotateError::malformed(
            path,
            line_number,
            format!("start {} is greater than end {}", start, stop),
        ));
    }
    Ok(Interval {
        chrom: String::from(fields[0]),
        start,
        stop,
        name: String::from(fields[3]),
        score: String::from(fields[4]),
        pool: String::from(fields[5]),
    })
}

/// Read every non-blank line of `path` through `parse`, handing the first line
/// to `header` first. Returns the header and the parsed rows.
fn read_table<T, F>(path: &Path, mut parse: F) -> Result<(Option<HeaderLine>, Vec<T>)>
where
    F: FnMut(&Path, u64, &str) -> Result<T>,
{
    let mut reader = LineReader::open(path)?;
    let path = reader.path().to_path_buf();
    let mut header = None;
    let mut rows = Vec::new();
    while let Some((line_number, line)) = reader.next_line()? {
        if line_number == 1 {
            header = HeaderLine::detect(line);
            if header.is_some() {
                continue;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse(&path, line_number, line)?);
    }
    Ok((header, rows))
}

/// Read a panel: an optional `track` line then BED6 rows.
pub fn read_intervals<P: AsRef<Path>>(path: P) -> Result<IntervalTable> {
    let (header, intervals) = read_table(path.as_ref(), parse_interval)?;
    log::info!(
        "read {} intervals from {}{}",
        intervals.len(),
        path.as_ref().display(),
        if header.is_some() { " (with track line)" } else { "" }
    );
    Ok(IntervalTable { header, intervals })
}

/// Parse one line of an annotated panel. A row carrying the sentinel in either
/// annotation column has no annotation.
pub fn parse_annotated(path: &Path, line_number: u64, line: &str) -> Result<AnnotatedInterval> {
    let fields: Vec<&str> = line.split('\t').collect();
    AnnotateError::check_columns(path, line_number, fields.len(), ANNOTATED_COLUMNS)?;
    let interval = interval_from_fields(path, line_number, &fields[..BED_COLUMNS])?;
    let (gene_id, exon_number) = (fields[6], fields[7]);
    let annotation = if gene_id == NOT_FOUND || exon_number == NOT_FOUND {
        None
    } else {
        Some(ExonAnnotation {
            gene_id: String::from(gene_id),
            exon_number: String::from(exon_number),
        })
    };
    Ok(AnnotatedInterval {
        interval,
        annotation,
    })
}

/// Read a panel previously written by the annotator.
pub fn read_annotated<P: AsRef<Path>>(
    path: P,
) -> Result<(Option<HeaderLine>, Vec<AnnotatedInterval>)> {
    read_table(path.as_ref(), parse_annotated)
}
