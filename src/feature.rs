use crate::bed::{parse_coordinate, parse_interval, BED_COLUMNS};
use crate::error::{AnnotateError, Result};
use crate::gtf::{GtfRecord, GTF_COLUMNS};
use crate::interval::Interval;
use crate::sniff::LineReader;
use std::fmt;
use std::path::Path;

/// number of columns in an overlap file: the panel columns followed by the gtf columns.
pub const FEATURE_COLUMNS: usize = BED_COLUMNS + GTF_COLUMNS;

/// One line of an overlap file: an amplicon and a gene model feature it overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub interval: Interval,
    pub feature: GtfRecord,
}

impl FeatureRecord {
    /// name of the overlapping amplicon, the join key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.interval.name
    }

    #[inline]
    pub fn feature_type(&self) -> &str {
        &self.feature.feature
    }

    #[inline]
    pub fn attributes(&self) -> &str {
        &self.feature.attributes
    }

    pub fn parse(path: &Path, line_number: u64, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        AnnotateError::check_columns(path, line_number, fields.len(), FEATURE_COLUMNS)?;
        let (a, b) = fields.split_at(BED_COLUMNS);
        let interval = parse_interval(path, line_number, &a.join("\t"))?;
        // the b side comes from any intersection tool; only require the integer columns.
        let start = parse_coordinate(path, line_number, "feature start", b[3])?;
        let end = parse_coordinate(path, line_number, "feature end", b[4])?;
        Ok(FeatureRecord {
            interval,
            feature: GtfRecord {
                seqname: String::from(b[0]),
                source: String::from(b[1]),
                feature: String::from(b[2]),
                start,
                end,
                score: String::from(b[5]),
                strand: String::from(b[6]),
                frame: String::from(b[7]),
                attributes: String::from(b[8]),
            },
        })
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.interval, self.feature)
    }
}

/// Read an overlap file such as the one written by [`crate::overlap::write_overlaps`]
/// or by `bedtools intersect -wa -wb`.
pub fn read_feature_records<P: AsRef<Path>>(path: P) -> Result<Vec<FeatureRecord>> {
    let mut reader = LineReader::open(path.as_ref())?;
    let path = reader.path().to_path_buf();
    let mut records = Vec::new();
    while let Some((line_number, line)) = reader.next_line()? {
        if line.trim().is_empty() {
            continue;
        }
        records.push(FeatureRecord::parse(&path, line_number, line)?);
    }
    log::debug!("read {} overlaps from {}", records.len(), path.display());
    Ok(records)
}
