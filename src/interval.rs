use crate::position::Positioned;
use std::fmt;

/// Written in place of gene_id and exon_number when no exon overlaps an interval.
pub const NOT_FOUND: &str = "information wasn't found";

/// An amplicon from the panel: a BED6 record whose fifth and sixth
/// columns are the score and the primer pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interval {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
    pub name: String,
    pub score: String,
    pub pool: String,
}

impl Positioned for Interval {
    #[inline]
    fn chrom(&self) -> &str {
        &self.chrom
    }
    #[inline]
    fn start(&self) -> u64 {
        self.start
    }
    #[inline]
    fn stop(&self) -> u64 {
        self.stop
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.stop, self.name, self.score, self.pool
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonAnnotation {
    pub gene_id: String,
    pub exon_number: String,
}

/// An Interval with the exon it was assigned, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedInterval {
    pub interval: Interval,
    pub annotation: Option<ExonAnnotation>,
}

impl AnnotatedInterval {
    pub fn gene_id(&self) -> &str {
        self.annotation
            .as_ref()
            .map_or(NOT_FOUND, |a| a.gene_id.as_str())
    }

    pub fn exon_number(&self) -> &str {
        self.annotation
            .as_ref()
            .map_or(NOT_FOUND, |a| a.exon_number.as_str())
    }
}

impl fmt::Display for AnnotatedInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.interval,
            self.gene_id(),
            self.exon_number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amp() -> Interval {
        Interval {
            chrom: "chr1".into(),
            start: 100,
            stop: 200,
            name: "ampA".into(),
            score: "0".into(),
            pool: "poolX".into(),
        }
    }

    #[test]
    fn test_display_annotated() {
        let a = AnnotatedInterval {
            interval: amp(),
            annotation: Some(ExonAnnotation {
                gene_id: "G1".into(),
                exon_number: "2".into(),
            }),
        };
        assert_eq!(a.to_string(), "chr1\t100\t200\tampA\t0\tpoolX\tG1\t2");
    }

    #[test]
    fn test_display_missing() {
        let a = AnnotatedInterval {
            interval: amp(),
            annotation: None,
        };
        assert_eq!(a.gene_id(), NOT_FOUND);
        assert_eq!(
            a.to_string(),
            "chr1\t100\t200\tampA\t0\tpoolX\tinformation wasn't found\tinformation wasn't found"
        );
    }
}
