//! Join the resolved exons back onto the panel and write the annotated panel.

use crate::bed::HeaderLine;
use crate::error::Result;
use crate::interval::{AnnotatedInterval, ExonAnnotation, Interval};
use crate::writer::write_atomic;
use hashbrown::{HashMap, HashSet};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Where the annotated panel is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A copy next to the input: `panel.bed` becomes `panel.annotated.bed`.
    Sibling,
    /// An explicit path.
    Path(PathBuf),
    /// Overwrite the input panel. This destroys the original file.
    InPlace,
}

impl OutputTarget {
    pub fn resolve(&self, input: &Path) -> PathBuf {
        match self {
            OutputTarget::Sibling => sibling_path(input),
            OutputTarget::Path(p) => p.clone(),
            OutputTarget::InPlace => input.to_path_buf(),
        }
    }
}

/// `dir/panel.bed` -> `dir/panel.annotated.bed`
pub fn sibling_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}.annotated.{}", stem, ext.to_string_lossy()),
        None => format!("{}.annotated", stem),
    };
    input.with_file_name(name)
}

/// Left join of `intervals` with `resolved` on the interval name.
///
/// Every interval appears once, in input order. Intervals without an entry, or
/// whose entry is None, get no annotation.
pub fn annotate(
    intervals: Vec<Interval>,
    resolved: &HashMap<String, Option<ExonAnnotation>>,
) -> Vec<AnnotatedInterval> {
    let mut names: HashSet<&str> = HashSet::with_capacity(intervals.len());
    for iv in &intervals {
        if !names.insert(iv.name.as_str()) {
            log::warn!(
                "interval name {} is not unique; all rows with this name get the same annotation",
                iv.name
            );
        }
    }
    drop(names);

    let rows: Vec<AnnotatedInterval> = intervals
        .into_iter()
        .map(|interval| {
            let annotation = resolved.get(interval.name.as_str()).cloned().flatten();
            AnnotatedInterval {
                interval,
                annotation,
            }
        })
        .collect();
    let n_found = rows.iter().filter(|r| r.annotation.is_some()).count();
    log::info!("{} of {} intervals overlap an exon", n_found, rows.len());
    rows
}

/// Write the track line, if there was one, then one row per interval.
///
/// The file is replaced atomically, so `path` may be the input panel.
pub fn write_annotated<P: AsRef<Path>>(
    path: P,
    header: Option<&HeaderLine>,
    rows: &[AnnotatedInterval],
) -> Result<()> {
    write_atomic(path.as_ref(), |w| {
        if let Some(h) = header {
            writeln!(w, "{}", h.as_str())?;
        }
        for r in rows {
            writeln!(w, "{}", r)?;
        }
        Ok(())
    })
}

/// The distinct gene ids that were found, sorted.
pub fn extract_gene_ids(rows: &[AnnotatedInterval]) -> BTreeSet<String> {
    rows.iter()
        .filter_map(|r| r.annotation.as_ref())
        .map(|a| a.gene_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::NOT_FOUND;
    use std::fs;

    fn iv(name: &str, start: u64) -> Interval {
        Interval {
            chrom: "chr1".into(),
            start,
            stop: start + 100,
            name: name.into(),
            score: "0".into(),
            pool: "poolX".into(),
        }
    }

    fn found(gene: &str, exon: &str) -> Option<ExonAnnotation> {
        Some(ExonAnnotation {
            gene_id: gene.into(),
            exon_number: exon.into(),
        })
    }

    fn resolved() -> HashMap<String, Option<ExonAnnotation>> {
        let mut m = HashMap::default();
        m.insert(String::from("a"), found("G1", "2"));
        m.insert(String::from("c"), found("G1", "5"));
        m.insert(String::from("d"), None);
        m.insert(String::from("not-in-panel"), found("G9", "1"));
        m
    }

    #[test]
    fn test_annotate_preserves_rows() {
        let ivs = vec![iv("b", 500), iv("a", 100), iv("c", 300), iv("d", 900)];
        let rows = annotate(ivs.clone(), &resolved());
        assert_eq!(rows.len(), 4);
        let names: Vec<&str> = rows.iter().map(|r| r.interval.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
        assert_eq!(rows[0].annotation, None);
        assert_eq!(rows[1].annotation, found("G1", "2"));
        assert_eq!(rows[3].annotation, None);
        for (r, i) in rows.iter().zip(ivs.iter()) {
            assert_eq!(&r.interval, i);
            // never mixed.
            assert_eq!(r.gene_id() == NOT_FOUND, r.exon_number() == NOT_FOUND);
        }
    }

    #[test]
    fn test_annotate_duplicate_names() {
        let rows = annotate(vec![iv("a", 100), iv("a", 200)], &resolved());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.gene_id() == "G1"));
    }

    #[test]
    fn test_extract_gene_ids() {
        let rows = annotate(
            vec![iv("a", 100), iv("b", 200), iv("c", 300), iv("d", 400)],
            &resolved(),
        );
        let ids: Vec<String> = extract_gene_ids(&rows).into_iter().collect();
        assert_eq!(ids, vec![String::from("G1")]);
        assert!(extract_gene_ids(&[]).is_empty());
    }

    #[test]
    fn test_write_header_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let rows = annotate(vec![iv("a", 100), iv("b", 200)], &resolved());

        let with = dir.path().join("with.bed");
        let header = HeaderLine(String::from("track name=\"panel\" itemRgb=On"));
        write_annotated(&with, Some(&header), &rows).unwrap();
        let text = fs::read_to_string(&with).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "track name=\"panel\" itemRgb=On");
        assert_eq!(lines[1], "chr1\t100\t200\ta\t0\tpoolX\tG1\t2");
        assert_eq!(lines.len(), 3);

        let without = dir.path().join("without.bed");
        write_annotated(&without, None, &rows).unwrap();
        let text = fs::read_to_string(&without).unwrap();
        assert!(text.starts_with("chr1\t100\t200\ta\t"));
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_output_target() {
        let input = Path::new("data/panel.bed");
        assert_eq!(
            OutputTarget::Sibling.resolve(input),
            PathBuf::from("data/panel.annotated.bed")
        );
        assert_eq!(OutputTarget::InPlace.resolve(input), input.to_path_buf());
        assert_eq!(
            OutputTarget::Path(PathBuf::from("out.bed")).resolve(input),
            PathBuf::from("out.bed")
        );
        assert_eq!(sibling_path(Path::new("panel")), PathBuf::from("panel.annotated"));
    }
}
