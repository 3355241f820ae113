//! Find the gene model features that overlap each amplicon and reduce them to
//! a single exon per amplicon.

use crate::attributes::{AttributeKey, AttributeMap};
use crate::error::Result;
use crate::feature::FeatureRecord;
use crate::gtf::GtfRecord;
use crate::interval::{ExonAnnotation, Interval};
use crate::position::Positioned;
use crate::writer::write_atomic;
use hashbrown::{HashMap, HashSet};
use std::path::Path;

pub const EXON: &str = "exon";
pub const GENE_ID: &str = "gene_id";
pub const EXON_NUMBER: &str = "exon_number";

#[derive(Debug, Default)]
struct ChromBin {
    // (start, stop, index into the indexed slice), sorted by start.
    entries: Vec<(u64, u64, usize)>,
    max_len: u64,
}

/// A static index over a slice of intervals. Queries return the indexes of the
/// overlapping intervals in their original order.
///
/// Each chromosome keeps its intervals sorted by start along with the longest
/// interval length, so a query only needs to look back that far from its start.
#[derive(Debug)]
pub struct IntervalIndex<'a, P: Positioned> {
    items: &'a [P],
    by_chrom: HashMap<String, ChromBin>,
}

impl<'a, P: Positioned> IntervalIndex<'a, P> {
    pub fn new(items: &'a [P]) -> Self {
        let mut by_chrom: HashMap<String, ChromBin> = HashMap::default();
        for (i, p) in items.iter().enumerate() {
            let bin = by_chrom.entry_ref(p.chrom()).or_default();
            bin.entries.push((p.start(), p.stop(), i));
            bin.max_len = bin.max_len.max(p.len());
        }
        for bin in by_chrom.values_mut() {
            bin.entries.sort_unstable();
        }
        IntervalIndex { items, by_chrom }
    }

    /// indexes of intervals overlapping `q`, ascending.
    pub fn find(&self, q: &dyn Positioned) -> Vec<usize> {
        let Some(bin) = self.by_chrom.get(q.chrom()) else {
            return Vec::new();
        };
        let search_start = q.start().saturating_sub(bin.max_len);
        let lo = bin.entries.partition_point(|e| e.0 < search_start);
        let hi = bin.entries.partition_point(|e| e.0 < q.stop());
        let mut found: Vec<usize> = bin.entries[lo..hi.max(lo)]
            .iter()
            .filter(|e| q.start() < e.1)
            .map(|e| e.2)
            .collect();
        found.sort_unstable();
        found
    }

    pub fn get(&self, i: usize) -> Option<&'a P> {
        self.items.get(i)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Join every amplicon with every gene model feature it overlaps, keeping both
/// sides of the pair (bedtools `intersect -wa -wb`).
///
/// Records come out in amplicon order and, for one amplicon, in feature file order.
/// Features are consumed as a stream; only those that hit an amplicon are kept.
pub fn intersect<I>(intervals: &[Interval], features: I) -> Result<Vec<FeatureRecord>>
where
    I: IntoIterator<Item = Result<GtfRecord>>,
{
    let index = IntervalIndex::new(intervals);
    let mut kept: Vec<GtfRecord> = Vec::new();
    let mut hits: Vec<Vec<usize>> = vec![Vec::new(); intervals.len()];
    let mut n_features = 0usize;

    for feature in features {
        let feature = feature?;
        n_features += 1;
        let found = index.find(&feature);
        if found.is_empty() {
            continue;
        }
        for i in found {
            hits[i].push(kept.len());
        }
        kept.push(feature);
    }

    let records: Vec<FeatureRecord> = intervals
        .iter()
        .zip(hits.iter())
        .flat_map(|(iv, fs)| {
            fs.iter().map(|&f| FeatureRecord {
                interval: iv.clone(),
                feature: kept[f].clone(),
            })
        })
        .collect();

    log::info!(
        "{} of {} features overlap {} intervals ({} pairs)",
        kept.len(),
        n_features,
        intervals.len(),
        records.len()
    );
    Ok(records)
}

/// Write the overlap pairs as a 15 column file.
pub fn write_overlaps<P: AsRef<Path>>(path: P, records: &[FeatureRecord]) -> Result<()> {
    write_atomic(path.as_ref(), |w| {
        for r in records {
            writeln!(w, "{}", r)?;
        }
        Ok(())
    })?;
    log::info!(
        "wrote {} overlaps to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Keep only exon features and, for each amplicon name, only the first of them.
///
/// An amplicon spanning several exons is annotated with the first one listed.
pub fn retain_first_exons(records: Vec<FeatureRecord>) -> Vec<FeatureRecord> {
    let mut seen: HashSet<String> = HashSet::default();
    let mut dropped = 0usize;
    let exons: Vec<FeatureRecord> = records
        .into_iter()
        .filter(|r| r.feature_type() == EXON)
        .filter(|r| {
            if seen.contains(r.name()) {
                dropped += 1;
                false
            } else {
                seen.insert(String::from(r.name()));
                true
            }
        })
        .collect();
    if dropped > 0 {
        log::debug!(
            "dropped {} additional exon overlaps; kept the first exon per interval",
            dropped
        );
    }
    exons
}

/// Map each amplicon name to the gene and exon of its first exon record.
///
/// A record missing either `gene_id` or `exon_number` maps to None so that the
/// two output columns are always resolved together.
pub fn resolve_exons(records: &[FeatureRecord]) -> HashMap<String, Option<ExonAnnotation>> {
    let mut resolved: HashMap<String, Option<ExonAnnotation>> =
        HashMap::with_capacity(records.len());
    let keys = [AttributeKey::new(GENE_ID), AttributeKey::new(EXON_NUMBER)];
    for r in records {
        if resolved.contains_key(r.name()) {
            continue;
        }
        let attrs = AttributeMap::extract(r.attributes(), &keys);
        let annotation = match (attrs.get(GENE_ID), attrs.get(EXON_NUMBER)) {
            (Some(gene_id), Some(exon_number)) => Some(ExonAnnotation {
                gene_id: String::from(gene_id),
                exon_number: String::from(exon_number),
            }),
            _ => {
                log::debug!(
                    "exon overlapping {} lacks gene_id or exon_number: {}",
                    r.name(),
                    r.attributes()
                );
                None
            }
        };
        resolved.insert(String::from(r.name()), annotation);
    }
    resolved
}
