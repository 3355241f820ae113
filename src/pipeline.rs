use crate::annotate::{annotate, extract_gene_ids, write_annotated, OutputTarget};
use crate::bed::{read_intervals, HeaderLine};
use crate::enrich::{fetch_metadata, write_protein_table, MetadataSource, ProteinRecord};
use crate::error::Result;
use crate::feature::read_feature_records;
use crate::gtf::GtfReader;
use crate::interval::AnnotatedInterval;
use crate::overlap::{intersect, resolve_exons, retain_first_exons, write_overlaps};
use std::path::PathBuf;

/// Where the overlap file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlapSource {
    /// Intersect the panel with this gene model and write the result to the overlap path.
    Compute { feature_path: PathBuf },
    /// The overlap path already holds `intersect -wa -wb` output for this panel.
    Precomputed,
}

#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    pub interval_path: PathBuf,
    pub overlaps: OverlapSource,
    pub overlap_artifact_path: PathBuf,
    pub output: OutputTarget,
}

/// The annotated panel as written.
#[derive(Debug, Clone)]
pub struct AnnotatedPanel {
    pub path: PathBuf,
    pub header: Option<HeaderLine>,
    pub rows: Vec<AnnotatedInterval>,
}

/// Read the panel, find the first exon overlapping each amplicon and write the
/// annotated panel. Nothing is written to the output if any step fails.
pub fn annotate_panel(opts: &AnnotateOptions) -> Result<AnnotatedPanel> {
    let table = read_intervals(&opts.interval_path)?;

    if let OverlapSource::Compute { feature_path } = &opts.overlaps {
        log::info!(
            "intersecting {} with {}",
            opts.interval_path.display(),
            feature_path.display()
        );
        let records = intersect(&table.intervals, GtfReader::open(feature_path)?)?;
        write_overlaps(&opts.overlap_artifact_path, &records)?;
    }

    let records = read_feature_records(&opts.overlap_artifact_path)?;
    let exons = retain_first_exons(records);
    let resolved = resolve_exons(&exons);
    let rows = annotate(table.intervals, &resolved);

    let path = opts.output.resolve(&opts.interval_path);
    if opts.output == OutputTarget::InPlace {
        log::warn!("overwriting input panel {}", path.display());
    }
    write_annotated(&path, table.header.as_ref(), &rows)?;
    Ok(AnnotatedPanel {
        path,
        header: table.header,
        rows,
    })
}

/// Look up every gene found in `rows` and write the enrichment table.
pub fn enrich_panel<S, P>(
    source: &S,
    rows: &[AnnotatedInterval],
    enrichment_artifact_path: P,
) -> Result<Vec<ProteinRecord>>
where
    S: MetadataSource + ?Sized,
    P: AsRef<std::path::Path>,
{
    let ids = extract_gene_ids(rows);
    if ids.is_empty() {
        log::warn!("no genes were found in the panel; the enrichment table will be empty");
    } else {
        log::info!("looking up {} genes", ids.len());
    }
    let records = fetch_metadata(source, ids.iter().map(|s| s.as_str()));
    write_protein_table(enrichment_artifact_path.as_ref(), &records)?;
    Ok(records)
}
