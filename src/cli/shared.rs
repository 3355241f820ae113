use ampannot::annotate::OutputTarget;
use ampannot::enrich::UNIPROT_URL;
use ampannot::pipeline::{AnnotateOptions, OverlapSource};
use clap::Parser;
use std::path::PathBuf;

pub const HELP_TEMPLATE: &str =
    "{name} v{version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}{after-help}";

#[derive(Parser, Debug)]
pub struct AnnotateArgs {
    #[arg(
        help = "amplicon panel: BED6 (chrom, start, end, name, score, pool) with an optional leading track line",
        short = 'a',
        long = "intervals",
        env = "BED_FILE_PATH"
    )]
    pub interval_path: PathBuf,

    #[arg(
        help = "gene model in GTF format (may be gzipped)",
        short = 'g',
        long = "features",
        env = "GTF_FILE_PATH",
        required_unless_present = "precomputed_overlaps"
    )]
    pub feature_path: Option<PathBuf>,

    #[arg(
        help = "overlap file written by the intersection (15 columns: panel then GTF)",
        long = "overlaps",
        env = "INTERSECTED_PATH",
        default_value = "intersected_results/intersected.bed"
    )]
    pub overlap_artifact_path: PathBuf,

    #[arg(
        help = "read an existing overlap file (e.g. from `bedtools intersect -wa -wb`) instead of computing it",
        long = "precomputed-overlaps"
    )]
    pub precomputed_overlaps: bool,

    #[arg(
        help = "annotated panel to write (default: <panel>.annotated.<ext> next to the panel)",
        short = 'o',
        long = "output",
        conflicts_with = "in_place"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        help = "overwrite the input panel with the annotated panel. the original file is lost.",
        long = "in-place"
    )]
    pub in_place: bool,
}

impl AnnotateArgs {
    pub fn options(&self) -> AnnotateOptions {
        let overlaps = match (&self.feature_path, self.precomputed_overlaps) {
            (Some(feature_path), false) => OverlapSource::Compute {
                feature_path: feature_path.clone(),
            },
            (_, true) | (None, false) => OverlapSource::Precomputed,
        };
        let output = match (&self.output, self.in_place) {
            (_, true) => OutputTarget::InPlace,
            (Some(p), false) => OutputTarget::Path(p.clone()),
            (None, false) => OutputTarget::Sibling,
        };
        AnnotateOptions {
            interval_path: self.interval_path.clone(),
            overlaps,
            overlap_artifact_path: self.overlap_artifact_path.clone(),
            output,
        }
    }
}

#[derive(Parser, Debug)]
pub struct EnrichArgs {
    #[arg(
        help = "enrichment table to write (tab-separated: UniProt ID, Protein Name, Disease Description)",
        long = "enrichment",
        env = "UNIPROT_INFO",
        default_value = "gene_disease_info/uniprot_protein_data.tsv"
    )]
    pub enrichment_artifact_path: PathBuf,

    #[arg(
        help = "base URL of the UniProtKB REST API",
        long = "uniprot-url",
        env = "UNIPROT_BASE_URL",
        default_value = UNIPROT_URL
    )]
    pub uniprot_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct Wrap {
        #[command(flatten)]
        args: AnnotateArgs,
    }

    #[test]
    fn test_options_defaults() {
        let w = Wrap::try_parse_from(["x", "-a", "panel.bed", "-g", "genes.gtf"]).unwrap();
        let o = w.args.options();
        assert_eq!(o.output, OutputTarget::Sibling);
        assert_eq!(
            o.overlaps,
            OverlapSource::Compute {
                feature_path: PathBuf::from("genes.gtf")
            }
        );
        assert_eq!(
            o.overlap_artifact_path,
            PathBuf::from("intersected_results/intersected.bed")
        );
    }

    #[test]
    fn test_options_precomputed_in_place() {
        let w = Wrap::try_parse_from([
            "x",
            "-a",
            "panel.bed",
            "--precomputed-overlaps",
            "--overlaps",
            "hits.bed",
            "--in-place",
        ])
        .unwrap();
        let o = w.args.options();
        assert_eq!(o.output, OutputTarget::InPlace);
        assert_eq!(o.overlaps, OverlapSource::Precomputed);
    }

    #[test]
    fn test_output_conflicts_with_in_place() {
        let r = Wrap::try_parse_from([
            "x", "-a", "p.bed", "-g", "g.gtf", "-o", "out.bed", "--in-place",
        ]);
        assert!(r.is_err());
    }
}
