//! ampannot annotates amplicon panels with the gene and exon each amplicon
//! overlaps and looks up the proteins encoded by those genes.

/// Position trait and the overlap predicate.
pub mod position;

/// Error types.
pub mod error;

/// Open plain or gzipped inputs.
pub mod sniff;

/// Amplicons and annotated amplicons.
pub mod interval;

/// Panel (BED6) and annotated panel readers.
pub mod bed;

/// GTF gene model reader.
pub mod gtf;

/// The 15 column overlap file.
pub mod feature;

/// GTF attribute extraction.
pub mod attributes;

/// Interval index, intersection and first-exon selection.
pub mod overlap;

/// Left join onto the panel and the annotated panel writer.
pub mod annotate;

/// UniProt lookups.
pub mod enrich;

/// Atomic file output.
pub mod writer;

/// The annotate and enrich runs.
pub mod pipeline;

pub use error::{AnnotateError, EnrichmentError};
