//! Protein name and disease lookups for the genes found by the annotator.

use crate::error::{AnnotateError, EnrichmentError, Result};
use crate::writer::write_atomic;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const UNIPROT_URL: &str = "https://rest.uniprot.org/uniprotkb/";

/// protein name used when an entry has no recommended name.
pub const NO_NAME: &str = "N/A";
/// disease description used when an entry lists no disease.
pub const NO_DISEASE: &str = "-";

/// One row of the enrichment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProteinRecord {
    #[serde(rename = "UniProt ID")]
    pub id: String,
    #[serde(rename = "Protein Name")]
    pub protein_name: String,
    #[serde(rename = "Disease Description")]
    pub disease_description: String,
}

/// Anything that can look up a single identifier.
pub trait MetadataSource {
    fn fetch(&self, id: &str) -> std::result::Result<ProteinRecord, EnrichmentError>;
}

/// The parts of a UniProtKB JSON entry that are used.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniprotEntry {
    #[serde(default)]
    pub protein_description: Option<ProteinDescription>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinDescription {
    #[serde(default)]
    pub recommended_name: Option<RecommendedName>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedName {
    #[serde(default)]
    pub full_name: Option<EvidencedValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvidencedValue {
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub comment_type: Option<String>,
    #[serde(default)]
    pub disease: Option<Disease>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    #[serde(default)]
    pub disease_id: Option<String>,
}

impl UniprotEntry {
    pub fn into_record(self, id: &str) -> ProteinRecord {
        let protein_name = self
            .protein_description
            .and_then(|d| d.recommended_name)
            .and_then(|n| n.full_name)
            .map(|v| v.value)
            .unwrap_or_else(|| String::from(NO_NAME));
        let diseases: Vec<String> = self
            .comments
            .into_iter()
            .filter(|c| c.comment_type.as_deref() == Some("DISEASE"))
            .filter_map(|c| c.disease.and_then(|d| d.disease_id))
            .collect();
        let disease_description = if diseases.is_empty() {
            String::from(NO_DISEASE)
        } else {
            diseases.join(", ")
        };
        ProteinRecord {
            id: String::from(id),
            protein_name,
            disease_description,
        }
    }
}

/// HTTP client for the UniProtKB REST API.
pub struct UniprotClient {
    client: Client,
    base_url: String,
}

impl UniprotClient {
    pub fn new(base_url: &str) -> std::result::Result<Self, EnrichmentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(EnrichmentError::Client)?;
        let mut base_url = String::from(base_url);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { client, base_url })
    }

    pub fn url(&self, id: &str) -> String {
        format!("{}{}?format=json", self.base_url, id)
    }
}

impl MetadataSource for UniprotClient {
    fn fetch(&self, id: &str) -> std::result::Result<ProteinRecord, EnrichmentError> {
        let url = self.url(id);
        let request_error = |source| EnrichmentError::Request {
            id: String::from(id),
            source,
        };
        let entry: UniprotEntry = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(request_error)?
            .json()
            .map_err(request_error)?;
        log::debug!("fetched {}", url);
        Ok(entry.into_record(id))
    }
}

/// Look up each id in turn. Ids whose lookup fails are logged and left out.
pub fn fetch_metadata<'a, S, I>(source: &S, ids: I) -> Vec<ProteinRecord>
where
    S: MetadataSource + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();
    let mut failed = 0usize;
    for id in ids {
        match source.fetch(id) {
            Ok(r) => records.push(r),
            Err(e) => {
                failed += 1;
                log::warn!("skipping {}: {}", id, e);
            }
        }
    }
    if failed > 0 {
        log::warn!("{} lookups failed; {} succeeded", failed, records.len());
    }
    records
}

/// Write the enrichment table as tab-separated text with a header row.
pub fn write_protein_table<P: AsRef<Path>>(path: P, records: &[ProteinRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut table_error = None;
    let written = write_atomic(path, |w| {
        let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_writer(w);
        if records.is_empty() {
            wtr.write_record(["UniProt ID", "Protein Name", "Disease Description"])
                .map_err(|e| stash(&mut table_error, e))?;
        }
        for r in records {
            wtr.serialize(r).map_err(|e| stash(&mut table_error, e))?;
        }
        wtr.flush()
    });
    match (written, table_error) {
        (Err(_), Some(source)) => Err(AnnotateError::Table {
            path: path.to_path_buf(),
            source,
        }),
        (r, _) => r,
    }
}

// keep the csv error for the caller and hand write_atomic an io error to abort with.
fn stash(slot: &mut Option<csv::Error>, e: csv::Error) -> std::io::Error {
    let io = std::io::Error::new(std::io::ErrorKind::Other, e.to_string());
    *slot = Some(e);
    io
}
