//! Pull `key "value";` pairs out of a GTF attribute column.

use linear_map::LinearMap;
use regex::Regex;

/// A compiled matcher for one attribute key.
#[derive(Debug, Clone)]
pub struct AttributeKey {
    key: String,
    pattern: Regex,
}

impl AttributeKey {
    pub fn new(key: &str) -> Self {
        // the key must start the blob or follow a separator so that `gene_id`
        // does not match inside `transcript_gene_id`.
        let pattern = format!(r#"(?:^|[;\s]){}\s+"([^"]+)""#, regex::escape(key));
        AttributeKey {
            key: String::from(key),
            pattern: Regex::new(&pattern).expect("an escaped key is always a valid pattern"),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The first quoted value that follows this key in `blob`.
    pub fn find<'a>(&self, blob: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(blob)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

/// Return the first quoted value that follows `key` in `blob`, or None if the
/// key is absent or its value is not quoted.
///
/// Escaped or nested quotes are not interpreted: the value ends at the next `"`.
/// Compiles the key on each call; use [`AttributeKey`] when scanning many records.
pub fn extract_attribute<'a>(blob: &'a str, key: &str) -> Option<&'a str> {
    AttributeKey::new(key).find(blob)
}

/// The requested attributes of one record, in the order they were requested.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttributeMap {
    values: LinearMap<String, String>,
}

impl AttributeMap {
    /// Collect each of `keys` that is present in `blob`.
    pub fn extract(blob: &str, keys: &[AttributeKey]) -> Self {
        let mut values = LinearMap::with_capacity(keys.len());
        for key in keys {
            if let Some(v) = key.find(blob) {
                values.insert(String::from(key.key()), String::from(v));
            }
        }
        AttributeMap { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_present() {
        let blob = "gene_id \"ABC123\"; exon_number \"4\";";
        assert_eq!(extract_attribute(blob, "gene_id"), Some("ABC123"));
        assert_eq!(extract_attribute(blob, "exon_number"), Some("4"));
    }

    #[test]
    fn test_extract_missing() {
        assert_eq!(extract_attribute("exon_number \"4\";", "gene_id"), None);
        assert_eq!(extract_attribute("", "gene_id"), None);
        // unquoted values are not matched.
        assert_eq!(extract_attribute("gene_id ABC;", "gene_id"), None);
        assert_eq!(extract_attribute("gene_id \"\";", "gene_id"), None);
    }

    #[test]
    fn test_key_scoped() {
        let blob = "transcript_gene_id \"T1\"; gene_id \"G1\";";
        assert_eq!(extract_attribute(blob, "gene_id"), Some("G1"));
        assert_eq!(extract_attribute("transcript_gene_id \"T1\";", "gene_id"), None);
        assert_eq!(extract_attribute("gene_id_version \"3\";", "gene_id"), None);
    }

    #[test]
    fn test_first_quoted_group() {
        let blob = "gene_id \"G1\"; gene_id \"G2\";";
        assert_eq!(extract_attribute(blob, "gene_id"), Some("G1"));
        // no escape handling: value stops at the first quote.
        assert_eq!(extract_attribute(r#"gene_id "a\"b";"#, "gene_id"), Some("a\\"));
    }

    #[test]
    fn test_key_is_escaped() {
        assert_eq!(extract_attribute("a.b \"x\";", "a.b"), Some("x"));
        assert_eq!(extract_attribute("axb \"x\";", "a.b"), None);
    }

    #[test]
    fn test_attribute_map() {
        let blob = "gene_id \"ENSG1\"; transcript_id \"ENST1\"; exon_number \"7\";";
        let keys: Vec<AttributeKey> = ["gene_id", "exon_number", "gene_name"]
            .iter()
            .map(|k| AttributeKey::new(k))
            .collect();
        let m = AttributeMap::extract(blob, &keys);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("gene_id"), Some("ENSG1"));
        assert_eq!(m.get("exon_number"), Some("7"));
        assert_eq!(m.get("gene_name"), None);
        assert!(AttributeMap::extract("", &keys).is_empty());
    }

    #[test]
    fn test_key_reused_across_records() {
        let key = AttributeKey::new("exon_number");
        assert_eq!(key.key(), "exon_number");
        let blobs = [
            "gene_id \"G1\"; exon_number \"1\";",
            "gene_id \"G1\";",
            "exon_number \"12\"; gene_id \"G2\";",
        ];
        let found: Vec<Option<&str>> = blobs.iter().map(|b| key.find(b)).collect();
        assert_eq!(found, vec![Some("1"), None, Some("12")]);
    }
}
