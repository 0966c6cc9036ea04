//! Data model for a parsed search index — format-agnostic.

use crate::key;

/// A parsed search index: the records of one shard, or of several shards
/// merged together. Records are kept sorted by `(key, id)`.
#[derive(Debug, Default)]
pub struct SearchIndex {
    pub records: Vec<SearchRecord>,
}

/// One symbol entry in the index.
#[derive(Debug, Default, Clone)]
pub struct SearchRecord {
    /// Escaped, lowercase lookup key (`uart_5finit` for `uart_init`).
    pub key: String,
    /// Numeric suffix the generator appends to the key in serialized form.
    pub id: u64,
    /// Human-readable symbol name.
    pub name: String,
    /// Documentation pages referencing the symbol. Non-empty by construction.
    pub occurrences: Vec<Occurrence>,
}

/// A single documentation page entry for a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Relative page path including the in-page anchor
    /// (`../uart_8h.html#ad5e54630...`).
    pub url: String,
    /// Integer the generator writes between url and title. Observed constant
    /// 1; preserved verbatim so re-emission round-trips.
    pub flag: i64,
    /// Display text, typically the full signature.
    pub title: String,
    /// Source-file label split from the serialized title (`uart.c`).
    pub source: Option<String>,
}

impl SearchRecord {
    /// Key as written in the shard file: escaped key plus id suffix.
    pub fn serialized_key(&self) -> String {
        format!("{}_{}", self.key, self.id)
    }
}

impl Occurrence {
    /// Page path without the anchor.
    #[allow(dead_code)]
    pub fn page(&self) -> &str {
        match self.url.find('#') {
            Some(pos) => &self.url[..pos],
            None => &self.url,
        }
    }

    /// In-page anchor fragment, if the url carries one.
    pub fn anchor(&self) -> Option<&str> {
        self.url.find('#').map(|pos| &self.url[pos + 1..])
    }
}

impl SearchIndex {
    /// Build an index from records, restoring the `(key, id)` sort order.
    pub fn from_records(mut records: Vec<SearchRecord>) -> Self {
        records.sort_by(|a, b| a.key.cmp(&b.key).then(a.id.cmp(&b.id)));
        SearchIndex { records }
    }

    /// Split into per-letter partitions, in partition-character order.
    ///
    /// Returns `(rank, partition_char, index)` per partition, where rank
    /// starts at `base_rank` and follows the order of the distinct partition
    /// characters present.
    pub fn partition(&self, base_rank: usize) -> Vec<(usize, char, SearchIndex)> {
        let mut parts: Vec<(char, Vec<SearchRecord>)> = Vec::new();
        for record in &self.records {
            let c = key::partition_char(&record.name);
            match parts.last_mut() {
                Some((last, records)) if *last == c => records.push(record.clone()),
                _ => parts.push((c, vec![record.clone()])),
            }
        }
        parts
            .into_iter()
            .enumerate()
            .map(|(i, (c, records))| (base_rank + i, c, SearchIndex { records }))
            .collect()
    }
}
