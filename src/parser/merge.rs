//! Merge records from several shards into one index.
//!
//! Per-platform documentation builds produce overlapping shards; merging
//! groups records by symbol, de-duplicates occurrences, and renumbers ids so
//! the result satisfies the generator's monotonic-id invariant again.

use crate::model::{Occurrence, SearchIndex, SearchRecord};
use std::collections::HashMap;

/// Merge indexes into one, renumbering record ids from `renumber_from`.
///
/// Records are grouped by `(key, name)`; occurrences are concatenated in
/// input order and de-duplicated by `(url, title)`.
pub fn merge(indexes: Vec<SearchIndex>, renumber_from: u64) -> SearchIndex {
    let mut occ_map: HashMap<(String, String), Vec<Occurrence>> = HashMap::new();
    let mut order: Vec<(String, String)> = Vec::new();

    for index in indexes {
        for record in index.records {
            let group = (record.key, record.name);
            let slot = occ_map.entry(group.clone()).or_insert_with(|| {
                order.push(group);
                Vec::new()
            });
            for occ in record.occurrences {
                if !slot.iter().any(|o| o.url == occ.url && o.title == occ.title) {
                    slot.push(occ);
                }
            }
        }
    }

    let mut records: Vec<SearchRecord> = order
        .into_iter()
        .filter_map(|group| {
            let occurrences = occ_map.remove(&group)?;
            let (key, name) = group;
            Some(SearchRecord {
                key,
                id: 0,
                name,
                occurrences,
            })
        })
        .collect();

    records.sort_by(|a, b| a.key.cmp(&b.key).then(a.name.cmp(&b.name)));
    for (i, record) in records.iter_mut().enumerate() {
        record.id = renumber_from + i as u64;
    }

    SearchIndex { records }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(url: &str, source: &str) -> Occurrence {
        Occurrence {
            url: url.to_string(),
            flag: 1,
            title: "sig()".to_string(),
            source: Some(source.to_string()),
        }
    }

    fn record(key: &str, id: u64, name: &str, occurrences: Vec<Occurrence>) -> SearchRecord {
        SearchRecord {
            key: key.to_string(),
            id,
            name: name.to_string(),
            occurrences,
        }
    }

    #[test]
    fn merge_disjoint_sorts_and_renumbers() {
        let a = SearchIndex {
            records: vec![record("update", 9, "update", vec![occ("../u.html#a", "u.c")])],
        };
        let b = SearchIndex {
            records: vec![record("uart", 3, "uart", vec![occ("../t.html#b", "t.c")])],
        };

        let merged = merge(vec![a, b], 100);
        let keys: Vec<&str> = merged.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["uart", "update"]);
        assert_eq!(merged.records[0].id, 100);
        assert_eq!(merged.records[1].id, 101);
    }

    #[test]
    fn merge_combines_occurrences() {
        let a = SearchIndex {
            records: vec![record(
                "uart_5finit",
                1,
                "uart_init",
                vec![occ("../uart_8h.html#aa", "uart.c")],
            )],
        };
        let b = SearchIndex {
            records: vec![record(
                "uart_5finit",
                7,
                "uart_init",
                vec![
                    occ("../uart_8h.html#aa", "uart.c"),
                    occ("../stm32__uart_8c.html#aa", "stm32_uart.c"),
                ],
            )],
        };

        let merged = merge(vec![a, b], 0);
        assert_eq!(merged.records.len(), 1);
        let urls: Vec<&str> = merged.records[0]
            .occurrences
            .iter()
            .map(|o| o.url.as_str())
            .collect();
        assert_eq!(urls, vec!["../uart_8h.html#aa", "../stm32__uart_8c.html#aa"]);
    }

    #[test]
    fn merge_keeps_distinct_names_for_same_key() {
        // Case-folded collisions: "UDelay" and "udelay" share a key but are
        // distinct display names and stay separate records.
        let a = SearchIndex {
            records: vec![record("udelay", 1, "udelay", vec![occ("../a.html#x", "a.c")])],
        };
        let b = SearchIndex {
            records: vec![record("udelay", 2, "UDelay", vec![occ("../b.html#y", "b.c")])],
        };

        let merged = merge(vec![a, b], 0);
        assert_eq!(merged.records.len(), 2);
    }
}
