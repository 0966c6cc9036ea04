//! Prefix lookup over a sorted index.
//!
//! The query arrives in display form (`Uart_`, `udelay`); escaping it with
//! the same transform as record keys makes matching case-insensitive while
//! keeping punctuation exact.

use crate::key;
use crate::model::{SearchIndex, SearchRecord};

/// A prepared prefix query.
#[derive(Debug, Clone, Default)]
pub struct PrefixQuery {
    /// Escaped prefix, comparable against record keys.
    pub prefix: String,
    /// Maximum results to return.
    pub limit: Option<usize>,
}

impl PrefixQuery {
    /// Prepare a query from a display-form symbol prefix.
    pub fn new(prefix: &str) -> Self {
        PrefixQuery {
            prefix: key::escape_symbol(prefix),
            limit: None,
        }
    }

    /// Cap the number of matches.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Find all records whose key starts with the query prefix.
///
/// Binary search for the partition point, then a forward scan while the
/// prefix holds. Results borrow from the index; requires the index sorted by
/// key, which [`SearchIndex::from_records`] and merging guarantee.
pub fn find<'a>(index: &'a SearchIndex, query: &PrefixQuery) -> Vec<&'a SearchRecord> {
    let records = &index.records;
    let start = records.partition_point(|r| r.key.as_str() < query.prefix.as_str());
    let limit = query.limit.unwrap_or(usize::MAX);
    records[start..]
        .iter()
        .take_while(|r| r.key.starts_with(&query.prefix))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Occurrence;

    fn index() -> SearchIndex {
        let names = [
            "uart_get_errors",
            "uart_init",
            "uart_read",
            "uart_write",
            "udelay",
            "update_adc_channels",
        ];
        SearchIndex::from_records(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| SearchRecord {
                    key: key::escape_symbol(name),
                    id: i as u64,
                    name: name.to_string(),
                    occurrences: vec![Occurrence {
                        url: format!("../{}.html#a", name),
                        flag: 1,
                        title: name.to_string(),
                        source: None,
                    }],
                })
                .collect(),
        )
    }

    fn names(matches: &[&SearchRecord]) -> Vec<String> {
        matches.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn prefix_matches_group() {
        let index = index();
        let matches = find(&index, &PrefixQuery::new("uart_"));
        assert_eq!(
            names(&matches),
            vec!["uart_get_errors", "uart_init", "uart_read", "uart_write"]
        );
    }

    #[test]
    fn prefix_is_case_insensitive() {
        let index = index();
        let matches = find(&index, &PrefixQuery::new("UART_R"));
        assert_eq!(names(&matches), vec!["uart_read"]);
    }

    #[test]
    fn prefix_single_letter() {
        let index = index();
        let matches = find(&index, &PrefixQuery::new("u"));
        assert_eq!(matches.len(), 6);
    }

    #[test]
    fn prefix_no_match() {
        let index = index();
        assert!(find(&index, &PrefixQuery::new("xyz")).is_empty());
        // 'uarta' sorts inside the uart_ group but matches nothing
        assert!(find(&index, &PrefixQuery::new("uarta")).is_empty());
    }

    #[test]
    fn prefix_with_limit() {
        let index = index();
        let matches = find(&index, &PrefixQuery::new("uart_").with_limit(2));
        assert_eq!(names(&matches), vec!["uart_get_errors", "uart_init"]);
    }

    #[test]
    fn empty_prefix_matches_all() {
        let index = index();
        assert_eq!(find(&index, &PrefixQuery::new("")).len(), 6);
    }
}
