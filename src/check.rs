//! Shard invariant checks.
//!
//! Violations are collected as human-readable diagnostics rather than
//! failing on the first, so one pass reports everything wrong with a build.

use crate::key;
use crate::model::SearchIndex;

/// Check every shard invariant; returns one diagnostic per violation.
///
/// `label` names the shard in diagnostics (usually the file path).
pub fn check_shard(label: &str, index: &SearchIndex) -> Vec<String> {
    let mut issues = Vec::new();

    if index.records.is_empty() {
        issues.push(format!("{}: shard contains no records", label));
        return issues;
    }

    let partition = key::partition_char(&index.records[0].name);

    for (i, record) in index.records.iter().enumerate() {
        let ordinal = i + 1;

        let expected = key::escape_symbol(&record.name);
        if record.key != expected {
            issues.push(format!(
                "{}: record {} ('{}'): key '{}' does not match escaped name '{}'",
                label, ordinal, record.name, record.key, expected
            ));
        }

        if record.occurrences.is_empty() {
            issues.push(format!(
                "{}: record {} ('{}'): no occurrences",
                label, ordinal, record.name
            ));
            continue;
        }

        if key::partition_char(&record.name) != partition {
            issues.push(format!(
                "{}: record {} ('{}'): partition character '{}' differs from shard partition '{}'",
                label,
                ordinal,
                record.name,
                key::partition_char(&record.name),
                partition
            ));
        }

        // All occurrences of one symbol share the anchor the generator
        // derived from the member id.
        let first_anchor = record.occurrences[0].anchor();
        for occ in &record.occurrences[1..] {
            if occ.anchor() != first_anchor {
                issues.push(format!(
                    "{}: record {} ('{}'): occurrence '{}' anchor differs from '{}'",
                    label,
                    ordinal,
                    record.name,
                    occ.url,
                    record.occurrences[0].url
                ));
            }
        }

        for occ in &record.occurrences {
            if let Some(source) = &occ.source {
                if source.is_empty() || !source.contains('.') || source.contains('/') {
                    issues.push(format!(
                        "{}: record {} ('{}'): malformed source label '{}'",
                        label, ordinal, record.name, source
                    ));
                }
            }
        }
    }

    for pair in index.records.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if (a.key.as_str(), a.id) >= (b.key.as_str(), b.id) {
            issues.push(format!(
                "{}: records '{}' and '{}' out of order",
                label,
                a.serialized_key(),
                b.serialized_key()
            ));
        }
        if a.id >= b.id {
            issues.push(format!(
                "{}: record ids {} and {} not strictly increasing",
                label, a.id, b.id
            ));
        }
    }

    issues
}
