//! Markdown renderer — human-readable symbol listing.
//!
//! One `###` section per symbol with its documentation pages as links,
//! preceded by an index of in-page anchors.

use crate::model::{SearchIndex, SearchRecord};
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, index: &SearchIndex) -> String {
        let mut output = String::new();

        if !index.records.is_empty() {
            output.push_str("## Index\n\n");
            for record in &index.records {
                output.push_str(&format!(
                    "* [{}](#{})\n",
                    record.name,
                    heading_slug(&record.name)
                ));
            }
            output.push('\n');
        }

        for record in &index.records {
            output.push_str(&render_record(record));
            output.push('\n');
        }

        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_record(record: &SearchRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", record.name));

    for occ in &record.occurrences {
        // Signatures carry `*` and `_`; backticks keep markdown from
        // treating them as emphasis.
        let mut item = format!("* [`{}`]({})", occ.title, occ.url);
        if let Some(source) = &occ.source {
            item.push_str(&format!(" ({})", source));
        }
        lines.push(item);
    }
    lines.push(String::new());

    lines.join("\n")
}

/// Heading anchor slug: lowercase, keep alphanumerics and hyphens, drop
/// everything else (underscores included), spaces become hyphens.
fn heading_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}
