//! Canonical shard serialization.
//!
//! Re-emitting an unmodified parse of a well-formed shard reproduces the
//! input byte-for-byte, including the header line, two-space record indent,
//! and the `:&#160;` title/source separator.

use crate::model::{Occurrence, SearchIndex};
use crate::parser::shard::SOURCE_SEPARATOR;
use crate::render::Renderer;

pub struct JsRenderer;

impl Renderer for JsRenderer {
    fn render(&self, index: &SearchIndex) -> String {
        let mut out = String::new();
        out.push_str("var searchData=\n[\n");
        for (i, record) in index.records.iter().enumerate() {
            out.push_str("  ['");
            out.push_str(&js_escape(&record.serialized_key()));
            out.push_str("',['");
            out.push_str(&js_escape(&record.name));
            out.push('\'');
            for occ in &record.occurrences {
                out.push(',');
                out.push_str(&render_occurrence(occ));
            }
            out.push_str("]]");
            if i < index.records.len() - 1 {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("];\n");
        out
    }

    fn file_extension(&self) -> &str {
        "js"
    }
}

fn render_occurrence(occ: &Occurrence) -> String {
    let mut title = occ.title.clone();
    if let Some(source) = &occ.source {
        title.push_str(SOURCE_SEPARATOR);
        title.push_str(source);
    }
    format!(
        "['{}',{},'{}']",
        js_escape(&occ.url),
        occ.flag,
        js_escape(&title)
    )
}

fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
