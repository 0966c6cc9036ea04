//! JSON renderer — structured output for tooling integration.

use crate::model::{Occurrence, SearchIndex, SearchRecord};
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, index: &SearchIndex) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        out.push_str("  \"records\": [\n");
        for (i, record) in index.records.iter().enumerate() {
            out.push_str(&render_record(record));
            if i < index.records.len() - 1 {
                out.push_str(",\n");
            } else {
                out.push('\n');
            }
        }
        out.push_str("  ]\n");
        out.push_str("}\n");
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn render_record(record: &SearchRecord) -> String {
    let mut out = String::new();
    out.push_str("    {\n");
    out.push_str(&format!("      \"key\": \"{}\",\n", json_escape(&record.key)));
    out.push_str(&format!("      \"id\": {},\n", record.id));
    out.push_str(&format!(
        "      \"name\": \"{}\",\n",
        json_escape(&record.name)
    ));
    out.push_str("      \"occurrences\": [\n");
    for (i, occ) in record.occurrences.iter().enumerate() {
        let comma = if i < record.occurrences.len() - 1 {
            ","
        } else {
            ""
        };
        out.push_str(&format!("        {}{}\n", render_occurrence(occ), comma));
    }
    out.push_str("      ]\n");
    out.push_str("    }");
    out
}

fn render_occurrence(occ: &Occurrence) -> String {
    let source = match &occ.source {
        Some(s) => format!("\"{}\"", json_escape(s)),
        None => "null".to_string(),
    };
    format!(
        "{{ \"url\": \"{}\", \"title\": \"{}\", \"source\": {} }}",
        json_escape(&occ.url),
        json_escape(&occ.title),
        source
    )
}

fn json_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
