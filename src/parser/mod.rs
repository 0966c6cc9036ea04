//! Parser module — dispatch by file extension.

pub mod merge;
pub mod shard;

use crate::model::SearchIndex;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Parse a search-index file into a SearchIndex based on its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<SearchIndex> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => shard::parse(content),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
