//! doxidx — parse, validate, query, merge and re-emit doc-site search-index
//! shards (`var searchData=[...]` files).
//!
//! Supports two input modes:
//!
//! - **stdin mode**: `doxidx < search/functions_11.js`
//! - **file mode**: `doxidx -o out -f json search/*.js`
//!
//! plus `--query` for prefix lookup, `--check` for invariant validation, and
//! `--merge`/`--split` for rebuilding a partitioned index from several
//! builds.

mod check;
mod key;
mod model;
mod parser;
mod query;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "doxidx",
    about = "Parse, validate, query, merge and re-emit doc-site search-index shards"
)]
struct Cli {
    /// Input shard files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when rendering files)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json, js
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Look up symbols by name prefix and print the matches
    #[arg(short = 'q', long)]
    query: Option<String>,

    /// Maximum number of query matches
    #[arg(long)]
    limit: Option<usize>,

    /// Validate shard invariants instead of rendering
    #[arg(long)]
    check: bool,

    /// Merge all inputs into a single index before rendering
    #[arg(long)]
    merge: bool,

    /// With --merge and -f js: partition the merged index into per-letter shards
    #[arg(long)]
    split: bool,

    /// Output stem for merged output files
    #[arg(long, default_value = "searchdata")]
    stem: String,

    /// First id assigned when renumbering merged records
    #[arg(long, default_value_t = 0)]
    renumber_from: u64,

    /// Partition rank of the first shard written by --split
    #[arg(long, default_value_t = 0)]
    base_rank: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.check && cli.query.is_some() {
        bail!("--check and --query are mutually exclusive");
    }
    if cli.split && !cli.merge {
        bail!("--split requires --merge");
    }

    if let Some(prefix) = &cli.query {
        return query_mode(&cli, prefix);
    }
    if cli.check {
        return check_mode(&cli);
    }

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one shard from stdin, render to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let index = parse_stdin()?;
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&index));
    Ok(())
}

/// Load inputs (files or stdin), merge, run a prefix lookup, print matches.
fn query_mode(cli: &Cli, prefix: &str) -> Result<()> {
    let index = load_merged(cli, 0)?;

    let mut q = query::PrefixQuery::new(prefix);
    if let Some(limit) = cli.limit {
        q = q.with_limit(limit);
    }

    for record in query::find(&index, &q) {
        println!("{}", record.name);
        for occ in &record.occurrences {
            match &occ.source {
                Some(source) => println!("    {}  {}", occ.url, source),
                None => println!("    {}", occ.url),
            }
        }
    }
    Ok(())
}

/// Validate every input shard; print diagnostics to stderr, fail if any.
fn check_mode(cli: &Cli) -> Result<()> {
    let mut issues: Vec<String> = Vec::new();

    if cli.files.is_empty() {
        let index = parse_stdin()?;
        issues.extend(check::check_shard("<stdin>", &index));
    } else {
        for path in expand_globs(&cli.files)? {
            let label = path.display().to_string();
            match read_and_parse(&path) {
                Ok(index) => issues.extend(check::check_shard(&label, &index)),
                Err(e) => issues.push(format!("{}: {:#}", label, e)),
            }
        }
    }

    for issue in &issues {
        eprintln!("{}", issue);
    }
    if !issues.is_empty() {
        bail!("{} problem(s) found", issues.len());
    }
    Ok(())
}

/// file mode: render each input (or the merged index) into the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    if cli.merge {
        let index = load_merged(cli, cli.renumber_from)?;

        if cli.split {
            if cli.format != "js" {
                bail!("--split only supports the js format");
            }
            for (rank, _, part) in index.partition(cli.base_rank) {
                let out_path = output_dir.join(key::shard_file_name(&cli.stem, rank));
                fs::write(&out_path, renderer.render(&part))
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
            }
            return Ok(());
        }

        let out_path = output_dir.join(format!("{}.{}", cli.stem, ext));
        fs::write(&out_path, renderer.render(&index))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        return Ok(());
    }

    for path in expand_globs(&cli.files)? {
        let index = match read_and_parse(&path) {
            Ok(index) => index,
            Err(e) => {
                eprintln!("warning: skipping {}: {:#}", path.display(), e);
                continue;
            }
        };
        let name = derive_output_name(&path.to_string_lossy());
        let out_path = output_dir.join(format!("{}.{}", name, ext));
        fs::write(&out_path, renderer.render(&index))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Parse all inputs (stdin when no files were given) and merge them.
fn load_merged(cli: &Cli, renumber_from: u64) -> Result<model::SearchIndex> {
    if cli.files.is_empty() {
        let index = parse_stdin()?;
        return Ok(parser::merge::merge(vec![index], renumber_from));
    }

    let mut indexes = Vec::new();
    for path in expand_globs(&cli.files)? {
        match read_and_parse(&path) {
            Ok(index) => indexes.push(index),
            Err(e) => eprintln!("warning: skipping {}: {:#}", path.display(), e),
        }
    }
    if indexes.is_empty() {
        bail!("no readable input shards");
    }
    Ok(parser::merge::merge(indexes, renumber_from))
}

fn parse_stdin() -> Result<model::SearchIndex> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    parser::shard::parse(&input).context("failed to parse shard from stdin")
}

fn read_and_parse(path: &Path) -> Result<model::SearchIndex> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parser::parse_file(path, &content)
}

/// File extensions recognized as shard files.
const SUPPORTED_EXTENSIONS: &[&str] = &["js"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for shard files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SUPPORTED_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the output file name (without extension) from a source path.
/// "search/functions_11.js" → "functions_11"
fn derive_output_name(source: &str) -> String {
    let filename = source.rsplit('/').next().unwrap_or(source);
    filename
        .strip_suffix(".js")
        .unwrap_or(filename)
        .to_string()
}
