//! Shard parser — quote-aware scanner over the generated JavaScript frame.
//!
//! A shard is a single `var searchData=` assignment holding an array of
//! records:
//!
//! ```text
//! var searchData=
//! [
//!   ['uart_5finit_22809',['uart_init',['../uart_8h.html#ad5e5...',1,'uart_init(...):&#160;uart.c'],...]],
//! ];
//! ```
//!
//! The grammar is regular enough that no JS interpretation is needed; a
//! bracket-counting scanner that honors `\'` and `\\` inside single-quoted
//! strings covers everything the generator emits.

use crate::key;
use crate::model::{Occurrence, SearchIndex, SearchRecord};
use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use std::sync::LazyLock;

static RE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*var\s+searchData\s*=\s*").unwrap());

/// Separator between display title and source-file label inside a serialized
/// occurrence title.
pub const SOURCE_SEPARATOR: &str = ":&#160;";

/// Parse one shard's text into a SearchIndex.
///
/// Record order is preserved as written; sortedness is an invariant of the
/// generator, verified separately by the checks.
pub fn parse(input: &str) -> Result<SearchIndex> {
    let header = RE_HEADER
        .find(input)
        .filter(|m| m.start() == 0)
        .ok_or_else(|| anyhow!("missing 'var searchData=' header"))?;

    let mut scanner = Scanner::new(&input[header.end()..]);
    scanner.skip_ws();
    scanner.expect(b'[').context("expected '[' after header")?;

    let mut records: Vec<SearchRecord> = Vec::new();
    scanner.skip_ws();
    if !scanner.eat(b']') {
        loop {
            let record = scanner
                .parse_record()
                .with_context(|| format!("record {}", records.len() + 1))?;
            records.push(record);
            scanner.skip_ws();
            if scanner.eat(b',') {
                scanner.skip_ws();
                continue;
            }
            scanner.expect(b']').context("expected ',' or ']' after record")?;
            break;
        }
    }
    scanner.skip_ws();
    scanner.eat(b';');
    scanner.skip_ws();
    if !scanner.at_end() {
        bail!("trailing data after closing ']'");
    }

    Ok(SearchIndex { records })
}

/// Split a serialized occurrence title at the final source separator.
///
/// The rightmost separator is the correct one: signatures may contain
/// colons, but the generator appends the label last.
fn split_title(raw: &str) -> (String, Option<String>) {
    match raw.rfind(SOURCE_SEPARATOR) {
        Some(pos) => (
            raw[..pos].to_string(),
            Some(raw[pos + SOURCE_SEPARATOR.len()..].to_string()),
        ),
        None => (raw.to_string(), None),
    }
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Result<()> {
        if self.eat(b) {
            Ok(())
        } else {
            match self.peek() {
                Some(found) => bail!(
                    "expected '{}' at offset {}, found '{}'",
                    b as char,
                    self.pos,
                    found as char
                ),
                None => bail!("expected '{}' at offset {}, found end of input", b as char, self.pos),
            }
        }
    }

    /// Single-quoted string with `\'` and `\\` escapes. Multibyte UTF-8
    /// content passes through untouched (no escape byte collides with a
    /// continuation byte).
    fn parse_string(&mut self) -> Result<String> {
        self.expect(b'\'')?;
        let mut out = Vec::new();
        loop {
            match self.peek() {
                Some(b'\'') => {
                    self.pos += 1;
                    let s = String::from_utf8(out).context("invalid UTF-8 in string")?;
                    return Ok(s);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(escaped @ (b'\'' | b'\\')) => {
                            out.push(escaped);
                            self.pos += 1;
                        }
                        Some(other) => {
                            // Unknown escape: keep both bytes as written.
                            out.push(b'\\');
                            out.push(other);
                            self.pos += 1;
                        }
                        None => bail!("unterminated string escape at offset {}", self.pos),
                    }
                }
                Some(b) => {
                    out.push(b);
                    self.pos += 1;
                }
                None => bail!("unterminated string at offset {}", self.pos),
            }
        }
    }

    fn parse_int(&mut self) -> Result<i64> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.pos == start || (self.pos == start + 1 && self.input[start] == b'-') {
            bail!("expected integer at offset {}", start);
        }
        let text = std::str::from_utf8(&self.input[start..self.pos])?;
        text.parse()
            .with_context(|| format!("integer out of range at offset {}", start))
    }

    /// `['key_id',['name',occurrence,...]]`
    fn parse_record(&mut self) -> Result<SearchRecord> {
        self.expect(b'[')?;
        self.skip_ws();
        let serialized = self.parse_string()?;
        let (escaped, id) = key::split_record_id(&serialized)
            .ok_or_else(|| anyhow!("key '{}' lacks a numeric id suffix", serialized))?;
        let escaped = escaped.to_string();

        self.skip_ws();
        self.expect(b',')?;
        self.skip_ws();
        self.expect(b'[')?;
        self.skip_ws();
        let name = self.parse_string()?;

        let mut occurrences = Vec::new();
        self.skip_ws();
        while self.eat(b',') {
            self.skip_ws();
            occurrences.push(self.parse_occurrence()?);
            self.skip_ws();
        }
        self.expect(b']')?;
        self.skip_ws();
        self.expect(b']')?;

        if occurrences.is_empty() {
            bail!("'{}' has no occurrences", name);
        }

        Ok(SearchRecord {
            key: escaped,
            id,
            name,
            occurrences,
        })
    }

    /// `['../page.html#anchor',1,'title:&#160;source.c']`
    fn parse_occurrence(&mut self) -> Result<Occurrence> {
        self.expect(b'[')?;
        self.skip_ws();
        let url = self.parse_string()?;
        self.skip_ws();
        self.expect(b',')?;
        self.skip_ws();
        let flag = self.parse_int()?;
        self.skip_ws();
        self.expect(b',')?;
        self.skip_ws();
        let raw_title = self.parse_string()?;
        self.skip_ws();
        self.expect(b']')?;

        let (title, source) = split_title(&raw_title);
        Ok(Occurrence {
            url,
            flag,
            title,
            source,
        })
    }
}
