//! CoNLL-U reading and writing
//!
//! Streams sentences from and to the tab-separated CoNLL-U format, one
//! blank-line-delimited block per sentence. Multiword tokens and empty nodes
//! (range or decimal ids) are legal in the input but dropped from the
//! in-memory sentence; the writer never re-emits them.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::error::{Error, Result};
use crate::sentence::{MISSING, Sentence, Token, TokenId};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

/// CoNLL-U reader that iterates over sentences
///
/// Lazy and single-pass: each call to `next` consumes one block from the
/// underlying stream. Restartable only by reopening the source.
pub struct ConlluReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl ConlluReader<Box<dyn BufRead>> {
    /// Create a reader from a file path
    ///
    /// Files ending in `.gz` are decompressed transparently.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let read: Box<dyn BufRead> = if path.extension().is_some_and(|e| e == "gz") {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(read))
    }
}

impl ConlluReader<BufReader<std::io::Cursor<String>>> {
    /// Create a reader from an in-memory string
    pub fn from_str(text: &str) -> Self {
        let cursor = std::io::Cursor::new(text.to_string());
        Self::new(BufReader::new(cursor))
    }
}

impl<R: BufRead> ConlluReader<R> {
    /// Create a reader from any buffered source
    pub fn new(read: R) -> Self {
        Self {
            lines: read.lines(),
            line_num: 0,
        }
    }

    /// Accumulate token lines until a blank line or EOF.
    /// Returns `None` at EOF with nothing accumulated.
    fn next_block(&mut self) -> Option<Result<Vec<(usize, String)>>> {
        let mut block = Vec::new();

        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if block.is_empty() {
                        return None;
                    }
                    // Last sentence without trailing blank line
                    return Some(Ok(block));
                }
                Some(Err(e)) => return Some(Err(e.into())),
                Some(Ok(line)) => {
                    let line = line.trim();

                    if line.is_empty() {
                        // Blank line = sentence boundary
                        if !block.is_empty() {
                            return Some(Ok(block));
                        }
                        // Skip repeated blank lines
                        continue;
                    }

                    // Comment/metadata line
                    if line.starts_with('#') {
                        continue;
                    }

                    block.push((self.line_num, line.to_string()));
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for ConlluReader<R> {
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let block = match self.next_block()? {
                Ok(block) => block,
                Err(e) => return Some(Err(e)),
            };
            match parse_block(block) {
                // Block held only multiword/empty-node lines; skip to the
                // next one rather than yielding a root-only sentence.
                Ok(None) => continue,
                Ok(Some(sentence)) => return Some(Ok(sentence)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parse one blank-line-delimited block into a sentence.
/// Returns `Ok(None)` when no real tokens survive filtering.
fn parse_block(lines: Vec<(usize, String)>) -> Result<Option<Sentence>> {
    let mut tokens = Vec::with_capacity(lines.len());

    for (line_num, line) in lines {
        if let Some(token) = parse_line(&line, line_num)? {
            tokens.push(token);
        }
    }

    Ok(Sentence::from_tokens(tokens))
}

/// Parse a single token line
///
/// Returns `None` for multiword tokens (`4-5`) and empty nodes (`4.1`).
fn parse_line(line: &str, line_num: usize) -> Result<Option<Token>> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 10 {
        return Err(Error::parse(
            line_num,
            format!("expected 10 fields, found {}", fields.len()),
        ));
    }

    // Only pure integer ids name real tokens
    let id = match parse_id(fields[0]) {
        Some(id) => id,
        None => {
            if fields[0].contains('-') || fields[0].contains('.') {
                return Ok(None);
            }
            return Err(Error::parse(line_num, format!("invalid ID: {:?}", fields[0])));
        }
    };

    let head = parse_head(fields[6])
        .ok_or_else(|| Error::parse(line_num, format!("invalid HEAD: {:?}", fields[6])))?;

    Ok(Some(Token {
        id,
        form: field_value(fields[1]),
        lemma: field_value(fields[2]),
        upos: field_value(fields[3]),
        xpos: field_value(fields[4]),
        feats: field_value(fields[5]),
        head,
        deprel: field_value(fields[7]),
        deps: field_value(fields[8]),
        misc: field_value(fields[9]),
    }))
}

/// Parse an ID field; `None` for anything but a plain non-negative integer
fn parse_id(s: &str) -> Option<TokenId> {
    if s.is_empty() {
        return None;
    }
    atoi::atoi::<TokenId>(s.as_bytes())
}

/// Parse a HEAD field; `_` falls back to root attachment
fn parse_head(s: &str) -> Option<TokenId> {
    if s == MISSING {
        return Some(0);
    }
    parse_id(s)
}

/// Missing or empty fields fail closed to the `_` sentinel
fn field_value(s: &str) -> String {
    if s.is_empty() {
        MISSING.to_string()
    } else {
        s.to_string()
    }
}

/// Write sentences to a sink, one block per sentence
///
/// Emits one tab-separated line per real token in the fixed column order
/// `id, form, lemma, upos, xpos, feats, head, deprel, deps, misc`; the root
/// token is never written. Each block ends with a single blank line. The
/// sink is flushed before returning.
pub fn write_sentences<'a, W, I>(writer: &mut W, sentences: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Sentence>,
{
    for sentence in sentences {
        for token in sentence.words() {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                token.id,
                field_out(&token.form),
                field_out(&token.lemma),
                field_out(&token.upos),
                field_out(&token.xpos),
                field_out(&token.feats),
                token.head,
                field_out(&token.deprel),
                field_out(&token.deps),
                field_out(&token.misc),
            )?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write sentences to a file path
///
/// The file handle is scoped to this call; the buffer is flushed before the
/// handle closes on every exit path.
pub fn write_file<'a, I>(path: impl AsRef<Path>, sentences: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Sentence>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_sentences(&mut writer, sentences)
}

/// Read an entire corpus into memory
///
/// Convenience wrapper over the lazy reader for small corpora and tests.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Sentence>> {
    ConlluReader::from_file(path)?.collect()
}

fn field_out(s: &str) -> &str {
    if s.is_empty() { MISSING } else { s }
}
