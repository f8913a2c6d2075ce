//! Recursive character chunking strategy

use std::collections::VecDeque;

use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::ingestion::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
use crate::domain::DomainError;

/// Separators tried in order: paragraphs, lines, words, characters
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

/// Chunking strategy that splits on the coarsest separator present and
/// recurses into pieces that are still too long.
///
/// Lengths are counted in characters. Separators stay attached to the start
/// of the piece that follows them, and every merged chunk is trimmed.
/// Consecutive chunks share up to `chunk_overlap` characters taken from the
/// tail of the previous chunk.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Split `text`, which starts at byte `offset` of the input, into
    /// chunks paired with their byte offset in the input.
    fn split_text(
        text: &str,
        offset: usize,
        separators: &[String],
        config: &ChunkingConfig,
    ) -> Vec<(usize, String)> {
        let mut separator = "";
        let mut remaining: &[String] = &[];

        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                break;
            }
            if text.contains(candidate.as_str()) {
                separator = candidate.as_str();
                remaining = &separators[i + 1..];
                break;
            }
        }

        let mut result = Vec::new();
        let mut good: Vec<Piece<'_>> = Vec::new();

        for (start, piece) in split_keep_separator(text, offset, separator) {
            if char_len(piece) < config.chunk_size {
                good.push((start, piece));
                continue;
            }

            if !good.is_empty() {
                result.extend(merge_splits(&good, config));
                good.clear();
            }

            if remaining.is_empty() {
                result.push((start, piece.to_string()));
            } else {
                result.extend(Self::split_text(piece, start, remaining, config));
            }
        }

        if !good.is_empty() {
            result.extend(merge_splits(&good, config));
        }

        result
    }
}

impl Default for RecursiveCharacterSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// A slice of the input and its byte offset in the input
type Piece<'a> = (usize, &'a str);

/// Split `text` on `separator`, keeping each separator at the start of the
/// piece that follows it. An empty separator splits into graphemes.
fn split_keep_separator<'a>(text: &'a str, offset: usize, separator: &str) -> Vec<Piece<'a>> {
    if separator.is_empty() {
        return text
            .grapheme_indices(true)
            .map(|(i, g)| (offset + i, g))
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, _) in text.match_indices(separator) {
        if idx > start {
            pieces.push((offset + start, &text[start..idx]));
        }
        start = idx;
    }
    pieces.push((offset + start, &text[start..]));

    pieces.retain(|(_, p)| !p.is_empty());
    pieces
}

/// Join contiguous pieces and trim them, shifting the offset past any
/// leading whitespace.
fn join_trimmed(pieces: &VecDeque<Piece<'_>>) -> Option<(usize, String)> {
    let (start, _) = *pieces.front()?;
    let joined: String = pieces.iter().map(|(_, p)| *p).collect();

    let without_leading = joined.trim_start();
    let leading = joined.len() - without_leading.len();
    let trimmed = without_leading.trim_end();

    if trimmed.is_empty() {
        None
    } else {
        Some((start + leading, trimmed.to_string()))
    }
}

/// Greedily merge small pieces into chunks of at most `chunk_size`
/// characters, carrying up to `chunk_overlap` characters forward.
fn merge_splits(pieces: &[Piece<'_>], config: &ChunkingConfig) -> Vec<(usize, String)> {
    let mut docs = Vec::new();
    let mut current: VecDeque<Piece<'_>> = VecDeque::new();
    let mut total = 0usize;

    for &(start, piece) in pieces {
        let len = char_len(piece);

        if total + len > config.chunk_size {
            if total > config.chunk_size {
                warn!(
                    chunk_length = total,
                    chunk_size = config.chunk_size,
                    "Created a chunk longer than the configured size"
                );
            }

            if !current.is_empty() {
                if let Some(doc) = join_trimmed(&current) {
                    docs.push(doc);
                }

                while total > config.chunk_overlap
                    || (total + len > config.chunk_size && total > 0)
                {
                    match current.pop_front() {
                        Some((_, front)) => total -= char_len(front),
                        None => break,
                    }
                }
            }
        }

        current.push_back((start, piece));
        total += len;
    }

    if let Some(doc) = join_trimmed(&current) {
        docs.push(doc);
    }

    docs
}

impl ChunkingStrategy for RecursiveCharacterSplitter {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        let spans = if char_len(content) <= config.chunk_size {
            let without_leading = content.trim_start();
            vec![(
                content.len() - without_leading.len(),
                without_leading.trim_end().to_string(),
            )]
        } else {
            Self::split_text(content, 0, &self.separators, config)
        };

        let total = spans.len();
        let chunks = spans
            .into_iter()
            .enumerate()
            .map(|(index, (byte_start, text))| {
                let char_start = char_len(&content[..byte_start]);
                let char_end = char_start + char_len(&text);
                Chunk::new(text, ChunkMetadata::new(index, total, char_start, char_end))
            })
            .collect();

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "recursive_character"
    }
}
