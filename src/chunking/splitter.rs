//! Recursive character splitter.
//!
//! Splits on the coarsest separator present in the text, recursing into any
//! piece still too large with the remaining separators, then merges pieces
//! greedily into windows of at most `chunk_size` characters. Each new window
//! carries up to `chunk_overlap` characters from the end of the previous one.

use super::ContentChunk;
use crate::config::ChunkingSettings;
use crate::error::{Result, TutorError};
use crate::youtube::Transcript;
use std::collections::VecDeque;
use tracing::debug;

/// Splits text into overlapping windows measured in characters.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(TutorError::InvalidInput("chunk_size must be positive".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(TutorError::InvalidInput(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: vec!["\n".to_string(), " ".to_string(), String::new()],
        })
    }

    pub fn from_settings(settings: &ChunkingSettings) -> Result<Self> {
        Ok(Self::new(settings.chunk_size, settings.chunk_overlap)?
            .with_separators(settings.separators.clone()))
    }

    /// Replace the separators, coarsest first. An empty list splits per character.
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = if separators.is_empty() {
            vec![String::new()]
        } else {
            separators
        };
        self
    }

    /// Split text into non-empty chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    /// Split a transcript's full text, tagging each chunk with its start time.
    pub fn split_transcript(&self, transcript: &Transcript) -> Vec<ContentChunk> {
        let text = &transcript.full_text;
        let mut search_from = 0;

        let chunks: Vec<ContentChunk> = self
            .split_text(text)
            .into_iter()
            .enumerate()
            .map(|(order, content)| {
                let start_seconds = match text[search_from..].find(&content) {
                    Some(pos) => {
                        let byte_offset = search_from + pos;
                        // Next chunk starts after this one's first character
                        search_from = byte_offset
                            + text[byte_offset..].chars().next().map_or(0, char::len_utf8);
                        transcript.start_seconds_at(text[..byte_offset].chars().count())
                    }
                    None => transcript.start_seconds_at(text[..search_from].chars().count()),
                };
                ContentChunk::new(content, order, start_seconds)
            })
            .collect();

        debug!(
            "Split {} chars into {} chunks",
            text.chars().count(),
            chunks.len()
        );
        chunks
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        // Coarsest separator present in the text; "" always matches
        let (index, separator) = separators
            .iter()
            .enumerate()
            .find(|(_, s)| s.is_empty() || text.contains(s.as_str()))
            .map(|(i, s)| (i, s.as_str()))
            .unwrap_or((separators.len().saturating_sub(1), ""));
        let remaining = &separators[(index + 1).min(separators.len())..];

        let pieces: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut fitting = Vec::new();
        for piece in pieces {
            if char_len(&piece) < self.chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge(&fitting, separator));
                fitting.clear();
            }
            if remaining.is_empty() {
                let piece = piece.trim();
                if !piece.is_empty() {
                    chunks.push(piece.to_string());
                }
            } else {
                chunks.extend(self.split_recursive(&piece, remaining));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge(&fitting, separator));
        }
        chunks
    }

    /// Greedily merge small pieces into windows, keeping an overlapping tail.
    fn merge(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let separator_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = char_len(piece);
            let joiner = if current.is_empty() { 0 } else { separator_len };

            if total + len + joiner > self.chunk_size && !current.is_empty() {
                push_joined(&mut chunks, &current, separator);

                // Drop from the front until only the overlap is left and the next piece fits
                while total > self.chunk_overlap
                    || (total > 0
                        && total + len + if current.is_empty() { 0 } else { separator_len }
                            > self.chunk_size)
                {
                    let Some(front) = current.pop_front() else {
                        break;
                    };
                    total -= char_len(front) + if current.is_empty() { 0 } else { separator_len };
                }
            }

            let joiner = if current.is_empty() { 0 } else { separator_len };
            current.push_back(piece);
            total += len + joiner;
        }

        push_joined(&mut chunks, &current, separator);
        chunks
    }
}

fn push_joined(chunks: &mut Vec<String>, current: &VecDeque<&str>, separator: &str) {
    let joined = current.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::{TranscriptSegment, VideoId};

    fn splitter(size: usize, overlap: usize, separators: &[&str]) -> TextSplitter {
        TextSplitter::new(size, overlap)
            .unwrap()
            .with_separators(separators.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_word_windows_with_overlap() {
        let chunks = splitter(5, 2, &[" "]).split_text("a b c d e f g h i j");
        assert_eq!(chunks, vec!["a b c", "c d e", "e f g", "g h i", "i j"]);
    }

    #[test]
    fn test_prefers_newlines() {
        let chunks = splitter(20, 0, &["\n", " ", ""]).split_text("line one\nline two\nline three");
        assert_eq!(chunks, vec!["line one\nline two", "line three"]);
    }

    #[test]
    fn test_long_word_falls_back_to_characters() {
        let word = "x".repeat(25);
        let chunks = splitter(10, 0, &["\n", " ", ""]).split_text(&word);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn test_chunks_never_exceed_size() {
        let text = "日本語のテキスト ".repeat(300) + &"naïve café ".repeat(200);
        let splitter = TextSplitter::new(100, 10).unwrap();
        let chunks = splitter.split_text(&text);

        assert!(chunks.len() > 10);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 100, "chunk too long: {}", chunk.chars().count());
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text = (0..400).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let chunks = TextSplitter::new(200, 40).unwrap().split_text(&text);

        for pair in chunks.windows(2) {
            let first_word = pair[1].split(' ').next().unwrap();
            assert!(
                pair[0].split(' ').any(|w| w == first_word),
                "'{}' should start inside the previous chunk",
                first_word
            );
        }
    }

    #[test]
    fn test_empty_and_blank_text() {
        let splitter = TextSplitter::new(1000, 100).unwrap();
        assert!(splitter.split_text("").is_empty());
        assert!(splitter.split_text("  \n \n ").is_empty());
        assert_eq!(splitter.split_text("short"), vec!["short"]);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(TextSplitter::new(0, 0).is_err());
        assert!(TextSplitter::new(100, 100).is_err());
        assert!(TextSplitter::from_settings(&ChunkingSettings::default()).is_ok());
    }

    #[test]
    fn test_split_transcript_timestamps() {
        let segments = (0..50)
            .map(|i| {
                TranscriptSegment::new(i as f64 * 10.0, (i + 1) as f64 * 10.0, format!("segment number {}", i))
            })
            .collect();
        let transcript = Transcript::new(VideoId::new("abc"), segments);

        let chunks = splitter(100, 20, &[" "]).split_transcript(&transcript);
        assert!(chunks.len() > 5);
        assert_eq!(chunks[0].order, 0);
        assert_eq!(chunks[0].start_seconds, 0.0);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i);
        }
        for pair in chunks.windows(2) {
            assert!(pair[1].start_seconds >= pair[0].start_seconds);
        }
        assert!(chunks.last().unwrap().start_seconds > 400.0);
    }
}
