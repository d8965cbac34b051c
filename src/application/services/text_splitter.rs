use std::collections::VecDeque;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

pub trait TextSplitter: Send + Sync {
    fn split_text(&self, text: &str) -> Vec<String>;
}

/// Splits on the coarsest separator present (paragraphs, then lines, then
/// words, then characters) and greedily merges the pieces back into chunks of
/// at most `chunk_size` characters, carrying up to `chunk_overlap` characters
/// from the end of one chunk into the start of the next.
///
/// Separators stay attached to the start of the piece that follows them and
/// every emitted chunk is trimmed. Lengths count `char`s, not bytes.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<&'static str>,
}

impl Default for RecursiveCharacterSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl TextSplitter for RecursiveCharacterSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        self.recursive_split(text, &self.separators)
    }
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);

        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
            separators: vec![
                "\n\n", // Double newline (paragraphs)
                "\n",   // Single newline
                " ",    // Space
                "",     // Character level
            ],
        }
    }

    fn split_on_separator(text: &str, separator: &str) -> Vec<String> {
        if separator.is_empty() {
            return text.chars().map(|c| c.to_string()).collect();
        }

        text.split(separator)
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    part.to_string()
                } else {
                    format!("{}{}", separator, part)
                }
            })
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    fn recursive_split(&self, text: &str, separators: &[&'static str]) -> Vec<String> {
        let mut separator = separators.last().copied().unwrap_or("");
        let mut finer_separators: &[&'static str] = &[];

        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = candidate;
                break;
            }
            if text.contains(candidate) {
                separator = candidate;
                finer_separators = &separators[i + 1..];
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut small_pieces: Vec<String> = Vec::new();

        for piece in Self::split_on_separator(text, separator) {
            if piece.chars().count() < self.chunk_size {
                small_pieces.push(piece);
                continue;
            }

            if !small_pieces.is_empty() {
                chunks.extend(self.merge_pieces(&small_pieces));
                small_pieces.clear();
            }

            if finer_separators.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.recursive_split(&piece, finer_separators));
            }
        }

        if !small_pieces.is_empty() {
            chunks.extend(self.merge_pieces(&small_pieces));
        }

        chunks
    }

    fn merge_pieces(&self, pieces: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = piece.chars().count();

            if total + len > self.chunk_size && !window.is_empty() {
                if let Some(chunk) = Self::join_window(&window) {
                    chunks.push(chunk);
                }

                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    match window.pop_front() {
                        Some((_, removed)) => total -= removed,
                        None => break,
                    }
                }
            }

            window.push_back((piece.as_str(), len));
            total += len;
        }

        if let Some(chunk) = Self::join_window(&window) {
            chunks.push(chunk);
        }

        chunks
    }

    fn join_window(window: &VecDeque<(&str, usize)>) -> Option<String> {
        let joined: String = window.iter().map(|(piece, _)| *piece).collect();
        let trimmed = joined.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
