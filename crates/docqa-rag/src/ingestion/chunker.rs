//! Line-accumulating text chunker

use crate::config::ChunkingConfig;

/// Splits raw text into chunks by accumulating newline-separated lines.
///
/// Lines whose trimmed length is below `min_line_chars` are dropped. Lines are
/// appended (space-joined, unstripped) to a running buffer until the buffer
/// length plus the next line length exceeds `max_chunk_chars`; the buffer is
/// then emitted trimmed and restarted with that line. A single line longer than
/// the maximum still becomes one chunk. Lengths are counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    /// Minimum trimmed line length
    min_line_chars: usize,
    /// Maximum accumulated length before a chunk is closed
    max_chunk_chars: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(min_line_chars: usize, max_chunk_chars: usize) -> Self {
        Self {
            min_line_chars,
            max_chunk_chars,
        }
    }

    /// Create from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.min_line_chars, config.max_chunk_chars)
    }

    /// Chunk raw text
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for line in text.split('\n') {
            if line.trim().chars().count() < self.min_line_chars {
                continue;
            }

            let line_len = line.chars().count();

            // The joining space is not counted.
            if current_len + line_len > self.max_chunk_chars {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                }
                current.clear();
                current.push_str(line);
                current_len = line_len;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(line);
                current_len += line_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::from_config(&ChunkingConfig::default())
    }
}
