use crate::types::{AppError, Result};
use text_splitter::{Characters, ChunkConfig, TextSplitter};

/// Splits text into overlapping character windows, discarding empty ones.
pub struct Chunker {
    splitter: TextSplitter<Characters>,
}

impl Chunker {
    /// Create a chunker with the given window size and overlap, both in
    /// characters. The overlap must be smaller than the window.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| AppError::Configuration(format!("invalid chunking config: {}", e)))?;

        Ok(Self {
            splitter: TextSplitter::new(config),
        })
    }

    /// Split `text` into chunks. Whitespace-only windows are dropped.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.splitter
            .chunks(text)
            .filter(|chunk| !chunk.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = Chunker::new(1000, 200).unwrap();
        let chunks = chunker.chunk("hello world");
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_long_text_respects_chunk_size() {
        let chunker = Chunker::new(100, 20).unwrap();
        let text = "word ".repeat(200);
        let chunks = chunker.chunk(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
            assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn test_whitespace_only_text_yields_no_chunks() {
        let chunker = Chunker::new(1000, 200).unwrap();
        assert!(chunker.chunk("   \n\t  ").is_empty());
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_overlap_larger_than_chunk_size_is_rejected() {
        assert!(Chunker::new(100, 150).is_err());
        assert!(Chunker::new(100, 20).is_ok());
    }
}
