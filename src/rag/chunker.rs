/// Default window, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 800;

/// Splits text into fixed-size character windows.
///
/// Sizes count Unicode scalar values, so a window never splits a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// A zero `chunk_size` is treated as 1; overlap is capped below the size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let step = self.chunk_size - self.chunk_overlap;

        for i in (0..chars.len()).step_by(step) {
            let end = (i + self.chunk_size).min(chars.len());
            chunks.push(chars[i..end].iter().collect());
            if end == chars.len() {
                break;
            }
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(TextChunker::default().chunk("").is_empty());
    }

    #[test]
    fn test_fixed_windows() {
        let text = "a".repeat(2000);
        let chunks = TextChunker::default().chunk(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 800);
        assert_eq!(chunks[1].len(), 800);
        assert_eq!(chunks[2].len(), 400);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let chunks = TextChunker::new(4, 0).chunk("abcdefgh");
        assert_eq!(chunks, vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_multibyte_characters() {
        let chunks = TextChunker::new(2, 0).chunk("héllo");
        assert_eq!(chunks, vec!["hé", "ll", "o"]);
    }

    #[test]
    fn test_overlap() {
        let chunks = TextChunker::new(4, 2).chunk("abcdefgh");
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh"]);
    }

    #[test]
    fn test_degenerate_sizes() {
        let chunker = TextChunker::new(0, 5);
        assert_eq!(chunker.chunk_size(), 1);
        assert_eq!(chunker.chunk("abc"), vec!["a", "b", "c"]);
    }
}
