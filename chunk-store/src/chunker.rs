//! Fixed-size text chunking in document order.

/// Default chunk length in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 500;

/// Splits `text` into consecutive slices of at most `size` characters.
///
/// Boundaries are counted in Unicode scalar values, so a multi-byte character
/// is never cut. The last chunk may be shorter. `size == 0` yields no chunks.
///
/// # Example
/// ```
/// use chunk_store::chunker::split_fixed;
/// assert_eq!(split_fixed("abcdefg", 3), vec!["abc", "def", "g"]);
/// ```
pub fn split_fixed(text: &str, size: usize) -> Vec<String> {
    if size == 0 || text.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;
    for (i, _) in text.char_indices() {
        if count == size {
            out.push(text[start..i].to_string());
            start = i;
            count = 0;
        }
        count += 1;
    }
    out.push(text[start..].to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        assert_eq!(split_fixed("abcdef", 3), vec!["abc", "def"]);
    }

    #[test]
    fn multibyte_characters_are_counted_not_bytes() {
        let chunks = split_fixed("ééééé", 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(split_fixed("", 500).is_empty());
        assert!(split_fixed("abc", 0).is_empty());
        assert_eq!(split_fixed("abc", 500), vec!["abc"]);
    }

    #[test]
    fn concatenation_restores_source() {
        let src = "Oxford is a city in England. ".repeat(40);
        let chunks = split_fixed(&src, DEFAULT_CHUNK_CHARS);
        assert_eq!(chunks.len(), 3);
        assert!(chunks[..2].iter().all(|c| c.chars().count() == 500));
        assert_eq!(chunks.concat(), src);
    }
}
