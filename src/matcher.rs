//! Byte-level substring counting

/// Count non-overlapping occurrences of `needle` in `haystack`.
///
/// Matching is case-sensitive and scans left to right; after a match the
/// scan resumes past its last byte. An empty needle matches nothing.
pub fn count_matches(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut rest = haystack;
    while rest.len() >= needle.len() {
        if rest.starts_with(needle) {
            count += 1;
            rest = &rest[needle.len()..];
        } else {
            rest = &rest[1..];
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_pattern() {
        assert_eq!(count_matches(b"gogo", b"go"), 2);
        assert_eq!(count_matches(b"gogogo", b"go"), 3);
        assert_eq!(count_matches(b"go go go", b"go"), 3);
    }

    #[test]
    fn test_inner_match() {
        // "g[go]o"
        assert_eq!(count_matches(b"ggoo", b"go"), 1);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(count_matches(b"Go", b"go"), 0);
        assert_eq!(count_matches(b"GO gO Go", b"go"), 0);
    }

    #[test]
    fn test_non_overlapping() {
        assert_eq!(count_matches(b"ooo", b"oo"), 1);
        assert_eq!(count_matches(b"aaaa", b"aa"), 2);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(count_matches(b"", b"go"), 0);
        assert_eq!(count_matches(b"g", b"go"), 0);
        assert_eq!(count_matches(b"rust", b"go"), 0);
    }

    #[test]
    fn test_empty_needle() {
        assert_eq!(count_matches(b"anything", b""), 0);
    }

    #[test]
    fn test_non_utf8_body() {
        assert_eq!(count_matches(&[0xff, b'g', b'o', 0xfe, b'g', b'o'], b"go"), 2);
    }
}
