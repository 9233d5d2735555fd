//! Boundary-safe field scanner.
//!
//! The scanner is fed raw byte chunks of any size. Fields are the runs between
//! delimiter bytes; the last, possibly incomplete field of a chunk is carried
//! over and prefixed to the next chunk, so a token is never truncated or
//! duplicated by where a chunk boundary happens to fall.
//!
//! A field longer than [`MAX_FIELD_BYTES`] can never be a token. Once the
//! carry-over grows past that bound it is dropped and the scanner skips to the
//! next delimiter, so memory stays bounded on sources without separators.
//!
//! Delimiters are ASCII and UTF-8 never uses ASCII bytes inside a multi-byte
//! sequence, so a completed field is always a whole UTF-8 sequence (or invalid
//! input) no matter how the source was sliced.

use crate::types::{ExtractionProgress, ExtractionResult, Token};

/// Carriage return, newline, comma, tab and space. Any run of them is one separator.
pub const DELIMITERS: [u8; 5] = [b'\r', b'\n', b',', b'\t', b' '];

/// Longest field considered for a token: ten digits plus surrounding
/// non-delimiter whitespace such as NBSP or a byte-order mark.
pub const MAX_FIELD_BYTES: usize = 64;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[inline]
fn is_delimiter(byte: u8) -> bool {
    DELIMITERS.contains(&byte)
}

/// Incremental scanner owning the carry-over fragment and the accepted tokens.
#[derive(Debug, Default)]
pub struct TokenScanner {
    carry: Vec<u8>,
    /// The current field already exceeded `MAX_FIELD_BYTES`
    discarding: bool,
    result: ExtractionResult,
}

impl TokenScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one chunk. Returns the number of tokens accepted from it.
    pub fn feed(&mut self, chunk: &[u8]) -> usize {
        self.result.chunks_read += 1;
        self.result.bytes_read += chunk.len() as u64;
        let before = self.result.tokens.len();

        let Some(last) = chunk.iter().rposition(|&b| is_delimiter(b)) else {
            self.hold(chunk);
            return 0;
        };

        let (complete, tail) = chunk.split_at(last + 1);
        let mut fields = complete.split(|&b| is_delimiter(b));

        if let Some(first) = fields.next() {
            if self.discarding || self.carry.len() + first.len() > MAX_FIELD_BYTES {
                self.carry.clear();
                self.discarding = false;
                self.reject();
            } else if self.carry.is_empty() {
                self.accept(first);
            } else {
                let mut joined = std::mem::take(&mut self.carry);
                joined.extend_from_slice(first);
                self.accept(&joined);
            }
        }
        for field in fields {
            self.accept(field);
        }

        self.hold(tail);
        self.result.tokens.len() - before
    }

    /// Append an unfinished field fragment to the carry-over.
    fn hold(&mut self, fragment: &[u8]) {
        if self.discarding || fragment.is_empty() {
            return;
        }
        if self.carry.len() + fragment.len() > MAX_FIELD_BYTES {
            tracing::trace!(
                held = self.carry.len() + fragment.len(),
                "Field exceeds {} bytes, skipping to next delimiter",
                MAX_FIELD_BYTES
            );
            self.carry = Vec::new();
            self.discarding = true;
            return;
        }
        self.carry.extend_from_slice(fragment);
    }

    /// Bytes currently held back waiting for the rest of their field.
    pub fn pending(&self) -> usize {
        self.carry.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.result.tokens
    }

    pub fn progress(&self) -> ExtractionProgress {
        ExtractionProgress {
            chunks_read: self.result.chunks_read,
            bytes_read: self.result.bytes_read,
            tokens_found: self.result.tokens.len(),
        }
    }

    /// Flush the carry-over fragment and return everything accepted.
    pub fn finish(mut self) -> ExtractionResult {
        if self.discarding {
            self.reject();
        } else {
            let carry = std::mem::take(&mut self.carry);
            self.accept(&carry);
        }
        self.result
    }

    fn accept(&mut self, field: &[u8]) {
        if field.is_empty() {
            return;
        }
        if field.len() > MAX_FIELD_BYTES {
            self.reject();
            return;
        }
        self.result.fields_scanned += 1;

        let token = std::str::from_utf8(field).ok().and_then(|text| {
            let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
            Token::parse(text.trim())
        });
        match token {
            Some(token) => self.result.tokens.push(token),
            None => self.result.fields_rejected += 1,
        }
    }

    fn reject(&mut self) {
        self.result.fields_scanned += 1;
        self.result.fields_rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_in_chunks(source: &[u8], chunk_size: usize) -> Vec<String> {
        let mut scanner = TokenScanner::new();
        for chunk in source.chunks(chunk_size) {
            scanner.feed(chunk);
        }
        scanner.finish().tokens.into_iter().map(Token::into_inner).collect()
    }

    #[test]
    fn test_single_chunk() {
        let tokens = scan_in_chunks(b"9876543210,1234567890\nabc\n7123456789", 1024);
        assert_eq!(tokens, vec!["9876543210", "7123456789"]);
    }

    #[test]
    fn test_token_split_across_chunks() {
        let source = b"9876543210,7123456789";
        for chunk_size in 1..source.len() {
            assert_eq!(
                scan_in_chunks(source, chunk_size),
                vec!["9876543210", "7123456789"],
                "chunk size {} changed the result",
                chunk_size
            );
        }
    }

    #[test]
    fn test_mixed_delimiter_runs_are_one_separator() {
        let tokens = scan_in_chunks(b"9000000001 ,\t\r\n 9000000002\r\n\r\n9000000003", 4);
        assert_eq!(tokens, vec!["9000000001", "9000000002", "9000000003"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let tokens = scan_in_chunks(b"9000000001\n9000000001\n9000000001", 7);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_overlong_digit_run_is_not_split_into_tokens() {
        let tokens = scan_in_chunks(b"98765432109876543210", 10);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_unicode_whitespace_is_trimmed() {
        let source = "\u{a0}9876543210\u{a0},\u{2003}8123456789".as_bytes();
        for chunk_size in [1, 2, 3, 5, 64] {
            assert_eq!(scan_in_chunks(source, chunk_size), vec!["9876543210", "8123456789"]);
        }
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let source = "\u{feff}9876543210,8123456789\n".as_bytes();
        for chunk_size in [1, 2, 3, 4, 7, 1024] {
            assert_eq!(
                scan_in_chunks(source, chunk_size),
                vec!["9876543210", "8123456789"],
                "chunk size {} lost a token",
                chunk_size
            );
        }
    }

    #[test]
    fn test_long_field_without_delimiters_keeps_carry_bounded() {
        let junk = vec![b'x'; 64 * 1024];
        let mut scanner = TokenScanner::new();
        for _ in 0..16 {
            scanner.feed(&junk);
            assert!(scanner.pending() <= MAX_FIELD_BYTES, "pending grew to {}", scanner.pending());
        }
        scanner.feed(b"\n9123456789\n");
        assert_eq!(scanner.pending(), 0);

        let result = scanner.finish();
        let tokens: Vec<String> = result.tokens.into_iter().map(Token::into_inner).collect();
        assert_eq!(tokens, vec!["9123456789"]);
        assert_eq!(result.fields_scanned, 2);
        assert_eq!(result.fields_rejected, 1);
    }

    #[test]
    fn test_unterminated_long_field_is_rejected_at_finish() {
        let mut scanner = TokenScanner::new();
        scanner.feed(b"9000000001\n");
        scanner.feed(&[b'7'; 200]);
        assert!(scanner.pending() <= MAX_FIELD_BYTES);

        let result = scanner.finish();
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.fields_rejected, 1);
    }

    #[test]
    fn test_overlong_field_is_rejected_at_any_chunk_size() {
        let mut source = "\u{a0}".repeat(40);
        source.push_str("9876543210,8123456789");
        for chunk_size in [1, 5, 33, 1024] {
            assert_eq!(scan_in_chunks(source.as_bytes(), chunk_size), vec!["8123456789"]);
        }
    }

    #[test]
    fn test_invalid_utf8_field_is_rejected() {
        let mut scanner = TokenScanner::new();
        scanner.feed(b"98765\xff43210,9000000000");
        let result = scanner.finish();
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.fields_rejected, 1);
    }

    #[test]
    fn test_counters() {
        let mut scanner = TokenScanner::new();
        assert_eq!(scanner.feed(b"9000000000,abc,90"), 1);
        assert_eq!(scanner.pending(), 2);
        assert_eq!(scanner.feed(b"00000001\n"), 1);
        assert_eq!(scanner.pending(), 0);

        let result = scanner.finish();
        assert_eq!(result.chunks_read, 2);
        assert_eq!(result.bytes_read, 26);
        assert_eq!(result.fields_scanned, 3);
        assert_eq!(result.fields_rejected, 1);
    }

    #[test]
    fn test_empty_source() {
        let result = TokenScanner::new().finish();
        assert!(result.tokens.is_empty());
        assert_eq!(result.fields_scanned, 0);
    }
}
