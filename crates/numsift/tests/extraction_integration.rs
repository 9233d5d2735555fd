//! Extraction integration tests.
//!
//! Validates that extraction from files, readers and in-memory buffers agrees
//! for every chunk size, and that only well-formed numbers come out.

use numsift::{CancellationToken, NumsiftConfig, NumsiftError, extract_bytes, extract_file, extract_file_sync};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_source(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn as_strings(result: &numsift::ExtractionResult) -> Vec<&str> {
    result.tokens.iter().map(|t| t.as_str()).collect()
}

const MIXED_SOURCE: &[u8] = b"name,mobile,alt\r\n\
asha,9876543210,1234567890\r\n\
ravi,\t7123456789 ,5123456789\r\n\
meena,  8000000001,98765\r\n\
\r\n\
old,+919876543210,6999999999";

/// Test the documented mixed-delimiter example.
#[test]
fn test_mixed_source_extraction() {
    let result = extract_bytes(MIXED_SOURCE, 1 << 20).unwrap();

    assert_eq!(
        as_strings(&result),
        vec!["9876543210", "7123456789", "8000000001", "6999999999"],
        "Only 10-digit numbers starting with 6-9 should be extracted, in source order"
    );
    assert!(result.fields_rejected > 0, "Header and malformed fields should be counted");
}

/// Test that the chunk size never changes the token list.
#[test]
fn test_chunk_size_invariance() {
    let expected = extract_bytes(MIXED_SOURCE, 1 << 20).unwrap().tokens;

    for chunk_size in 1..=MIXED_SOURCE.len() + 1 {
        let result = extract_bytes(MIXED_SOURCE, chunk_size).unwrap();
        assert_eq!(result.tokens, expected, "Chunk size {} changed the result", chunk_size);
    }
}

/// Test that every extracted token satisfies the format.
#[test]
fn test_every_token_matches_format() {
    let mut source = Vec::new();
    for i in 0..5_000u64 {
        source.extend_from_slice(format!("{:010}", i * 1_999_993).as_bytes());
        source.push(if i % 2 == 0 { b',' } else { b'\n' });
    }

    let result = extract_bytes(&source, 4096).unwrap();
    assert!(!result.tokens.is_empty());
    for token in &result.tokens {
        assert!(numsift::is_token_format(token.as_str()), "{} is not a valid token", token);
    }
}

/// Test that a source without delimiters yields at most one token.
#[test]
fn test_no_delimiters() {
    let result = extract_bytes(b"9876543210", 3).unwrap();
    assert_eq!(as_strings(&result), vec!["9876543210"]);

    let result = extract_bytes(b"98765432109", 3).unwrap();
    assert!(result.tokens.is_empty());
}

/// Test sync file extraction with a small chunk size.
#[test]
fn test_extract_file_sync() {
    let file = write_source(MIXED_SOURCE);
    let config = NumsiftConfig {
        chunk_size: 7,
        ..Default::default()
    };

    let result = extract_file_sync(file.path(), &config).unwrap();
    assert_eq!(result.tokens.len(), 4);
    assert_eq!(result.bytes_read, MIXED_SOURCE.len() as u64);
    assert_eq!(result.chunks_read, MIXED_SOURCE.len().div_ceil(7));
}

/// Test async file extraction agrees with sync extraction.
#[tokio::test]
async fn test_extract_file_async_matches_sync() {
    let file = write_source(MIXED_SOURCE);
    let config = NumsiftConfig {
        chunk_size: 16,
        ..Default::default()
    };

    let async_result = extract_file(file.path(), &config, &CancellationToken::new())
        .await
        .unwrap();
    let sync_result = extract_file_sync(file.path(), &config).unwrap();

    assert_eq!(async_result, sync_result);
}

/// Test empty files.
#[tokio::test]
async fn test_empty_file() {
    let file = write_source(b"");
    let result = extract_file(file.path(), &NumsiftConfig::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.chunks_read, 0);
}

/// Test missing files and invalid configuration.
#[tokio::test]
async fn test_extract_file_errors() {
    let err = extract_file(
        "/nonexistent/numbers.csv",
        &NumsiftConfig::default(),
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("File does not exist"));

    let file = write_source(MIXED_SOURCE);
    let config = NumsiftConfig {
        chunk_size: 0,
        ..Default::default()
    };
    let err = extract_file(file.path(), &config, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, NumsiftError::Validation { .. }));
}

/// Test that a cancelled token stops file extraction.
#[tokio::test]
async fn test_extract_file_cancelled() {
    let file = write_source(MIXED_SOURCE);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = extract_file(file.path(), &NumsiftConfig::default(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, NumsiftError::Cancelled(_)));
}
