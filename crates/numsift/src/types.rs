use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NumsiftError, Result};

/// Number of characters in every accepted token.
pub const TOKEN_LEN: usize = 10;

// `[0-9]` rather than `\d`: the regex crate treats `\d` as any Unicode digit.
static TOKEN_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Token format regex pattern is valid and should compile"));

/// Returns true if `candidate` is exactly a token: ten ASCII digits, the first in `6..=9`.
pub fn is_token_format(candidate: &str) -> bool {
    candidate.len() == TOKEN_LEN && TOKEN_FORMAT.is_match(candidate)
}

/// A validated 10-digit number.
///
/// Tokens are immutable once built and are never normalized, so the text is
/// exactly what appeared in the source (after trimming surrounding whitespace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Build a token if `candidate` matches the format, `None` otherwise.
    pub fn parse(candidate: &str) -> Option<Self> {
        is_token_format(candidate).then(|| Token(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Token {
    type Error = NumsiftError;

    fn try_from(value: &str) -> Result<Self> {
        Token::parse(value).ok_or_else(|| {
            NumsiftError::validation(format!(
                "'{}' is not a 10-digit number starting with 6, 7, 8 or 9",
                value
            ))
        })
    }
}

impl TryFrom<String> for Token {
    type Error = NumsiftError;

    fn try_from(value: String) -> Result<Self> {
        if is_token_format(&value) {
            Ok(Token(value))
        } else {
            Token::try_from(value.as_str())
        }
    }
}

impl FromStr for Token {
    type Err = NumsiftError;

    fn from_str(s: &str) -> Result<Self> {
        Token::try_from(s)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of scanning one source to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Accepted tokens in order of first appearance. Duplicates are kept.
    pub tokens: Vec<Token>,
    pub bytes_read: u64,
    pub chunks_read: usize,
    /// Non-empty fields tested against the token format.
    pub fields_scanned: usize,
    /// Fields that failed the format test and were discarded.
    pub fields_rejected: usize,
}

impl ExtractionResult {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Snapshot reported after every chunk of an async extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionProgress {
    pub chunks_read: usize,
    pub bytes_read: u64,
    pub tokens_found: usize,
}
