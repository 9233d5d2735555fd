//! Search request payload.
//!
//! Builds and validates the JSON body a host submits to its number-search
//! service. Nothing here performs network I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NumsiftError, Result};
use crate::types::{TOKEN_LEN, Token, is_token_format};

/// Path the payload is conventionally posted to.
pub const SEARCH_ENDPOINT: &str = "/api/search-numbers";

const PINCODE_LEN: usize = 6;

/// Plan category of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchCategory {
    #[default]
    #[serde(rename = "postpaid-free")]
    PostpaidFree,
    #[serde(rename = "postpaid-paid")]
    PostpaidPaid,
    #[serde(rename = "prepaid-free")]
    PrepaidFree,
    #[serde(rename = "prepaid-paid")]
    PrepaidPaid,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 4] = [
        SearchCategory::PostpaidFree,
        SearchCategory::PostpaidPaid,
        SearchCategory::PrepaidFree,
        SearchCategory::PrepaidPaid,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SearchCategory::PostpaidFree => "postpaid-free",
            SearchCategory::PostpaidPaid => "postpaid-paid",
            SearchCategory::PrepaidFree => "prepaid-free",
            SearchCategory::PrepaidPaid => "prepaid-paid",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SearchCategory {
    type Err = NumsiftError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                NumsiftError::validation(format!(
                    "Unknown category '{}', expected one of postpaid-free, postpaid-paid, prepaid-free, prepaid-paid",
                    s
                ))
            })
    }
}

/// Body of a search submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub pincode: String,
    pub mobile_number: String,
    pub nums_array: Vec<Token>,
    #[serde(default)]
    pub category: SearchCategory,
}

impl SearchRequest {
    /// Build a request and validate it.
    pub fn new(
        pincode: impl Into<String>,
        mobile_number: impl Into<String>,
        nums_array: Vec<Token>,
        category: SearchCategory,
    ) -> Result<Self> {
        let request = Self {
            pincode: pincode.into().trim().to_string(),
            mobile_number: mobile_number.into().trim().to_string(),
            nums_array,
            category,
        };
        request.validate()?;
        Ok(request)
    }

    /// # Errors
    ///
    /// Returns `NumsiftError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.pincode.chars().count() != PINCODE_LEN {
            return Err(NumsiftError::validation("Pincode must be exactly 6 digits"));
        }
        if !self.pincode.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumsiftError::validation("Pincode must contain only digits"));
        }

        if self.mobile_number.chars().count() != TOKEN_LEN {
            return Err(NumsiftError::validation("Mobile number must be exactly 10 digits"));
        }
        if !is_token_format(&self.mobile_number) {
            return Err(NumsiftError::validation("Please enter a valid Indian mobile number"));
        }

        if self.nums_array.is_empty() {
            return Err(NumsiftError::validation("No numbers extracted"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reply from the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    pub message: String,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
