use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRequestSummary {
    pub signature_request_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

impl SignatureRequestSummary {
    pub fn new(signature_request_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            signature_request_id: signature_request_id.into(),
            title: title.into(),
        }
    }

    /// Last six characters of the identifier, or the whole identifier when it
    /// is shorter than that.
    pub fn short_id(&self) -> &str {
        let id = self.signature_request_id.as_str();
        match id.char_indices().rev().nth(5) {
            Some((idx, _)) => &id[idx..],
            None => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    pub num_results: u64,
    pub page: u32,
    #[serde(default)]
    pub num_pages: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// One page of the signature request listing as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub list_info: ListInfo,
    #[serde(default)]
    pub signature_requests: Vec<SignatureRequestSummary>,
}

impl ListingPage {
    pub fn total_results(&self) -> u64 {
        self.list_info.num_results
    }

    /// Whether another page exists after `page`, judged by the total reported
    /// on this response.
    pub fn has_next(&self, page: u32, page_size: u32) -> bool {
        u64::from(page) * u64::from(page_size) < self.total_results()
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error_name: String,
    #[serde(default)]
    pub error_msg: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureLogEntry {
    pub title: String,
    pub signature_request_id: String,
    pub error: String,
}

/// Rendered on a single line: runs of whitespace and control characters in
/// the title, identifier and error collapse to one space.
impl fmt::Display for FailureLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to download {} (ID: {}) - Error: {}",
            single_line(&self.title),
            single_line(&self.signature_request_id),
            single_line(&self.error)
        )
    }
}

fn single_line(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
