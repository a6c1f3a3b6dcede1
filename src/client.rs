use reqwest::blocking::{Client, Response};
use std::fmt;

use crate::error::ApiError;
use crate::model::{ErrorEnvelope, ListingPage};

pub const DEFAULT_BASE_URL: &str = "https://api.hellosign.com/v3";

/// The two calls a fetch run needs from the signature request service.
pub trait SignatureRequestApi {
    fn list_page(&self, page: u32, page_size: u32) -> Result<ListingPage, ApiError>;

    fn fetch_content(&self, signature_request_id: &str, file_type: &str)
        -> Result<Vec<u8>, ApiError>;
}

/// Blocking client for the Dropbox Sign REST API. Authenticates with HTTP
/// basic auth, the API key as username and no password.
pub struct DropboxSignClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl DropboxSignClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("sign-fetcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, None::<&str>)
            .query(query)
            .send()
            .map_err(ApiError::Transport)?;

        if !response.status().is_success() {
            return Err(status_error(response));
        }

        Ok(response)
    }
}

impl fmt::Debug for DropboxSignClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropboxSignClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SignatureRequestApi for DropboxSignClient {
    fn list_page(&self, page: u32, page_size: u32) -> Result<ListingPage, ApiError> {
        let response = self.get(
            "/signature_request/list",
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        )?;

        let text = response.text().map_err(ApiError::Body)?;
        let listing: ListingPage = serde_json::from_str(&text)?;
        Ok(listing)
    }

    fn fetch_content(
        &self,
        signature_request_id: &str,
        file_type: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let path = format!("/signature_request/files/{}", signature_request_id);
        let response = self.get(&path, &[("file_type", file_type.to_string())])?;

        let bytes = response.bytes().map_err(ApiError::Body)?;
        Ok(bytes.to_vec())
    }
}

fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().unwrap_or_default();

    match serde_json::from_str::<ErrorEnvelope>(&text) {
        Ok(envelope) => ApiError::Status {
            status: status.as_u16(),
            name: envelope.error.error_name,
            message: envelope.error.error_msg,
        },
        Err(_) => ApiError::Status {
            status: status.as_u16(),
            name: status.canonical_reason().unwrap_or_default().to_string(),
            message: text.trim().to_string(),
        },
    }
}
