use sign_fetcher::model::{ListInfo, ListingPage, SignatureRequestSummary};
use sign_fetcher::{ApiError, FetcherConfig, SignatureRequestApi};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use tempfile::TempDir;

/// In-memory stand-in for the signature request service.
pub struct FakeApi {
    pub pages: Vec<Vec<SignatureRequestSummary>>,
    pub total: u64,
    pub failing_pages: HashSet<u32>,
    pub failing_ids: HashSet<String>,
    pub listed: RefCell<Vec<(u32, u32)>>,
    pub fetched: RefCell<Vec<String>>,
}

impl FakeApi {
    /// `count` requests split into pages of `page_size`, titled `Doc <n>`.
    pub fn with_requests(count: usize, page_size: usize) -> Self {
        let all: Vec<SignatureRequestSummary> = (0..count)
            .map(|i| SignatureRequestSummary::new(format!("req{:09}", i), format!("Doc {}", i)))
            .collect();
        Self::from_summaries(all, page_size)
    }

    pub fn from_summaries(all: Vec<SignatureRequestSummary>, page_size: usize) -> Self {
        let total = all.len() as u64;
        Self {
            pages: all.chunks(page_size).map(|c| c.to_vec()).collect(),
            total,
            failing_pages: HashSet::new(),
            failing_ids: HashSet::new(),
            listed: RefCell::new(Vec::new()),
            fetched: RefCell::new(Vec::new()),
        }
    }

    pub fn listed_pages(&self) -> Vec<u32> {
        self.listed.borrow().iter().map(|(page, _)| *page).collect()
    }

    pub fn all_ids(&self) -> Vec<String> {
        self.pages
            .iter()
            .flatten()
            .map(|s| s.signature_request_id.clone())
            .collect()
    }
}

pub fn payload_for(id: &str) -> Vec<u8> {
    format!("%PDF-1.4 document {}", id).into_bytes()
}

impl SignatureRequestApi for FakeApi {
    fn list_page(&self, page: u32, page_size: u32) -> Result<ListingPage, ApiError> {
        self.listed.borrow_mut().push((page, page_size));

        if self.failing_pages.contains(&page) {
            return Err(ApiError::Status {
                status: 500,
                name: "internal_error".to_string(),
                message: "listing unavailable".to_string(),
            });
        }

        let requests = self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default();

        Ok(ListingPage {
            list_info: ListInfo {
                num_results: self.total,
                page,
                num_pages: None,
                page_size: Some(page_size),
            },
            signature_requests: requests,
        })
    }

    fn fetch_content(&self, signature_request_id: &str, file_type: &str) -> Result<Vec<u8>, ApiError> {
        assert_eq!(file_type, "pdf");
        self.fetched.borrow_mut().push(signature_request_id.to_string());

        if self.failing_ids.contains(signature_request_id) {
            return Err(ApiError::Status {
                status: 404,
                name: "not_found".to_string(),
                message: "Not found".to_string(),
            });
        }

        Ok(payload_for(signature_request_id))
    }
}

pub struct TestEnv {
    _tmp: TempDir,
    pub output_dir: PathBuf,
    pub failure_log: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let output_dir = tmp.path().join("dropbox");
        let failure_log = tmp.path().join("failed_downloads.txt");
        Self {
            _tmp: tmp,
            output_dir,
            failure_log,
        }
    }

    pub fn config(&self) -> FetcherConfig {
        FetcherConfig {
            output_dir: self.output_dir.clone(),
            failure_log: self.failure_log.clone(),
            ..FetcherConfig::default()
        }
    }

    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.output_dir)
            .expect("read output dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn failure_lines(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.failure_log) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}
