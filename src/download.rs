use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::client::SignatureRequestApi;
use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::model::SignatureRequestSummary;
use crate::verify::sha256_hex;

/// Replace every character in `replacements` with `_`. Other characters,
/// including ones some filesystems reject, pass through untouched.
pub fn sanitize_title(title: &str, replacements: &[char]) -> String {
    title
        .chars()
        .map(|c| if replacements.contains(&c) { '_' } else { c })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub size: u64,
    pub sha256: String,
}

pub struct Downloader {
    output_dir: PathBuf,
    file_type: String,
    title_replacements: Vec<char>,
}

impl Downloader {
    pub fn new(config: &FetcherConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            file_type: config.file_type.clone(),
            title_replacements: config.title_replacements.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it is missing.
    pub fn prepare(&self) -> Result<(), FetchError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| FetchError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })
    }

    pub fn sanitized_title(&self, summary: &SignatureRequestSummary) -> String {
        sanitize_title(&summary.title, &self.title_replacements)
    }

    pub fn file_name(&self, summary: &SignatureRequestSummary) -> String {
        format!(
            "{}_{}.{}",
            self.sanitized_title(summary),
            summary.short_id(),
            self.file_type
        )
    }

    pub fn output_path(&self, summary: &SignatureRequestSummary) -> PathBuf {
        self.output_dir.join(self.file_name(summary))
    }

    /// Fetch the document for `summary` and write it to the output directory.
    /// One attempt only; the caller decides what to do with a failure.
    pub fn download<A>(
        &self,
        api: &A,
        summary: &SignatureRequestSummary,
    ) -> Result<DownloadedFile, FetchError>
    where
        A: SignatureRequestApi + ?Sized,
    {
        let id = &summary.signature_request_id;
        let bytes = api
            .fetch_content(id, &self.file_type)
            .map_err(|source| FetchError::Fetch {
                id: id.clone(),
                source,
            })?;

        let path = self.output_path(summary);
        log::info!("Downloading file: {:?}", path);

        let sha256 = self.write_file(&path, &bytes)?;
        log::info!(
            "Download completed: {:?} ({} bytes, sha256 {})",
            path,
            bytes.len(),
            sha256
        );

        Ok(DownloadedFile {
            path,
            size: bytes.len() as u64,
            sha256,
        })
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<String, FetchError> {
        let write_err = |source: io::Error| FetchError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Stage next to the target so the final rename never crosses devices.
        let mut staged = tempfile::NamedTempFile::new_in(&self.output_dir).map_err(write_err)?;
        staged.write_all(bytes).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;
        staged.persist(path).map_err(|e| write_err(e.error))?;

        Ok(sha256_hex(bytes))
    }
}
