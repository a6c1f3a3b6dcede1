use std::path::PathBuf;

pub const OUTPUT_FOLDER_NAME: &str = "dropbox";
pub const PAGE_SIZE: u32 = 20;
pub const FAILED_DOWNLOADS_FILE: &str = "failed_downloads.txt";
pub const FILE_TYPE: &str = "pdf";

/// Knobs for a single fetch run. The defaults are the values the binary runs
/// with; tests swap the paths for temporary ones.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub output_dir: PathBuf,
    pub page_size: u32,
    pub failure_log: PathBuf,
    pub file_type: String,
    /// Characters replaced with `_` when a title becomes a filename.
    pub title_replacements: Vec<char>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(OUTPUT_FOLDER_NAME),
            page_size: PAGE_SIZE,
            failure_log: PathBuf::from(FAILED_DOWNLOADS_FILE),
            file_type: FILE_TYPE.to_string(),
            title_replacements: vec!['/'],
        }
    }
}

impl FetcherConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("Page size must be greater than zero");
        }

        if self.file_type.is_empty() {
            anyhow::bail!("File type is empty");
        }

        if self.output_dir.as_os_str().is_empty() {
            anyhow::bail!("Output directory is empty");
        }

        Ok(())
    }
}
