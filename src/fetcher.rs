use crate::client::SignatureRequestApi;
use crate::config::FetcherConfig;
use crate::download::Downloader;
use crate::error::FetchError;
use crate::failures::FailureRecorder;
use crate::lister::Lister;
use crate::model::{FailureLogEntry, SignatureRequestSummary};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub pages_listed: u32,
    pub attempted: usize,
    pub downloaded: usize,
    pub failed: usize,
    /// Failures that made it into the failure log.
    pub failures_logged: usize,
}

/// Lists every signature request and downloads its document, one item at a
/// time, recording per-item failures without stopping.
pub struct Fetcher<A> {
    api: A,
    config: FetcherConfig,
}

impl<A: SignatureRequestApi> Fetcher<A> {
    pub fn new(api: A, config: FetcherConfig) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Run a full pass. Returns an error only when the output directory cannot
    /// be created or a listing call fails; items from pages listed before the
    /// failure have already been processed by then.
    pub fn run(&self) -> Result<RunReport, FetchError> {
        log::info!("Starting fetch run");

        let downloader = Downloader::new(&self.config);
        downloader.prepare()?;

        let mut recorder = FailureRecorder::new(&self.config.failure_log);
        recorder.reset();

        let mut report = RunReport::default();

        for listed in Lister::new(&self.api, self.config.page_size) {
            let (page, listing) = listed?;
            report.pages_listed += 1;
            log::info!("Total Documents: {}", listing.total_results());
            log::debug!(
                "Page {} returned {} signature requests",
                page,
                listing.signature_requests.len()
            );

            for summary in &listing.signature_requests {
                self.process(&downloader, &mut recorder, summary, &mut report);
            }
        }

        report.failures_logged = recorder.recorded();
        log::info!(
            "Fetch run finished: {} pages, {} attempted, {} downloaded, {} failed",
            report.pages_listed,
            report.attempted,
            report.downloaded,
            report.failed
        );
        Ok(report)
    }

    fn process(
        &self,
        downloader: &Downloader,
        recorder: &mut FailureRecorder,
        summary: &SignatureRequestSummary,
        report: &mut RunReport,
    ) {
        report.attempted += 1;

        match downloader.download(&self.api, summary) {
            Ok(_) => report.downloaded += 1,
            Err(e) => {
                log::error!("{}", e);
                report.failed += 1;
                recorder.record(&FailureLogEntry {
                    title: downloader.sanitized_title(summary),
                    signature_request_id: summary.signature_request_id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
}
