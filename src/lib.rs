//! Downloads the PDF document of every signature request on a Dropbox Sign
//! account into a local folder, keeping a text log of the ones that failed.

pub mod cli;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod failures;
pub mod fetcher;
pub mod lister;
pub mod model;
pub mod verify;

pub use client::{DropboxSignClient, SignatureRequestApi};
pub use config::FetcherConfig;
pub use error::{ApiError, FetchError};
pub use fetcher::{Fetcher, RunReport};
