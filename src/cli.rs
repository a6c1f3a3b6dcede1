use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sign-fetcher",
    version,
    about = "Download PDF files from the Dropbox Sign API"
)]
pub struct Cli {
    #[arg(help = "Dropbox Sign API key")]
    pub api_key: String,
}
