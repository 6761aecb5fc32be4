use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Profile JSON file, as returned by the profile endpoint
    pub profile: PathBuf,

    /// Photo to use instead of the one stored on the profile (path or file:// URL)
    #[clap(long)]
    pub photo: Option<String>,

    /// Where to write the PDF (defaults to `outfile` from cv-book.toml)
    #[clap(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Profile JSON file; its `cvUrl` is updated once the CV is uploaded
    pub profile: PathBuf,

    /// Photo to use instead of the one stored on the profile (path or file:// URL)
    #[clap(long)]
    pub photo: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a cv-book.toml config file
    Config,
    /// Renders a profile to a local PDF
    Render(RenderArgs),
    /// Renders a profile, uploads the PDF and links it to the profile
    Publish(PublishArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Configuration file
    #[clap(long, env = "CV_BOOK_CONFIG", default_value = "cv-book.toml")]
    pub config: PathBuf,

    #[clap(subcommand)]
    pub command: Commands,
}
