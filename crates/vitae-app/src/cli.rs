//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Public address share links are built on.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Command-line interface for the `vitae` binary.
#[derive(Parser, Debug)]
#[command(name = "vitae", about = "Resume builder: render, share and open resumes", version)]
pub struct Cli {
    /// Directory holding shared documents and the local snapshot cache.
    #[arg(long, env = "VITAE_STORE_DIR", value_name = "DIR", global = true)]
    pub store_dir: Option<PathBuf>,

    /// Public address share links point at.
    #[arg(long, env = "VITAE_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a resume to HTML.
    Render(RenderArgs),
    /// Print a filled-in example resume as JSON.
    Sample(OutputArgs),
    /// Store a resume and print its share link.
    Share(ShareArgs),
    /// Open a share link (falls back to the local snapshot) and render it.
    Open(OpenArgs),
    /// Save a resume as the local snapshot.
    Save(InputArgs),
    /// Print the PDF export request for a resume.
    Export(InputArgs),
    /// List template presets.
    Templates,
    /// List color themes.
    Themes,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Resume JSON file; the local snapshot is used when omitted.
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write here instead of standard output.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Apply a template preset before rendering.
    #[arg(long, value_name = "KEY")]
    pub template: Option<String>,

    /// Override the theme color.
    #[arg(long, value_name = "KEY")]
    pub theme: Option<String>,

    /// Preview zoom applied around the page.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Emit an HTML fragment instead of a full page.
    #[arg(long)]
    pub fragment: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Custom link name; a generated id is used when omitted.
    #[arg(long, value_name = "NAME")]
    pub slug: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct OpenArgs {
    /// Share link (`?id=<id>` or `/r/<id>`).
    pub link: String,

    #[command(flatten)]
    pub output: OutputArgs,
}
