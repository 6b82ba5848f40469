//! Vitae App Library
//!
//! Command-line shell over the vitae core and renderer: render resumes to
//! HTML, publish share links, open shared resumes and browse the style catalog.

mod app;
mod cli;

pub use app::{App, AppError, run, template_listing, theme_listing};
pub use cli::{Cli, Commands};
