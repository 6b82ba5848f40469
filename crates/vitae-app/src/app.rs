//! Command dispatch.

use crate::cli::{Cli, Commands, OpenArgs, RenderArgs};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use url::Url;
use vitae_core::storage::{AutoSaver, FileStore, StorageError};
use vitae_core::{ResumeDocument, Session, SessionError, ShareError, StyleRegistry, share_document, share_link};
use vitae_render::{ExportRequest, HtmlRenderer, PdfExporter, RenderContext, Renderer, RendererError, compose_document};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Share(#[from] ShareError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Invalid resume file {path}: {source}")]
    InvalidDocument {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Hands export requests to an external rasterizer by printing them as JSON lines.
struct StdoutExporter;

impl PdfExporter for StdoutExporter {
    fn export(&self, request: ExportRequest) {
        match serde_json::to_string(&request) {
            Ok(line) => println!("{line}"),
            Err(e) => log::warn!("Failed to hand off export of {}: {}", request.filename, e),
        }
    }
}

/// The application: a store directory, a link base and the style catalog.
pub struct App {
    saver: AutoSaver<FileStore>,
    base_url: Url,
    registry: &'static StyleRegistry,
}

impl App {
    /// Open the store at `store_dir`, or the default location.
    pub fn new(store_dir: Option<PathBuf>, base_url: &str) -> AppResult<Self> {
        let store = match store_dir {
            Some(dir) => FileStore::new(dir)?,
            None => FileStore::default_location()?,
        };
        log::debug!("Using store at {}", store.base_path().display());

        Ok(Self {
            saver: AutoSaver::new(Arc::new(store)),
            base_url: Url::parse(base_url)?,
            registry: StyleRegistry::builtin(),
        })
    }

    fn store(&self) -> &FileStore {
        self.saver.cache()
    }

    /// Read a resume file, or the local snapshot when no path is given.
    pub fn load(&mut self, input: Option<&Path>) -> AppResult<ResumeDocument> {
        match input {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                ResumeDocument::from_json(&json).map_err(|source| AppError::InvalidDocument {
                    path: path.to_path_buf(),
                    source,
                })
            }
            None => Ok(self.saver.load()),
        }
    }

    /// Render a session's document to HTML.
    pub fn render_session(&self, session: &Session, scale: f64, fragment: bool) -> AppResult<String> {
        let tree = compose_document(session.document(), self.registry);
        let mut ctx = RenderContext::new(&tree).with_scale_factor(scale);
        if fragment {
            ctx = ctx.fragment();
        }

        let mut renderer = HtmlRenderer::new();
        renderer.build(&ctx)?;
        Ok(renderer.into_output())
    }

    /// Load, restyle and render a resume.
    pub fn render(&mut self, args: &RenderArgs) -> AppResult<String> {
        let document = self.load(args.input.input.as_deref())?;
        let mut session = Session::local(document);

        if let Some(template) = &args.template {
            session.apply_template(template, self.registry)?;
        }
        if let Some(theme) = &args.theme {
            if self.registry.theme(theme).is_none() {
                log::warn!("Unknown theme {}, the default theme will be used", theme);
            }
            session.edit(|doc| doc.config.theme_color = theme.clone())?;
        }

        self.render_session(&session, args.scale, args.fragment)
    }

    /// Store a resume and return its share link.
    pub fn share(&self, document: &ResumeDocument, slug: Option<&str>) -> AppResult<Url> {
        let id = pollster::block_on(share_document(self.store(), document, slug))?;
        Ok(share_link(&self.base_url, &id))
    }

    /// Start a session from a share link.
    pub fn open(&self, link: &str) -> Session {
        let store = self.store();
        pollster::block_on(Session::open(Some(link), store, store))
    }

    /// Write a resume as the local snapshot.
    pub fn save(&mut self, document: &ResumeDocument) -> AppResult<()> {
        self.saver.mark_dirty();
        self.saver.save(document)?;
        log::info!("Saved snapshot to {}", self.store().base_path().display());
        Ok(())
    }
}

/// Template presets, one per line.
pub fn template_listing(registry: &StyleRegistry) -> String {
    registry
        .templates()
        .iter()
        .map(|preset| format!("{:<10} {:<10} {}", preset.key, preset.name, preset.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Themes, one per line.
pub fn theme_listing(registry: &StyleRegistry) -> String {
    let default_key = registry.default_theme().key;
    registry
        .themes()
        .iter()
        .map(|theme| {
            let marker = if theme.key == default_key { " (default)" } else { "" };
            format!("{:<10} {} {}{marker}", theme.key, theme.fill.to_hex(), theme.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_output(output: Option<&Path>, text: &str) -> AppResult<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Run one command. The store is opened only by commands that read or write it.
pub fn run(cli: Cli) -> AppResult<()> {
    let open_store = || App::new(cli.store_dir.clone(), &cli.base_url);

    match cli.command {
        Commands::Render(args) => {
            let html = open_store()?.render(&args)?;
            write_output(args.output.output.as_deref(), &html)
        }
        Commands::Sample(args) => write_output(args.output.as_deref(), &ResumeDocument::sample().to_json_pretty()?),
        Commands::Share(args) => {
            let mut app = open_store()?;
            let document = app.load(args.input.input.as_deref())?;
            let link = app.share(&document, args.slug.as_deref())?;
            println!("{link}");
            Ok(())
        }
        Commands::Open(OpenArgs { link, output }) => {
            let app = open_store()?;
            let session = app.open(&link);
            if let Some(notice) = session.notice() {
                eprintln!("{notice}");
            }
            let html = app.render_session(&session, 1.0, false)?;
            write_output(output.output.as_deref(), &html)
        }
        Commands::Save(args) => {
            let mut app = open_store()?;
            let document = app.load(args.input.as_deref())?;
            app.save(&document)
        }
        Commands::Export(args) => {
            let document = open_store()?.load(args.input.as_deref())?;
            StdoutExporter.export(ExportRequest::for_person(&document.data.personal));
            Ok(())
        }
        Commands::Templates => write_output(None, &template_listing(StyleRegistry::builtin())),
        Commands::Themes => write_output(None, &theme_listing(StyleRegistry::builtin())),
    }
}
