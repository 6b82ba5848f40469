//! Vitae Render Library
//!
//! Layout composition and rendering for vitae resumes. [`compose`] turns a
//! document snapshot into a [`RenderTree`]; a [`Renderer`] backend paints it.
//! The default backend emits HTML.

pub mod export;
pub mod html;
pub mod layout;
mod renderer;
pub mod section;
pub mod tokens;
pub mod tree;

pub use export::{CONTENT_ELEMENT_ID, ExportRequest, PdfExporter, suggested_filename};
pub use html::{HtmlRenderer, render_html};
pub use layout::{ColumnGroup, column_group, compose, compose_document, layout_mode};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use section::{render_section, section_title};
pub use tokens::StyleTokens;
pub use tree::{ColumnRole, ContentBlock, LayoutMode, RenderTree, RenderedSection};
