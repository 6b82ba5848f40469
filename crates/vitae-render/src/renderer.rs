//! Renderer trait abstraction.

use crate::tree::RenderTree;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid preview scale: {0}")]
    InvalidScale(f64),
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// The composed page to render.
    pub tree: &'a RenderTree,
    /// Zoom applied to the on-screen preview wrapper. The content node
    /// itself is always rendered at 1.0.
    pub scale_factor: f64,
    /// Emit a complete document (doctype, head, styles) rather than a fragment.
    pub standalone: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(tree: &'a RenderTree) -> Self {
        Self {
            tree,
            scale_factor: 1.0,
            standalone: true,
        }
    }

    /// Set the preview zoom.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Emit only the preview fragment.
    pub fn fragment(mut self) -> Self {
        self.standalone = false;
        self
    }

    /// Check the context before rendering.
    pub fn validate(&self) -> RenderResult<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(RendererError::InvalidScale(self.scale_factor));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Render one composed page into the backend's output.
    fn build(&mut self, ctx: &RenderContext) -> RenderResult<()>;
}
