//! Vitae Core Library
//!
//! Document model, style catalog, template presets and section ordering for
//! the vitae resume builder, plus the persistence and session seams the
//! editor shell plugs into.

pub mod document;
mod lenient;
pub mod registry;
pub mod sections;
pub mod session;
pub mod share;
pub mod storage;
pub mod style;
pub mod template;
pub mod theme;

pub use document::{
    CustomSection, EducationEntry, ExperienceEntry, PersonalData, ResumeData, ResumeDocument, Skill,
};
pub use registry::StyleRegistry;
pub use sections::{SectionEntry, SectionKind, SectionOrder, StandardSection};
pub use session::{Session, SessionError, SessionOrigin};
pub use share::{MAX_SHARE_BYTES, ShareError, share_document, share_link};
pub use style::{StyleConfiguration, StylePatch};
pub use template::{TemplatePreset, apply_template};
pub use theme::{SerializableColor, Theme};
