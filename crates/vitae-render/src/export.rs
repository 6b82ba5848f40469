//! Hand-off to the PDF exporter.
//!
//! Rasterizing to PDF happens outside this crate. The exporter is given the
//! id of the unscaled content node and a filename, and reports success or
//! failure to the editor on its own.

use serde::Serialize;
use vitae_core::PersonalData;

/// Id of the unscaled content node in rendered HTML.
pub const CONTENT_ELEMENT_ID: &str = "resume-content";

/// Filename stem used when the resume has no usable name.
const FALLBACK_STEM: &str = "Resume";

/// What to capture and how to name the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub element_id: String,
    pub filename: String,
}

impl ExportRequest {
    /// Capture the content node, named after the resume's owner.
    pub fn for_person(personal: &PersonalData) -> Self {
        Self {
            element_id: CONTENT_ELEMENT_ID.to_string(),
            filename: suggested_filename(personal),
        }
    }
}

/// Fire-and-forget PDF export.
pub trait PdfExporter {
    fn export(&self, request: ExportRequest);
}

/// `Jane_Doe_Resume`, or `Resume` without a name.
pub fn suggested_stem(personal: &PersonalData) -> String {
    let words: Vec<String> = personal
        .name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '\''))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        format!("{}_{FALLBACK_STEM}", words.join("_"))
    }
}

/// `Jane_Doe_Resume.pdf`, or `Resume.pdf` without a name.
pub fn suggested_filename(personal: &PersonalData) -> String {
    format!("{}.pdf", suggested_stem(personal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn person(name: &str) -> PersonalData {
        PersonalData {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename(&person("Jane Doe")), "Jane_Doe_Resume.pdf");
        assert_eq!(suggested_filename(&person("  José  María ")), "José_María_Resume.pdf");
        assert_eq!(suggested_filename(&person("a/b\\c")), "abc_Resume.pdf");
        assert_eq!(suggested_filename(&person("")), "Resume.pdf");
        assert_eq!(suggested_filename(&person(" / ")), "Resume.pdf");
    }

    struct RecordingExporter {
        requests: RefCell<Vec<ExportRequest>>,
    }

    impl PdfExporter for RecordingExporter {
        fn export(&self, request: ExportRequest) {
            self.requests.borrow_mut().push(request);
        }
    }

    #[test]
    fn test_request_targets_content_node() {
        let exporter = RecordingExporter {
            requests: RefCell::new(Vec::new()),
        };
        exporter.export(ExportRequest::for_person(&person("Ada Lovelace")));

        let requests = exporter.requests.borrow();
        assert_eq!(requests[0].element_id, "resume-content");
        assert_eq!(requests[0].filename, "Ada_Lovelace_Resume.pdf");
    }
}
