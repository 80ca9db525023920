//! Document facade.
//!
//! [`DocumentBuilder`] accumulates the ordered entry list and at most one
//! prepared signature image, then hands both to the writer. Each builder
//! owns its own state; nothing is shared across concurrent builds.

use log::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::LayoutConfig;
use crate::elements::ContentEntry;
use crate::error::Result;
use crate::signature::SignatureAsset;
use crate::writer::PdfWriter;

/// Substituted for an empty or absent key/value value so no entry is blank.
const VALUE_PLACEHOLDER: &str = "-";

/// A finished document: the final immutable byte payload plus the filename
/// derived for delivery.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Complete file bytes.
    pub bytes: Vec<u8>,
    /// Derived filename, always ending in `.pdf`.
    pub filename: String,
}

/// Accumulates content entries and renders the final document.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    config: LayoutConfig,
    entries: Vec<ContentEntry>,
    signature: Option<SignatureAsset>,
}

impl DocumentBuilder {
    /// Create a builder with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a custom layout.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config, entries: Vec::new(), signature: None }
    }

    /// Append a title entry.
    pub fn add_title(&mut self, text: impl Into<String>) -> &mut Self {
        self.entries.push(ContentEntry::Title { text: text.into(), blank_lines_after: None });
        self
    }

    /// Append a section heading entry.
    pub fn add_section(&mut self, text: impl Into<String>) -> &mut Self {
        self.entries.push(ContentEntry::Heading { text: text.into(), blank_lines_after: None });
        self
    }

    /// Append a body text entry.
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.entries.push(ContentEntry::Text { text: text.into(), blank_lines_after: None });
        self
    }

    /// Append a `label: value` line, substituting a placeholder when the
    /// value is empty or absent.
    pub fn add_key_value(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        let value = value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(VALUE_PLACEHOLDER);
        self.entries.push(ContentEntry::Text {
            text: format!("{}: {}", label, value),
            blank_lines_after: None,
        });
        self
    }

    /// Append a vertical gap of `lines` blank lines.
    pub fn add_spacer(&mut self, lines: u32) -> &mut Self {
        self.entries.push(ContentEntry::Spacer { blank_lines_after: lines });
        self
    }

    /// Append the placement marker for the attached signature image.
    pub fn add_signature(&mut self) -> &mut Self {
        self.entries.push(ContentEntry::Signature);
        self
    }

    /// Append entries received from a collaborator, in order.
    pub fn extend_entries(&mut self, entries: impl IntoIterator<Item = ContentEntry>) -> &mut Self {
        self.entries.extend(entries);
        self
    }

    /// Prepare and attach the signature image. At most one signature is
    /// kept; attaching again replaces the previous asset.
    pub fn attach_signature(&mut self, data: &[u8]) -> Result<&mut Self> {
        let asset = SignatureAsset::from_bytes(data, &self.config.signature)?;
        if self.signature.is_some() {
            debug!("replacing previously attached signature");
        }
        self.signature = Some(asset);
        Ok(self)
    }

    /// The accumulated entry list.
    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// Render the document and derive its delivery filename from `name`.
    ///
    /// Rendering is atomic: either the complete byte payload is returned or
    /// an error propagates and nothing is exposed.
    pub fn finalize(&self, name: &str) -> Result<RenderedDocument> {
        let writer = PdfWriter::new(self.config.clone());
        let bytes = writer.render(&self.entries, self.signature.as_ref())?;
        debug!("rendered {} entries into {} bytes", self.entries.len(), bytes.len());
        Ok(RenderedDocument { bytes, filename: derive_filename(name) })
    }

    /// Render and write the document into `dir`, returning the full path.
    pub fn save(&self, name: &str, dir: impl AsRef<std::path::Path>) -> Result<std::path::PathBuf> {
        let rendered = self.finalize(name)?;
        let path = dir.as_ref().join(&rendered.filename);
        std::fs::write(&path, &rendered.bytes)?;
        Ok(path)
    }
}

/// Derive a safe delivery filename: strip diacritics, keep word characters,
/// whitespace and hyphens, collapse whitespace to single hyphens, lowercase,
/// append `.pdf`.
pub fn derive_filename(name: &str) -> String {
    let stripped: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_'))
        .collect();
    let slug = stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    if slug.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{}.pdf", slug)
    }
}
