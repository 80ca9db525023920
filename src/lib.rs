//! # PDF Compose
//!
//! Self-contained generator for single-page PDF documents: feed it an
//! ordered list of typed content blocks (titles, headings, paragraphs,
//! spacers, one optional signature image) and it emits a complete,
//! viewer-ready file with no external rendering dependency.
//!
//! ## Pipeline
//!
//! - **Text layout** ([`text`]): pure sanitization and greedy line wrapping.
//! - **Signature preparation** ([`signature`]): decode, bound, flatten and
//!   re-encode the signature image as JPEG.
//! - **Content stream** ([`writer::ContentStreamBuilder`]): entries to one
//!   operator stream with a monotonically descending cursor.
//! - **Assembly** ([`writer::PdfWriter`]): sequential object numbering,
//!   forward-only byte offsets, cross-reference table and trailer.
//! - **Facade** ([`document::DocumentBuilder`]): accumulate, finalize,
//!   derive a delivery filename.
//!
//! Output is deterministic: finalizing an unmodified builder twice yields
//! byte-identical files.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_compose::DocumentBuilder;
//!
//! # fn main() -> pdf_compose::Result<()> {
//! let mut builder = DocumentBuilder::new();
//! builder
//!     .add_title("Membership Proposal")
//!     .add_section("Company")
//!     .add_key_value("Name", Some("Acme Ltda"))
//!     .add_spacer(2)
//!     .add_signature();
//! builder.attach_signature(&std::fs::read("signature.png")?)?;
//! let rendered = builder.finalize("membership proposal")?;
//! std::fs::write(&rendered.filename, &rendered.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! Single page only: content past the bottom margin is neither paginated
//! nor reflowed. The embedded image is always re-encoded as JPEG, and only
//! the built-in Type1 fonts are referenced (no font embedding).

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Content model
pub mod elements;

// Text sanitization and wrapping
pub mod text;

// Signature image preparation
pub mod signature;

// Object model and writing
pub mod object;
pub mod writer;

// High-level facade
pub mod document;

// Re-exports
pub use config::{LayoutConfig, SignatureConfig};
pub use document::{derive_filename, DocumentBuilder, RenderedDocument};
pub use elements::{entries_from_json, ContentEntry};
pub use error::{Error, Result};
pub use signature::SignatureAsset;
pub use text::wrap_lines;
pub use writer::PdfWriter;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_compose");
    }
}
