//! Document writing pipeline.
//!
//! ```text
//! ContentEntry[] (+ SignatureAsset)
//!     ↓
//! [ContentStreamBuilder] (entries → operator stream bytes)
//!     ↓
//! [PdfWriter] (fixed object schema, xref table, trailer)
//!     ↓
//! [ObjectSerializer] (objects → bytes)
//!     ↓
//! file bytes
//! ```

mod content_stream;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, FontSlot, StreamOutput, IMAGE_RESOURCE};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::PdfWriter;
