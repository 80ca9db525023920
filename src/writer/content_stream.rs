//! Content stream builder.
//!
//! Consumes the ordered entry list plus an optional prepared signature and
//! emits one stream of drawing operators, driven by a single vertical cursor
//! that starts at the top margin and only ever moves down.
//!
//! Text operators are only valid inside a text object (`BT`/`ET`), and an
//! image paint must sit outside one, so the builder opens text mode lazily
//! on the first text line, closes it around every image draw and at stream
//! end.

use log::{debug, warn};

use super::object_serializer::fmt_number;
use crate::config::LayoutConfig;
use crate::elements::ContentEntry;
use crate::signature::SignatureAsset;
use crate::text::wrap_lines;

/// Resource name under which the signature image is registered on the page.
pub const IMAGE_RESOURCE: &str = "Im1";

/// The two logical fonts available to entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSlot {
    /// Regular body font.
    Regular,
    /// Bold font for titles and headings.
    Bold,
}

impl FontSlot {
    /// Resource name used in the content stream and page resources.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontSlot::Regular => "F1",
            FontSlot::Bold => "F2",
        }
    }

    /// Base font name for the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontSlot::Regular => "Times-Roman",
            FontSlot::Bold => "Times-Bold",
        }
    }
}

/// Operators the builder can emit.
#[derive(Debug, Clone)]
enum StreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Select font and size (Tf)
    SetFont(FontSlot, f32),
    /// Position the text matrix and show one line (Tm + Tj)
    TextAt(f32, f32, String),
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Paint the named image XObject (Do)
    PaintImage(&'static str),
}

/// What a build produced: the operator bytes plus which page resources the
/// stream actually references.
#[derive(Debug)]
pub struct StreamOutput {
    /// Serialized operator stream.
    pub bytes: Vec<u8>,
    /// Whether any line used the regular font.
    pub used_regular: bool,
    /// Whether any line used the bold font.
    pub used_bold: bool,
    /// Whether the signature image was painted.
    pub painted_signature: bool,
}

/// Builder for the page's single content stream.
#[derive(Debug)]
pub struct ContentStreamBuilder<'a> {
    config: &'a LayoutConfig,
    ops: Vec<StreamOp>,
    cursor_y: f32,
    in_text: bool,
    current_font: Option<(FontSlot, f32)>,
    used_regular: bool,
    used_bold: bool,
    painted_signature: bool,
}

impl<'a> ContentStreamBuilder<'a> {
    /// Create a builder with its cursor at the top margin.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            ops: Vec::new(),
            cursor_y: config.page_height - config.margin,
            in_text: false,
            current_font: None,
            used_regular: false,
            used_bold: false,
            painted_signature: false,
        }
    }

    /// Consume the entry list and emit the operator stream.
    pub fn build(mut self, entries: &[ContentEntry], signature: Option<&SignatureAsset>) -> StreamOutput {
        for entry in entries {
            match entry {
                ContentEntry::Title { text, blank_lines_after } => {
                    self.text_block(text, FontSlot::Bold, self.config.title_size);
                    self.advance_blank_lines(blank_lines_after.unwrap_or(0));
                }
                ContentEntry::Heading { text, blank_lines_after } => {
                    self.text_block(text, FontSlot::Bold, self.config.heading_size);
                    self.advance_blank_lines(blank_lines_after.unwrap_or(0));
                }
                ContentEntry::Text { text, blank_lines_after } => {
                    self.text_block(text, FontSlot::Regular, self.config.body_size);
                    self.advance_blank_lines(blank_lines_after.unwrap_or(0));
                }
                ContentEntry::Spacer { blank_lines_after } => {
                    self.advance_blank_lines(*blank_lines_after);
                }
                ContentEntry::Signature => match signature {
                    Some(asset) => self.paint_signature(asset),
                    None => warn!("signature entry present but no image was attached; skipping"),
                },
            }
        }
        self.end_text();

        if signature.is_some() && !self.painted_signature {
            warn!("a signature image was attached but no entry placed it");
        }
        if self.cursor_y < self.config.margin {
            debug!(
                "content ran {}pt past the bottom margin; output stays single-page",
                fmt_number((self.config.margin - self.cursor_y) as f64)
            );
        }

        StreamOutput {
            bytes: self.render(),
            used_regular: self.used_regular,
            used_bold: self.used_bold,
            painted_signature: self.painted_signature,
        }
    }

    /// Wrap one text payload and emit its lines at the current cursor.
    fn text_block(&mut self, text: &str, slot: FontSlot, size: f32) {
        let budget = self.config.wrap_width(size);
        for line in wrap_lines(text, budget) {
            if !line.is_empty() {
                self.begin_text();
                self.set_font(slot, size);
                self.ops.push(StreamOp::TextAt(self.config.margin, self.cursor_y, line));
            }
            self.cursor_y -= self.config.line_height;
        }
    }

    fn advance_blank_lines(&mut self, lines: u32) {
        self.cursor_y -= self.config.line_height * lines as f32;
    }

    /// Place the signature at the left margin just below the cursor, then
    /// drop the cursor below the drawn rectangle.
    fn paint_signature(&mut self, asset: &SignatureAsset) {
        self.end_text();
        let bottom = self.cursor_y - asset.pt_height;
        self.ops.push(StreamOp::SaveState);
        self.ops.push(StreamOp::Transform(
            asset.pt_width,
            0.0,
            0.0,
            asset.pt_height,
            self.config.margin,
            bottom,
        ));
        self.ops.push(StreamOp::PaintImage(IMAGE_RESOURCE));
        self.ops.push(StreamOp::RestoreState);
        self.cursor_y = bottom - self.config.line_height;
        self.painted_signature = true;
        // Font state survives ET/BT, but re-select lazily for clarity of the
        // emitted stream.
        self.current_font = None;
    }

    fn begin_text(&mut self) {
        if !self.in_text {
            self.ops.push(StreamOp::BeginText);
            self.in_text = true;
        }
    }

    fn end_text(&mut self) {
        if self.in_text {
            self.ops.push(StreamOp::EndText);
            self.in_text = false;
        }
    }

    /// Emit a font switch only when the active font or size changes.
    fn set_font(&mut self, slot: FontSlot, size: f32) {
        if self.current_font != Some((slot, size)) {
            self.ops.push(StreamOp::SetFont(slot, size));
            self.current_font = Some((slot, size));
        }
        match slot {
            FontSlot::Regular => self.used_regular = true,
            FontSlot::Bold => self.used_bold = true,
        }
    }

    fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                StreamOp::BeginText => out.extend_from_slice(b"BT\n"),
                StreamOp::EndText => out.extend_from_slice(b"ET\n"),
                StreamOp::SetFont(slot, size) => {
                    out.extend_from_slice(
                        format!("/{} {} Tf\n", slot.resource_name(), fmt_number(*size as f64))
                            .as_bytes(),
                    );
                }
                StreamOp::TextAt(x, y, text) => {
                    out.extend_from_slice(
                        format!(
                            "1 0 0 1 {} {} Tm\n({}) Tj\n",
                            fmt_number(*x as f64),
                            fmt_number(*y as f64),
                            text
                        )
                        .as_bytes(),
                    );
                }
                StreamOp::SaveState => out.extend_from_slice(b"q\n"),
                StreamOp::RestoreState => out.extend_from_slice(b"Q\n"),
                StreamOp::Transform(a, b, c, d, e, f) => {
                    out.extend_from_slice(
                        format!(
                            "{} {} {} {} {} {} cm\n",
                            fmt_number(*a as f64),
                            fmt_number(*b as f64),
                            fmt_number(*c as f64),
                            fmt_number(*d as f64),
                            fmt_number(*e as f64),
                            fmt_number(*f as f64)
                        )
                        .as_bytes(),
                    );
                }
                StreamOp::PaintImage(name) => {
                    out.extend_from_slice(format!("/{} Do\n", name).as_bytes());
                }
            }
        }
        out
    }
}
