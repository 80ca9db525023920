//! Document assembly.
//!
//! Assigns sequential object numbers to the fixed object schema (two fonts,
//! optional image, content stream, page, pages, catalog), serializes every
//! object strictly in definition order while accumulating byte offsets
//! forward-only, and frames the result with header, cross-reference table
//! and trailer. Offsets are recorded exactly once; there is no fix-up pass.

use std::io::Write;

use log::debug;

use super::content_stream::{ContentStreamBuilder, FontSlot, IMAGE_RESOURCE};
use super::object_serializer::ObjectSerializer;
use crate::config::LayoutConfig;
use crate::elements::ContentEntry;
use crate::error::{Error, Result};
use crate::object::{dict, name, reference, Object, ObjectDefinition};
use crate::signature::SignatureAsset;

/// Writer for a complete single-page document.
pub struct PdfWriter {
    config: LayoutConfig,
}

impl PdfWriter {
    /// Create a writer with the given layout.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Render the entry list (and optional signature) to final file bytes.
    pub fn render(
        &self,
        entries: &[ContentEntry],
        signature: Option<&SignatureAsset>,
    ) -> Result<Vec<u8>> {
        let stream = ContentStreamBuilder::new(&self.config).build(entries, signature);
        debug!("content stream is {} bytes", stream.bytes.len());

        // Numbers are assigned ascending from 1, all before any body is
        // built, so dependents only ever reference assigned numbers.
        let regular_num = 1;
        let bold_num = 2;
        let mut next = 3;
        let image_num = if stream.painted_signature {
            next += 1;
            Some(next - 1)
        } else {
            None
        };
        let content_num = next;
        let page_num = next + 1;
        let pages_num = next + 2;
        let catalog_num = next + 3;

        let mut definitions = Vec::with_capacity(catalog_num as usize);
        definitions.push(ObjectDefinition::new(regular_num, font_dict(FontSlot::Regular)));
        definitions.push(ObjectDefinition::new(bold_num, font_dict(FontSlot::Bold)));

        if let Some(number) = image_num {
            // The image must precede the content stream that paints it.
            let asset = signature.ok_or_else(|| {
                Error::InvalidStructure("image object scheduled without an asset".to_string())
            })?;
            definitions.push(ObjectDefinition::new(number, image_object(asset)));
        }

        definitions.push(ObjectDefinition::new(
            content_num,
            Object::Stream { dict: Default::default(), data: stream.bytes },
        ));

        let mut resources = Vec::new();
        let mut font_entries = Vec::new();
        if stream.used_regular {
            font_entries.push((FontSlot::Regular.resource_name(), reference(regular_num)));
        }
        if stream.used_bold {
            font_entries.push((FontSlot::Bold.resource_name(), reference(bold_num)));
        }
        resources.push(("Font", dict(font_entries)));
        if let Some(number) = image_num {
            resources.push(("XObject", dict(vec![(IMAGE_RESOURCE, reference(number))])));
        }

        definitions.push(ObjectDefinition::new(
            page_num,
            dict(vec![
                ("Type", name("Page")),
                ("Parent", reference(pages_num)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(self.config.page_width as f64),
                        Object::Real(self.config.page_height as f64),
                    ]),
                ),
                ("Contents", reference(content_num)),
                ("Resources", dict(resources)),
            ]),
        ));
        definitions.push(ObjectDefinition::new(
            pages_num,
            dict(vec![
                ("Type", name("Pages")),
                ("Kids", Object::Array(vec![reference(page_num)])),
                ("Count", Object::Integer(1)),
            ]),
        ));
        definitions.push(ObjectDefinition::new(
            catalog_num,
            dict(vec![("Type", name("Catalog")), ("Pages", reference(pages_num))]),
        ));

        assemble(&definitions, catalog_num)
    }
}

/// Serialize the definition list into the final file image.
///
/// Validates the numbering and reference invariants, then performs a single
/// forward pass: header, each object (offset recorded as it is framed),
/// cross-reference table, trailer.
pub(crate) fn assemble(definitions: &[ObjectDefinition], catalog: u32) -> Result<Vec<u8>> {
    validate(definitions, catalog)?;

    let serializer = ObjectSerializer::new();
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.7\n");
    // Binary marker so transports treat the file as binary.
    out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(definitions.len());
    for definition in definitions {
        offsets.push(out.len());
        out.extend_from_slice(&serializer.serialize_indirect(definition.number, &definition.body));
    }

    let xref_start = out.len();
    let size = definitions.len() as u32 + 1;
    writeln!(out, "xref")?;
    writeln!(out, "0 {}", size)?;
    // Object 0 heads the free list.
    writeln!(out, "0000000000 65535 f ")?;
    for offset in &offsets {
        writeln!(out, "{:010} 00000 n ", offset)?;
    }

    writeln!(out, "trailer")?;
    let trailer = dict(vec![
        ("Root", reference(catalog)),
        ("Size", Object::Integer(size as i64)),
    ]);
    out.extend_from_slice(&serializer.serialize(&trailer));
    writeln!(out)?;
    writeln!(out, "startxref")?;
    writeln!(out, "{}", xref_start)?;
    write!(out, "%%EOF")?;

    debug!("assembled {} objects into {} bytes", definitions.len(), out.len());
    Ok(out)
}

/// Check numbering and reference invariants before any byte is written.
fn validate(definitions: &[ObjectDefinition], catalog: u32) -> Result<()> {
    for (index, definition) in definitions.iter().enumerate() {
        let expected = index as u32 + 1;
        if definition.number != expected {
            return Err(Error::InvalidStructure(format!(
                "object numbers must be contiguous from 1; position {} holds {}",
                index + 1,
                definition.number
            )));
        }
    }
    let highest = definitions.len() as u32;
    let mut refs = Vec::new();
    for definition in definitions {
        definition.body.collect_references(&mut refs);
    }
    refs.push(catalog);
    for number in refs {
        if number == 0 || number > highest {
            return Err(Error::InvalidStructure(format!(
                "object {} referenced but never defined",
                number
            )));
        }
    }
    Ok(())
}

/// Standard Type1 font dictionary for one logical font.
fn font_dict(slot: FontSlot) -> Object {
    dict(vec![
        ("Type", name("Font")),
        ("Subtype", name("Type1")),
        ("BaseFont", name(slot.base_font())),
        ("Encoding", name("WinAnsiEncoding")),
    ])
}

/// Image XObject for the prepared signature. `/Length` is filled in by the
/// serializer.
fn image_object(asset: &SignatureAsset) -> Object {
    let entries = [
        ("Type", name("XObject")),
        ("Subtype", name("Image")),
        ("Width", Object::Integer(asset.px_width as i64)),
        ("Height", Object::Integer(asset.px_height as i64)),
        ("ColorSpace", name("DeviceRGB")),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", name("DCTDecode")),
    ];
    Object::Stream {
        dict: entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        data: asset.jpeg_data.clone(),
    }
}
