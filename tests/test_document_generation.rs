//! End-to-end structural tests for generated documents.

use pdf_compose::{entries_from_json, ContentEntry, DocumentBuilder, LayoutConfig};

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn count_subslices(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|window| *window == needle).count()
}

/// Parse the cross-reference table and assert every recorded offset lands
/// exactly on that object's `N 0 obj` marker.
fn assert_xref_offsets_exact(bytes: &[u8]) -> usize {
    let xref_at = find_subslice(bytes, b"xref\n").expect("xref section");
    let table = std::str::from_utf8(&bytes[xref_at..find_subslice(bytes, b"trailer").unwrap()])
        .expect("xref table is ASCII");
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("xref"));
    let header = lines.next().expect("subsection header");
    let declared: usize = header.strip_prefix("0 ").expect("subsection starts at 0").parse().unwrap();
    assert_eq!(lines.next(), Some("0000000000 65535 f "), "free-list head entry");

    for number in 1..declared {
        let entry = lines.next().unwrap_or_else(|| panic!("missing xref entry for object {}", number));
        let offset: usize = entry[..10].parse().expect("10-digit offset");
        let marker = format!("{} 0 obj", number);
        assert_eq!(
            &bytes[offset..offset + marker.len()],
            marker.as_bytes(),
            "offset of object {}",
            number
        );
    }
    declared - 1
}

#[test]
fn test_minimal_report_has_six_objects() {
    let mut builder = DocumentBuilder::new();
    builder.add_title("Report").add_paragraph("Total: 10");
    let rendered = builder.finalize("report").unwrap();
    let text = String::from_utf8_lossy(&rendered.bytes);

    // 2 fonts + content stream + page + pages + catalog.
    assert_eq!(assert_xref_offsets_exact(&rendered.bytes), 6);
    assert!(text.contains("/Size 7"));
    assert_eq!(text.matches(" Tj\n").count(), 2);
    // Trailer points at the catalog.
    assert!(text.contains("/Root 6 0 R"));
    assert!(text.contains("6 0 obj\n<< /Pages 5 0 R /Type /Catalog >>"));
}

#[test]
fn test_empty_document_is_structurally_valid() {
    let _ = env_logger::builder().is_test(true).try_init();
    let rendered = DocumentBuilder::new().finalize("blank").unwrap();
    let text = String::from_utf8_lossy(&rendered.bytes);

    assert!(rendered.bytes.starts_with(b"%PDF-1.7\n"));
    assert!(rendered.bytes.ends_with(b"%%EOF"));
    assert!(text.contains("/Type /Catalog"));
    assert!(text.contains("/Type /Pages"));
    assert!(text.contains("/Type /Page"));
    assert!(text.contains("/Count 1"));
    assert!(assert_xref_offsets_exact(&rendered.bytes) >= 4);
}

#[test]
fn test_startxref_points_at_xref_section() {
    let mut builder = DocumentBuilder::new();
    builder.add_paragraph("hello");
    let rendered = builder.finalize("x").unwrap();

    let text = String::from_utf8_lossy(&rendered.bytes);
    let startxref: usize = text.lines().rev().nth(1).unwrap().parse().unwrap();
    assert_eq!(&rendered.bytes[startxref..startxref + 5], b"xref\n");
}

#[test]
fn test_finalize_twice_is_byte_identical() {
    let mut builder = DocumentBuilder::new();
    builder
        .add_title("Proposta de Admissão")
        .add_section("Sócios")
        .add_key_value("CNPJ", Some("00.000.000/0001-00"))
        .add_key_value("Telefone", None)
        .add_spacer(3);
    let first = builder.finalize("proposta").unwrap();
    let second = builder.finalize("proposta").unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_emitted_text_is_sanitized_and_escaped() {
    let mut builder = DocumentBuilder::new();
    builder.add_title("Café Äé").add_paragraph("a(b)c\\d");
    let rendered = builder.finalize("cafe").unwrap();

    assert!(find_subslice(&rendered.bytes, b"(Cafe Ae) Tj").is_some());
    assert!(find_subslice(&rendered.bytes, b"(a\\(b\\)c\\\\d) Tj").is_some());

    // Nothing outside printable ASCII inside any literal string.
    let text = String::from_utf8_lossy(&rendered.bytes);
    for line in text.lines().filter(|l| l.ends_with(" Tj")) {
        assert!(line.bytes().all(|b| (0x20..=0x7e).contains(&b)), "non-printable in {:?}", line);
    }
}

#[test]
fn test_long_paragraph_wraps_to_configured_budget() {
    let config = LayoutConfig::default();
    let word = "x".repeat(30);
    let text = vec![word; 12].join(" ");

    let mut builder = DocumentBuilder::new();
    builder.add_paragraph(text);
    let rendered = builder.finalize("wrapped").unwrap();
    let body = String::from_utf8_lossy(&rendered.bytes);

    let budget = config.wrap_width(config.body_size);
    let lines: Vec<&str> = body.lines().filter(|l| l.ends_with(" Tj")).collect();
    assert!(lines.len() > 1, "paragraph should wrap across lines");
    for line in lines {
        let literal = &line[line.find('(').unwrap() + 1..line.rfind(')').unwrap()];
        assert!(literal.len() <= budget, "{:?} exceeds budget {}", literal, budget);
    }
}

#[test]
fn test_json_contract_end_to_end() {
    let payload = r#"[
        {"kind": "Title", "text": "Membership Proposal"},
        {"kind": "Heading", "text": "Services", "blankLinesAfter": 1},
        {"kind": "Text", "text": "SPC, NF-e"},
        {"kind": "Spacer", "blankLinesAfter": 2},
        {"kind": "Text", "text": "Approved by the board"}
    ]"#;
    let entries = entries_from_json(payload).unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[3], ContentEntry::Spacer { blank_lines_after: 2 });

    let mut builder = DocumentBuilder::new();
    builder.extend_entries(entries);
    let rendered = builder.finalize("membership proposal").unwrap();
    assert_eq!(rendered.filename, "membership-proposal.pdf");

    let text = String::from_utf8_lossy(&rendered.bytes);
    assert!(text.contains("(Membership Proposal) Tj"));
    assert!(text.contains("(Approved by the board) Tj"));
    assert_eq!(assert_xref_offsets_exact(&rendered.bytes), 6);
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(entries_from_json(r#"[{"kind": "Banner", "text": "x"}]"#).is_err());
    assert!(entries_from_json("not json").is_err());
}

#[test]
fn test_save_writes_finalized_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let mut builder = DocumentBuilder::new();
    builder.add_title("Saved Report");

    let rendered = builder.finalize("Saved Report").unwrap();
    let path = builder.save("Saved Report", dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "saved-report.pdf");
    assert_eq!(std::fs::read(&path).unwrap(), rendered.bytes);
}

#[test]
fn test_alternate_geometry_changes_media_box() {
    let config = LayoutConfig::default().with_page_size(612.0, 792.0);
    let mut builder = DocumentBuilder::with_config(config);
    builder.add_paragraph("letter paper");
    let rendered = builder.finalize("letter").unwrap();
    let text = String::from_utf8_lossy(&rendered.bytes);
    assert!(text.contains("/MediaBox [0 0 612 792]"));
}

#[test]
fn test_objects_serialized_in_definition_order() {
    let mut builder = DocumentBuilder::new();
    builder.add_title("Order");
    let rendered = builder.finalize("order").unwrap();

    let mut last = 0;
    for number in 1..=6u32 {
        let marker = format!("{} 0 obj", number);
        let at = find_subslice(&rendered.bytes, marker.as_bytes())
            .unwrap_or_else(|| panic!("object {} missing", number));
        assert!(at > last, "object {} out of order", number);
        last = at;
    }
    assert_eq!(count_subslices(&rendered.bytes, b"endobj"), 6);
}
