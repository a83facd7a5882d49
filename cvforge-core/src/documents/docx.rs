//! DOCX backend.
//!
//! The package is held in memory entry by entry. Editable parts
//! (`word/document.xml`, headers, footers) are scanned once with a pull
//! parser to find every top-level `w:p` and its byte range. A rewrite
//! replaces exactly that byte range, so untouched paragraphs and every other
//! zip entry are written back byte-identical.
//!
//! A rewritten paragraph keeps its start tag and `w:pPr`, loses all previous
//! runs, and gets one run carrying the first original run's `w:rPr`.

use super::EditableDocument;
use crate::error::{ApplicationError, DocumentError};
use crate::types::*;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::ops::Range;
use std::sync::LazyLock;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

pub const DOCUMENT_PART: &str = "word/document.xml";

static HEADER_FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^word/(header|footer)\d*\.xml$").unwrap());

/// Run-level content that would be lost by collapsing the paragraph into one run.
const EMBEDDED_CONTENT: &[&[u8]] = &[
    b"w:drawing",
    b"w:pict",
    b"w:object",
    b"w:fldChar",
    b"w:fldSimple",
    b"w:instrText",
    b"mc:AlternateContent",
];

#[derive(Debug, Clone)]
struct ZipEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    last_modified: DateTime,
    is_dir: bool,
}

#[derive(Debug, Clone)]
struct Paragraph {
    /// Byte range of the whole `<w:p>…</w:p>` element
    range: Range<usize>,
    open_tag: String,
    ppr: Option<Range<usize>>,
    first_rpr: Option<Range<usize>>,
    text: String,
    in_table: bool,
    /// Why this paragraph cannot be rewritten, if it cannot
    refusal: Option<&'static str>,
}

impl Paragraph {
    fn open(start: usize, open_tag: &str, in_table: bool) -> Self {
        Self {
            range: start..start,
            open_tag: open_tag.to_string(),
            ppr: None,
            first_rpr: None,
            text: String::new(),
            in_table,
            refusal: None,
        }
    }

    fn refuse(&mut self, reason: &'static str) {
        if self.refusal.is_none() {
            self.refusal = Some(reason);
        }
    }
}

#[derive(Debug, Clone)]
struct XmlPart {
    entry: usize,
    name: String,
    kind: ContainerKind,
    xml: String,
    paragraphs: Vec<Paragraph>,
    /// paragraph ordinal → replacement XML
    rewrites: BTreeMap<usize, String>,
}

impl XmlPart {
    fn render(&self) -> String {
        let mut out = String::with_capacity(self.xml.len());
        let mut cursor = 0;
        for (&ordinal, rendered) in &self.rewrites {
            let range = &self.paragraphs[ordinal].range;
            out.push_str(&self.xml[cursor..range.start]);
            out.push_str(rendered);
            cursor = range.end;
        }
        out.push_str(&self.xml[cursor..]);
        out
    }
}

/// Editable view over a WordprocessingML package.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    entries: Vec<ZipEntry>,
    parts: Vec<XmlPart>,
    /// block index → (part, paragraph ordinal)
    index: Vec<(usize, usize)>,
    blocks: Vec<TextBlock>,
}

impl DocxDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push(ZipEntry {
                name: file.name().to_string(),
                compression: file.compression(),
                last_modified: file.last_modified(),
                is_dir: file.is_dir(),
                data,
            });
        }

        let body = entries
            .iter()
            .position(|e| e.name == DOCUMENT_PART)
            .ok_or_else(|| DocumentError::MissingPart(DOCUMENT_PART.to_string()))?;

        let mut editable = vec![(body, ContainerKind::Body)];
        let mut headers = Vec::new();
        let mut footers = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            if let Some(caps) = HEADER_FOOTER_RE.captures(&entry.name) {
                match &caps[1] {
                    "header" => headers.push(i),
                    _ => footers.push(i),
                }
            }
        }
        headers.sort_by(|a, b| entries[*a].name.cmp(&entries[*b].name));
        footers.sort_by(|a, b| entries[*a].name.cmp(&entries[*b].name));
        editable.extend(headers.into_iter().map(|i| (i, ContainerKind::Header)));
        editable.extend(footers.into_iter().map(|i| (i, ContainerKind::Footer)));

        let mut parts = Vec::with_capacity(editable.len());
        let mut index = Vec::new();
        let mut blocks = Vec::new();
        for (entry_idx, kind) in editable {
            let name = entries[entry_idx].name.clone();
            let xml = String::from_utf8(entries[entry_idx].data.clone())
                .map_err(|_| DocumentError::Encoding(format!("{name} is not valid UTF-8")))?;
            let paragraphs = scan_paragraphs(&name, &xml)?;

            let part_idx = parts.len();
            for (ordinal, paragraph) in paragraphs.iter().enumerate() {
                let container = match kind {
                    ContainerKind::Body if paragraph.in_table => ContainerKind::TableCell,
                    other => other,
                };
                let block_index = blocks.len();
                blocks.push(TextBlock::new(
                    block_index,
                    BlockLocation {
                        part: name.clone(),
                        paragraph: ordinal,
                        container,
                    },
                    paragraph.text.clone(),
                ));
                index.push((part_idx, ordinal));
            }
            tracing::debug!(part = %name, "found {} paragraphs", paragraphs.len());

            parts.push(XmlPart {
                entry: entry_idx,
                name,
                kind,
                xml,
                paragraphs,
                rewrites: BTreeMap::new(),
            });
        }

        Ok(Self {
            entries,
            parts,
            index,
            blocks,
        })
    }

    /// Names of the parts blocks were extracted from, in block order.
    pub fn editable_parts(&self) -> Vec<(&str, ContainerKind)> {
        self.parts.iter().map(|p| (p.name.as_str(), p.kind)).collect()
    }

    /// Current XML of a part, including pending rewrites.
    pub fn part_xml(&self, name: &str) -> Option<String> {
        self.parts.iter().find(|p| p.name == name).map(XmlPart::render)
    }
}

fn xml_error(part: &str) -> impl Fn(quick_xml::Error) -> DocumentError + '_ {
    move |err| DocumentError::xml(part, err)
}

/// Find every top-level paragraph in one part.
fn scan_paragraphs(part: &str, xml: &str) -> Result<Vec<Paragraph>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;
    let mut p_depth = 0usize;
    let mut tc_depth = 0usize;
    let mut in_text = false;
    let mut ppr_start: Option<usize> = None;
    let mut rpr_start: Option<usize> = None;
    // open element names; a run's own properties are the w:rPr whose parent is w:r
    let mut open: Vec<Vec<u8>> = Vec::new();

    loop {
        let start = reader.buffer_position();
        let event = reader.read_event().map_err(xml_error(part))?;
        let end = reader.buffer_position();
        let top_level = p_depth == 1;
        let parent_is_run = open.last().is_some_and(|n| n.as_slice() == b"w:r");

        match event {
            Event::Start(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:p" => {
                        if p_depth == 0 {
                            current = Some(Paragraph::open(start, &xml[start..end], tc_depth > 0));
                        } else if let Some(p) = current.as_mut() {
                            p.refuse("paragraph contains nested paragraphs (text box)");
                        }
                        p_depth += 1;
                    }
                    b"w:tc" => tc_depth += 1,
                    b"w:t" if top_level => in_text = true,
                    b"w:pPr" if top_level => ppr_start = Some(start),
                    b"w:rPr" if top_level && parent_is_run => {
                        if current.as_ref().is_some_and(|p| p.first_rpr.is_none()) {
                            rpr_start = Some(start);
                        }
                    }
                    b"w:tab" if top_level && ppr_start.is_none() => push_char(&mut current, '\t'),
                    b"w:br" | b"w:cr" if top_level => push_char(&mut current, '\n'),
                    other if p_depth > 0 && EMBEDDED_CONTENT.contains(&other) => {
                        if let Some(p) = current.as_mut() {
                            p.refuse("paragraph contains drawings, fields or alternate content");
                        }
                    }
                    _ => {}
                }
                open.push(name.as_ref().to_vec());
            }
            Event::Empty(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:p" if p_depth == 0 => {
                        let raw = &xml[start..end];
                        let open_tag = format!("{}>", raw.trim_end_matches("/>").trim_end());
                        let mut paragraph = Paragraph::open(start, &open_tag, tc_depth > 0);
                        paragraph.range.end = end;
                        paragraphs.push(paragraph);
                    }
                    b"w:pPr" if top_level => {
                        if let Some(p) = current.as_mut() {
                            p.ppr = Some(start..end);
                        }
                    }
                    b"w:rPr" if top_level && parent_is_run => {
                        if let Some(p) = current.as_mut() {
                            p.first_rpr.get_or_insert(start..end);
                        }
                    }
                    b"w:tab" if top_level && ppr_start.is_none() => push_char(&mut current, '\t'),
                    b"w:br" | b"w:cr" if top_level => push_char(&mut current, '\n'),
                    other if p_depth > 0 && EMBEDDED_CONTENT.contains(&other) => {
                        if let Some(p) = current.as_mut() {
                            p.refuse("paragraph contains drawings, fields or alternate content");
                        }
                    }
                    _ => {}
                }
            }
            Event::End(e) => {
                open.pop();
                let closes_run_property = open.last().is_some_and(|n| n.as_slice() == b"w:r");
                let name = e.name();
                match name.as_ref() {
                    b"w:p" => {
                        p_depth = p_depth.saturating_sub(1);
                        if p_depth == 0 {
                            if let Some(mut p) = current.take() {
                                p.range.end = end;
                                paragraphs.push(p);
                            }
                        }
                    }
                    b"w:tc" => tc_depth = tc_depth.saturating_sub(1),
                    b"w:t" => in_text = false,
                    b"w:pPr" if top_level => {
                        if let (Some(s), Some(p)) = (ppr_start.take(), current.as_mut()) {
                            p.ppr = Some(s..end);
                        }
                    }
                    b"w:rPr" if top_level && closes_run_property => {
                        if let (Some(s), Some(p)) = (rpr_start.take(), current.as_mut()) {
                            p.first_rpr.get_or_insert(s..end);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) if in_text && top_level => {
                let text = t.unescape().map_err(xml_error(part))?;
                if let Some(p) = current.as_mut() {
                    p.text.push_str(&text);
                }
            }
            Event::CData(t) if in_text && top_level => {
                if let Some(p) = current.as_mut() {
                    p.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        return Err(DocumentError::xml(part, "unterminated paragraph"));
    }
    Ok(paragraphs)
}

fn push_char(current: &mut Option<Paragraph>, c: char) {
    if let Some(p) = current.as_mut() {
        p.text.push(c);
    }
}

/// Replacement XML for one paragraph holding `text` as a single run.
fn render_paragraph(xml: &str, paragraph: &Paragraph, text: &str) -> Result<String, String> {
    let mut writer = Writer::new(Vec::new());
    let err = |e: quick_xml::Error| e.to_string();

    writer
        .write_event(Event::Start(BytesStart::new("w:r")))
        .map_err(err)?;
    if let Some(rpr) = &paragraph.first_rpr {
        writer
            .write_event(Event::Text(BytesText::from_escaped(&xml[rpr.clone()])))
            .map_err(err)?;
    }
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            writer
                .write_event(Event::Empty(BytesStart::new("w:br")))
                .map_err(err)?;
        }
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                writer
                    .write_event(Event::Empty(BytesStart::new("w:tab")))
                    .map_err(err)?;
            }
            if segment.is_empty() {
                continue;
            }
            let mut t = BytesStart::new("w:t");
            t.push_attribute(("xml:space", "preserve"));
            writer.write_event(Event::Start(t)).map_err(err)?;
            writer
                .write_event(Event::Text(BytesText::new(segment)))
                .map_err(err)?;
            writer
                .write_event(Event::End(BytesEnd::new("w:t")))
                .map_err(err)?;
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new("w:r")))
        .map_err(err)?;

    let run = String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())?;
    let ppr = paragraph.ppr.as_ref().map_or("", |r| &xml[r.clone()]);
    Ok(format!("{}{ppr}{run}</w:p>", paragraph.open_tag))
}

impl EditableDocument for DocxDocument {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn blocks(&self) -> Vec<TextBlock> {
        self.blocks.clone()
    }

    fn write_block(&mut self, block: &TextBlock, text: &str) -> Result<(), ApplicationError> {
        let &(part_idx, ordinal) = self
            .index
            .get(block.index)
            .ok_or(ApplicationError::BlockOutOfRange(block.index))?;
        let part = &mut self.parts[part_idx];
        let paragraph = &part.paragraphs[ordinal];
        if let Some(reason) = paragraph.refusal {
            return Err(ApplicationError::UnsupportedStructure {
                block: block.index,
                reason: reason.to_string(),
            });
        }

        let rendered = render_paragraph(&part.xml, paragraph, text).map_err(|reason| {
            ApplicationError::Xml {
                block: block.index,
                reason,
            }
        })?;
        part.rewrites.insert(ordinal, rendered);
        self.blocks[block.index].text = text.to_string();
        Ok(())
    }

    fn serialize(&self) -> Result<Vec<u8>, DocumentError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (i, entry) in self.entries.iter().enumerate() {
            let options = FileOptions::default()
                .compression_method(entry.compression)
                .last_modified_time(entry.last_modified);
            if entry.is_dir {
                writer.add_directory(entry.name.clone(), options)?;
                continue;
            }
            writer.start_file(entry.name.clone(), options)?;
            match self
                .parts
                .iter()
                .find(|p| p.entry == i && !p.rewrites.is_empty())
            {
                Some(part) => writer.write_all(part.render().as_bytes())?,
                None => writer.write_all(&entry.data)?,
            }
        }
        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn package(document_body: &str, extra: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        let xml = format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:document {NS}><w:body>{document_body}</w:body></w:document>"#);
        writer.write_all(xml.as_bytes()).unwrap();
        for (name, content) in extra {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_runs_tabs_and_tables() {
        let body = concat!(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>"#,
            r#"<w:r><w:rPr><w:b/></w:rPr><w:t>Led </w:t></w:r><w:r><w:t xml:space="preserve">the &amp; team</w:t></w:r>"#,
            r#"<w:r><w:tab/><w:t>2020</w:t></w:r></w:p>"#,
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell text</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            r#"<w:p/>"#,
        );
        let doc = DocxDocument::from_bytes(&package(body, &[])).unwrap();
        let blocks = doc.blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text, "Led the & team\t2020");
        assert_eq!(blocks[0].location.container, ContainerKind::Body);
        assert_eq!(blocks[1].text, "Cell text");
        assert_eq!(blocks[1].location.container, ContainerKind::TableCell);
        assert!(blocks[2].is_blank());
    }

    #[test]
    fn test_rewrite_keeps_ppr_and_first_rpr() {
        let body = concat!(
            r#"<w:p w:rsidR="00AB"><w:pPr><w:pStyle w:val="Bullet"/></w:pPr>"#,
            r#"<w:r><w:rPr><w:i/></w:rPr><w:t>good</w:t></w:r><w:r><w:t> work</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>untouched</w:t></w:r></w:p>"#,
        );
        let mut doc = DocxDocument::from_bytes(&package(body, &[])).unwrap();
        let blocks = doc.blocks();
        doc.write_block(&blocks[0], "exceptional <work>\nline two").unwrap();

        let xml = doc.part_xml(DOCUMENT_PART).unwrap();
        assert!(xml.contains(concat!(
            r#"<w:p w:rsidR="00AB"><w:pPr><w:pStyle w:val="Bullet"/></w:pPr>"#,
            r#"<w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve">exceptional &lt;work&gt;</w:t>"#,
            r#"<w:br/><w:t xml:space="preserve">line two</w:t></w:r></w:p>"#,
        )));
        assert!(xml.contains(r#"<w:p><w:r><w:t>untouched</w:t></w:r></w:p>"#));

        let reopened = DocxDocument::from_bytes(&doc.serialize().unwrap()).unwrap();
        let blocks = reopened.blocks();
        assert_eq!(blocks[0].text, "exceptional <work>\nline two");
        assert_eq!(blocks[1].text, "untouched");
    }

    #[test]
    fn test_tracked_format_change_does_not_replace_run_properties() {
        let body = concat!(
            r#"<w:p><w:pPr><w:rPr><w:sz w:val="40"/></w:rPr></w:pPr>"#,
            r#"<w:r><w:rPr><w:b/><w:rPrChange w:id="1" w:author="HR"><w:rPr><w:i/></w:rPr></w:rPrChange></w:rPr>"#,
            r#"<w:t>good</w:t></w:r><w:r><w:rPr><w:u/></w:rPr><w:t> work</w:t></w:r></w:p>"#,
        );
        let mut doc = DocxDocument::from_bytes(&package(body, &[])).unwrap();
        let blocks = doc.blocks();
        assert_eq!(blocks[0].text, "good work");
        doc.write_block(&blocks[0], "exceptional work").unwrap();

        let xml = doc.part_xml(DOCUMENT_PART).unwrap();
        assert!(xml.contains(concat!(
            r#"<w:r><w:rPr><w:b/><w:rPrChange w:id="1" w:author="HR"><w:rPr><w:i/></w:rPr></w:rPrChange></w:rPr>"#,
            r#"<w:t xml:space="preserve">exceptional work</w:t></w:r></w:p>"#,
        )), "{xml}");
    }

    #[test]
    fn test_empty_run_properties_are_kept() {
        let body = r#"<w:p><w:r><w:rPr/><w:t>good</w:t></w:r></w:p>"#;
        let mut doc = DocxDocument::from_bytes(&package(body, &[])).unwrap();
        let blocks = doc.blocks();
        doc.write_block(&blocks[0], "strong").unwrap();
        let xml = doc.part_xml(DOCUMENT_PART).unwrap();
        assert!(xml.contains(r#"<w:p><w:r><w:rPr/><w:t xml:space="preserve">strong</w:t></w:r></w:p>"#));
    }

    #[test]
    fn test_nested_paragraph_refused() {
        let body = concat!(
            r#"<w:p><w:r><w:t>Outer</w:t></w:r><w:r><w:pict><w:txbxContent>"#,
            r#"<w:p><w:r><w:t>Inner</w:t></w:r></w:p></w:txbxContent></w:pict></w:r></w:p>"#,
        );
        let mut doc = DocxDocument::from_bytes(&package(body, &[])).unwrap();
        let blocks = doc.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Outer");
        assert!(matches!(
            doc.write_block(&blocks[0], "Changed"),
            Err(ApplicationError::UnsupportedStructure { block: 0, .. })
        ));
    }

    #[test]
    fn test_headers_and_footers_are_blocks() {
        let header = format!(r#"<w:hdr {NS}><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p></w:hdr>"#);
        let footer = format!(r#"<w:ftr {NS}><w:p><w:r><w:t>Page</w:t></w:r></w:p></w:ftr>"#);
        let bytes = package(
            r#"<w:p><w:r><w:t>Body</w:t></w:r></w:p>"#,
            &[("word/footer1.xml", &footer), ("word/header1.xml", &header)],
        );
        let doc = DocxDocument::from_bytes(&bytes).unwrap();
        let kinds: Vec<_> = doc.blocks().iter().map(|b| b.location.container).collect();
        assert_eq!(
            kinds,
            vec![ContainerKind::Body, ContainerKind::Header, ContainerKind::Footer]
        );
    }

    #[test]
    fn test_untouched_package_round_trips_entries() {
        let bytes = package(r#"<w:p><w:r><w:t>Same</w:t></w:r></w:p>"#, &[("word/styles.xml", "<w:styles/>")]);
        let doc = DocxDocument::from_bytes(&bytes).unwrap();
        let out = doc.serialize().unwrap();

        let mut original = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut rewritten = ZipArchive::new(Cursor::new(out.as_slice())).unwrap();
        assert_eq!(original.len(), rewritten.len());
        for i in 0..original.len() {
            let mut a = Vec::new();
            let mut b = Vec::new();
            let name = original.by_index(i).unwrap().name().to_string();
            original.by_index(i).unwrap().read_to_end(&mut a).unwrap();
            rewritten.by_name(&name).unwrap().read_to_end(&mut b).unwrap();
            assert_eq!(a, b, "entry {name} changed");
        }
    }

    #[test]
    fn test_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/styles.xml", FileOptions::default()).unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            DocxDocument::from_bytes(&bytes),
            Err(DocumentError::MissingPart(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            DocxDocument::from_bytes(b"plain text"),
            Err(DocumentError::Zip(_))
        ));
    }
}
