use super::EditableDocument;
use crate::error::{ApplicationError, DocumentError};
use crate::types::*;
use serde::Serialize;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding a plain-text document was read with; it is written back the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextEncoding {
    Utf8,
    /// Fallback for bytes that are not valid UTF-8
    Latin1,
}

/// Plain-text document, one block per line. Line endings are kept per line.
#[derive(Debug, Clone)]
pub struct TextDocument {
    lines: Vec<String>,
    endings: Vec<&'static str>,
    encoding: TextEncoding,
    bom: bool,
}

impl TextDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let (bom, body) = match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => (true, rest),
            None => (false, bytes),
        };
        let (content, encoding) = match std::str::from_utf8(body) {
            Ok(s) => (s.to_string(), TextEncoding::Utf8),
            Err(_) => {
                tracing::debug!("input is not valid UTF-8, decoding as Latin-1");
                (body.iter().map(|&b| b as char).collect(), TextEncoding::Latin1)
            }
        };
        Ok(Self::split(&content, encoding, bom))
    }

    pub fn from_text(content: &str) -> Self {
        Self::split(content, TextEncoding::Utf8, false)
    }

    fn split(content: &str, encoding: TextEncoding, bom: bool) -> Self {
        let mut lines = Vec::new();
        let mut endings = Vec::new();
        for raw in content.split_inclusive('\n') {
            let (line, ending) = if let Some(l) = raw.strip_suffix("\r\n") {
                (l, "\r\n")
            } else if let Some(l) = raw.strip_suffix('\n') {
                (l, "\n")
            } else {
                (raw, "")
            };
            lines.push(line.to_string());
            endings.push(ending);
        }
        Self {
            lines,
            endings,
            encoding,
            bom,
        }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Current content as one string.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .zip(&self.endings)
            .map(|(line, ending)| format!("{line}{ending}"))
            .collect()
    }
}

impl EditableDocument for TextDocument {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Txt
    }

    fn blocks(&self) -> Vec<TextBlock> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                TextBlock::new(
                    i,
                    BlockLocation {
                        part: String::new(),
                        paragraph: i,
                        container: ContainerKind::Line,
                    },
                    line.clone(),
                )
            })
            .collect()
    }

    fn write_block(&mut self, block: &TextBlock, text: &str) -> Result<(), ApplicationError> {
        let line = self
            .lines
            .get_mut(block.index)
            .ok_or(ApplicationError::BlockOutOfRange(block.index))?;
        *line = text.to_string();
        Ok(())
    }

    fn serialize(&self) -> Result<Vec<u8>, DocumentError> {
        let text = self.text();
        let mut out = Vec::with_capacity(text.len() + UTF8_BOM.len());
        if self.bom {
            out.extend_from_slice(UTF8_BOM);
        }
        match self.encoding {
            TextEncoding::Utf8 => out.extend_from_slice(text.as_bytes()),
            TextEncoding::Latin1 => {
                for c in text.chars() {
                    let code = u32::from(c);
                    if code > 0xFF {
                        return Err(DocumentError::Encoding(format!(
                            "character {c:?} cannot be written back as Latin-1"
                        )));
                    }
                    out.push(code as u8);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings_preserved() {
        let input = b"Summary\r\nLed the team\nNo newline at end";
        let doc = TextDocument::from_bytes(input).unwrap();
        let blocks = doc.blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].text, "Led the team");
        assert_eq!(blocks[2].location.container, ContainerKind::Line);
        assert_eq!(doc.serialize().unwrap(), input.to_vec());
    }

    #[test]
    fn test_latin1_round_trip() {
        // "Café manager" in Latin-1
        let input = b"Caf\xE9 manager\n";
        let mut doc = TextDocument::from_bytes(input).unwrap();
        assert_eq!(doc.encoding(), TextEncoding::Latin1);
        let block = doc.blocks()[0].clone();
        assert_eq!(block.text, "Café manager");

        doc.write_block(&block, "Café director").unwrap();
        assert_eq!(doc.serialize().unwrap(), b"Caf\xE9 director\n".to_vec());

        doc.write_block(&block, "Café → director").unwrap();
        assert!(matches!(doc.serialize(), Err(DocumentError::Encoding(_))));
    }

    #[test]
    fn test_bom_kept() {
        let input = b"\xEF\xBB\xBFHello\n";
        let doc = TextDocument::from_bytes(input).unwrap();
        assert_eq!(doc.blocks()[0].text, "Hello");
        assert_eq!(doc.serialize().unwrap(), input.to_vec());
    }

    #[test]
    fn test_out_of_range_block() {
        let mut doc = TextDocument::from_text("one line");
        let mut block = TextBlock::detached("ghost");
        block.index = 4;
        assert_eq!(
            doc.write_block(&block, "x"),
            Err(ApplicationError::BlockOutOfRange(4))
        );
    }
}
