use serde::{Deserialize, Serialize};
use std::fmt;

// ===== DOCUMENT BLOCK TYPES =====
// A TextBlock is the unit of editing. Candidates, resolution and application
// never cross block boundaries.

/// Which kind of container a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    /// Top-level paragraph in the document body
    Body,
    /// Paragraph inside a table cell
    TableCell,
    /// Paragraph inside a header part
    Header,
    /// Paragraph inside a footer part
    Footer,
    /// One line of a plain-text document
    Line,
}

/// Opaque write-back handle for the structured backend.
///
/// For DOCX this names the package part (e.g. `word/document.xml`) and the
/// ordinal of the top-level `w:p` inside that part. For TXT the part is empty
/// and `paragraph` is the line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockLocation {
    pub part: String,
    pub paragraph: usize,
    pub container: ContainerKind,
}

impl fmt::Display for BlockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.part.is_empty() {
            write!(f, "line {}", self.paragraph + 1)
        } else {
            write!(f, "{}#p{} ({:?})", self.part, self.paragraph, self.container)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Stable index into the parent document's block list
    pub index: usize,
    pub location: BlockLocation,
    pub text: String,
}

impl TextBlock {
    pub fn new(index: usize, location: BlockLocation, text: impl Into<String>) -> Self {
        Self {
            index,
            location,
            text: text.into(),
        }
    }

    /// Convenience constructor for free-standing text (tests, flat backend)
    pub fn detached(text: impl Into<String>) -> Self {
        Self::new(
            0,
            BlockLocation {
                part: String::new(),
                paragraph: 0,
                container: ContainerKind::Line,
            },
            text,
        )
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// ===== ANNOTATION TYPES =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Verb,
    Adj,
    Noun,
    Other,
}

/// One annotated word. Offsets are half-open byte offsets into the owning
/// block's text and always sit on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    pub start: usize,
    pub end: usize,
    pub pos: PartOfSpeech,
    pub lemma: String,
}

impl Token {
    pub fn starts_uppercase(&self) -> bool {
        self.surface.chars().next().is_some_and(char::is_uppercase)
    }
}

// ===== REPLACEMENT TYPES =====

/// How strictly an occurrence of `old_text` must stand on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchBoundary {
    /// Any verbatim occurrence matches
    #[default]
    Literal,
    /// The occurrence must not be flanked by an alphanumeric character
    Word,
    /// Word-bounded on the left and followed only by horizontal whitespace
    /// up to the end of its line
    LineEnd,
    /// Preceded only by horizontal whitespace since the start of its line
    /// and word-bounded on the right
    LineStart,
    /// The occurrence is its line's entire content, ignoring surrounding
    /// horizontal whitespace
    WholeLine,
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

impl MatchBoundary {
    /// Check whether `text[start..end]` satisfies this boundary.
    pub fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        let left_ok = before.map_or(true, |c| !c.is_alphanumeric());
        let right_ok = after.map_or(true, |c| !c.is_alphanumeric());
        let blank_before = || {
            text[..start]
                .chars()
                .rev()
                .take_while(|c| *c != '\n')
                .all(is_horizontal_space)
        };
        let blank_after = || {
            text[end..]
                .chars()
                .take_while(|c| *c != '\n')
                .all(is_horizontal_space)
        };
        match self {
            Self::Literal => true,
            Self::Word => left_ok && right_ok,
            Self::LineEnd => left_ok && blank_after(),
            Self::LineStart => right_ok && blank_before(),
            Self::WholeLine => blank_before() && blank_after(),
        }
    }
}

/// "If `old_text` occurs in the block, replace one occurrence with `new_text`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementCandidate {
    pub old_text: String,
    pub new_text: String,
    /// Byte offset of the occurrence that triggered the candidate, if known.
    /// Informational: the resolver locates occurrences itself.
    #[serde(default)]
    pub source_offset: Option<usize>,
    #[serde(default)]
    pub boundary: MatchBoundary,
}

impl ReplacementCandidate {
    pub fn new(old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            old_text: old_text.into(),
            new_text: new_text.into(),
            source_offset: None,
            boundary: MatchBoundary::Literal,
        }
    }

    pub fn deletion(old_text: impl Into<String>) -> Self {
        Self::new(old_text, String::new())
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.source_offset = Some(offset);
        self
    }

    pub fn whole_word(mut self) -> Self {
        self.boundary = MatchBoundary::Word;
        self
    }

    pub fn at_line_end(mut self) -> Self {
        self.boundary = MatchBoundary::LineEnd;
        self
    }

    pub fn at_line_start(mut self) -> Self {
        self.boundary = MatchBoundary::LineStart;
        self
    }

    pub fn whole_line(mut self) -> Self {
        self.boundary = MatchBoundary::WholeLine;
        self
    }

    pub fn is_deletion(&self) -> bool {
        self.new_text.is_empty()
    }

    /// Validity rule shared by the aggregator and the resolver.
    ///
    /// `old_text` must be non-empty. A deletion of anything, whitespace
    /// included, is valid. Otherwise the two sides must differ; when
    /// `old_text` is blank the only accepted rewrite is a shorter blank run,
    /// so `"  "` may collapse to `" "` but never grow.
    pub fn is_valid(&self) -> bool {
        if self.old_text.is_empty() {
            return false;
        }
        if self.is_deletion() {
            return true;
        }
        if self.old_text == self.new_text {
            return false;
        }
        if self.old_text.trim().is_empty() {
            return self.new_text.trim().is_empty() && self.new_text.len() < self.old_text.len();
        }
        true
    }
}

impl fmt::Display for ReplacementCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} → {:?}", self.old_text, self.new_text)
    }
}

/// A concrete edit against one occurrence in one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEdit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl ResolvedEdit {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ===== DOCUMENT FORMAT =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    Txt,
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }

    pub fn supports_rewrite(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}
