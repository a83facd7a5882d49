//! End-to-end tests over real files: TXT and DOCX packages are written to a
//! scratch directory, improved with `improve_file`, and read back.
//!
//! DOCX packages are built in memory with `zip::ZipWriter`, so no binary
//! fixtures are checked in.

use cvforge_core::config::STANDARD_GENERATORS;
use cvforge_core::documents::docx::DOCUMENT_PART;
use cvforge_core::rewrite::BlockOutcome;
use cvforge_core::{
    DocumentError, DocxDocument, EditableDocument, ImprovementOutcome, ResumeImprover, RuleBook,
    Stage,
};
use serde_json::Value;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

// ============================================================================
// Fixture helpers
// ============================================================================

const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;
const STYLES: &str = r#"<?xml version="1.0"?><w:styles><w:style w:styleId="Bullet"/></w:styles>"#;

struct Scratch(PathBuf);

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("cvforge-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }

    fn out(&self) -> PathBuf {
        self.0.join("out")
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn docx_package(body: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file(DOCUMENT_PART, options).unwrap();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document {NS}><w:body>{body}</w:body></w:document>"#
    );
    writer.write_all(xml.as_bytes()).unwrap();
    writer.start_file("word/styles.xml", options).unwrap();
    writer.write_all(STYLES.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn read_entry(package: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(package)).expect("valid zip");
    let mut file = archive.by_name(name).expect("entry present");
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

/// Built-in tables with a single generator enabled, so expected output is exact.
fn only(generator: &str) -> RuleBook {
    let mut rules = RuleBook::default();
    for name in STANDARD_GENERATORS.iter().filter(|n| **n != generator) {
        rules.pipeline.disable(name);
    }
    rules
}

fn spelling_only() -> RuleBook {
    only("Spelling")
}

fn improved(outcome: &ImprovementOutcome) -> (&Path, &cvforge_core::ImprovementReport) {
    match outcome {
        ImprovementOutcome::Improved {
            output: Some(path),
            report,
        } => (path.as_path(), report),
        other => panic!("expected a written improvement, got {other:?}"),
    }
}

// ============================================================================
// DOCX write-back
// ============================================================================

mod docx_round_trip {
    use super::*;

    const EDITED: &str = r#"<w:p w:rsidR="00A1"><w:pPr><w:pStyle w:val="Bullet"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Acheived </w:t></w:r><w:r><w:t>buisness growth</w:t></w:r></w:p>"#;
    const UNTOUCHED: &str = r#"<w:p w:rsidR="00B2" w:rsidRDefault="00B2"><w:r><w:t xml:space="preserve">Managed   vendors </w:t></w:r><w:proofErr w:type="spellStart"/></w:p>"#;
    const WITH_DRAWING: &str = r#"<w:p><w:r><w:drawing/></w:r><w:r><w:t>Logo acheived</w:t></w:r></w:p>"#;

    fn fixture() -> (Scratch, PathBuf) {
        let scratch = Scratch::new();
        let body = format!("{EDITED}{UNTOUCHED}{WITH_DRAWING}<w:sectPr/>");
        let input = scratch.write("jane.docx", &docx_package(&body));
        (scratch, input)
    }

    #[test]
    fn untouched_content_is_byte_identical() {
        let (scratch, input) = fixture();
        let improver = ResumeImprover::with_rules(spelling_only());
        let outcome = improver.improve_file(&input, &scratch.out());
        let (output, report) = improved(&outcome);

        assert_eq!(output, scratch.out().join("jane_improved.docx"));
        assert_eq!(report.stage, Stage::Serialized);

        let package = std::fs::read(output).unwrap();
        let xml = read_entry(&package, DOCUMENT_PART);
        assert!(xml.contains(UNTOUCHED), "untouched paragraph changed: {xml}");
        assert!(xml.contains(WITH_DRAWING), "refused paragraph changed: {xml}");
        assert!(xml.ends_with("<w:sectPr/></w:body></w:document>"));
        assert_eq!(read_entry(&package, "word/styles.xml"), STYLES);
        assert_eq!(read_entry(&package, "[Content_Types].xml"), "<Types/>");
    }

    #[test]
    fn edited_paragraph_keeps_formatting() {
        let (scratch, input) = fixture();
        let improver = ResumeImprover::with_rules(spelling_only());
        let outcome = improver.improve_file(&input, &scratch.out());
        let (output, _) = improved(&outcome);

        let package = std::fs::read(output).unwrap();
        let xml = read_entry(&package, DOCUMENT_PART);
        assert!(xml.contains(concat!(
            r#"<w:p w:rsidR="00A1"><w:pPr><w:pStyle w:val="Bullet"/></w:pPr>"#,
            r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Achieved business growth</w:t></w:r></w:p>"#,
        )));

        let reopened = DocxDocument::from_bytes(&package).unwrap();
        let texts: Vec<String> = reopened.blocks().into_iter().map(|b| b.text).collect();
        assert_eq!(texts, vec!["Achieved business growth", "Managed   vendors ", "Logo acheived"]);
    }

    #[test]
    fn refused_block_does_not_stop_the_others() {
        let (scratch, input) = fixture();
        let improver = ResumeImprover::with_rules(spelling_only());
        let outcome = improver.improve_file(&input, &scratch.out());
        let (_, report) = improved(&outcome);

        assert_eq!(report.blocks_total, 3);
        assert_eq!(report.blocks_modified, 1);
        assert_eq!(report.blocks_failed, 1);
        assert_eq!(report.per_block[1].outcome, BlockOutcome::Unchanged);
        assert!(matches!(
            report.per_block[2].outcome,
            BlockOutcome::Failed { .. }
        ));
    }

    #[test]
    fn report_serializes() {
        let (scratch, input) = fixture();
        let improver = ResumeImprover::with_rules(spelling_only());
        let outcome = improver.improve_file(&input, &scratch.out());
        let (_, report) = improved(&outcome);

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["stage"], "serialized");
        assert_eq!(json["format"], "Docx");
        assert_eq!(json["blocks_total"], 3);
        assert_eq!(json["edits_applied"], 2);
        assert_eq!(json["per_block"][0]["outcome"]["status"], "rewritten");
        assert_eq!(json["per_block"][2]["outcome"]["status"], "failed");
        assert!(json["per_block"][0]["location"].is_string());
        assert_eq!(json["source_sha256"].as_str().map(str::len), Some(64));
    }
}

// ============================================================================
// TXT and unsupported inputs
// ============================================================================

mod text_files {
    use super::*;

    #[test]
    fn full_pipeline_on_text_file() {
        let scratch = Scratch::new();
        let input = scratch.write("cv.txt", b"I was responsible for sales\n\nHelped the team\n");
        let improver = ResumeImprover::with_rules(RuleBook::default());
        let outcome = improver.improve_file(&input, &scratch.out());
        let (output, report) = improved(&outcome);

        assert_eq!(output, scratch.out().join("cv_improved.txt"));
        assert!(report.blocks_modified >= 2);
        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.contains("I directed "), "{text}");
        assert!(text.contains("\n\nFacilitated the team"), "{text}");
        assert!(text.ends_with('\n'));
        // the input is never modified
        assert_eq!(
            std::fs::read_to_string(&input).unwrap(),
            "I was responsible for sales\n\nHelped the team\n"
        );
    }

    #[test]
    fn phrases_never_span_blocks() {
        let scratch = Scratch::new();
        let input = scratch.write("cv.txt", b"Ran the respon\nsible for sales");
        let improver = ResumeImprover::with_rules(only("WeakPhrases"));
        let outcome = improver.improve_file(&input, &scratch.out());
        let (output, report) = improved(&outcome);

        assert_eq!(report.edits_applied, 0);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "Ran the respon\nsible for sales"
        );
    }

    #[test]
    fn dry_run_writes_nothing() {
        let scratch = Scratch::new();
        let input = scratch.write("cv.txt", b"Acheived targets");
        let improver = ResumeImprover::with_rules(spelling_only()).with_dry_run(true);
        let outcome = improver.improve_file(&input, &scratch.out());

        match outcome {
            ImprovementOutcome::Improved { output, report } => {
                assert!(output.is_none());
                assert_eq!(report.edits_applied, 1);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!scratch.out().join("cv_improved.txt").exists());
    }

    #[test]
    fn pdf_is_rejected_before_extraction() {
        let scratch = Scratch::new();
        let input = scratch.write("cv.pdf", b"%PDF-1.4 not really");
        let improver = ResumeImprover::with_rules(RuleBook::default());

        match improver.improve_file(&input, &scratch.out()) {
            ImprovementOutcome::Failed {
                stage,
                error,
                original,
            } => {
                assert_eq!(stage, Stage::Extracted);
                assert_eq!(original, input);
                assert!(matches!(error, DocumentError::UnsupportedFormat(_)));
                assert!(error.to_string().contains("convert to DOCX"));
            }
            other => panic!("PDF must not be improved: {other:?}"),
        }
        assert!(!scratch.out().exists());
    }

    #[test]
    fn corrupt_docx_fails_cleanly() {
        let scratch = Scratch::new();
        let input = scratch.write("broken.docx", b"not a zip archive");
        let improver = ResumeImprover::with_rules(RuleBook::default());
        let outcome = improver.improve_file(&input, &scratch.out());
        assert!(!outcome.is_improved());
        assert!(matches!(
            outcome,
            ImprovementOutcome::Failed {
                stage: Stage::Extracted,
                error: DocumentError::Zip(_),
                ..
            }
        ));
    }

    #[test]
    fn unknown_extension_fails() {
        let scratch = Scratch::new();
        let input = scratch.write("cv.rtf", b"{\\rtf1}");
        let improver = ResumeImprover::with_rules(RuleBook::default());
        assert!(!improver.improve_file(&input, &scratch.out()).is_improved());
    }
}
