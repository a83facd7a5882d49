use crate::analysis;
use crate::annotation::{AnnotationOracle, LexiconTagger};
use crate::config::RuleBook;
use crate::documents::{detect_format, load_document, EditableDocument};
use crate::error::DocumentError;
use crate::generators::{DebugConfig, GenerationContext, GeneratorRegistry};
use crate::rewrite::{
    apply_to_document, resolve, Aggregation, BlockOutcome, BlockPlan, GeneratorOutput, Resolution,
};
use crate::types::*;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Progress of one improvement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Extracted,
    Annotated,
    CandidatesGenerated,
    Resolved,
    Applied,
    Serialized,
    Failed,
}

/// Wall-clock time per stage and per generator for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineTimings {
    pub stages: Vec<StageTiming>,
    /// Slowest first
    pub generators: Vec<GeneratorTiming>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub millis: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratorTiming {
    pub generator: String,
    /// Blocks the generator ran on
    pub blocks: usize,
    pub candidates: usize,
    pub failures: usize,
    pub millis: f64,
}

impl PipelineTimings {
    pub fn generator(&self, name: &str) -> Option<&GeneratorTiming> {
        self.generators.iter().find(|g| g.generator == name)
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}

#[derive(Default)]
struct GeneratorTally {
    blocks: usize,
    candidates: usize,
    failures: usize,
    elapsed: Duration,
}

/// Collects stage and generator timings when profiling is enabled; a
/// disabled profiler only runs the closures.
struct PipelineProfiler {
    enabled: bool,
    stages: Vec<(Stage, Duration)>,
    /// Registration order is kept for equal timings
    generators: Vec<(String, GeneratorTally)>,
}

impl PipelineProfiler {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stages: Vec::new(),
            generators: Vec::new(),
        }
    }

    fn time_stage<R>(&mut self, stage: Stage, f: impl FnOnce() -> R) -> R {
        if !self.enabled {
            return f();
        }
        let start = Instant::now();
        let result = f();
        self.record_stage(stage, start.elapsed());
        result
    }

    /// Loading and block extraction both count towards `Extracted`.
    fn record_stage(&mut self, stage: Stage, elapsed: Duration) {
        if !self.enabled {
            return;
        }
        tracing::debug!(?stage, "⏱️  {:.1}ms", elapsed.as_secs_f64() * 1000.0);
        match self.stages.iter_mut().find(|(s, _)| *s == stage) {
            Some((_, total)) => *total += elapsed,
            None => self.stages.push((stage, elapsed)),
        }
    }

    fn record_generators(&mut self, outputs: &[GeneratorOutput]) {
        if !self.enabled {
            return;
        }
        for output in outputs {
            let index = match self.generators.iter().position(|(n, _)| *n == output.generator) {
                Some(index) => index,
                None => {
                    self.generators.push((output.generator.clone(), GeneratorTally::default()));
                    self.generators.len() - 1
                }
            };
            let tally = &mut self.generators[index].1;
            tally.blocks += 1;
            tally.candidates += output.candidate_count();
            tally.failures += usize::from(output.result.is_err());
            tally.elapsed += output.elapsed;
        }
    }

    /// Log the summary and hand it over for the report.
    fn finish(self) -> Option<PipelineTimings> {
        if !self.enabled {
            return None;
        }
        let millis = |d: Duration| d.as_secs_f64() * 1000.0;

        let mut generators: Vec<GeneratorTiming> = self
            .generators
            .into_iter()
            .map(|(generator, tally)| GeneratorTiming {
                generator,
                blocks: tally.blocks,
                candidates: tally.candidates,
                failures: tally.failures,
                millis: millis(tally.elapsed),
            })
            .collect();
        generators.sort_by(|a, b| b.millis.total_cmp(&a.millis));

        let timings = PipelineTimings {
            stages: self
                .stages
                .iter()
                .map(|(stage, d)| StageTiming {
                    stage: *stage,
                    millis: millis(*d),
                })
                .collect(),
            generators,
        };

        let total: f64 = timings.stages.iter().map(|s| s.millis).sum();
        tracing::info!("📊 Pipeline timings:");
        for stage in &timings.stages {
            let percentage = stage.millis / total.max(f64::EPSILON) * 100.0;
            tracing::info!(
                "   {:.<35} {:.1}ms ({:.1}%)",
                format!("{:?}", stage.stage),
                stage.millis,
                percentage
            );
        }
        tracing::info!("   {:.<35} {:.1}ms", "Total", total);
        if !timings.generators.is_empty() {
            tracing::info!("   Generators, slowest first:");
            for g in &timings.generators {
                tracing::info!(
                    "   {:.<35} {:.2}ms over {} blocks, {} candidates",
                    g.generator,
                    g.millis,
                    g.blocks,
                    g.candidates
                );
            }
        }
        Some(timings)
    }
}

/// What happened to one block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary {
    pub index: usize,
    pub location: String,
    /// False when the oracle failed and token-based generators were skipped
    pub annotated: bool,
    pub candidates: usize,
    pub edits: usize,
    pub discarded: usize,
    pub failed_generators: Vec<String>,
    pub outcome: BlockOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImprovementReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// SHA-256 of the input file, or of the extracted text for in-memory documents
    pub source_sha256: String,
    pub format: DocumentFormat,
    pub blocks_total: usize,
    pub blocks_modified: usize,
    pub blocks_failed: usize,
    pub edits_applied: usize,
    pub candidates_considered: usize,
    pub per_block: Vec<BlockSummary>,
    pub stage: Stage,
    pub score_before: Option<f64>,
    pub score_after: Option<f64>,
    /// Present when profiling was enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<PipelineTimings>,
}

impl ImprovementReport {
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Serialize(e.to_string()))
    }
}

/// Result of improving one file. A failed attempt writes nothing; the
/// caller keeps using `original`.
#[derive(Debug)]
pub enum ImprovementOutcome {
    Improved {
        /// `None` on a dry run
        output: Option<PathBuf>,
        report: ImprovementReport,
    },
    Failed {
        /// Stage that was being attempted
        stage: Stage,
        error: DocumentError,
        original: PathBuf,
    },
}

impl ImprovementOutcome {
    pub fn is_improved(&self) -> bool {
        matches!(self, Self::Improved { .. })
    }

    pub fn report(&self) -> Option<&ImprovementReport> {
        match self {
            Self::Improved { report, .. } => Some(report),
            Self::Failed { .. } => None,
        }
    }
}

/// Per-block working state between stages.
struct BlockWork {
    block: TextBlock,
    tokens: Option<Vec<Token>>,
    aggregation: Aggregation,
    resolution: Resolution,
}

/// Runs generators, resolution and write-back over whole documents.
pub struct ResumeImprover {
    rules: RuleBook,
    oracle: Box<dyn AnnotationOracle>,
    registry: GeneratorRegistry,
    debug_config: DebugConfig,
    profile: bool,
    dry_run: bool,
}

impl ResumeImprover {
    pub fn new(rules: RuleBook, oracle: Box<dyn AnnotationOracle>, registry: GeneratorRegistry) -> Self {
        Self {
            rules,
            oracle,
            registry,
            debug_config: DebugConfig::disabled(),
            profile: false,
            dry_run: false,
        }
    }

    /// Lexicon tagger plus the generators enabled in the rule book's pipeline.
    pub fn with_rules(rules: RuleBook) -> Self {
        let oracle = Box::new(LexiconTagger::new(&rules));
        let registry = GeneratorRegistry::from_pipeline(&rules.pipeline);
        Self::new(rules, oracle, registry)
    }

    pub fn with_debug(mut self, debug_config: DebugConfig) -> Self {
        self.debug_config = debug_config;
        self
    }

    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.profile = enabled;
        self
    }

    /// Run the whole pipeline but never write the output file.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Improve an already-loaded document in place. The report stops at
    /// [`Stage::Applied`]; serialization is left to the caller.
    ///
    /// Infallible: a block that cannot be rewritten is recorded in the
    /// report and left as it was.
    pub fn improve(&self, doc: &mut dyn EditableDocument) -> ImprovementReport {
        let mut profiler = PipelineProfiler::new(self.profile);
        let mut report = self.improve_with_profiler(doc, None, &mut profiler);
        report.timings = profiler.finish();
        report
    }

    fn improve_with_profiler(
        &self,
        doc: &mut dyn EditableDocument,
        source_sha256: Option<String>,
        profiler: &mut PipelineProfiler,
    ) -> ImprovementReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        let blocks = profiler.time_stage(Stage::Extracted, || doc.blocks());
        reached(Stage::Extracted);
        let document_text = doc.document_text();
        let source_sha256 = source_sha256.unwrap_or_else(|| sha256_hex(document_text.as_bytes()));
        let score_before = self.score(&document_text);
        tracing::info!(%run_id, blocks = blocks.len(), "extracted {:?} document", doc.format());

        let mut work: Vec<BlockWork> = blocks
            .into_iter()
            .map(|block| BlockWork {
                block,
                tokens: None,
                aggregation: Aggregation::default(),
                resolution: Resolution::default(),
            })
            .collect();

        profiler.time_stage(Stage::Annotated, || {
            for item in work.iter_mut().filter(|w| !w.block.is_blank()) {
                match self.oracle.annotate(&item.block.text) {
                    Ok(tokens) => item.tokens = Some(tokens),
                    Err(err) => tracing::warn!(
                        block = item.block.index,
                        "annotation failed, token-based generators skipped: {err}"
                    ),
                }
            }
        });
        reached(Stage::Annotated);

        let generation_started = Instant::now();
        for item in work.iter_mut().filter(|w| !w.block.is_blank()) {
            let ctx = GenerationContext {
                block: &item.block,
                tokens: item.tokens.as_deref(),
                document_text: &document_text,
                rules: &self.rules,
            };
            let outputs = self.registry.run(&ctx, &self.debug_config);
            profiler.record_generators(&outputs);
            item.aggregation = Aggregation::collect(outputs);
        }
        profiler.record_stage(Stage::CandidatesGenerated, generation_started.elapsed());
        reached(Stage::CandidatesGenerated);

        profiler.time_stage(Stage::Resolved, || {
            for item in work.iter_mut() {
                item.resolution = resolve(&item.block.text, &item.aggregation.candidates);
                for edit in &item.resolution.edits {
                    tracing::trace!(
                        block = item.block.index,
                        "{}..{} {:?} → {:?}",
                        edit.start,
                        edit.end,
                        &item.block.text[edit.start..edit.end],
                        edit.replacement
                    );
                }
            }
        });

        reached(Stage::Resolved);

        let plans: Vec<BlockPlan> = work
            .iter()
            .map(|w| BlockPlan {
                block: w.block.clone(),
                edits: w.resolution.edits.clone(),
            })
            .collect();
        let applied = profiler.time_stage(Stage::Applied, || apply_to_document(&mut *doc, &plans));
        let stage = reached(Stage::Applied);
        let score_after = self.score(&doc.document_text());

        let per_block: Vec<BlockSummary> = work
            .iter()
            .map(|w| BlockSummary {
                index: w.block.index,
                location: w.block.location.to_string(),
                annotated: w.tokens.is_some(),
                candidates: w.aggregation.candidates.len(),
                edits: w.resolution.edits.len(),
                discarded: w.resolution.discarded,
                failed_generators: w.aggregation.failed_generators.clone(),
                outcome: applied
                    .outcome(w.block.index)
                    .cloned()
                    .unwrap_or(BlockOutcome::Unchanged),
            })
            .collect();

        let report = ImprovementReport {
            run_id,
            started_at,
            source_sha256,
            format: doc.format(),
            blocks_total: work.len(),
            blocks_modified: applied.blocks_modified,
            blocks_failed: applied.blocks_failed,
            edits_applied: applied.edits_applied,
            candidates_considered: work.iter().map(|w| w.aggregation.candidates.len()).sum(),
            per_block,
            stage,
            score_before,
            score_after,
            timings: None,
        };
        tracing::info!(
            "{} of {} blocks rewritten, {} edits applied, {} blocks refused",
            report.blocks_modified,
            report.blocks_total,
            report.edits_applied,
            report.blocks_failed
        );
        report
    }

    fn score(&self, text: &str) -> Option<f64> {
        match analysis::analyze(text, &self.rules, self.oracle.as_ref()) {
            Ok(report) => Some(report.overall_score),
            Err(err) => {
                tracing::debug!("no score: {err}");
                None
            }
        }
    }

    /// Improve `input` and write `<stem>_improved.<ext>` into `output_dir`.
    pub fn improve_file(&self, input: &Path, output_dir: &Path) -> ImprovementOutcome {
        let fail = |stage: Stage, error: DocumentError| {
            tracing::error!(input = %input.display(), ?stage, "improvement failed: {error}");
            ImprovementOutcome::Failed {
                stage,
                error,
                original: input.to_path_buf(),
            }
        };

        let mut profiler = PipelineProfiler::new(self.profile);
        let loaded = profiler.time_stage(Stage::Extracted, || -> Result<_, DocumentError> {
            let format = detect_format(input)?;
            if !format.supports_rewrite() {
                return Err(DocumentError::pdf_not_supported());
            }
            let bytes = std::fs::read(input)?;
            let doc = load_document(format, &bytes)?;
            Ok((format, sha256_hex(&bytes), doc))
        });
        let (format, source_sha256, mut doc) = match loaded {
            Ok(loaded) => loaded,
            Err(error) => return fail(Stage::Extracted, error),
        };

        let mut report = self.improve_with_profiler(doc.as_mut(), Some(source_sha256), &mut profiler);

        let serialized = profiler.time_stage(Stage::Serialized, || doc.serialize());
        let bytes = match serialized {
            Ok(bytes) => bytes,
            Err(error) => return fail(Stage::Serialized, error),
        };
        report.stage = reached(Stage::Serialized);

        let output = if self.dry_run {
            tracing::info!("dry run, not writing output");
            None
        } else {
            let path = output_path(input, output_dir, format);
            let written = std::fs::create_dir_all(output_dir).and_then(|()| std::fs::write(&path, &bytes));
            if let Err(error) = written {
                return fail(Stage::Serialized, error.into());
            }
            tracing::info!(output = %path.display(), "wrote improved document");
            Some(path)
        };

        report.timings = profiler.finish();
        ImprovementOutcome::Improved { output, report }
    }
}

fn reached(stage: Stage) -> Stage {
    tracing::debug!(?stage, "stage reached");
    stage
}

/// `<output_dir>/<stem>_improved.<ext>`
pub fn output_path(input: &Path, output_dir: &Path, format: DocumentFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    output_dir.join(format!("{stem}_improved.{}", format.extension()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::UnavailableOracle;
    use crate::documents::TextDocument;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/in/jane_cv.docx"), Path::new("/out"), DocumentFormat::Docx),
            PathBuf::from("/out/jane_cv_improved.docx")
        );
    }

    #[test]
    fn test_improve_text_document() {
        let improver = ResumeImprover::with_rules(RuleBook::default());
        let mut doc = TextDocument::from_text("I was responsible for sales\n\nHelped the team");
        let report = improver.improve(&mut doc);

        assert_eq!(report.stage, Stage::Applied);
        assert_eq!(report.blocks_total, 3);
        assert_eq!(report.per_block[1].outcome, BlockOutcome::Unchanged);
        assert!(report.blocks_modified >= 2);
        let text = doc.text();
        assert!(text.contains("I directed "), "{text}");
        assert!(text.contains("Facilitated the team"), "{text}");
        // no bullets anywhere, so the achievement line gets one
        assert!(text.starts_with("• I "), "{text}");
    }

    #[test]
    fn test_oracle_failure_degrades() {
        let mut rules = RuleBook::default();
        for name in ["BusinessKeywords", "Structure"] {
            rules.pipeline.disable(name);
        }
        let registry = GeneratorRegistry::from_pipeline(&rules.pipeline);
        let improver = ResumeImprover::new(rules, Box::new(UnavailableOracle), registry);
        let mut doc = TextDocument::from_text("Helped the team, responsible for hiring");
        let report = improver.improve(&mut doc);

        let block = &report.per_block[0];
        assert!(!block.annotated);
        assert!(block.failed_generators.contains(&"PowerVerbs".to_string()));
        // literal tables still apply; the verb stays
        assert_eq!(doc.text(), "Helped the team, spearheaded hiring.");
    }

    #[test]
    fn test_profiling_times_every_generator() {
        let improver = ResumeImprover::with_rules(RuleBook::default()).with_profiling(true);
        let mut doc = TextDocument::from_text("Helped the team\n\nGood work on various things");
        let report = improver.improve(&mut doc);

        let timings = report.timings.expect("profiling was enabled");
        for name in improver.registry().names() {
            let generator = timings.generator(name).expect("every generator is timed");
            // the blank line in between is never scanned
            assert_eq!(generator.blocks, 2, "{name}");
        }
        assert_eq!(timings.generators.len(), improver.registry().len());
        assert!(timings.generators.windows(2).all(|w| w[0].millis >= w[1].millis));
        let candidates: usize = timings.generators.iter().map(|g| g.candidates).sum();
        assert!(candidates >= report.candidates_considered);
        for stage in [Stage::Extracted, Stage::Annotated, Stage::CandidatesGenerated, Stage::Resolved, Stage::Applied] {
            assert!(timings.stage(stage).is_some(), "{stage:?}");
        }
        assert!(timings.stage(Stage::Serialized).is_none());
    }

    #[test]
    fn test_profiler_counts_generator_failures() {
        let rules = RuleBook::default();
        let registry = GeneratorRegistry::from_pipeline(&rules.pipeline);
        let improver =
            ResumeImprover::new(rules, Box::new(UnavailableOracle), registry).with_profiling(true);
        let mut doc = TextDocument::from_text("Helped the team");
        let timings = improver.improve(&mut doc).timings.unwrap();
        assert_eq!(timings.generator("PowerVerbs").unwrap().failures, 1);
        assert_eq!(timings.generator("Spelling").unwrap().failures, 0);
    }

    #[test]
    fn test_no_timings_unless_profiling() {
        let improver = ResumeImprover::with_rules(RuleBook::default());
        let mut doc = TextDocument::from_text("Helped the team");
        let report = improver.improve(&mut doc);
        assert!(report.timings.is_none());
        assert!(!report.to_json().unwrap().contains("\"timings\""));
    }

    #[test]
    fn test_sha_is_hex() {
        let digest = sha256_hex(b"abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
