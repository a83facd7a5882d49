use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cvforge_core::documents::extract_text;
use cvforge_core::{
    analyze, feedback, AnalysisReport, DebugConfig, FeedbackReport, GeneratorRegistry,
    ImprovementOutcome, LexiconTagger, ResumeImprover, RuleBook,
};

#[derive(Parser)]
#[command(name = "cvforge")]
#[command(about = "Analyze and rewrite résumés with configurable substitution rules")]
struct Args {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Trace candidates whose text matches this pattern (regex, or plain substring)
    #[arg(long, global = true)]
    debug_filter: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite a TXT or DOCX résumé into `<stem>_improved.<ext>`
    Improve {
        /// Résumé to improve
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Rule book (YAML); built-in tables are used for anything it omits
        #[arg(short, long)]
        config: Option<String>,

        /// Write the improvement report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Disable a generator by name (repeatable)
        #[arg(long)]
        disable: Vec<String>,

        /// Run every stage but do not write the improved document
        #[arg(long)]
        dry_run: bool,

        /// Log timings for each pipeline stage
        #[arg(long)]
        profile: bool,
    },

    /// Score a résumé (TXT, DOCX or PDF) without changing it
    Analyze {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        config: Option<String>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,

        /// Include written recommendations (always shown in text mode)
        #[arg(long)]
        feedback: bool,
    },

    /// Show the generator pipeline and rule table sizes
    ShowRules {
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Write the built-in rule book as YAML, as a starting point for custom rules
    DumpRules {
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("cvforge={default_level},cvforge_core={default_level}"))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    let debug_config = DebugConfig::new(
        args.verbose || !args.debug_filter.is_empty(),
        args.debug_filter,
    );

    match args.command {
        Command::Improve {
            input,
            output_dir,
            config,
            report,
            disable,
            dry_run,
            profile,
        } => {
            let mut rules = load_rules(config.as_deref());
            for name in &disable {
                if !rules.pipeline.disable(name) {
                    tracing::warn!("Unknown generator: {name}. Nothing to disable");
                }
            }
            let improver = ResumeImprover::with_rules(rules)
                .with_debug(debug_config)
                .with_profiling(profile)
                .with_dry_run(dry_run);
            improve(&improver, &input, output_dir, report.as_deref())
        }
        Command::Analyze {
            input,
            config,
            json,
            feedback: with_feedback,
        } => {
            let rules = load_rules(config.as_deref());
            let text = extract_text(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let oracle = LexiconTagger::new(&rules);
            let analysis = analyze(&text, &rules, &oracle)
                .with_context(|| format!("Failed to analyze {}", input.display()))?;
            let recommendations = feedback(&text, &analysis);
            if json && with_feedback {
                let combined = serde_json::json!({
                    "analysis": analysis,
                    "feedback": recommendations,
                });
                println!("{}", serde_json::to_string_pretty(&combined)?);
            } else if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
                print_feedback(&recommendations);
            }
            Ok(())
        }
        Command::ShowRules { config } => {
            let rules = load_rules(config.as_deref());
            show_rules(&rules);
            Ok(())
        }
        Command::DumpRules { output } => {
            let yaml = RuleBook::default().to_yaml()?;
            std::fs::write(&output, yaml)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("💾 Built-in rule book written to: {}", output.display());
            Ok(())
        }
    }
}

fn load_rules(path: Option<&str>) -> RuleBook {
    match path {
        Some(p) => println!("📋 Loading rule book from: {p}"),
        None => println!("📋 Using built-in rule book"),
    }
    RuleBook::load_with_fallback(path)
}

fn improve(
    improver: &ResumeImprover,
    input: &Path,
    output_dir: Option<PathBuf>,
    report_path: Option<&Path>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let output_dir = output_dir.unwrap_or_else(|| {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    println!("📄 Processing: {}", input.display());
    match improver.improve_file(input, &output_dir) {
        ImprovementOutcome::Improved { output, report } => {
            println!("✅ Improved résumé");
            println!("   - Blocks rewritten: {}/{}", report.blocks_modified, report.blocks_total);
            println!("   - Edits applied: {}", report.edits_applied);
            if report.blocks_failed > 0 {
                println!("   - Blocks left unchanged (unsupported structure): {}", report.blocks_failed);
            }
            if let (Some(before), Some(after)) = (report.score_before, report.score_after) {
                println!("   - Score: {before:.1} → {after:.1}");
            }
            match output {
                Some(path) => println!("💾 Saved to: {}", path.display()),
                None => println!("🔍 Dry run: nothing written"),
            }
            if let Some(path) = report_path {
                std::fs::write(path, report.to_json()?)
                    .with_context(|| format!("Failed to write report {}", path.display()))?;
                println!("💾 Report saved to: {}", path.display());
            }
            Ok(())
        }
        ImprovementOutcome::Failed { stage, error, original } => Err(anyhow::Error::new(error)
            .context(format!(
                "Could not improve {} (stage: {stage:?}); the original is unchanged",
                original.display()
            ))),
    }
}

fn print_analysis(report: &AnalysisReport) {
    let scores = &report.component_scores;
    println!("📊 Overall score: {:.1}/100", report.overall_score);
    println!("   - Grammar & spelling:  {:.1}", scores.grammar_spelling);
    println!("   - Clarity & structure: {:.1}", scores.clarity_structure);
    println!("   - Language strength:   {:.1}", scores.language_strength);
    println!("   - Keyword usage:       {:.1}", scores.keyword_usage);

    if !report.grammar.misspellings.is_empty() {
        println!("\n✏️  Misspellings:");
        for m in &report.grammar.misspellings {
            println!("   {} → {}", m.word, m.suggestion);
        }
    }
    if !report.grammar.unterminated_sentences.is_empty() {
        println!(
            "\n⚠️  {} sentences without terminal punctuation",
            report.grammar.unterminated_sentences.len()
        );
    }
    if !report.language.weak_terms.is_empty() {
        println!("\n💬 Weak terms: {}", report.language.weak_terms.join(", "));
    }
    if !report.keywords.found.is_empty() {
        println!("\n🔑 Keywords:");
        for (category, terms) in &report.keywords.found {
            println!("   {category}: {}", terms.join(", "));
        }
    }
}

fn print_feedback(report: &FeedbackReport) {
    for section in &report.sections {
        println!("\n📝 {}: {}", section.title, section.summary);
        for detail in &section.details {
            println!("   {detail}");
        }
        for suggestion in &section.suggestions {
            println!("   💡 {suggestion}");
        }
    }
}

fn show_rules(rules: &RuleBook) {
    let registry = GeneratorRegistry::from_pipeline(&rules.pipeline);
    println!("\n⚙️  Generators (registration order):");
    for entry in &rules.pipeline.generators {
        let mark = if entry.enabled { "✓" } else { "✗" };
        println!("  {mark} {}", entry.name);
    }
    println!("  {} active", registry.len());

    println!("\n📚 Rule tables:");
    for (name, size) in rules.table_sizes() {
        println!("  {name:.<35} {size}");
    }

    println!("\n📝 Usage Examples:");
    println!("  cvforge improve -i resume.docx");
    println!("  cvforge improve -i resume.txt -o out/ --report report.json --disable SentenceSplit");
    println!("  cvforge analyze -i resume.pdf --json --feedback");
    println!("  cvforge dump-rules -o rules.yaml");
}
