#![allow(
    clippy::needless_pass_by_value,    // clap requires owned values
    clippy::fn_params_excessive_bools, // CLI commands have boolean flags
    clippy::must_use_candidate,        // CLI functions don't need must_use
)]

//! Sketchgen CLI - Flutter page generation from sketch detections
//!
//! Reads detections (or raw detector observations) as JSON and writes Dart
//! source for a Flutter page.

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use sketchgen_core::{
    parse_detections, samples, CodeGenerator, DetectionSet, GeneratedCode, GeneratorConfig,
    GeneratorConfigBuilder, IngestOptions, InputFormat, LabelMap, RowStrategy,
};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Project config file picked up from the working directory
const PROJECT_CONFIG: &str = ".sketchgen.toml";

/// Output verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with debug logging
    Verbose,
}

impl Verbosity {
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Compare each element with the previous one (rows may drift)
    DriftingAnchor,
    /// Compare each element with the top of its row
    RowAnchor,
}

impl From<StrategyArg> for RowStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::DriftingAnchor => Self::DriftingAnchor,
            StrategyArg::RowAnchor => Self::RowAnchor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Taxonomy {
    /// UI vocabulary (button, input, toggle, ...)
    Ui,
    /// Legacy COCO demo mapping (cell phone, book, tv, ...)
    Coco,
}

impl Taxonomy {
    fn label_map(self) -> LabelMap {
        match self {
            Self::Ui => LabelMap::ui_elements(),
            Self::Coco => LabelMap::coco_demo(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sketchgen",
    about = "Generate Flutter pages from sketch detections",
    long_about = "Turn UI element detections from a hand-drawn sketch into Flutter source.\n\
                  \n\
                  Input is JSON: an array of detections, a {page_name, detections} object,\n\
                  or an array of raw detector observations.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Config file (defaults to ./.sketchgen.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options controlling how input files are read
#[derive(ClapArgs, Debug, Clone)]
struct InputOptions {
    /// Treat input as raw detector observations (label, confidence, box)
    #[arg(long)]
    raw: bool,

    /// Drop raw observations at or below this confidence
    #[arg(long, value_name = "SCORE", default_value_t = 0.3)]
    min_confidence: f32,

    /// Suppress overlapping raw observations of the same kind at this IoU
    #[arg(long, value_name = "IOU")]
    nms: Option<f32>,

    /// Label vocabulary for raw observations
    #[arg(long, value_enum, default_value = "ui")]
    taxonomy: Taxonomy,

    /// Row grouping strategy (overrides the config file)
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
}

impl InputOptions {
    fn format(&self) -> InputFormat {
        if self.raw {
            InputFormat::Raw
        } else {
            InputFormat::Auto
        }
    }

    fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            min_confidence: self.min_confidence,
            iou_threshold: self.nms,
            label_map: self.taxonomy.label_map(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a Flutter page from a detection file
    #[command(long_about = "Generate a Flutter page from a detection file.\n\
                      \n\
                      Use '-' as INPUT to read from stdin. Writes to stdout unless -o is given.")]
    Generate {
        /// Input JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output Dart file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Page class name (defaults to the input's page_name, then the config)
        #[arg(long, value_name = "NAME")]
        page_name: Option<String>,

        #[command(flatten)]
        input_options: InputOptions,
    },

    /// Print the first widgets of a detection file in reading order
    Preview {
        /// Input JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Number of widgets to show (defaults to the config's preview_limit)
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,

        #[command(flatten)]
        input_options: InputOptions,
    },

    /// Show which element kind each label maps to
    Classify {
        /// Raw detector labels
        #[arg(value_name = "LABEL", required = true)]
        labels: Vec<String>,

        /// Label vocabulary
        #[arg(long, value_enum, default_value = "ui")]
        taxonomy: Taxonomy,
    },

    /// Generate the built-in login form sample
    Demo {
        /// Output Dart file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Page class name
        #[arg(long, value_name = "NAME", default_value = "LoginPage")]
        page_name: String,
    },

    /// Generate one Dart file per input, in parallel
    #[command(long_about = "Generate one Dart file per input, in parallel.\n\
                      \n\
                      Each output is named after its input file (login.json -> login.dart).")]
    Batch {
        /// Input JSON files
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for generated files
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        out_dir: PathBuf,

        /// Number of parallel workers (defaults to the number of CPUs)
        #[arg(short = 'j', long, value_name = "N")]
        jobs: Option<usize>,

        #[command(flatten)]
        input_options: InputOptions,
    },
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .target(env_logger::Target::Stderr)
        .init();
}

/// Resolve the generator config: explicit file, then project file, then defaults.
///
/// An explicit `--config` that fails to load is an error; a broken project
/// file only produces a warning.
fn load_config(explicit: Option<&Path>, verbosity: Verbosity) -> Result<GeneratorConfig> {
    if let Some(path) = explicit {
        return GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()));
    }

    let project = Path::new(PROJECT_CONFIG);
    if !project.exists() {
        return Ok(GeneratorConfig::default());
    }

    match GeneratorConfig::load(project) {
        Ok(config) => Ok(config),
        Err(e) => {
            if verbosity.should_show_output() {
                eprintln!(
                    "{} Failed to load project config from {}: {}",
                    "Warning:".yellow().bold(),
                    project.display(),
                    e
                );
            }
            Ok(GeneratorConfig::default())
        }
    }
}

/// Apply command-line overrides on top of the file config
fn build_generator(config: GeneratorConfig, strategy: Option<StrategyArg>) -> Result<CodeGenerator> {
    let mut builder = GeneratorConfigBuilder::from_config(config);
    if let Some(strategy) = strategy {
        builder = builder.row_strategy(strategy.into());
    }
    let config = builder.build().context("Invalid generator configuration")?;
    Ok(CodeGenerator::new(config))
}

fn read_input(path: &Path, options: &InputOptions) -> Result<DetectionSet> {
    let content = if path.as_os_str() == "-" {
        io::read_to_string(io::stdin()).context("Failed to read stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?
    };

    parse_detections(&content, options.format(), &options.ingest_options())
        .with_context(|| format!("Failed to parse detections from {}", path.display()))
}

fn write_output(output: Option<&Path>, source: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(path, source)
                .with_context(|| format!("Failed to write output file: {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(source.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn report(code: &GeneratedCode, output: Option<&Path>, verbosity: Verbosity) {
    if !verbosity.should_show_output() {
        return;
    }
    let target = output.map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    eprintln!(
        "{} Generated {} -> {} ({} lines, {} widgets, {} rows)",
        "✓".green().bold(),
        code.page_name.cyan(),
        target,
        code.line_count,
        code.widget_count,
        code.row_count
    );
}

/// Page name precedence: flag, then input file, then config default
fn resolve_page_name(flag: Option<String>, from_input: Option<String>) -> String {
    flag.or(from_input).unwrap_or_default()
}

/// Pair each input with its stem and `<out_dir>/<stem>.dart`.
///
/// Fails before anything is written if an input has no file stem or two
/// inputs share one.
fn batch_outputs<'a>(
    inputs: &'a [PathBuf],
    out_dir: &Path,
) -> Result<Vec<(&'a PathBuf, String, PathBuf)>> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let Some(stem) = input.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            bail!("Input has no file name: {}", input.display());
        };
        if let Some(previous) = seen.insert(stem.clone(), input) {
            bail!(
                "Inputs {} and {} would both write {stem}.dart",
                previous.display(),
                input.display()
            );
        }
        let output = out_dir.join(format!("{stem}.dart"));
        jobs.push((input, stem, output));
    }
    Ok(jobs)
}

fn run_batch(
    generator: &CodeGenerator,
    inputs: &[PathBuf],
    out_dir: &Path,
    options: &InputOptions,
    verbosity: Verbosity,
) -> Result<()> {
    let jobs = batch_outputs(inputs, out_dir)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let results: Vec<(PathBuf, Result<PathBuf>)> = jobs
        .par_iter()
        .map(|(input, stem, output)| {
            let result = (|| -> Result<PathBuf> {
                let set = read_input(input, options)?;
                let name = set.page_name.clone().unwrap_or_else(|| stem.clone());
                let code = generator.generate(&set.detections, &name);
                write_output(Some(output.as_path()), &code.source)?;
                log::debug!("{} -> {}", input.display(), output.display());
                Ok(output.clone())
            })();
            ((*input).clone(), result)
        })
        .collect();

    let mut failed = 0usize;
    for (input, result) in &results {
        match result {
            Ok(output) => {
                if verbosity.should_show_output() {
                    eprintln!(
                        "{} {} -> {}",
                        "✓".green().bold(),
                        input.display(),
                        output.display()
                    );
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {:#}", "✗".red().bold(), input.display(), e);
            }
        }
    }

    if verbosity.should_show_output() {
        eprintln!(
            "{} {} succeeded, {} failed",
            "Batch:".bold(),
            results.len() - failed,
            failed
        );
    }

    if failed > 0 {
        bail!("{failed} of {} inputs failed", results.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    init_logging(verbosity);

    let config = load_config(args.config.as_deref(), verbosity)?;

    match args.command {
        Commands::Generate {
            input,
            output,
            page_name,
            input_options,
        } => {
            let generator = build_generator(config, input_options.strategy)?;
            let set = read_input(&input, &input_options)?;
            let name = resolve_page_name(page_name, set.page_name);
            let code = generator.generate(&set.detections, &name);
            write_output(output.as_deref(), &code.source)?;
            report(&code, output.as_deref(), verbosity);
        }

        Commands::Preview {
            input,
            limit,
            input_options,
        } => {
            let generator = build_generator(config, input_options.strategy)?;
            let set = read_input(&input, &input_options)?;
            let limit = limit.unwrap_or(generator.config().preview_limit);
            let preview = generator.preview_with_limit(&set.detections, limit);
            println!("{preview}");
        }

        Commands::Classify { labels, taxonomy } => {
            let map = taxonomy.label_map();
            for label in &labels {
                println!("{label} → {}", map.classify(label));
            }
        }

        Commands::Demo { output, page_name } => {
            let generator = build_generator(config, None)?;
            let code = generator.generate(&samples::login_form(), &page_name);
            write_output(output.as_deref(), &code.source)?;
            report(&code, output.as_deref(), verbosity);
        }

        Commands::Batch {
            inputs,
            out_dir,
            jobs,
            input_options,
        } => {
            if let Some(n) = jobs.filter(|&n| n > 0) {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build_global()
                    .ok(); // Ignore error if pool already built
            }
            let generator = build_generator(config, input_options.strategy)?;
            run_batch(&generator, &inputs, &out_dir, &input_options, verbosity)?;
        }
    }

    Ok(())
}
