//! Process command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, InputDocument};
use crate::output::{create_formatter, ExtractionRecord, OutputFormat};
use crate::progress::ProgressReporter;
use crate::rules_source::RulesSource;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rayon::prelude::*;
use spruchkopf_core::{ExtractionContext, RulesetModule, TagData, TextLine};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob, `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Rule file (TOML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE", conflicts_with = "ruleset")]
    pub rules: Option<PathBuf>,

    /// Built-in rule set
    #[arg(long, value_name = "NAME")]
    pub ruleset: Option<String>,

    /// Unit each rule pass sees [default: line]
    #[arg(short, long, value_enum)]
    pub unit: Option<ProcessingUnit>,

    /// Process input files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "SPRUCHKOPF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What one tagged fragment is
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProcessingUnit {
    /// Every line separately; offsets are relative to the line
    Line,
    /// The whole input at once; rules may span line breaks
    Document,
}

impl TagData for InputDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn locator(&self) -> String {
        self.name.clone()
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting extraction");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let format = match self.format {
            Some(format) => format,
            None => parse_setting(&config.output.default_format, "output format")?,
        };
        let unit = match self.unit {
            Some(unit) => unit,
            None => parse_setting(&config.processing.unit, "processing unit")?,
        };

        let source = RulesSource::resolve(
            self.rules.clone(),
            self.ruleset.clone(),
            config.processing.rules_file.clone(),
            &config.processing.default_ruleset,
        );
        let module = source.load()?;
        let inputs = resolve_patterns(&self.input)?;

        let parallel = self.parallel || config.performance.parallel;
        if parallel && config.performance.worker_threads > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(config.performance.worker_threads)
                .build_global()
            {
                log::warn!("Could not configure worker threads: {e}");
            }
        }

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter = create_formatter(
            format,
            writer,
            config.output.include_attributes,
            config.output.pretty_json,
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(inputs.len() as u64);

        let extract = |path: &PathBuf| -> Result<Vec<ExtractionRecord>> {
            let records = extract_input(&module, path, unit)?;
            progress.file_completed(&path.display().to_string(), records.len());
            Ok(records)
        };
        let batches: Vec<Vec<ExtractionRecord>> = if parallel {
            inputs.par_iter().map(&extract).collect::<Result<_>>()?
        } else {
            inputs.iter().map(&extract).collect::<Result<_>>()?
        };
        progress.finish();

        let mut total = 0;
        for record in batches.iter().flatten() {
            formatter.format_extraction(record)?;
            total += 1;
        }
        formatter.finish()?;

        log::info!(
            "Extracted {total} entities from {} input(s) using {}",
            inputs.len(),
            source.display_name()
        );
        Ok(())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when called more than once.
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Run the rule set over one input
pub fn extract_input(
    module: &RulesetModule,
    path: &Path,
    unit: ProcessingUnit,
) -> Result<Vec<ExtractionRecord>> {
    let doc = FileReader::read_input(path)?;
    let name = &doc.name;

    let records: Vec<ExtractionRecord> = match unit {
        ProcessingUnit::Line => {
            let lines = TextLine::from_document(&doc.text);
            module
                .process_batch(&lines)
                .into_iter()
                .zip(&lines)
                .flat_map(|(context, line)| {
                    context
                        .into_extractions()
                        .into_iter()
                        .map(move |extraction| ExtractionRecord {
                            source: name.clone(),
                            line: Some(line.index),
                            extraction,
                        })
                })
                .collect()
        }
        ProcessingUnit::Document => {
            let mut context = ExtractionContext::new();
            module.process_tag(&doc, &mut context);
            context
                .into_extractions()
                .into_iter()
                .map(|extraction| ExtractionRecord {
                    source: name.clone(),
                    line: None,
                    extraction,
                })
                .collect()
        }
    };

    log::debug!("{name}: {} extractions", records.len());
    Ok(records)
}

/// Parse a value-enum setting from the configuration file
fn parse_setting<T: ValueEnum>(value: &str, what: &str) -> Result<T> {
    T::from_str(value, true)
        .map_err(|_| CliError::ConfigError(format!("unknown {what} '{value}'")).into())
}
