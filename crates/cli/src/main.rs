//! Shape Fixtures CLI
//!
//! Command-line interface for synthesizing and validating fixtures from Smithy models.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use shape_fixtures_common::{FixtureConfig, ShapeId, ShapeRegistry};
use shape_fixtures_parser::SmithyParser;
use shape_fixtures_synth::{classify, decode, Synthesizer, Validator};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shape-fixtures")]
#[command(
    version,
    about = "Synthesize and validate fully populated fixtures from service models",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the data shapes of a model and how each is synthesized
    #[command(after_help = "EXAMPLES:\n  \
        shape-fixtures shapes --model storage.json")]
    Shapes {
        /// Path to the Smithy JSON AST model
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Synthesize a fixture and print it as JSON
    #[command(after_help = "EXAMPLES:\n  \
        # Fixture for a single shape\n  \
        shape-fixtures synth --model storage.json --shape com.example#Bucket\n\n  \
        # Response fixture for an operation\n  \
        shape-fixtures synth \\\n    \
        --model storage.json \\\n    \
        --operation com.example#GetBucket \\\n    \
        --output-side \\\n    \
        --out bucket.json")]
    Synth {
        /// Path to the Smithy JSON AST model
        #[arg(short, long)]
        model: PathBuf,

        /// Shape to synthesize
        #[arg(short, long, conflicts_with = "operation", required_unless_present = "operation")]
        shape: Option<String>,

        /// Operation whose input (or output) shape is synthesized
        #[arg(long)]
        operation: Option<String>,

        /// Use the operation's output shape instead of its input
        #[arg(long, requires = "operation")]
        output_side: bool,

        /// YAML override table (defaults to the built-in table)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the fixture to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check a JSON instance against the synthesis rules
    #[command(after_help = "EXAMPLES:\n  \
        shape-fixtures validate \\\n    \
        --model storage.json \\\n    \
        --shape com.example#Bucket \\\n    \
        --instance bucket.json \\\n    \
        --all")]
    Validate {
        /// Path to the Smithy JSON AST model
        #[arg(short, long)]
        model: PathBuf,

        /// Shape the instance claims to be
        #[arg(short, long)]
        shape: String,

        /// JSON file holding the instance
        #[arg(short, long)]
        instance: PathBuf,

        /// YAML override table (defaults to the built-in table)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report every failure instead of stopping at the first
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Shapes { model } => {
            shapes_command(model.as_path())?;
        }
        Commands::Synth {
            model,
            shape,
            operation,
            output_side,
            config,
            out,
        } => {
            let target = match (shape, operation) {
                (Some(shape), _) => Target::Shape(shape),
                (None, Some(operation)) => Target::Operation {
                    operation,
                    output_side,
                },
                (None, None) => anyhow::bail!("Either --shape or --operation is required"),
            };
            synth_command(model.as_path(), target, config.as_deref(), out.as_deref())?;
        }
        Commands::Validate {
            model,
            shape,
            instance,
            config,
            all,
        } => {
            validate_command(
                model.as_path(),
                &shape,
                instance.as_path(),
                config.as_deref(),
                all,
            )?;
        }
    }

    Ok(())
}

/// What `synth` builds a fixture for
enum Target {
    Shape(String),
    Operation { operation: String, output_side: bool },
}

fn load_model(path: &Path) -> Result<(SmithyParser, ShapeRegistry)> {
    eprintln!("{} Loading model: {}", "→".cyan(), path.display());
    let parser = SmithyParser::from_file(path).context("Failed to load Smithy model")?;
    let registry = parser.parse().context("Failed to parse Smithy model")?;
    debug!(shapes = registry.len(), operations = parser.operations().len(), "model loaded");
    Ok((parser, registry))
}

fn load_config(path: Option<&Path>) -> Result<FixtureConfig> {
    match path {
        Some(path) => {
            eprintln!("{} Using override table: {}", "→".cyan(), path.display());
            FixtureConfig::load(path)
                .with_context(|| format!("Failed to load fixture config {}", path.display()))
        }
        None => Ok(FixtureConfig::default()),
    }
}

fn shapes_command(model: &Path) -> Result<()> {
    let (_, registry) = load_model(model)?;
    let config = FixtureConfig::default();

    let declared: Vec<&ShapeId> = registry
        .iter()
        .map(|(id, _)| id)
        .filter(|id| id.namespace() != Some("smithy.api"))
        .collect();

    println!("\n{}", "Shapes:".bold());
    for id in &declared {
        let category = classify(&registry, &config, id).category();
        println!("  • {} ({})", id.as_str().cyan(), category.yellow());
    }
    println!("\n{} {} data shapes", "✓".green(), declared.len());

    Ok(())
}

fn synth_command(
    model: &Path,
    target: Target,
    config: Option<&Path>,
    out: Option<&Path>,
) -> Result<()> {
    let (parser, registry) = load_model(model)?;
    let config = load_config(config)?;

    let root = match target {
        Target::Shape(shape) => ShapeId::new(shape),
        Target::Operation {
            operation,
            output_side,
        } => {
            let io = parser
                .operation_io(&operation)
                .with_context(|| format!("Failed to resolve operation {}", operation))?;
            let side = if output_side { io.output } else { io.input };
            side.with_context(|| {
                format!(
                    "Operation {} has no {} shape",
                    operation,
                    if output_side { "output" } else { "input" }
                )
            })?
        }
    };

    eprintln!("{} Synthesizing {}", "→".cyan(), root.as_str().yellow());
    let fixture = Synthesizer::new(&registry, &config)
        .synthesize(&root)
        .with_context(|| format!("Failed to synthesize {}", root))?;
    let json = serde_json::to_string_pretty(&fixture).context("Failed to render fixture")?;

    match out {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Fixture written to {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn validate_command(
    model: &Path,
    shape: &str,
    instance: &Path,
    config: Option<&Path>,
    all: bool,
) -> Result<()> {
    let (_, registry) = load_model(model)?;
    let config = load_config(config)?;
    let root = ShapeId::new(shape);

    if !registry.contains(&root) {
        anyhow::bail!("Shape {} is not declared in {}", root, model.display());
    }

    let content = fs::read_to_string(instance)
        .with_context(|| format!("Failed to read instance {}", instance.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse instance {}", instance.display()))?;

    eprintln!(
        "{} Validating {} against {}",
        "→".cyan(),
        instance.display(),
        root.as_str().yellow()
    );
    let value = decode(&registry, &config, &root, &json);
    let validator = Validator::new(&registry, &config);

    let failures = if all {
        validator.validate_all(&root, &value).failures
    } else {
        validator.validate(&root, &value).err().into_iter().collect()
    };

    if failures.is_empty() {
        println!("{}", "✓ Instance is fully populated".green().bold());
        return Ok(());
    }

    println!("\n{}", "Failures:".bold());
    for failure in &failures {
        println!("  {} {}", "✗".red(), failure);
    }
    anyhow::bail!("{} invalid value(s)", failures.len())
}
