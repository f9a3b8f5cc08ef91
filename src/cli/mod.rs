//! Command-line interface for ted-study.
//!
//! Provides commands for generating study packages from transcripts,
//! managing the talk catalog, and inspecting configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tokio::fs;
use tracing::{info, warn};

use crate::config::{self, ResolvedConfig};
use crate::domain::{
    default_goals, Goal, LearnerProfile, Level, OutputLanguage, OutputStyle, SubtitleFormat,
};
use crate::library::{Catalog, MaterialId};
use crate::study::DocumentRenderer;

pub mod library;

/// ted-study - English study packages from TED transcripts
#[derive(Parser, Debug)]
#[command(name = "ted-study")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (overrides config and TED_STUDY_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a study package from a transcript
    Generate(GenerateArgs),

    /// Manage the catalog of talks
    Library {
        #[command(subcommand)]
        command: library::LibraryCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Input transcript file (plain text or SRT)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output Markdown file for the study package
    #[arg(short, long)]
    pub output: PathBuf,

    /// Learner's CEFR level [default: B2]
    #[arg(long, value_enum, ignore_case = true)]
    pub level: Option<Level>,

    /// Learner's vocabulary size [default: 8000]
    #[arg(long = "vocab")]
    pub vocabulary_size: Option<u32>,

    /// Learning goals [default: listening speaking vocabulary]
    #[arg(long, value_enum, num_args = 1..)]
    pub goals: Option<Vec<Goal>>,

    /// Output language preference [default: bilingual]
    #[arg(long = "lang", value_enum)]
    pub output_language: Option<OutputLanguage>,

    /// Input subtitle format [default: auto]
    #[arg(long = "format", value_enum)]
    pub subtitle_format: Option<SubtitleFormat>,

    /// Output style [default: complete]
    #[arg(long = "style", value_enum)]
    pub output_style: Option<OutputStyle>,

    /// Catalog material to mark processed once the package is written
    #[arg(long = "material")]
    pub material: Option<MaterialId>,
}

impl GenerateArgs {
    /// Merge flags over config defaults over built-in defaults
    pub fn profile(&self, config: &ResolvedConfig) -> LearnerProfile {
        let defaults = &config.profile;
        let base = LearnerProfile::default();

        LearnerProfile {
            level: self.level.or(defaults.level).unwrap_or(base.level),
            vocabulary_size: self
                .vocabulary_size
                .or(defaults.vocabulary_size)
                .unwrap_or(base.vocabulary_size),
            goals: self
                .goals
                .clone()
                .or_else(|| defaults.goals.clone())
                .filter(|g| !g.is_empty())
                .unwrap_or_else(default_goals),
            output_language: self
                .output_language
                .or(defaults.output_language)
                .unwrap_or(base.output_language),
            subtitle_format: self
                .subtitle_format
                .or(defaults.subtitle_format)
                .unwrap_or(base.subtitle_format),
            output_style: self
                .output_style
                .or(defaults.output_style)
                .unwrap_or(base.output_style),
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = config::load_config()?;
        let catalog_path = self.catalog.clone().unwrap_or_else(|| config.catalog.clone());

        match self.command {
            Commands::Generate(args) => generate(&args, &config, &catalog_path).await,
            Commands::Library { command } => library::execute(command, &catalog_path),
            Commands::Config => show_config(&config, &catalog_path),
        }
    }
}

/// Render a transcript into a study package on disk
async fn generate(args: &GenerateArgs, config: &ResolvedConfig, catalog_path: &Path) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let transcript = fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;

    let profile = args.profile(config);

    eprintln!("Processing transcript: {}", args.input.display());
    eprintln!("Learner level: {}", profile.level);
    eprintln!("Vocabulary size: {}", profile.vocabulary_size);
    eprintln!("Goals: {}", profile.goals_display());
    eprintln!("Generating learning package...");

    let renderer = DocumentRenderer::new(profile);
    let document = renderer.render(&transcript, Local::now().naive_local());

    write_atomically(&args.output, document.markdown).await?;
    info!(output = %args.output.display(), "Study package written");

    eprintln!("\n✓ Learning package generated successfully!");
    eprintln!("  Output: {}", args.output.display());
    eprintln!("  Duration: {:.1} minutes", document.duration_minutes);
    eprintln!("  Difficulty: {}/100", document.difficulty.score);

    if let Some(id) = args.material {
        let mut catalog = Catalog::open(catalog_path)?;
        let marked = catalog.mark_processed(
            id,
            args.input.display().to_string(),
            args.output.display().to_string(),
        )?;

        if marked {
            eprintln!("  Catalog: material {} marked processed", id);
        } else {
            warn!(%id, "Material not in catalog, nothing marked");
            eprintln!("  Catalog: material {} not found, nothing marked", id);
        }
    }

    Ok(())
}

/// Write via a temp file in the destination directory, then rename into place
async fn write_atomically(path: &Path, content: String) -> Result<()> {
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        use std::io::Write;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;

        Ok(())
    })
    .await
    .context("Output writer task panicked")?
}

/// Show the resolved configuration (for debugging)
fn show_config(config: &ResolvedConfig, catalog_path: &Path) -> Result<()> {
    println!("ted-study Configuration");
    println!("{}", "=".repeat(60));
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:     {}", config.home.display());
    println!("  Catalog:  {}", catalog_path.display());
    println!();

    let p = &config.profile;
    let show = |v: Option<String>| v.unwrap_or_else(|| "(default)".to_string());
    println!("Profile defaults:");
    println!("  Level:           {}", show(p.level.map(|l| l.to_string())));
    println!("  Vocabulary size: {}", show(p.vocabulary_size.map(|v| v.to_string())));
    println!(
        "  Goals:           {}",
        show(p.goals.as_ref().map(|g| {
            g.iter().map(Goal::to_string).collect::<Vec<_>>().join(", ")
        }))
    );
    println!("  Language:        {}", show(p.output_language.map(|l| l.to_string())));
    println!("  Input format:    {}", show(p.subtitle_format.map(|f| f.to_string())));
    println!("  Style:           {}", show(p.output_style.map(|s| s.to_string())));

    Ok(())
}
