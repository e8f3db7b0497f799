use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use duotone_common::Diagnostics;
use duotone_emit::{write_resources, write_theme_files, write_typography_reference, ThemeConfig};
use duotone_engine::{resolve_document, ResolvedTokens};
use duotone_model::TokenDocument;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Generate platform resource files from a design-token document
#[derive(Parser, Debug)]
#[command(name = "duotone", version, about)]
struct Cli {
    /// Token document (JSON) exported from the design tool
    input: PathBuf,

    /// Directory the resource tree is written under
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Name of the generated light theme
    #[arg(long, default_value = "AppLightTheme")]
    light_theme: String,

    /// Name of the generated dark theme
    #[arg(long, default_value = "AppDarkTheme")]
    dark_theme: String,

    /// Parent theme both generated themes extend
    #[arg(long, default_value = "Theme.MaterialComponents.DayNight.NoActionBar.Bridge")]
    parent_theme: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let doc = TokenDocument::from_json_str(&raw)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    let (tokens, diagnostics) = resolve_document(&doc);

    let written = write_resources(&tokens, &cli.out_dir)?;
    info!("wrote {} resource files", written.len());

    let config = ThemeConfig {
        light_theme: cli.light_theme,
        dark_theme: cli.dark_theme,
        parent_theme: cli.parent_theme,
    };
    write_theme_files(&tokens, &config, &cli.out_dir)?;
    write_typography_reference(&tokens.typography, &cli.out_dir)?;

    print_summary(&tokens, &diagnostics, &cli.out_dir);
    Ok(())
}

fn print_summary(tokens: &ResolvedTokens, diagnostics: &Diagnostics, out_dir: &PathBuf) {
    let summary = tokens.summary();
    println!("\n{}", "Summary".bold());
    println!("  Light primitive colors:  {}", summary.light_primitives);
    println!("  Dark primitive colors:   {}", summary.dark_primitives);
    println!("  Light semantic colors:   {}", summary.light_semantic);
    println!("  Dark semantic colors:    {}", summary.dark_semantic);
    println!("  Spacing dimensions:      {}", summary.spacing);
    println!("  Semantic spacing:        {}", summary.semantic_spacing);
    println!("  Radius values:           {}", summary.radius);
    println!("  Gradients:               {}", summary.gradients);
    println!("  Typography styles:       {}", summary.typography);
    println!("  Font sizes:              {}", summary.font_sizes);
    println!("  Output directory:        {}", out_dir.display());

    if diagnostics.is_empty() {
        println!("  {}", "No diagnostics".green());
    } else {
        println!(
            "  {}",
            format!("{} diagnostics (see log output)", diagnostics.len()).yellow()
        );
    }
}
