use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use fragekatalog::{parse_batch, parse_file, Catalog};

#[derive(ClapParser, Debug)]
#[command(name = "fragekatalog", version, about = "Parse exam question catalog PDFs into JSON")]
struct Cli {
    /// Path to the PDF file to parse (or use --batch for multiple files)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to the output JSON file (defaults to questions.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process all *_sg*.pdf files in the search directory
    #[arg(long)]
    batch: bool,

    /// Directory to search for PDF files (used with --batch)
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let (catalog, output_path) = if cli.batch {
        process_batch(&cli)?
    } else {
        process_single(&cli)?
    };

    write_catalog(&catalog, &output_path, cli.verbose)
}

fn process_single(cli: &Cli) -> Result<(Catalog, PathBuf)> {
    let Some(input) = cli.input.as_deref() else {
        bail!("--input is required unless --batch is given");
    };
    if !input.exists() {
        bail!("cannot read input file: {}", input.display());
    }

    if cli.verbose {
        println!("Parsing PDF: {}", input.display());
    }

    let catalog = parse_file(input)?;

    if cli.verbose {
        println!("Successfully parsed {} questions", catalog.total_count);
        println!("Title: {}", catalog.title);
        println!("Year: {}", catalog.year);
        println!("State: {}", catalog.state);
    }

    let output = cli.output.clone().unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("questions.json")
    });

    Ok((catalog, output))
}

fn process_batch(cli: &Cli) -> Result<(Catalog, PathBuf)> {
    let catalog = parse_batch(&cli.dir)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.dir.join("questions.json"));
    Ok((catalog, output))
}

fn write_catalog(catalog: &Catalog, output_path: &Path, verbose: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog).context("failed to encode catalog as JSON")?;
    fs::write(output_path, json)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!(
        "✓ Wrote {} questions to: {}",
        catalog.total_count,
        output_path.display()
    );

    if verbose {
        print_statistics(catalog);
    }

    Ok(())
}

fn print_statistics(catalog: &Catalog) {
    let correct_count: usize = catalog
        .questions
        .iter()
        .map(|q| q.options.iter().filter(|o| o.correct).count())
        .sum();

    println!("\nStatistics:");
    println!("  Total Questions: {}", catalog.total_count);
    println!("  Total Correct Answers: {correct_count}");
    println!("  Title: {}", catalog.title);

    if let Some(q) = catalog.questions.first() {
        println!("\n--- Sample Question ---");
        println!("Q{}: {}", q.id, q.text);
        println!("Category: {}", q.category);
        println!("Options:");
        for opt in &q.options {
            let marker = if opt.correct { " [CORRECT]" } else { "" };
            println!("  {}) {}{}", opt.letter, opt.text, marker);
        }
    }
}
