//! unadr CLI - extract UN-number records from the ADR table

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unadr::{extract_records, output, PageSource, PdfSource, SourceOptions};

/// Default input document name, as published.
const DEFAULT_INPUT: &str = "unnumberdata.pdf";
/// Default output directory for the per-record JSON files.
const DEFAULT_OUTPUT: &str = "newData";

#[derive(Parser)]
#[command(name = "unadr")]
#[command(version)]
#[command(about = "Extract UN-number substance records from ADR tables to JSON", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Fail on the first unreadable page instead of skipping it
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records and write one JSON file per UN number
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Fail on the first unreadable page instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            strict,
        }) => cmd_extract(&input, &output, strict),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            let input = cli.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
            let output = cli.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
            cmd_extract(&input, &output, cli.strict)
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(input: &Path, output: &Path, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", "Opening".cyan(), input.display());

    let options = if strict {
        SourceOptions::new().strict()
    } else {
        SourceOptions::new().lenient()
    };
    let source = PdfSource::open_with_options(input, options)?;
    log::info!("opened {} ({} pages)", input.display(), source.page_count());

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message(format!("Reading {} pages...", source.page_count()));
    pb.inc(1);

    pb.set_message("Extracting records...");
    let records = extract_records(&source)?;
    pb.inc(1);

    pb.set_message("Writing JSON files...");
    let count = output::write_records(output, &records)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} records written to {}",
        "Done!".green().bold(),
        count,
        output.display()
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfSource::open(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), source.page_count());

    let pages = source.pages()?;
    let table_count: usize = pages.iter().map(|p| p.tables.len()).sum();
    let row_count: usize = pages
        .iter()
        .flat_map(|p| p.tables.iter())
        .map(|t| t.row_count())
        .sum();

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Tables".bold(), table_count);
    println!("{}: {}", "Table rows".bold(), row_count);

    for page in &pages {
        if !page.tables.is_empty() {
            println!(
                "  {} page {}: {} tables",
                "├─".dimmed(),
                page.number,
                page.tables.len()
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unadr".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("ADR dangerous-goods table extraction tool");
    println!();
    println!("License: MIT");
}
