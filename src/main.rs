mod corpus;
mod parser;
mod pdf;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use corpus::Corpus;
use settings::Settings;

#[derive(Parser)]
#[command(name = "handbook_corpus", about = "Split a paginated handbook PDF into pages, TOC and protocol sections")]
struct Cli {
    /// Settings file (default: ./handbook.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract pages, rebuild the TOC, write the three JSON documents
    Build {
        /// Source PDF
        source: PathBuf,
        /// Directory for the JSON output
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// Print the reconstructed table of contents without writing anything
    Toc {
        /// Source PDF
        source: PathBuf,
    },
    /// Print section page ranges without writing anything
    Sections {
        /// Source PDF
        source: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    info!(?settings, "settings loaded");

    let result = run(cli.command, &settings);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    result
}

fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Build { source, out_dir } => {
            let corpus = load_corpus(&source, settings)?;
            let paths = corpus::write_corpus(&out_dir, &settings.file_prefix, &corpus)?;
            info!(
                pages = %paths.pages.display(),
                toc = %paths.toc.display(),
                protocols = %paths.protocols.display(),
                "documents written"
            );
            println!(
                "Wrote {} pages, {} toc entries, {} protocols",
                corpus.pages.len(),
                corpus.toc.len(),
                corpus.sections.len()
            );
        }
        Commands::Toc { source } => {
            let corpus = load_corpus(&source, settings)?;
            print!("{}", toc_table(&corpus));
        }
        Commands::Sections { source } => {
            let corpus = load_corpus(&source, settings)?;
            print!("{}", sections_table(&corpus));
        }
    }
    Ok(())
}

fn load_corpus(source: &Path, settings: &Settings) -> Result<Corpus> {
    let raw_pages = pdf::read_pages(source)?;
    Ok(parser::build_corpus(
        &source.display().to_string(),
        raw_pages,
        settings,
    ))
}

fn toc_table(corpus: &Corpus) -> String {
    if corpus.toc.is_empty() {
        return format!(
            "No TOC entries found in the first {} pages.\n",
            parser::toc::TOC_SCAN_PAGES
        );
    }

    let mut out = String::new();
    out.push_str(&format!("{:>4} | {:<24} | {}\n", "Page", "Category", "Title"));
    out.push_str(&format!("{}\n", "-".repeat(72)));
    for e in &corpus.toc {
        out.push_str(&format!(
            "{:>4} | {:<24} | {}\n",
            e.start_page,
            truncate(&e.category, 24),
            e.title
        ));
    }
    out.push_str(&format!(
        "\n{} entries | {} pages\n",
        corpus.toc.len(),
        corpus.page_count()
    ));
    out
}

fn sections_table(corpus: &Corpus) -> String {
    if corpus.sections.is_empty() {
        return "No sections (empty TOC).\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<5} | {:>9} | {:>5} | {:>7} | {}\n",
        "Id", "Pages", "Count", "Chars", "Title"
    ));
    out.push_str(&format!("{}\n", "-".repeat(72)));
    for s in &corpus.sections {
        let count = (s.end_page + 1).saturating_sub(s.start_page);
        out.push_str(&format!(
            "{:<5} | {:>4}-{:<4} | {:>5} | {:>7} | {}\n",
            s.id,
            s.start_page,
            s.end_page,
            count,
            s.content.chars().count(),
            truncate(&s.title, 40)
        ));
    }

    let empty = corpus.sections.iter().filter(|s| s.content.is_empty()).count();
    if empty > 0 {
        out.push_str(&format!("\n{} sections have no text\n", empty));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──
