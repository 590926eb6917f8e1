//! cfptext CLI - conference page text extraction tool

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use cfptext::{
    records_from_json, CleanupPreset, Extractor, JsonFormat, ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "cfptext")]
#[command(version)]
#[command(about = "Extract structured text and date records from conference pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an HTML file to plain text
    Text {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// CSS selector of the element to render
        #[arg(long, default_value = "body")]
        root: String,

        /// Render lists with item markers
        #[arg(long)]
        marked_lists: bool,

        /// Print extraction statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Render many HTML files in parallel
    Batch {
        /// Input HTML files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Assemble a saved key/value payload into grouped date records
    Records {
        /// JSON file holding an array of [key, value] pairs
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render an HTML file and send it to the extraction service
    Extract {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Extraction service address
        #[arg(long, env = "CFPTEXT_SERVICE_ADDR", default_value = cfptext::session::DEFAULT_ADDRESS)]
        addr: String,

        /// Event name of the request
        #[arg(long, env = "CFPTEXT_EVENT", default_value = cfptext::session::DEFAULT_EVENT)]
        event: String,

        /// Seconds to wait for the response
        #[arg(long, env = "CFPTEXT_TIMEOUT_SECS", default_value = "15")]
        timeout: u64,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Collapse runs of blank lines only (default)
    Minimal,
    /// Also trim every line and the whole output
    Standard,
    /// Also apply Unicode NFC normalization
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            cleanup,
            root,
            marked_lists,
            stats,
        } => cmd_text(&input, output.as_deref(), cleanup, &root, marked_lists, stats),
        Commands::Batch {
            inputs,
            output,
            cleanup,
        } => cmd_batch(&inputs, &output, cleanup),
        Commands::Records { input, compact } => cmd_records(&input, compact),
        Commands::Extract {
            input,
            addr,
            event,
            timeout,
            output,
            compact,
        } => cmd_extract(&input, addr, event, timeout, output.as_deref(), compact),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
    root: &str,
    marked_lists: bool,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut extractor = Extractor::new().with_root(root);
    if let Some(level) = cleanup {
        extractor = extractor.with_cleanup(level.into());
    }
    if marked_lists {
        extractor = extractor.marked_lists();
    }
    if stats {
        extractor = extractor.with_stats();
    }

    let result = extractor.extract_file(input)?;
    write_or_print(output, &result.content)?;

    if let Some(stats) = result.stats {
        eprintln!("{}", "Extraction Statistics".cyan().bold());
        eprintln!("{}", "─".repeat(40).dimmed());
        eprintln!("{}: {}", "Text runs".bold(), stats.text_run_count);
        eprintln!("{}: {}", "Tables".bold(), stats.table_count);
        eprintln!("{}: {}", "Rows".bold(), stats.row_count);
        eprintln!("{}: {}", "List items".bold(), stats.list_item_count);
        eprintln!("{}: {}", "Line breaks".bold(), stats.line_break_count);
        eprintln!("{}: {}", "Words".bold(), stats.word_count);
        eprintln!("{}: {}", "Characters".bold(), stats.char_count);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    cleanup: Option<CleanupLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let mut render_options = RenderOptions::new();
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }
    let parse_options = ParseOptions::new().lenient();

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering...");

    let targets = output_paths(inputs, output_dir);

    let failures: Vec<(PathBuf, String)> = inputs
        .par_iter()
        .zip(targets.par_iter())
        .filter_map(|(input, target)| {
            let outcome = render_one(input, target, &parse_options, &render_options);
            pb.inc(1);
            outcome.err().map(|e| (input.clone(), e.to_string()))
        })
        .collect();

    pb.finish_with_message("Done!");

    let rendered = inputs.len() - failures.len();
    println!("\n{} {} files rendered", "Done!".green().bold(), rendered);
    for (path, error) in &failures {
        println!("  {} {}: {}", "✗".red(), path.display(), error);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} files failed", failures.len(), inputs.len()).into())
    }
}

/// Output file for each input: `<stem>.txt`, or `<stem>-<n>.txt` when an
/// earlier input already took that name.
fn output_paths(inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            let mut name = format!("{}.txt", stem);
            let mut n = 1;
            while !taken.insert(name.clone()) {
                n += 1;
                name = format!("{}-{}.txt", stem, n);
            }
            if n > 1 {
                log::warn!(
                    "{} shares its name with another input, writing {}",
                    input.display(),
                    name
                );
            }
            output_dir.join(name)
        })
        .collect()
}

fn render_one(
    input: &Path,
    target: &Path,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> cfptext::Result<()> {
    let html = fs::read_to_string(input)?;
    let text = cfptext::extract_text_with_options(&html, parse_options, render_options)?;
    fs::write(target, text)?;
    Ok(())
}

fn cmd_records(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let payload = fs::read_to_string(input)?;
    log::debug!("Read {} bytes of pairs payload from {}", payload.len(), input.display());
    let groups = records_from_json(&payload)?;
    let json = cfptext::render::to_json(&groups, json_format(compact))?;
    println!("{}", json);
    Ok(())
}

fn cmd_extract(
    input: &Path,
    addr: String,
    event: String,
    timeout_secs: u64,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = Extractor::new().lenient().extract_file(input)?.content;
    log::debug!("Rendered {} characters from {}", text.len(), input.display());

    let config = cfptext::SessionConfig::new()
        .with_address(addr)
        .with_event(event)
        .with_timeout(Duration::from_secs(timeout_secs));

    let rt = tokio::runtime::Runtime::new()?;
    let groups = rt.block_on(async {
        let mut session = cfptext::ExtractionSession::open(config).await?;
        let outcome = session.extract_records(&text).await;
        session.close().await?;
        outcome
    })?;

    eprintln!(
        "{} {} records in {} date-types",
        "Extracted".green(),
        groups.record_count(),
        groups.len()
    );
    let json = cfptext::render::to_json(&groups, json_format(compact))?;
    write_or_print(output, &json)
}

fn cmd_version() {
    println!("{} {}", "cfptext".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Conference page text extraction tool");
}
