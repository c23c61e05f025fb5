//! Arabic PDF CLI - Command line tool for listing fonts and converting HTML.

use anyhow::{Context, Result};
use arabic_pdf_core::{AppConfig, PdfConverter, RenderRequest, ScanOutcome, SelectionPolicy};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "arabic-pdf")]
#[command(author, version, about = "Render Arabic HTML documents to PDF", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory scanned for fonts
    #[arg(long, env = "FONT_DIR", global = true)]
    font_dir: Option<PathBuf>,

    /// WeasyPrint executable
    #[arg(long, env = "WEASYPRINT_BIN", global = true)]
    weasyprint: Option<String>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List Arabic-capable fonts
    Fonts {
        /// Also list files that were skipped and why
        #[arg(long)]
        skipped: bool,
    },

    /// Convert an HTML file to PDF
    Convert {
        /// Input HTML file
        input: PathBuf,

        /// Output PDF file (default: input with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Font family to embed
        #[arg(long)]
        font_family: Option<String>,

        /// Font file (name inside the font directory) to embed
        #[arg(long)]
        font_file: Option<String>,

        /// Fail unless the font file declares the given family
        #[arg(long, requires = "font_family", requires = "font_file")]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };
    if let Some(ref dir) = args.font_dir {
        config.fonts.dir = Some(dir.clone());
    }
    if let Some(ref command) = args.weasyprint {
        config.render.command.clone_from(command);
    }
    config.validate().context("Invalid configuration")?;

    let converter = PdfConverter::new(&config);

    match args.command {
        Command::Fonts { skipped } => list_fonts(&converter, skipped),
        Command::Convert {
            input,
            output,
            font_family,
            font_file,
            strict,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("pdf"));
            let policy = if strict {
                SelectionPolicy::Strict
            } else {
                SelectionPolicy::Lenient
            };
            convert(&converter, &input, &output, font_family, font_file, policy).await
        }
    }
}

#[allow(clippy::print_stdout)]
fn list_fonts(converter: &PdfConverter, show_skipped: bool) -> Result<()> {
    let catalog = converter.catalog();
    info!("Scanning {}", catalog.dir().display());

    if show_skipped {
        for outcome in catalog.scan() {
            if let ScanOutcome::Skipped { filename, reason } = outcome {
                println!("# skipped {filename}: {reason}");
            }
        }
    }

    let fonts = catalog.list_fonts();
    for font in &fonts {
        println!("{}\t{}", font.family, font.filename);
    }

    if fonts.is_empty() {
        tracing::warn!("No Arabic-capable fonts found in {}", catalog.dir().display());
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn convert(
    converter: &PdfConverter,
    input: &Path,
    output: &Path,
    font_family: Option<String>,
    font_file: Option<String>,
    policy: SelectionPolicy,
) -> Result<()> {
    let html = tokio::fs::read_to_string(input)
        .await
        .context(format!("Failed to read HTML: {}", input.display()))?;

    let request = RenderRequest::from_parts(Some(html), font_family, font_file);
    let pdf = converter
        .convert(&request, policy)
        .await
        .context("Conversion failed")?;

    tokio::fs::write(output, &pdf.bytes)
        .await
        .context(format!("Failed to write PDF: {}", output.display()))?;

    match pdf.font {
        Some(font) => println!(
            "Wrote {} ({} bytes, font {} from {})",
            output.display(),
            pdf.bytes.len(),
            font.family,
            font.filename
        ),
        None => println!("Wrote {} ({} bytes)", output.display(), pdf.bytes.len()),
    }
    Ok(())
}
