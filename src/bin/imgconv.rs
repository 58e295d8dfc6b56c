//! CLI binary for imgconv.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ConversionRequest` and writes the result.

use anyhow::{Context, Result};
use clap::Parser;
use imgconv::{convert, ConversionRequest, SourceImage, TargetFormat};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # WebP to PNG (writes converted.png)
  imgconv photo.webp

  # AVIF to JPEG at 85% quality
  imgconv photo.avif --format jpg --quality 85 -o photo.jpg

  # Print a data URL instead of writing a file
  imgconv photo.webp --data-url

  # Structured JSON output (format, dimensions, base64 payload)
  imgconv photo.avif --format jpg --json > result.json

  # Force the declared media type when the extension is wrong
  imgconv download.bin --media-type image/webp -o out.png

SUPPORTED FORMATS:
  Input    image/webp, image/avif  (declared type, matched exactly)
  Output   png (lossless, default), jpg (lossy, --quality 1-100)

  Transparent sources converted to JPEG are flattened onto a white
  background; PNG output preserves the alpha channel unchanged.
"#;

/// Convert WebP and AVIF images to PNG or JPEG.
#[derive(Parser, Debug)]
#[command(
    name = "imgconv",
    version,
    about = "Convert WebP and AVIF images to PNG or JPEG",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the WebP or AVIF image to convert.
    input: PathBuf,

    /// Write the converted image to this file instead of `converted.<format>`.
    #[arg(short, long, env = "IMGCONV_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, env = "IMGCONV_FORMAT", value_enum, default_value = "png")]
    format: FormatArg,

    /// JPEG quality as an integer percent (ignored for PNG).
    #[arg(long, env = "IMGCONV_QUALITY", default_value_t = 90,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Override the declared media type instead of deriving it from the
    /// file extension.
    #[arg(long, env = "IMGCONV_MEDIA_TYPE")]
    media_type: Option<String>,

    /// Print the result as a base64 data URL on stdout; no file is written.
    #[arg(long, conflicts_with = "output")]
    data_url: bool,

    /// Print the result as JSON on stdout; no file is written.
    #[arg(long, conflicts_with_all = ["output", "data_url"])]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "IMGCONV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "IMGCONV_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Png,
    Jpg,
}

impl From<FormatArg> for TargetFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Png => TargetFormat::Png,
            FormatArg::Jpg => TargetFormat::Jpg,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let started = Instant::now();
    let target: TargetFormat = cli.format.into();
    // The UI unit is an integer percent; the converter contract takes a
    // fraction. The conversion stays here at the boundary.
    let quality = cli.quality as f32 / 100.0;

    // ── Build the request ────────────────────────────────────────────────
    let source = imgconv::pipeline::input::load_source(&cli.input)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let source = match cli.media_type {
        Some(ref label) => SourceImage::new(source.bytes().to_vec(), label.clone()),
        None => source,
    };

    let request = ConversionRequest::builder()
        .source(source)
        .target(target)
        .quality(quality)
        .build()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    // ── Run conversion ───────────────────────────────────────────────────
    let result = match convert(&request).await {
        Ok(result) => result,
        Err(e) => {
            // Full cause to the log, collapsed message to the user.
            tracing::error!("{e}");
            eprintln!("{} {}", red("✘"), e.user_message());
            std::process::exit(1);
        }
    };

    // ── Emit output ──────────────────────────────────────────────────────
    if cli.data_url {
        println!("{}", result.to_data_url());
    } else if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialise result")?;
        println!("{json}");
    } else {
        let out_path = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(result.suggested_filename()));
        write_atomic(&out_path, &result.bytes).await?;

        if !cli.quiet {
            eprintln!(
                "{}  {}x{} {}  {}  →  {}",
                green("✔"),
                result.width,
                result.height,
                result.format,
                dim(&format!("{} bytes, {}ms", result.len(), started.elapsed().as_millis())),
                bold(&out_path.display().to_string()),
            );
        }
    }

    Ok(())
}

/// Atomic write (temp file + rename) to prevent partial output files.
async fn write_atomic(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {parent:?}"))?;
    }

    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, bytes)
        .await
        .with_context(|| format!("Failed to write {tmp_path:?}"))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to move output into place at {path:?}"))?;

    io::stderr().flush().ok();
    Ok(())
}
