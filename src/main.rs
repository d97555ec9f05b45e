use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use syntomid_convert::{file_stem, fl_studio, syntomid, ConvertError, Metadata};

#[derive(Parser, Debug)]
#[command(name = "syntomid-convert")]
#[command(about = "Convert SynToMid/FL Studio exports to unified JSON", long_about = None)]
struct Args {
    /// Input file (MIDI or JSON)
    input: PathBuf,

    /// Output JSON file (default: `<input-name>.json`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source format (auto-detects from the file extension)
    #[arg(short, long, value_enum, default_value = "auto")]
    source: SourceArg,

    /// Set metadata title (default: input file name stem)
    #[arg(long)]
    title: Option<String>,

    /// Set BPM metadata
    #[arg(long, default_value_t = 120)]
    bpm: u32,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SourceArg {
    Syntomid,
    #[value(name = "fl_studio")]
    FlStudio,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Syntomid,
    FlStudio,
}

fn resolve_format(source: SourceArg, input: &Path) -> Result<InputFormat, ConvertError> {
    match source {
        SourceArg::Syntomid => Ok(InputFormat::Syntomid),
        SourceArg::FlStudio => Ok(InputFormat::FlStudio),
        SourceArg::Auto => {
            let extension = input
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            match extension.as_deref() {
                Some("mid") => Ok(InputFormat::Syntomid),
                Some("json") => Ok(InputFormat::FlStudio),
                other => Err(ConvertError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                )),
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.input.exists() {
        anyhow::bail!("file not found: {}", args.input.display());
    }

    let format = resolve_format(args.source, &args.input)?;

    let collection = match format {
        InputFormat::Syntomid => {
            let mut metadata = Metadata::new();
            let title = args
                .title
                .clone()
                .unwrap_or_else(|| file_stem(&args.input).to_string());
            metadata.insert("title".to_string(), title.into());
            metadata.insert("bpm".to_string(), args.bpm.into());
            syntomid::from_midi_file(&args.input, Some(metadata))
        }
        InputFormat::FlStudio => fl_studio::from_json_file(&args.input),
    }
    .with_context(|| format!("failed to convert {}", args.input.display()))?;

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", file_stem(&args.input))));
    collection.save(&output_path)?;

    if !args.quiet {
        eprintln!("Conversion complete:");
        eprintln!("  Source: {}", collection.source);
        eprintln!("  Notes:  {}", collection.notes.len());
        eprintln!("  Output: {}", output_path.display());
    }

    Ok(())
}
