use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use regvm_listing::{build_listing, render_text};

#[derive(Parser, Debug)]
#[command(author, version, about = "regvm program listing", long_about = None)]
struct Cli {
    /// Program source file
    #[arg(value_name = "PROGRAM")]
    input: PathBuf,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the listing to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Cannot open file {}", cli.input.display()))?;
    let prog = regvm::load(&text)?;
    let listing = build_listing(&prog);

    let buf = match cli.format {
        OutputFormat::Text => render_text(&listing),
        OutputFormat::Json => serde_json::to_string_pretty(&listing)? + "\n",
    };
    if let Some(path) = &cli.out {
        std::fs::write(path, buf)?;
    } else {
        print!("{buf}");
    }
    Ok(())
}
