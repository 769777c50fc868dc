use anyhow::{Context, Result};
use clap::Parser;
use epub2text::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = epub2text::convert_with(&cli.input, &cli.options())
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    println!("Conversion successful! Output saved to: {}", output.display());
    Ok(())
}
