use crate::options::{ConvertOptions, ItemOrder, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Extract the text of an EPUB ebook into plain text or Markdown
#[derive(Parser, Debug)]
#[command(name = "epub2text", version, about)]
pub struct Cli {
    /// Path to the input EPUB file
    pub input: PathBuf,

    /// Output format
    #[arg(value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Directory for the output file. Defaults to the directory of the EPUB.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Order in which content documents are walked
    #[arg(long, value_enum, default_value_t = ItemOrder::Manifest)]
    pub order: ItemOrder,
}

impl Cli {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            format: self.format,
            output_dir: self.output_dir.clone(),
            order: self.order,
        }
    }
}
