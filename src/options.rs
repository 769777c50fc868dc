use crate::error::ConvertError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Target text format of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "txt", alias = "text")]
    Text,
    #[value(name = "md", alias = "markdown")]
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(ConvertError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Sequence in which a book's document items are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ItemOrder {
    /// Declaration order of the package manifest.
    #[default]
    Manifest,
    /// Reading order of the package spine.
    Spine,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// Directory for the output file. Defaults to the source file's directory.
    pub output_dir: Option<PathBuf>,
    pub order: ItemOrder,
}

impl ConvertOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn order(mut self, order: ItemOrder) -> Self {
        self.order = order;
        self
    }
}
