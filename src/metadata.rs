use crate::options::OutputFormat;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Dublin-Core elements carried into [`Metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcElement {
    Title,
    Creator,
    Language,
    Publisher,
}

impl DcElement {
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(DcElement::Title),
            "creator" => Some(DcElement::Creator),
            "language" => Some(DcElement::Language),
            "publisher" => Some(DcElement::Publisher),
            _ => None,
        }
    }
}

/// Dublin-Core metadata of a book. Absent fields stay `None`; defaults are
/// applied by the accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
}

impl Metadata {
    /// Record a value for `element`. The first non-blank value wins.
    pub fn set(&mut self, element: DcElement, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }

        let slot = match element {
            DcElement::Title => &mut self.title,
            DcElement::Creator => &mut self.creator,
            DcElement::Language => &mut self.language,
            DcElement::Publisher => &mut self.publisher,
        };

        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    pub fn author(&self) -> &str {
        self.creator.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// Front-matter lines that open every converted document.
pub fn header_lines(metadata: &Metadata, format: OutputFormat) -> Vec<String> {
    match format {
        OutputFormat::Text => vec![
            format!("Title: {}", metadata.title()),
            format!("Author: {}", metadata.author()),
            "=".repeat(50),
            String::new(),
        ],
        OutputFormat::Markdown => vec![
            format!("# {}", metadata.title()),
            format!("**Author:** {}", metadata.author()),
            String::new(),
            "---".to_string(),
            String::new(),
        ],
    }
}
