//! Extract the text of EPUB ebooks into plain text or Markdown.
//!
//! [`convert`] opens an EPUB, walks its content documents, strips
//! non-content markup and writes one aggregated `.txt` or `.md` file named
//! after the book title.

pub mod cli;
pub mod converter;
pub mod epub_reader;
pub mod error;
pub mod html;
pub mod markdown;
pub mod metadata;
pub mod options;
pub mod package;
pub mod text;

pub use converter::{convert, convert_with, extract_markdown, extract_text, render, slugify};
pub use epub_reader::{Book, ContentItem};
pub use error::{ConvertError, ErrorKind, Result};
pub use metadata::Metadata;
pub use options::{ConvertOptions, ItemOrder, OutputFormat};
