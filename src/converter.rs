use crate::epub_reader::Book;
use crate::error::{ConvertError, Result};
use crate::html::StrippedDocument;
use crate::markdown;
use crate::metadata;
use crate::options::{ConvertOptions, OutputFormat};
use crate::text;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

static UNSAFE_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUNS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Items whose visible text is longer than this get a chapter header.
const CHAPTER_HEADER_MIN_CHARS: usize = 100;

/// Convert the EPUB at `source` and write `<title-slug>.<ext>` into
/// `output_dir` (the source file's directory when `None`).
pub fn convert(source: &Path, format: OutputFormat, output_dir: Option<&Path>) -> Result<PathBuf> {
    let mut options = ConvertOptions::new(format);
    options.output_dir = output_dir.map(Path::to_path_buf);
    convert_with(source, &options)
}

pub fn convert_with(source: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    if !source.exists() {
        return Err(ConvertError::NotFound {
            path: source.to_path_buf(),
        });
    }

    let book = Book::open_with_order(source, options.order)?;
    let content = render(&book, options.format);

    let output_dir = match &options.output_dir {
        Some(dir) => dir.clone(),
        None => source_dir(source),
    };
    let output_path = output_dir.join(output_file_name(&book, options.format));

    write_output(&output_path, &content)?;

    let metadata = book.metadata();
    info!(
        title = metadata.title(),
        author = metadata.author(),
        language = metadata.language.as_deref().unwrap_or_default(),
        publisher = metadata.publisher.as_deref().unwrap_or_default(),
        items = book.items().len(),
        format = %options.format,
        output = %output_path.display(),
        "Converted EPUB"
    );

    Ok(output_path)
}

pub fn render(book: &Book, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => extract_text(book),
        OutputFormat::Markdown => extract_markdown(book),
    }
}

/// Plain text of the whole book: header block, then one normalized
/// paragraph per non-blank document followed by a blank line.
pub fn extract_text(book: &Book) -> String {
    let mut lines = metadata::header_lines(book.metadata(), OutputFormat::Text);

    for item in book.items() {
        let document = StrippedDocument::parse(&item.raw_markup);
        let text = text::normalize(&document.text());

        if text.trim().is_empty() {
            debug!(id = %item.id, member = %item.path, "Skipping item without text");
            continue;
        }

        lines.push(text);
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Markdown of the whole book: header block, then each non-blank document
/// converted to Markdown. Documents with more than a short preview of text
/// are introduced by a numbered chapter header.
pub fn extract_markdown(book: &Book) -> String {
    let mut lines = metadata::header_lines(book.metadata(), OutputFormat::Markdown);
    let mut chapter_count = 0;

    for item in book.items() {
        let document = StrippedDocument::parse(&item.raw_markup);
        let preview = document.text();
        let preview = preview.trim();

        if preview.is_empty() {
            debug!(id = %item.id, member = %item.path, "Skipping item without text");
            continue;
        }

        chapter_count += 1;

        if preview.chars().count() > CHAPTER_HEADER_MIN_CHARS {
            debug!(id = %item.id, member = %item.path, chapter = chapter_count, "Adding chapter header");
            lines.push(format!("## Chapter {}", chapter_count));
            lines.push(String::new());
        }

        let md = markdown::html_to_markdown(&document);
        if !md.is_empty() {
            lines.push(md);
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Filesystem-safe slug of a title: characters other than word characters,
/// whitespace and hyphens are dropped, and separator runs become one hyphen.
pub fn slugify(title: &str) -> String {
    let cleaned = UNSAFE_CHARS_RE.replace_all(title, "");
    SEPARATOR_RUNS_RE
        .replace_all(cleaned.trim(), "-")
        .into_owned()
}

fn output_file_name(book: &Book, format: OutputFormat) -> String {
    let mut stem = slugify(book.title());

    if stem.is_empty() {
        stem = book
            .source()
            .file_stem()
            .map(|s| slugify(&s.to_string_lossy()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "book".to_string());
    }

    format!("{}.{}", stem, format.extension())
}

fn source_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Write through a temporary file in the target directory and rename it into
/// place, so `path` only ever holds complete content.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir).map_err(|e| ConvertError::io(dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".epub2text-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| ConvertError::io(dir, e))?;

    tmp.write_all(content.as_bytes())
        .map_err(|e| ConvertError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| ConvertError::io(path, e.error))?;

    Ok(())
}
