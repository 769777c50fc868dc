//! OCF container and OPF package document parsing.
//!
//! The container (`META-INF/container.xml`) names the package document; the
//! package document declares the Dublin-Core metadata, the manifest of every
//! resource in the archive and the spine that orders them for reading.

use crate::metadata::{DcElement, Metadata};
use percent_encoding::percent_decode_str;
use roxmltree::{Document, Node, ParsingOptions};
use thiserror::Error;

pub const CONTAINER_PATH: &str = "META-INF/container.xml";

const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("{file} is not well-formed XML: {source}")]
    Xml {
        file: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("META-INF/container.xml does not name a package document")]
    NoRootfile,

    #[error("{0} is not an OPF package document")]
    NotAPackage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    /// Archive member path, resolved against the package document directory.
    pub path: String,
    pub media_type: String,
    pub properties: Option<String>,
}

impl ManifestItem {
    /// XHTML/HTML content documents, excluding the EPUB 3 navigation document.
    pub fn is_document(&self) -> bool {
        let media_type = self.media_type.trim().to_ascii_lowercase();
        let markup = media_type == "application/xhtml+xml" || media_type == "text/html";
        let nav = self
            .properties
            .as_deref()
            .is_some_and(|props| props.split_whitespace().any(|p| p == "nav"));
        markup && !nav
    }
}

#[derive(Debug, Default)]
pub struct Package {
    pub metadata: Metadata,
    /// Manifest items in declaration order.
    pub manifest: Vec<ManifestItem>,
    /// Spine `idref`s in reading order.
    pub spine: Vec<String>,
}

impl Package {
    pub fn item(&self, id: &str) -> Option<&ManifestItem> {
        self.manifest.iter().find(|item| item.id == id)
    }
}

fn parse_xml<'a>(file: &str, content: &'a str) -> Result<Document<'a>, PackageError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(content.trim_start_matches('\u{feff}'), options).map_err(
        |source| PackageError::Xml {
            file: file.to_string(),
            source,
        },
    )
}

/// Return the archive path of the package document named by the container.
pub fn parse_container(content: &str) -> Result<String, PackageError> {
    let doc = parse_xml(CONTAINER_PATH, content)?;

    doc.descendants()
        .filter(|node| node.tag_name().name() == "rootfile")
        .filter_map(|node| node.attribute("full-path"))
        .map(|path| path.trim().trim_start_matches('/'))
        .find(|path| !path.is_empty())
        .map(str::to_string)
        .ok_or(PackageError::NoRootfile)
}

/// Parse the package document stored at `opf_path` in the archive.
pub fn parse_package(content: &str, opf_path: &str) -> Result<Package, PackageError> {
    let doc = parse_xml(opf_path, content)?;
    let root = doc.root_element();
    if root.tag_name().name() != "package" {
        return Err(PackageError::NotAPackage(opf_path.to_string()));
    }

    let base_dir = match opf_path.rfind('/') {
        Some(idx) => &opf_path[..idx],
        None => "",
    };

    let mut package = Package::default();

    for node in root.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "metadata" => parse_metadata(node, &mut package.metadata),
            "manifest" => package.manifest = parse_manifest(node, base_dir),
            "spine" => package.spine = parse_spine(node),
            _ => {}
        }
    }

    Ok(package)
}

fn parse_metadata(metadata_node: Node, metadata: &mut Metadata) {
    for node in metadata_node.descendants().filter(Node::is_element) {
        if node.tag_name().namespace() != Some(DC_NAMESPACE) {
            continue;
        }
        if let Some(element) = DcElement::from_local_name(node.tag_name().name()) {
            let value: String = node
                .descendants()
                .filter(Node::is_text)
                .filter_map(|n| n.text())
                .collect();
            metadata.set(element, &value);
        }
    }
}

fn parse_manifest(manifest_node: Node, base_dir: &str) -> Vec<ManifestItem> {
    manifest_node
        .children()
        .filter(|node| node.tag_name().name() == "item")
        .filter_map(|node| {
            let id = node.attribute("id")?;
            let href = node.attribute("href")?;
            Some(ManifestItem {
                id: id.to_string(),
                path: resolve_href(base_dir, href),
                media_type: node.attribute("media-type").unwrap_or_default().to_string(),
                properties: node.attribute("properties").map(str::to_string),
            })
        })
        .collect()
}

fn parse_spine(spine_node: Node) -> Vec<String> {
    spine_node
        .children()
        .filter(|node| node.tag_name().name() == "itemref")
        .filter_map(|node| node.attribute("idref"))
        .map(str::to_string)
        .collect()
}

/// Resolve a manifest `href` to an archive member path.
pub fn resolve_href(base_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or_default();
    let href = percent_decode_str(href).decode_utf8_lossy();

    let mut segments: Vec<&str> = if href.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}
