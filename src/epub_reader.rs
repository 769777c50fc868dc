use crate::error::{ConvertError, Result};
use crate::metadata::Metadata;
use crate::options::ItemOrder;
use crate::package::{self, ManifestItem, Package, CONTAINER_PATH};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// One document-type entry of the manifest, with its markup loaded.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: String,
    /// Archive member the markup was read from.
    pub path: String,
    pub media_type: String,
    pub raw_markup: String,
}

/// A parsed EPUB: metadata plus its content documents in walk order.
#[derive(Debug)]
pub struct Book {
    source: PathBuf,
    metadata: Metadata,
    items: Vec<ContentItem>,
}

impl Book {
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_order(path, ItemOrder::Manifest)
    }

    pub fn open_with_order(path: &Path, order: ItemOrder) -> Result<Self> {
        if !path.exists() {
            return Err(ConvertError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| ConvertError::archive(path, e))?;
        let mut archive = ZipArchive::new(file).map_err(|e| ConvertError::archive(path, e))?;

        let container = read_member(&mut archive, CONTAINER_PATH)
            .map_err(|reason| ConvertError::archive(path, reason))?;
        let opf_path =
            package::parse_container(&container).map_err(|e| ConvertError::archive(path, e))?;
        debug!(package = %opf_path, "Located package document");

        let opf = read_member(&mut archive, &opf_path)
            .map_err(|reason| ConvertError::archive(path, reason))?;
        let package =
            package::parse_package(&opf, &opf_path).map_err(|e| ConvertError::archive(path, e))?;

        let mut items = Vec::new();
        for entry in document_entries(&package, order) {
            let raw_markup = read_member(&mut archive, &entry.path).map_err(|reason| {
                warn!(id = %entry.id, member = %entry.path, "Manifest item missing from archive");
                ConvertError::archive(path, reason)
            })?;

            items.push(ContentItem {
                id: entry.id.clone(),
                path: entry.path.clone(),
                media_type: entry.media_type.clone(),
                raw_markup,
            });
        }

        Ok(Self {
            source: path.to_path_buf(),
            metadata: package.metadata,
            items,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn title(&self) -> &str {
        self.metadata.title()
    }

    pub fn author(&self) -> &str {
        self.metadata.author()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }
}

fn document_entries(package: &Package, order: ItemOrder) -> Vec<&ManifestItem> {
    match order {
        ItemOrder::Manifest => package
            .manifest
            .iter()
            .filter(|item| item.is_document())
            .collect(),
        ItemOrder::Spine => package
            .spine
            .iter()
            .filter_map(|idref| package.item(idref))
            .filter(|item| item.is_document())
            .collect(),
    }
}

/// Read an archive member as text. Invalid UTF-8 is replaced, a BOM dropped.
fn read_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> std::result::Result<String, String> {
    let mut member = archive
        .by_name(name)
        .map_err(|e| format!("{}: {}", name, e))?;

    let mut bytes = Vec::new();
    member
        .read_to_end(&mut bytes)
        .map_err(|e| format!("{}: {}", name, e))?;

    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}
