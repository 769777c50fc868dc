#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

struct Resource {
    id: String,
    href: String,
    media_type: String,
    content: Option<String>,
}

/// Builds minimal EPUB 3 archives for tests.
#[derive(Default)]
pub struct EpubBuilder {
    title: Option<String>,
    creator: Option<String>,
    resources: Vec<Resource>,
    spine: Vec<String>,
    container: Option<String>,
}

impl EpubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = Some(creator.to_string());
        self
    }

    /// Add an XHTML document to the manifest and the end of the spine.
    pub fn document(mut self, id: &str, body: &str) -> Self {
        self.resources.push(Resource {
            id: id.to_string(),
            href: format!("Text/{}.xhtml", id),
            media_type: "application/xhtml+xml".to_string(),
            content: Some(xhtml(body)),
        });
        self.spine.push(id.to_string());
        self
    }

    /// Add a document whose full markup is given verbatim.
    pub fn raw_document(mut self, id: &str, markup: &str) -> Self {
        self.resources.push(Resource {
            id: id.to_string(),
            href: format!("Text/{}.xhtml", id),
            media_type: "application/xhtml+xml".to_string(),
            content: Some(markup.to_string()),
        });
        self.spine.push(id.to_string());
        self
    }

    /// Add a non-document resource to the manifest.
    pub fn resource(mut self, id: &str, href: &str, media_type: &str, content: &str) -> Self {
        self.resources.push(Resource {
            id: id.to_string(),
            href: href.to_string(),
            media_type: media_type.to_string(),
            content: Some(content.to_string()),
        });
        self
    }

    /// Declare a document in the manifest without storing it in the archive.
    pub fn missing_document(mut self, id: &str) -> Self {
        self.resources.push(Resource {
            id: id.to_string(),
            href: format!("Text/{}.xhtml", id),
            media_type: "application/xhtml+xml".to_string(),
            content: None,
        });
        self.spine.push(id.to_string());
        self
    }

    pub fn spine(mut self, ids: &[&str]) -> Self {
        self.spine = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn container(mut self, xml: &str) -> Self {
        self.container = Some(xml.to_string());
        self
    }

    fn opf(&self) -> String {
        let mut metadata = String::new();
        if let Some(title) = &self.title {
            metadata.push_str(&format!("    <dc:title>{}</dc:title>\n", escape(title)));
        }
        if let Some(creator) = &self.creator {
            metadata.push_str(&format!("    <dc:creator>{}</dc:creator>\n", escape(creator)));
        }

        let manifest: String = self
            .resources
            .iter()
            .map(|r| {
                format!(
                    "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"/>\n",
                    r.id, r.href, r.media_type
                )
            })
            .collect();

        let spine: String = self
            .spine
            .iter()
            .map(|id| format!("    <itemref idref=\"{}\"/>\n", id))
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
{metadata}  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine>
{spine}  </spine>
</package>"#
        )
    }

    pub fn write(&self, path: &Path) -> PathBuf {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        zip.start_file("mimetype", options).unwrap();
        zip.write_all(b"application/epub+zip").unwrap();

        zip.start_file("META-INF/container.xml", options).unwrap();
        zip.write_all(self.container.as_deref().unwrap_or(CONTAINER).as_bytes())
            .unwrap();

        zip.start_file("OEBPS/content.opf", options).unwrap();
        zip.write_all(self.opf().as_bytes()).unwrap();

        for resource in &self.resources {
            if let Some(content) = &resource.content {
                zip.start_file(format!("OEBPS/{}", resource.href), options)
                    .unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
        }

        zip.finish().unwrap();
        path.to_path_buf()
    }
}

pub fn xhtml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>Page</title><style>body {{ margin: 0; }}</style></head><body>{body}</body></html>"#
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
