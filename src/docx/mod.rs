mod annotate;
mod comments;
mod numbering;

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use once_cell::unsync::OnceCell;

use crate::error::{Error, Result};
use crate::model::{Comment, DocTree, ListStyle};
use crate::render::{Backend, Renderer};

const DOCUMENT_PART: &str = "word/document.xml";
const NUMBERING_PART: &str = "word/numbering.xml";
const COMMENTS_PART: &str = "word/comments.xml";
const RELS_PART: &str = "word/_rels/document.xml.rels";

/// A loaded and annotated DOCX package.
///
/// Holds the namespace-stripped main document tree (annotated with parent,
/// sibling and list-boundary information), the optional numbering and comment
/// trees, and the relationship map. All of it is read-only after construction
/// apart from the lazily built comment store.
pub struct Docx {
    document: DocTree,
    numbering: Option<DocTree>,
    comments: Option<DocTree>,
    relationships: HashMap<String, String>,
    comment_store: OnceCell<HashMap<String, Comment>>,
}

impl Docx {
    pub fn open(path: &Path) -> Result<Docx> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
                std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
            ),
            _ => Error::Io(e),
        })?;
        let mut zip = zip::ZipArchive::new(file)
            .map_err(|_| Error::MalformedPackage("file is not a ZIP archive".into()))?;
        Docx::from_archive(&mut zip)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Docx> {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|_| Error::MalformedPackage("data is not a ZIP archive".into()))?;
        Docx::from_archive(&mut zip)
    }

    fn from_archive<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> Result<Docx> {
        let document_xml = read_zip_text(zip, DOCUMENT_PART)?.ok_or_else(|| {
            Error::MalformedPackage(format!("missing {DOCUMENT_PART} (is this a DOCX file?)"))
        })?;
        let rels_xml = read_zip_text(zip, RELS_PART)?
            .ok_or_else(|| Error::MalformedPackage(format!("missing {RELS_PART}")))?;
        // Only present when the document has lists / comments
        let numbering_xml = read_zip_text(zip, NUMBERING_PART)?;
        let comments_xml = read_zip_text(zip, COMMENTS_PART)?;

        log::debug!(
            "Package parts: numbering={} comments={}",
            numbering_xml.is_some(),
            comments_xml.is_some()
        );

        let mut document = parse_part(DOCUMENT_PART, &document_xml)?;
        if !document.has_descendant(document.root(), "body") {
            return Err(Error::MalformedPackage(format!("{DOCUMENT_PART} has no body")));
        }
        document.annotate();

        let numbering = numbering_xml
            .map(|xml| parse_part(NUMBERING_PART, &xml))
            .transpose()?;
        let comments = comments_xml
            .map(|xml| parse_part(COMMENTS_PART, &xml))
            .transpose()?;
        let relationships = parse_rels_xml(&rels_xml)?;
        log::debug!("Loaded {} relationships", relationships.len());

        Ok(Docx {
            document,
            numbering,
            comments,
            relationships,
            comment_store: OnceCell::new(),
        })
    }

    /// The annotated main document tree.
    pub fn tree(&self) -> &DocTree {
        &self.document
    }

    pub fn relationship(&self, id: &str) -> Option<&str> {
        self.relationships.get(id).map(String::as_str)
    }

    pub fn relationships(&self) -> &HashMap<String, String> {
        &self.relationships
    }

    /// Resolve a numbering id to bullet/ordered. `None` when the package has no
    /// numbering part or the num -> abstractNum -> numFmt chain is broken.
    pub fn list_style(&self, num_id: &str, level: Option<&str>) -> Option<ListStyle> {
        numbering::resolve_list_style(self.numbering.as_ref()?, num_id, level)
    }

    /// Look up a comment by id.
    ///
    /// Returns `Ok(None)` when the package has no comments part at all and
    /// [`Error::CommentNotFound`] when the part exists but lacks the id.
    pub fn comment(&self, id: &str) -> Result<Option<&Comment>> {
        let Some(comments) = self.comments.as_ref() else {
            return Ok(None);
        };
        let store = self
            .comment_store
            .get_or_init(|| comments::build_comment_store(comments));
        store
            .get(id)
            .map(Some)
            .ok_or_else(|| Error::CommentNotFound(id.to_string()))
    }

    /// Render the whole document through `backend`. Each call is an
    /// independent session with its own visited state.
    pub fn render<B: Backend>(&self, backend: &mut B) -> String {
        Renderer::new(self, backend).render_document()
    }
}

fn parse_part(name: &str, xml: &str) -> Result<DocTree> {
    let parsed = roxmltree::Document::parse(xml).map_err(|source| Error::MalformedXml {
        part: name.to_string(),
        source,
    })?;
    Ok(DocTree::from_xml(&parsed))
}

/// Read a part as UTF-8. `Ok(None)` only when the archive has no such entry;
/// a present but unreadable entry is a malformed package.
fn read_zip_text<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut entry = match zip.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(Error::MalformedPackage(format!("failed to open {name}: {e}"))),
    };
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| Error::MalformedPackage(format!("failed to read {name}: {e}")))?;
    Ok(Some(content))
}

fn parse_rels_xml(xml_content: &str) -> Result<HashMap<String, String>> {
    let xml = roxmltree::Document::parse(xml_content).map_err(|source| Error::MalformedXml {
        part: RELS_PART.to_string(),
        source,
    })?;
    let mut rels = HashMap::new();
    for node in xml.root_element().children() {
        if node.tag_name().name() == "Relationship"
            && let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target"))
        {
            rels.insert(id.to_string(), target.to_string());
        }
    }
    Ok(rels)
}
