mod image;
mod list;
mod run;

use fixedbitset::FixedBitSet;

use crate::docx::Docx;
use crate::model::{DocTree, ImageSize, NodeId};

/// Output format for the renderer. Every method receives already-rendered
/// child fragments and returns a new fragment; implementations never see the
/// document tree.
pub trait Backend {
    /// Make extracted text (and link/image targets) safe for the output format.
    fn escape(&self, text: &str) -> String;

    fn paragraph(&mut self, text: &str) -> String;
    fn bold(&mut self, text: &str) -> String;
    fn italics(&mut self, text: &str) -> String;
    fn underline(&mut self, text: &str) -> String;
    fn hyperlink(&mut self, text: &str, href: &str) -> String;
    /// Dimensions reported as `"0"` are unknown; backends omit them.
    fn image(&mut self, src: &str, size: &ImageSize) -> String;
    fn insertion(&mut self, text: &str, author: &str, date: &str) -> String;
    fn deletion(&mut self, text: &str, author: &str, date: &str) -> String;
    /// `kind` is the numbering keyword, e.g. `decimal` or `lowerRoman`.
    fn ordered_list(&mut self, text: &str, kind: &str) -> String;
    fn unordered_list(&mut self, text: &str) -> String;
    fn list_element(&mut self, text: &str) -> String;
    fn table(&mut self, text: &str) -> String;
    fn table_row(&mut self, text: &str) -> String;
    fn table_cell(&mut self, text: &str) -> String;
    fn page_break(&mut self) -> String;
    fn right_justify(&mut self, text: &str) -> String;
    fn center_justify(&mut self, text: &str) -> String;
    /// Indentation in points; each side is independently optional.
    fn indent(
        &mut self,
        text: &str,
        left: Option<&str>,
        right: Option<&str>,
        first_line: Option<&str>,
    ) -> String;
}

/// One rendering session over an annotated [`Docx`].
pub(crate) struct Renderer<'a, B: Backend> {
    docx: &'a Docx,
    backend: &'a mut B,
    visited: FixedBitSet,
    processed_runs: FixedBitSet,
    in_list: bool,
}

impl<'a, B: Backend> Renderer<'a, B> {
    pub(crate) fn new(docx: &'a Docx, backend: &'a mut B) -> Self {
        let len = docx.tree().len();
        Renderer {
            docx,
            backend,
            visited: FixedBitSet::with_capacity(len),
            processed_runs: FixedBitSet::with_capacity(len),
            in_list: false,
        }
    }

    pub(crate) fn render_document(mut self) -> String {
        let root = self.tree().root();
        self.render(root)
    }

    fn tree(&self) -> &'a DocTree {
        self.docx.tree()
    }

    /// Render `id` bottom-up. Returns an empty fragment for nodes already
    /// rendered, since list collection reaches body siblings ahead of the
    /// normal descent.
    fn render(&mut self, id: NodeId) -> String {
        if self.visited.put(id.index()) {
            return String::new();
        }
        let tree = self.tree();

        let children = tree.children(id);
        let mut parts = Vec::with_capacity(children.len());
        for &child in children {
            parts.push(self.render(child));
        }
        let folded = parts.concat();

        if tree.annotation(id).is_first_list_item {
            return self.render_list(id, folded);
        }

        let element = tree.element(id);
        match element.tag.as_str() {
            // Only the break survives; children of the break are dropped.
            "br" if element.attribute("type") == Some("page") => self.backend.page_break(),
            "tbl" => self.backend.table(&folded),
            "tr" => self.backend.table_row(&folded),
            "tc" => self.backend.table_cell(&folded),
            "r" if !self.processed_runs.put(id.index()) => self.render_run(id, &parts),
            "p" => self.render_paragraph(id, folded),
            // Revision marks in rPr are empty `ins` elements.
            "ins" if !folded.is_empty() => self.backend.insertion(&folded, "", ""),
            "hyperlink" => self.render_hyperlink(id, folded),
            _ => folded,
        }
    }

    fn render_paragraph(&mut self, id: NodeId, text: String) -> String {
        let tree = self.tree();
        // Cell wrapping comes from the `tc` case.
        if tree.parent(id).is_some_and(|p| tree.tag(p) == "tc") {
            return text;
        }
        self.wrap_paragraph(id, text)
    }

    /// Wrap as a list element or paragraph. Empty paragraphs vanish unless a
    /// list run is being collected.
    fn wrap_paragraph(&mut self, id: NodeId, text: String) -> String {
        if text.is_empty() && !self.in_list {
            return String::new();
        }
        if self.tree().has_descendant(id, "ilvl") {
            self.backend.list_element(&text)
        } else {
            self.backend.paragraph(&text)
        }
    }

    fn render_hyperlink(&mut self, id: NodeId, text: String) -> String {
        let docx = self.docx;
        // Internal links carry only an anchor
        let Some(rel_id) = docx.tree().attribute(id, "id") else {
            return text;
        };
        let Some(href) = docx.relationship(rel_id) else {
            log::warn!("Unresolved hyperlink relationship {rel_id}, rendering as text");
            return text;
        };
        if href.is_empty() {
            return text;
        }
        let href = self.backend.escape(href);
        self.backend.hyperlink(&text, &href)
    }
}
