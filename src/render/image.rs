use super::{Backend, Renderer};
use crate::model::{DocTree, ImageSize, NodeId};

// http://openxmldeveloper.org/discussions/formats/f/15/p/396/933.aspx
const EMUS_PER_PIXEL: i64 = 9525;

/// On drawings the id lives on the blip's `embed`; legacy picts use `imagedata/@id`.
fn image_rel_id(tree: &DocTree, container: NodeId) -> Option<&str> {
    if let Some(blip) = tree.find_first(container, "blip") {
        return tree.attribute(blip, "embed");
    }
    tree.find_first(container, "imagedata")
        .and_then(|n| tree.attribute(n, "id"))
}

fn emu_to_px(emu: Option<&str>) -> String {
    match emu.and_then(|e| e.trim().parse::<i64>().ok()) {
        Some(emu) => format!("{}px", emu / EMUS_PER_PIXEL),
        None => ImageSize::UNKNOWN.to_string(),
    }
}

/// Size from the drawing extent (EMU), else from a VML shape's inline style.
fn image_size(tree: &DocTree, container: NodeId) -> ImageSize {
    // wp:extent, or an a:ext that carries dimensions (a:extLst/a:ext does not)
    let extent = tree.find_first(container, "extent").or_else(|| {
        tree.find_all(container, "ext")
            .find(|&n| tree.attribute(n, "cx").is_some() && tree.attribute(n, "cy").is_some())
    });
    if let Some(ext) = extent {
        return ImageSize {
            width: emu_to_px(tree.attribute(ext, "cx")),
            height: emu_to_px(tree.attribute(ext, "cy")),
        };
    }

    let mut size = ImageSize::default();
    let style = tree
        .find_first(container, "shape")
        .and_then(|shape| tree.attribute(shape, "style"));
    for decl in style.unwrap_or("").split(';') {
        let decl = decl.trim();
        if let Some(h) = decl.strip_prefix("height:") {
            size.height = h.trim().to_string();
        } else if let Some(w) = decl.strip_prefix("width:") {
            size.width = w.trim().to_string();
        }
    }
    size
}

impl<B: Backend> Renderer<'_, B> {
    /// Render a `drawing` or `pict` run child. Images whose relationship
    /// cannot be resolved are dropped.
    pub(super) fn render_image(&mut self, container: NodeId) -> String {
        let docx = self.docx;
        let tree = docx.tree();
        let rel_id = image_rel_id(tree, container);
        let Some(src) = rel_id.and_then(|id| docx.relationship(id)) else {
            log::warn!("Unresolved image relationship {rel_id:?}, dropping image");
            return String::new();
        };
        if src.is_empty() {
            return String::new();
        }
        let size = image_size(tree, container);
        let src = self.backend.escape(src);
        self.backend.image(&src, &size)
    }
}
