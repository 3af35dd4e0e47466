use super::{Backend, Renderer};
use crate::model::{DocTree, NodeId};

/// WML toggle (`b`, `i`, `u`, ...): present with no val, or a val other than an
/// explicit "off" value, means on.
fn style_on(tree: &DocTree, rpr: NodeId, name: &str) -> bool {
    tree.find_child(rpr, name)
        .is_some_and(|n| {
            tree.attribute(n, "val")
                .is_none_or(|v| !matches!(v, "0" | "false" | "off" | "none"))
        })
}

/// Twentieths of a point to whole points, floored.
fn twips_to_pts(twips: &str) -> Option<String> {
    twips
        .trim()
        .parse::<i64>()
        .ok()
        .map(|v| v.div_euclid(20).to_string())
}

impl<B: Backend> Renderer<'_, B> {
    /// Format a run. `parts` holds the already-rendered fragment of each child;
    /// only page breaks are taken from it, everything else is rebuilt here.
    pub(super) fn render_run(&mut self, run: NodeId, parts: &[String]) -> String {
        let tree = self.tree();

        let mut text = String::new();
        let mut has_content = false;
        let mut is_deleted = false;
        for (&child, part) in tree.children(run).iter().zip(parts) {
            let element = tree.element(child);
            let fragment = match element.tag.as_str() {
                "t" => self.backend.escape(element.text.as_deref().unwrap_or("")),
                "delText" => {
                    is_deleted = true;
                    self.backend.escape(element.text.as_deref().unwrap_or(""))
                }
                "drawing" | "pict" => self.render_image(child),
                "br" => {
                    text.push_str(part);
                    continue;
                }
                _ => continue,
            };
            has_content |= !fragment.is_empty();
            text.push_str(&fragment);
        }
        // Nothing to format; pass any page break through as-is.
        if !has_content {
            return text;
        }

        if let Some(rpr) = tree.find_child(run, "rPr") {
            if style_on(tree, rpr, "b") {
                text = self.backend.bold(&text);
            }
            if style_on(tree, rpr, "i") {
                text = self.backend.italics(&text);
            }
            if style_on(tree, rpr, "u") {
                text = self.backend.underline(&text);
            }
        }

        let ppr = tree
            .parent(run)
            .and_then(|p| tree.find_child(p, "pPr"));
        if let Some(ppr) = ppr {
            text = self.apply_paragraph_properties(tree, ppr, text);
        }

        if is_deleted {
            text = self.backend.deletion(&text, "", "");
        }
        text
    }

    fn apply_paragraph_properties(&mut self, tree: &DocTree, ppr: NodeId, mut text: String) -> String {
        if let Some(jc) = tree.find_child(ppr, "jc") {
            match tree.attribute(jc, "val") {
                Some("right") => text = self.backend.right_justify(&text),
                Some("center") => text = self.backend.center_justify(&text),
                _ => {}
            }
        }
        if let Some(ind) = tree.find_child(ppr, "ind") {
            let left = tree.attribute(ind, "left").and_then(twips_to_pts);
            let right = tree.attribute(ind, "right").and_then(twips_to_pts);
            let first_line = tree.attribute(ind, "firstLine").and_then(twips_to_pts);
            text = self.backend.indent(
                &text,
                left.as_deref(),
                right.as_deref(),
                first_line.as_deref(),
            );
        }
        text
    }
}
