use std::collections::BTreeSet;

use crate::model::{Annotation, DocTree, NodeId};

impl DocTree {
    /// Attach parent links, body-level sibling links and list boundary flags.
    ///
    /// All annotations are reset first, so running this again on the same
    /// tree yields identical results.
    pub fn annotate(&mut self) {
        self.annotations.fill(Annotation::default());
        self.link_parents();
        self.mark_list_boundaries();
        self.link_body_siblings();
    }

    fn link_parents(&mut self) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            for &child in &self.nodes[id.0].children {
                self.annotations[child.0].parent = Some(id);
                stack.push(child);
            }
        }
    }

    /// For every (numId, ilvl) pair, flag the first and last paragraph using it.
    fn mark_list_boundaries(&mut self) {
        let root = self.root;
        let num_ids: BTreeSet<&str> = self
            .find_all(root, "numId")
            .filter_map(|n| self.attribute(n, "val"))
            .collect();
        let ilvl_nodes: Vec<NodeId> = self.find_all(root, "ilvl").collect();
        let levels: BTreeSet<&str> = ilvl_nodes
            .iter()
            .filter_map(|&n| self.attribute(n, "val"))
            .collect();
        let paragraphs: Vec<NodeId> = ilvl_nodes
            .iter()
            .filter_map(|&n| self.find_ancestor(n, "p"))
            .collect();

        let mut firsts = Vec::new();
        let mut lasts = Vec::new();
        for &num_id in &num_ids {
            for &level in &levels {
                let mut matching = paragraphs.iter().copied().filter(|&p| {
                    self.descendant_val(p, "numId") == Some(num_id)
                        && self.descendant_val(p, "ilvl") == Some(level)
                });
                let Some(first) = matching.next() else {
                    continue;
                };
                let last = matching.last().unwrap_or(first);
                firsts.push(first);
                lasts.push(last);
            }
        }
        log::debug!(
            "List boundaries: {} numbering ids, {} levels, {} runs",
            num_ids.len(),
            levels.len(),
            firsts.len()
        );

        for id in firsts {
            self.annotations[id.0].is_first_list_item = true;
        }
        for id in lasts {
            self.annotations[id.0].is_last_list_item = true;
        }
    }

    /// Link consecutive `p`/`tbl` children of the body. Boundary elements keep
    /// `None` on their open side, so the chain is acyclic.
    fn link_body_siblings(&mut self) {
        let Some(body) = self.find_first(self.root, "body") else {
            return;
        };
        let blocks: Vec<NodeId> = self
            .children(body)
            .iter()
            .copied()
            .filter(|&c| matches!(self.tag(c), "p" | "tbl"))
            .collect();
        for pair in blocks.windows(2) {
            self.annotations[pair[0].0].next = Some(pair[1]);
            self.annotations[pair[1].0].previous = Some(pair[0]);
        }
    }
}
