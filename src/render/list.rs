use super::{Backend, Renderer};
use crate::model::{ListStyle, NodeId};

impl<B: Backend> Renderer<'_, B> {
    /// Collect the list run that starts at `first` and wrap it as one list.
    ///
    /// Walks body-level siblings, rendering each, until a sibling flagged as a
    /// last item is reached (consumed only if it shares the run's numbering
    /// id) or a sibling with a different numbering id appears (left for the
    /// outer descent).
    pub(super) fn render_list(&mut self, first: NodeId, text: String) -> String {
        let tree = self.tree();
        let was_in_list = std::mem::replace(&mut self.in_list, true);

        let num_id = tree.descendant_val(first, "numId");
        let mut collected = self.wrap_paragraph(first, text);

        let mut cursor = tree.annotation(first).next;
        while let Some(sibling) = cursor {
            let annotation = tree.annotation(sibling);
            if annotation.is_last_list_item {
                break;
            }
            if let Some(other) = tree.descendant_val(sibling, "numId")
                && Some(other) != num_id
            {
                break;
            }
            collected.push_str(&self.render(sibling));
            cursor = annotation.next;
        }
        if let Some(last) = cursor
            && num_id.is_some()
            && tree.descendant_val(last, "numId") == num_id
        {
            collected.push_str(&self.render(last));
        }

        self.in_list = was_in_list;

        if collected.is_empty() {
            return collected;
        }
        let level = tree.descendant_val(first, "ilvl");
        match num_id.and_then(|id| self.docx.list_style(id, level)) {
            Some(ListStyle::Bullet) => self.backend.unordered_list(&collected),
            Some(ListStyle::Ordered(kind)) => self.backend.ordered_list(&collected, &kind),
            None => {
                log::warn!("Undetermined list style for numId {num_id:?}, leaving items unwrapped");
                collected
            }
        }
    }
}
