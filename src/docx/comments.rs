use std::collections::HashMap;

use crate::model::{Comment, DocTree};

pub(super) fn build_comment_store(comments: &DocTree) -> HashMap<String, Comment> {
    let mut store = HashMap::new();
    for node in comments.find_all(comments.root(), "comment") {
        let Some(id) = comments.attribute(node, "id") else {
            continue;
        };
        let text: String = comments
            .find_all(node, "t")
            .filter_map(|t| comments.element(t).text.as_deref())
            .collect();
        store.insert(
            id.to_string(),
            Comment {
                author: comments.attribute(node, "author").unwrap_or("").to_string(),
                date: comments.attribute(node, "date").unwrap_or("").to_string(),
                text,
            },
        );
    }
    log::debug!("Built comment store with {} entries", store.len());
    store
}
