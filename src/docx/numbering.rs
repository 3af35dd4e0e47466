use crate::model::{DocTree, ListStyle, NodeId};

/// Follow `num[numId]` -> `abstractNumId` -> `abstractNum` -> `lvl/numFmt`.
///
/// With a `level`, the `lvl` whose `ilvl` matches is preferred; otherwise (or
/// when that level carries no `numFmt`) the first `numFmt` in the abstract
/// definition wins.
pub(super) fn resolve_list_style(
    numbering: &DocTree,
    num_id: &str,
    level: Option<&str>,
) -> Option<ListStyle> {
    let root = numbering.root();
    let num = numbering
        .find_all(root, "num")
        .find(|&n| numbering.attribute(n, "numId") == Some(num_id))?;
    let abstract_id = numbering
        .find_child(num, "abstractNumId")
        .and_then(|n| numbering.attribute(n, "val"))?;
    let abstract_num = numbering
        .find_all(root, "abstractNum")
        .find(|&n| numbering.attribute(n, "abstractNumId") == Some(abstract_id))?;

    let level_fmt = level.and_then(|level| {
        numbering
            .find_all(abstract_num, "lvl")
            .find(|&l| numbering.attribute(l, "ilvl") == Some(level))
            .and_then(|l| numbering.find_child(l, "numFmt"))
    });
    let num_fmt = level_fmt.or_else(|| first_num_fmt(numbering, abstract_num))?;

    match numbering.attribute(num_fmt, "val")? {
        "bullet" => Some(ListStyle::Bullet),
        kind => Some(ListStyle::Ordered(kind.to_string())),
    }
}

fn first_num_fmt(numbering: &DocTree, abstract_num: NodeId) -> Option<NodeId> {
    std::iter::once(abstract_num)
        .chain(numbering.descendants(abstract_num))
        .find_map(|n| numbering.find_child(n, "numFmt"))
}
