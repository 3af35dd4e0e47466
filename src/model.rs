/// Index of an element in a [`DocTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An XML element with namespace prefixes stripped from its tag and attribute keys.
#[derive(Clone, Debug)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<NodeId>,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Navigation links and list flags attached to an element by the annotator.
/// Links are plain indices and never own the element they point at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Annotation {
    pub parent: Option<NodeId>,
    pub next: Option<NodeId>,
    pub previous: Option<NodeId>,
    pub is_first_list_item: bool,
    pub is_last_list_item: bool,
}

/// Arena-backed element tree. Elements are owned top-down by the arena;
/// `annotations[i]` belongs to `nodes[i]`.
#[derive(Clone, Debug)]
pub struct DocTree {
    pub(crate) nodes: Vec<Element>,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) root: NodeId,
}

impl DocTree {
    /// Copy a parsed document into an arena, keeping only local names.
    pub(crate) fn from_xml(xml: &roxmltree::Document) -> DocTree {
        let mut tree = DocTree {
            nodes: Vec::new(),
            annotations: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.push_element(xml.root_element());
        tree
    }

    fn push_element(&mut self, node: roxmltree::Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            text: node.text().map(str::to_string),
            children: Vec::new(),
        });
        self.annotations.push(Annotation::default());

        let children: Vec<NodeId> = node
            .children()
            .filter(|c| c.is_element())
            .map(|c| self.push_element(c))
            .collect();
        self.nodes[id.0].children = children;
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn annotation(&self, id: NodeId) -> &Annotation {
        &self.annotations[id.0]
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.nodes[id.0].attribute(key)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.annotations[id.0].parent
    }

    pub fn find_child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&c| self.tag(c) == tag)
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    pub fn find_first(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(id).find(|&d| self.tag(d) == tag)
    }

    pub fn find_all<'a>(&'a self, id: NodeId, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(id).filter(move |&d| self.tag(d) == tag)
    }

    pub fn has_descendant(&self, id: NodeId, tag: &str) -> bool {
        self.find_first(id, tag).is_some()
    }

    /// Nearest ancestor with the given tag. Requires parent links.
    pub fn find_ancestor(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.tag(node) == tag {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// `val` of the first descendant `<tag val=".."/>`, as used by `numId` and `ilvl`.
    pub fn descendant_val(&self, id: NodeId, tag: &str) -> Option<&str> {
        self.find_first(id, tag)
            .and_then(|n| self.attribute(n, "val"))
    }
}

pub struct Descendants<'a> {
    tree: &'a DocTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    /// Ordered list; holds the numbering keyword (`decimal`, `lowerRoman`, ...).
    Ordered(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub date: String,
    pub text: String,
}

/// Image size tokens as handed to the backend, e.g. `"10px"` or `"75pt"`.
/// A dimension that could not be determined is `"0"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: String,
    pub height: String,
}

impl ImageSize {
    pub const UNKNOWN: &'static str = "0";

    pub fn is_known(dimension: &str) -> bool {
        !dimension.is_empty() && dimension != Self::UNKNOWN
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize {
            width: Self::UNKNOWN.to_string(),
            height: Self::UNKNOWN.to_string(),
        }
    }
}
