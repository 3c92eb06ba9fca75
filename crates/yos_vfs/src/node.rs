//! Filesystem node types.

/// One entry in the tree. Directory children keep definition order; listings
/// are expected to be stable across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory { children: Vec<(String, Node)> },
    File { content: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

impl Node {
    pub fn dir(children: Vec<(&str, Node)>) -> Self {
        Node::Directory {
            children: children
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
        }
    }

    pub fn file(content: &str) -> Self {
        Node::File {
            content: content.to_string(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory { .. } => NodeKind::Directory,
            Node::File { .. } => NodeKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Directory { children } => children
                .iter()
                .find(|(child_name, _)| child_name == name)
                .map(|(_, node)| node),
            Node::File { .. } => None,
        }
    }
}
