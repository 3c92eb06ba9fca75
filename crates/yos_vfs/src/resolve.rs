//! Path resolution and node operations.

use thiserror::Error;

use crate::node::Node;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("no such file or directory: {path}")]
    NotFound { path: String },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("is a directory: {path}")]
    IsADirectory { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Joins `input` onto `base` and normalizes the result lexically.
///
/// Absolute inputs ignore `base`. Empty segments and `.` are skipped; `..`
/// removes the last accumulated segment, clamped at root (never an error
/// below root). The result always starts with `/` and never ends with one
/// except for the root itself.
pub fn join_path(base: &str, input: &str) -> String {
    let mut segments: Vec<&str> = if input.starts_with('/') {
        Vec::new()
    } else {
        base.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in input.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Resolves `input` against `base` and returns the node it names.
///
/// Descending *through* a File is `NotADirectory`; a missing child is
/// `NotFound`. Both report the full normalized path.
pub fn resolve<'a>(root: &'a Node, base: &str, input: &str) -> Result<&'a Node, VfsError> {
    let canonical = join_path(base, input);
    let mut current = root;
    for segment in canonical.split('/').filter(|s| !s.is_empty()) {
        if !current.is_dir() {
            return Err(VfsError::NotADirectory {
                path: canonical.clone(),
            });
        }
        current = current.child(segment).ok_or_else(|| VfsError::NotFound {
            path: canonical.clone(),
        })?;
    }
    Ok(current)
}

/// Children of a Directory in definition order.
pub fn list(node: &Node, path: &str) -> Result<Vec<DirEntry>, VfsError> {
    match node {
        Node::Directory { children } => Ok(children
            .iter()
            .map(|(name, child)| DirEntry {
                name: name.clone(),
                is_dir: child.is_dir(),
            })
            .collect()),
        Node::File { .. } => Err(VfsError::NotADirectory {
            path: path.to_string(),
        }),
    }
}

/// Text content of a File.
pub fn read<'a>(node: &'a Node, path: &str) -> Result<&'a str, VfsError> {
    match node {
        Node::File { content } => Ok(content),
        Node::Directory { .. } => Err(VfsError::IsADirectory {
            path: path.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{join_path, list, read, resolve, VfsError};
    use crate::node::Node;

    fn sample_tree() -> Node {
        Node::dir(vec![(
            "home",
            Node::dir(vec![(
                "yohannes",
                Node::dir(vec![
                    ("projects", Node::dir(vec![("demo", Node::dir(vec![]))])),
                    ("notes.txt", Node::file("hello")),
                ]),
            )]),
        )])
    }

    #[test]
    fn join_normalizes_dot_and_dotdot() {
        assert_eq!(join_path("/home/yohannes", ".."), "/home");
        assert_eq!(join_path("/home/yohannes", "."), "/home/yohannes");
        assert_eq!(join_path("/home/yohannes", "projects"), "/home/yohannes/projects");
        assert_eq!(join_path("/home/yohannes", "/etc"), "/etc");
        assert_eq!(join_path("/home", "../../.."), "/");
        assert_eq!(join_path("/", ".."), "/");
        assert_eq!(join_path("/home", "a/./b/../c"), "/home/a/c");
    }

    #[test]
    fn resolve_is_idempotent_and_respects_base() {
        let tree = sample_tree();
        let first = resolve(&tree, "/home/yohannes", "projects").expect("resolve failed");
        let second = resolve(&tree, "/home/yohannes", "projects").expect("resolve failed");
        assert_eq!(first, second);

        let absolute =
            resolve(&tree, "/anywhere", "/home/yohannes/projects").expect("resolve failed");
        assert_eq!(absolute, first);
    }

    #[test]
    fn resolve_reports_missing_children() {
        let tree = sample_tree();
        let err = resolve(&tree, "/home/yohannes", "doesnotexist").expect_err("should fail");
        assert_eq!(
            err,
            VfsError::NotFound {
                path: "/home/yohannes/doesnotexist".to_string()
            }
        );
    }

    #[test]
    fn descending_through_a_file_is_not_a_directory() {
        let tree = sample_tree();
        let err = resolve(&tree, "/home/yohannes", "notes.txt/deep").expect_err("should fail");
        assert_eq!(
            err,
            VfsError::NotADirectory {
                path: "/home/yohannes/notes.txt/deep".to_string()
            }
        );
    }

    #[test]
    fn list_returns_children_in_definition_order() {
        let tree = sample_tree();
        let node = resolve(&tree, "/", "/home/yohannes").expect("resolve failed");
        let entries = list(node, "/home/yohannes").expect("list failed");
        let names: Vec<(&str, bool)> = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.is_dir))
            .collect();
        assert_eq!(names, vec![("projects", true), ("notes.txt", false)]);
    }

    #[test]
    fn read_and_list_reject_wrong_node_kinds() {
        let tree = sample_tree();
        let file = resolve(&tree, "/home/yohannes", "notes.txt").expect("resolve failed");
        assert_eq!(read(file, "notes.txt").expect("read failed"), "hello");
        assert!(matches!(
            list(file, "notes.txt"),
            Err(VfsError::NotADirectory { .. })
        ));

        let dir = resolve(&tree, "/", "/home").expect("resolve failed");
        assert!(matches!(read(dir, "/home"), Err(VfsError::IsADirectory { .. })));
    }
}
