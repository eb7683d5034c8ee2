//! Folder tree structures for hierarchical display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use buildhub_core::types::FolderId;

use super::model::Folder;

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Full path.
    pub path: String,
    /// Number of child folders.
    pub child_count: u64,
    /// Number of documents filed directly in this folder.
    pub document_count: u64,
    /// Child folder nodes, ordered by name.
    pub children: Vec<FolderNode>,
}

/// The complete folder forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the tree.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: u64,
}

impl FolderTree {
    /// Build the forest from a flat folder list and per-folder document counts.
    ///
    /// Folders whose parent is missing from the list are treated as roots.
    pub fn build(folders: &[Folder], document_counts: &HashMap<FolderId, u64>) -> Self {
        let mut by_parent: HashMap<Option<FolderId>, Vec<&Folder>> = HashMap::new();
        let known: std::collections::HashSet<FolderId> = folders.iter().map(|f| f.id).collect();

        for folder in folders {
            let parent = folder.parent_id.filter(|p| known.contains(p));
            by_parent.entry(parent).or_default().push(folder);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }

        let roots = by_parent
            .get(&None)
            .map(|roots| {
                roots
                    .iter()
                    .map(|f| build_node(f, &by_parent, document_counts))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            roots,
            total_folders: folders.len() as u64,
        }
    }
}

fn build_node(
    folder: &Folder,
    by_parent: &HashMap<Option<FolderId>, Vec<&Folder>>,
    document_counts: &HashMap<FolderId, u64>,
) -> FolderNode {
    let children: Vec<FolderNode> = by_parent
        .get(&Some(folder.id))
        .map(|kids| {
            kids.iter()
                .map(|child| build_node(child, by_parent, document_counts))
                .collect()
        })
        .unwrap_or_default();

    FolderNode {
        id: folder.id,
        name: folder.name.clone(),
        path: folder.path.clone(),
        child_count: children.len() as u64,
        document_count: *document_counts.get(&folder.id).unwrap_or(&0),
        children,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_build_nests_children_with_counts() {
        let now = Utc::now();
        let projects = Folder::new("Projects", None, now);
        let harbor = Folder::new("Harbor View", Some(&projects), now);
        let admin = Folder::new("Admin", None, now);
        let drawings = Folder::new("Drawings", Some(&harbor), now);

        let mut counts = HashMap::new();
        counts.insert(harbor.id, 3);

        let tree = FolderTree::build(
            &[projects.clone(), harbor.clone(), admin.clone(), drawings.clone()],
            &counts,
        );

        assert_eq!(tree.total_folders, 4);
        let names: Vec<&str> = tree.roots.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Admin", "Projects"]);

        let projects_node = &tree.roots[1];
        assert_eq!(projects_node.child_count, 1);
        let harbor_node = &projects_node.children[0];
        assert_eq!(harbor_node.document_count, 3);
        assert_eq!(harbor_node.children[0].path, "/Projects/Harbor View/Drawings");
    }

    #[test]
    fn test_empty() {
        let tree = FolderTree::build(&[], &HashMap::new());
        assert!(tree.roots.is_empty());
        assert_eq!(tree.total_folders, 0);
    }
}
