//! Project tree navigation
//!
//! The tree is rebuilt from the `parent_id` links of a project snapshot.

use std::collections::{HashMap, HashSet};

use op_core::traits::Id;

use super::model::Project;
use crate::version::{Version, VersionSharing};

#[derive(Debug, Clone, Copy)]
struct Node {
    parent_id: Option<Id>,
    active: bool,
}

/// Read-only view on the project tree
#[derive(Debug, Clone, Default)]
pub struct ProjectHierarchy {
    nodes: HashMap<Id, Node>,
}

impl ProjectHierarchy {
    pub fn new<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        let nodes = projects
            .into_iter()
            .filter_map(|p| {
                p.id.map(|id| {
                    (
                        id,
                        Node {
                            parent_id: p.parent_id,
                            active: p.active(),
                        },
                    )
                })
            })
            .collect();
        Self { nodes }
    }

    pub fn contains(&self, project_id: Id) -> bool {
        self.nodes.contains_key(&project_id)
    }

    pub fn is_active(&self, project_id: Id) -> bool {
        self.nodes.get(&project_id).map_or(false, |n| n.active)
    }

    /// Ancestors from the direct parent up to the root
    pub fn ancestors(&self, project_id: Id) -> Vec<Id> {
        let mut result = Vec::new();
        let mut seen = HashSet::from([project_id]);
        let mut current = self.nodes.get(&project_id).and_then(|n| n.parent_id);

        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            result.push(id);
            current = self.nodes.get(&id).and_then(|n| n.parent_id);
        }
        result
    }

    pub fn root(&self, project_id: Id) -> Id {
        self.ancestors(project_id).last().copied().unwrap_or(project_id)
    }

    /// All projects below `project_id`, depth first
    pub fn descendants(&self, project_id: Id) -> Vec<Id> {
        let mut children: HashMap<Id, Vec<Id>> = HashMap::new();
        for (&id, node) in &self.nodes {
            if let Some(parent) = node.parent_id {
                children.entry(parent).or_default().push(id);
            }
        }
        for list in children.values_mut() {
            list.sort_unstable();
        }

        let mut result = Vec::new();
        let mut stack = vec![project_id];
        let mut seen = HashSet::from([project_id]);
        while let Some(id) = stack.pop() {
            if id != project_id {
                result.push(id);
            }
            if let Some(kids) = children.get(&id) {
                for &kid in kids.iter().rev() {
                    if seen.insert(kid) {
                        stack.push(kid);
                    }
                }
            }
        }
        result
    }

    pub fn is_ancestor_of(&self, ancestor: Id, project_id: Id) -> bool {
        self.ancestors(project_id).contains(&ancestor)
    }

    pub fn same_tree(&self, a: Id, b: Id) -> bool {
        self.root(a) == self.root(b)
    }

    /// Versions usable by work packages of `project_id`
    pub fn shared_versions<'a>(
        &self,
        project_id: Id,
        versions: impl IntoIterator<Item = &'a Version>,
    ) -> Vec<&'a Version> {
        versions
            .into_iter()
            .filter(|v| v.is_shared_with(project_id, self))
            .collect()
    }
}

impl Version {
    /// Whether work packages of `project_id` may use this version.
    ///
    /// A version is always usable in its own project. Elsewhere its
    /// project has to be active and the sharing has to reach the target.
    pub fn is_shared_with(&self, project_id: Id, hierarchy: &ProjectHierarchy) -> bool {
        if self.project_id == project_id {
            return true;
        }
        if !hierarchy.is_active(self.project_id) {
            return false;
        }

        match self.sharing {
            VersionSharing::None => false,
            VersionSharing::System => true,
            VersionSharing::Tree => hierarchy.same_tree(self.project_id, project_id),
            VersionSharing::Descendants => hierarchy.is_ancestor_of(self.project_id, project_id),
            VersionSharing::Hierarchy => {
                hierarchy.is_ancestor_of(self.project_id, project_id)
                    || hierarchy.is_ancestor_of(project_id, self.project_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectStatus;

    fn project(id: Id, parent_id: Option<Id>) -> Project {
        let mut p = Project::new(format!("p{}", id), format!("Project {}", id));
        p.id = Some(id);
        p.parent_id = parent_id;
        p
    }

    /// 1
    /// ├── 2
    /// │   └── 4
    /// └── 3
    /// 5
    fn tree() -> Vec<Project> {
        vec![
            project(1, None),
            project(2, Some(1)),
            project(3, Some(1)),
            project(4, Some(2)),
            project(5, None),
        ]
    }

    fn version(project_id: Id, sharing: VersionSharing) -> Version {
        let mut v = Version::new("1.0", project_id);
        v.id = Some(100);
        v.sharing = sharing;
        v
    }

    #[test]
    fn test_navigation() {
        let projects = tree();
        let h = ProjectHierarchy::new(&projects);

        assert_eq!(h.ancestors(4), vec![2, 1]);
        assert_eq!(h.root(4), 1);
        assert_eq!(h.root(5), 5);
        assert_eq!(h.descendants(1), vec![2, 4, 3]);
        assert!(h.is_ancestor_of(1, 4));
        assert!(!h.is_ancestor_of(4, 1));
        assert!(h.same_tree(3, 4));
        assert!(!h.same_tree(3, 5));
    }

    #[test]
    fn test_cycle_does_not_hang() {
        let projects = vec![project(1, Some(2)), project(2, Some(1))];
        let h = ProjectHierarchy::new(&projects);
        assert_eq!(h.ancestors(1), vec![2]);
        assert_eq!(h.descendants(1), vec![2]);
    }

    #[test]
    fn test_unshared_version_only_in_own_project() {
        let projects = tree();
        let h = ProjectHierarchy::new(&projects);
        let v = version(1, VersionSharing::None);

        assert!(v.is_shared_with(1, &h));
        assert!(!v.is_shared_with(2, &h));
        assert!(!v.is_shared_with(5, &h));
    }

    #[test]
    fn test_system_version_everywhere() {
        let projects = tree();
        let h = ProjectHierarchy::new(&projects);
        let v = version(1, VersionSharing::System);

        assert!(v.is_shared_with(5, &h));
        assert!(v.is_shared_with(4, &h));
    }

    #[test]
    fn test_tree_version_within_tree() {
        let projects = tree();
        let h = ProjectHierarchy::new(&projects);
        let v = version(2, VersionSharing::Tree);

        assert!(v.is_shared_with(1, &h));
        assert!(v.is_shared_with(3, &h));
        assert!(!v.is_shared_with(5, &h));
    }

    #[test]
    fn test_descendants_and_hierarchy_versions() {
        let projects = tree();
        let h = ProjectHierarchy::new(&projects);

        let descendants = version(2, VersionSharing::Descendants);
        assert!(descendants.is_shared_with(4, &h));
        assert!(!descendants.is_shared_with(1, &h));
        assert!(!descendants.is_shared_with(3, &h));

        let hierarchy = version(2, VersionSharing::Hierarchy);
        assert!(hierarchy.is_shared_with(4, &h));
        assert!(hierarchy.is_shared_with(1, &h));
        assert!(!hierarchy.is_shared_with(3, &h));
    }

    #[test]
    fn test_archived_project_does_not_share() {
        let mut projects = tree();
        projects[0].status = ProjectStatus::Archived;
        let h = ProjectHierarchy::new(&projects);
        let v = version(1, VersionSharing::System);

        assert!(!v.is_shared_with(5, &h));
        assert!(v.is_shared_with(1, &h));
    }

    #[test]
    fn test_shared_versions() {
        let projects = tree();
        let h = ProjectHierarchy::new(&projects);
        let versions = vec![
            version(1, VersionSharing::None),
            version(1, VersionSharing::System),
            version(5, VersionSharing::Tree),
        ];

        assert_eq!(h.shared_versions(3, &versions).len(), 1);
        assert_eq!(h.shared_versions(1, &versions).len(), 2);
    }
}
