//! Organizational Hierarchy
//!
//! Region → Supervision → Branch cascading lookups used by the registration
//! form. Selecting a parent invalidates everything below it, and lookup
//! payloads are tagged with the selection that triggered them so a stale
//! response arriving late cannot overwrite newer state.

use serde::{Deserialize, Serialize};

use crate::role::Role;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: u64,
    #[serde(rename = "nom")]
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supervision {
    pub id: u64,
    #[serde(rename = "nom")]
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branche {
    pub id: u64,
    #[serde(rename = "nom")]
    pub name: String,
    pub code: String,
}

/// Cascading selection state. A branch selection is valid only while its
/// parent supervision is selected, which in turn requires a region.
#[derive(Clone, Debug, Default)]
pub struct HierarchySelection {
    region_id: Option<u64>,
    supervision_id: Option<u64>,
    branch_id: Option<u64>,
    supervisions: Vec<Supervision>,
    branches: Vec<Branche>,
}

impl HierarchySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region_id(&self) -> Option<u64> {
        self.region_id
    }

    pub fn supervision_id(&self) -> Option<u64> {
        self.supervision_id
    }

    pub fn branch_id(&self) -> Option<u64> {
        self.branch_id
    }

    pub fn supervisions(&self) -> &[Supervision] {
        &self.supervisions
    }

    pub fn branches(&self) -> &[Branche] {
        &self.branches
    }

    /// Picking a region drops any supervision/branch choice and their loaded
    /// option lists.
    pub fn select_region(&mut self, region_id: Option<u64>) {
        self.region_id = region_id;
        self.supervision_id = None;
        self.branch_id = None;
        self.supervisions.clear();
        self.branches.clear();
    }

    /// Picking a supervision drops any branch choice. Ignored while no
    /// region is selected.
    pub fn select_supervision(&mut self, supervision_id: Option<u64>) -> bool {
        if self.region_id.is_none() {
            return false;
        }
        self.supervision_id = supervision_id;
        self.branch_id = None;
        self.branches.clear();
        true
    }

    /// Ignored while no supervision is selected.
    pub fn select_branch(&mut self, branch_id: Option<u64>) -> bool {
        if self.supervision_id.is_none() {
            return false;
        }
        self.branch_id = branch_id;
        true
    }

    /// Installs a supervision lookup result, unless the region it was
    /// fetched for is no longer the current one.
    pub fn accept_supervisions(&mut self, for_region: u64, items: Vec<Supervision>) -> bool {
        if self.region_id != Some(for_region) {
            return false;
        }
        self.supervisions = items;
        true
    }

    /// Installs a branch lookup result, unless the supervision it was
    /// fetched for is no longer the current one.
    pub fn accept_branches(&mut self, for_supervision: u64, items: Vec<Branche>) -> bool {
        if self.supervision_id != Some(for_supervision) {
            return false;
        }
        self.branches = items;
        true
    }

    /// Whether the selection covers everything the role must provide at
    /// registration.
    pub fn satisfies(&self, role: Role) -> bool {
        if role.needs_branch() {
            return self.branch_id.is_some();
        }
        if role.needs_supervision() {
            return self.supervision_id.is_some();
        }
        if role.needs_region() {
            return self.region_id.is_some();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supervision(id: u64) -> Supervision {
        Supervision { id, name: format!("Supervision {id}"), code: format!("S{id}") }
    }

    fn branche(id: u64) -> Branche {
        Branche { id, name: format!("Branche {id}"), code: format!("B{id}") }
    }

    fn full_selection() -> HierarchySelection {
        let mut sel = HierarchySelection::new();
        sel.select_region(Some(1));
        sel.accept_supervisions(1, vec![supervision(10)]);
        sel.select_supervision(Some(10));
        sel.accept_branches(10, vec![branche(100)]);
        sel.select_branch(Some(100));
        sel
    }

    #[test]
    fn test_region_switch_clears_supervision_and_branch() {
        let mut sel = full_selection();
        sel.select_region(Some(2));
        assert_eq!(sel.region_id(), Some(2));
        assert_eq!(sel.supervision_id(), None);
        assert_eq!(sel.branch_id(), None);
        assert!(sel.supervisions().is_empty());
        assert!(sel.branches().is_empty());
    }

    #[test]
    fn test_supervision_switch_clears_branch() {
        let mut sel = full_selection();
        sel.select_supervision(Some(11));
        assert_eq!(sel.supervision_id(), Some(11));
        assert_eq!(sel.branch_id(), None);
        assert!(sel.branches().is_empty());
    }

    #[test]
    fn test_branch_requires_parent_chain() {
        let mut sel = HierarchySelection::new();
        assert!(!sel.select_branch(Some(100)));
        assert!(!sel.select_supervision(Some(10)));
        sel.select_region(Some(1));
        assert!(sel.select_supervision(Some(10)));
        assert!(sel.select_branch(Some(100)));
    }

    #[test]
    fn test_stale_lookup_response_is_discarded() {
        let mut sel = HierarchySelection::new();
        sel.select_region(Some(1));
        // user switches region before the lookup for region 1 lands
        sel.select_region(Some(2));
        assert!(!sel.accept_supervisions(1, vec![supervision(10)]));
        assert!(sel.supervisions().is_empty());
        assert!(sel.accept_supervisions(2, vec![supervision(20)]));
        assert_eq!(sel.supervisions().len(), 1);
    }

    #[test]
    fn test_satisfies_per_role() {
        let sel = full_selection();
        for role in Role::ALL {
            assert!(sel.satisfies(role));
        }

        let mut region_only = HierarchySelection::new();
        region_only.select_region(Some(1));
        assert!(region_only.satisfies(Role::Siege));
        assert!(region_only.satisfies(Role::ChefAnimationRegional));
        assert!(!region_only.satisfies(Role::Superviseur));
        assert!(!region_only.satisfies(Role::Agent));

        assert!(HierarchySelection::new().satisfies(Role::Siege));
    }
}
