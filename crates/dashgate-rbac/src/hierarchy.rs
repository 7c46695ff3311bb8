//! Role dominance relation
//!
//! Declared edges `senior -> junior` are checked for self-loops and cycles
//! with petgraph, and every edge must point down [`Role::rank`]. The edges
//! are then closed transitively once at build time. Lookups are
//! set membership on the precomputed closure.
//!
//! The hierarchy answers seniority questions only. It does not grant
//! permissions: a dominating role gets nothing from the dominated role's
//! table entry.

use crate::error::PolicyError;
use crate::taxonomy::Role;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use std::collections::{BTreeMap, BTreeSet};

/// Strict partial order over roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    declared: BTreeMap<Role, BTreeSet<Role>>,
    closure: BTreeMap<Role, BTreeSet<Role>>,
}

impl RoleHierarchy {
    /// Build from declared `role -> dominated roles` edges
    ///
    /// # Errors
    /// - [`PolicyError::ReflexiveHierarchy`] when a role lists itself
    /// - [`PolicyError::CyclicHierarchy`] when the edges form a cycle
    /// - [`PolicyError::InvertedHierarchy`] when a role dominates one of equal
    ///   or higher rank
    pub fn new(
        edges: impl IntoIterator<Item = (Role, Vec<Role>)>,
    ) -> Result<Self, PolicyError> {
        let mut declared: BTreeMap<Role, BTreeSet<Role>> = BTreeMap::new();
        let mut graph: DiGraphMap<Role, ()> = DiGraphMap::new();

        for role in Role::ALL {
            graph.add_node(role);
        }

        for (senior, juniors) in edges {
            for junior in juniors {
                if senior == junior {
                    return Err(PolicyError::ReflexiveHierarchy(senior));
                }
                graph.add_edge(senior, junior, ());
                declared.entry(senior).or_default().insert(junior);
            }
        }

        toposort(&graph, None).map_err(|cycle| PolicyError::CyclicHierarchy(cycle.node_id()))?;

        for (senior, junior, _) in graph.all_edges() {
            if senior.rank() <= junior.rank() {
                return Err(PolicyError::InvertedHierarchy { senior, junior });
            }
        }

        let mut closure = BTreeMap::new();
        for role in Role::ALL {
            let mut reachable = BTreeSet::new();
            let mut dfs = Dfs::new(&graph, role);
            while let Some(next) = dfs.next(&graph) {
                if next != role {
                    reachable.insert(next);
                }
            }
            closure.insert(role, reachable);
        }

        Ok(Self { declared, closure })
    }

    /// `junior` is strictly below `senior`
    #[inline]
    #[must_use]
    pub fn dominates(&self, senior: Role, junior: Role) -> bool {
        self.closure
            .get(&senior)
            .is_some_and(|dominated| dominated.contains(&junior))
    }

    /// `role` equals `minimum` or dominates it
    #[inline]
    #[must_use]
    pub fn is_at_least(&self, role: Role, minimum: Role) -> bool {
        role == minimum || self.dominates(role, minimum)
    }

    /// Every role strictly below `role`, most senior first
    #[must_use]
    pub fn dominated_by(&self, role: Role) -> Vec<Role> {
        self.closure
            .get(&role)
            .map(|dominated| dominated.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Edges as declared, before closure
    #[must_use]
    pub fn declared(&self) -> &BTreeMap<Role, BTreeSet<Role>> {
        &self.declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_transitive() {
        let hierarchy = RoleHierarchy::new(vec![
            (Role::Admin, vec![Role::Manager]),
            (Role::Manager, vec![Role::Employee]),
        ])
        .unwrap();

        assert!(hierarchy.dominates(Role::Admin, Role::Employee));
        assert!(hierarchy.dominates(Role::Manager, Role::Employee));
        assert!(!hierarchy.dominates(Role::Employee, Role::Admin));
        assert_eq!(
            hierarchy.dominated_by(Role::Admin),
            vec![Role::Manager, Role::Employee]
        );
    }

    #[test]
    fn dominance_is_irreflexive() {
        let hierarchy = RoleHierarchy::new(vec![(Role::Admin, vec![Role::Viewer])]).unwrap();
        for role in Role::ALL {
            assert!(!hierarchy.dominates(role, role));
            assert!(hierarchy.is_at_least(role, role));
        }
    }

    #[test]
    fn rejects_self_dominance() {
        let result = RoleHierarchy::new(vec![(Role::Manager, vec![Role::Manager])]);
        assert_eq!(result, Err(PolicyError::ReflexiveHierarchy(Role::Manager)));
    }

    #[test]
    fn rejects_cycles() {
        let result = RoleHierarchy::new(vec![
            (Role::Admin, vec![Role::Manager]),
            (Role::Manager, vec![Role::Intern]),
            (Role::Intern, vec![Role::Admin]),
        ]);
        assert!(matches!(result, Err(PolicyError::CyclicHierarchy(_))));
    }

    #[test]
    fn rejects_edges_against_rank() {
        let result = RoleHierarchy::new(vec![(Role::Viewer, vec![Role::SuperAdmin])]);
        assert_eq!(
            result,
            Err(PolicyError::InvertedHierarchy {
                senior: Role::Viewer,
                junior: Role::SuperAdmin,
            })
        );

        let result = RoleHierarchy::new(vec![
            (Role::Manager, vec![Role::Employee]),
            (Role::Employee, vec![Role::TeamLead]),
        ]);
        assert_eq!(
            result,
            Err(PolicyError::InvertedHierarchy {
                senior: Role::Employee,
                junior: Role::TeamLead,
            })
        );
    }

    #[test]
    fn empty_hierarchy_dominates_nothing() {
        let hierarchy = RoleHierarchy::new(Vec::new()).unwrap();
        assert!(!hierarchy.dominates(Role::SuperAdmin, Role::Viewer));
        assert!(hierarchy.dominated_by(Role::SuperAdmin).is_empty());
        assert!(hierarchy.declared().is_empty());
    }
}
