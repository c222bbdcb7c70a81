use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::topology::{NodeId, NodeLayout, StaticGraph, StaticTree};

/// What a renderer is asked to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Surface {
    /// One bar per dataset value, addressed by index.
    Bars { values: Vec<u32> },
    /// The static binary tree, addressed by node id.
    Tree,
    /// The static graph, addressed by node id.
    Graph,
}

/// Where the nodes of a static surface sit and how they connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub nodes: &'static [NodeLayout],
    pub edges: Vec<(NodeId, NodeId)>,
}

impl Surface {
    /// Node positions and edges; `None` for bars.
    pub fn geometry(&self) -> Option<Geometry> {
        match self {
            Surface::Bars { .. } => None,
            Surface::Tree => {
                let tree = StaticTree::standard();
                Some(Geometry {
                    nodes: tree.layout(),
                    edges: tree.edges(),
                })
            }
            Surface::Graph => {
                let graph = StaticGraph::standard();
                Some(Geometry {
                    nodes: graph.layout(),
                    edges: graph.edges(),
                })
            }
        }
    }

    /// Addressable items of the surface: indices for bars, node ids otherwise.
    pub fn items(&self) -> Vec<usize> {
        match self {
            Surface::Bars { values } => (0..values.len()).collect(),
            Surface::Tree => StaticTree::standard().ids().collect(),
            Surface::Graph => StaticGraph::standard().ids().collect(),
        }
    }
}

/// Highlight applied to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Default,
    Comparing,
    Swapping,
    /// Sorted bars, a found search hit, or a visited node.
    Visited,
}

/// Role-tagged snapshot handed to the [`Renderer`](crate::Renderer).
///
/// Each item carries at most one role; tagging an item again replaces its
/// previous role. Untagged items are [`Role::Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    pub surface: Surface,
    roles: BTreeMap<usize, Role>,
}

impl VisualState {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            roles: BTreeMap::new(),
        }
    }

    pub fn bars(values: &[u32]) -> Self {
        Self::new(Surface::Bars {
            values: values.to_vec(),
        })
    }

    pub fn tree() -> Self {
        Self::new(Surface::Tree)
    }

    pub fn graph() -> Self {
        Self::new(Surface::Graph)
    }

    pub fn tag(mut self, items: impl IntoIterator<Item = usize>, role: Role) -> Self {
        for item in items {
            if role == Role::Default {
                self.roles.remove(&item);
            } else {
                self.roles.insert(item, role);
            }
        }
        self
    }

    pub fn comparing(self, items: impl IntoIterator<Item = usize>) -> Self {
        self.tag(items, Role::Comparing)
    }

    pub fn swapping(self, items: impl IntoIterator<Item = usize>) -> Self {
        self.tag(items, Role::Swapping)
    }

    pub fn visited(self, items: impl IntoIterator<Item = usize>) -> Self {
        self.tag(items, Role::Visited)
    }

    pub fn role_of(&self, item: usize) -> Role {
        self.roles.get(&item).copied().unwrap_or(Role::Default)
    }

    /// Items carrying `role`, in ascending order.
    pub fn tagged(&self, role: Role) -> Vec<usize> {
        if role == Role::Default {
            return self
                .surface
                .items()
                .into_iter()
                .filter(|item| !self.roles.contains_key(item))
                .collect();
        }
        self.roles
            .iter()
            .filter(|(_, tagged)| **tagged == role)
            .map(|(item, _)| *item)
            .collect()
    }

    pub fn is_plain(&self) -> bool {
        self.roles.is_empty()
    }

    /// Bar values, or `None` for tree and graph surfaces.
    pub fn values(&self) -> Option<&[u32]> {
        match &self.surface {
            Surface::Bars { values } => Some(values),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_tags_replace_earlier_ones() {
        let state = VisualState::bars(&[3, 1, 2])
            .comparing([0, 1])
            .visited([1]);

        assert_eq!(state.role_of(0), Role::Comparing);
        assert_eq!(state.role_of(1), Role::Visited);
        assert_eq!(state.role_of(2), Role::Default);
        assert_eq!(state.tagged(Role::Default), vec![2]);
    }

    #[test]
    fn default_tag_clears_roles() {
        let state = VisualState::tree().visited([1, 2]).tag([1], Role::Default);
        assert_eq!(state.tagged(Role::Visited), vec![2]);
        assert_eq!(state.tagged(Role::Default), vec![1, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn serialises_surface_with_kind_tag() {
        let state = VisualState::bars(&[4, 2]).swapping([0, 1]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["surface"]["kind"], "bars");
        assert_eq!(json["roles"]["0"], "swapping");
        assert!(VisualState::graph().values().is_none());
    }
}
