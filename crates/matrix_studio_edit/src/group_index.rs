//! Group tag lookup
//!
//! [`GroupIndex`] maps every non-empty group tag to the positions of the
//! occupied cells carrying it. It is derived data: [`GroupIndexCache`]
//! rebuilds it only when the grid identity changes.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Grid, Position};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupIndex {
    groups: BTreeMap<String, Vec<Position>>,
}

impl GroupIndex {
    pub fn build(grid: &Grid) -> Self {
        let mut groups: BTreeMap<String, Vec<Position>> = BTreeMap::new();
        for (pos, cell) in grid.occupied() {
            if cell.has_group() {
                groups.entry(cell.group.clone()).or_default().push(pos);
            }
        }
        Self { groups }
    }

    /// Members of `group` in row-major order; empty for unknown groups
    pub fn members(&self, group: &str) -> &[Position] {
        self.groups.get(group).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Position])> + '_ {
        self.groups.iter().map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    /// A group name of the form `{prefix}{n}` that no cell uses yet.
    ///
    /// `n` is one past the highest numeric suffix already in use with this
    /// prefix (but at least `min`), so generated names are never reused while
    /// earlier ones still exist.
    pub fn next_free_name(&self, prefix: &str, min: u32) -> String {
        let highest = self
            .groups
            .keys()
            .filter_map(|name| name.strip_prefix(prefix))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max();
        let n = highest.map_or(min, |h| h.saturating_add(1).max(min));
        format!("{prefix}{n}")
    }
}

/// Memoizes a [`GroupIndex`] keyed by grid identity
#[derive(Debug, Default)]
pub struct GroupIndexCache {
    source: Option<Grid>,
    index: Arc<GroupIndex>,
}

impl GroupIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, grid: &Grid) -> Arc<GroupIndex> {
        let fresh = self.source.as_ref().is_some_and(|g| g.ptr_eq(grid));
        if !fresh {
            self.index = Arc::new(GroupIndex::build(grid));
            self.source = Some(grid.clone());
        }
        self.index.clone()
    }
}
