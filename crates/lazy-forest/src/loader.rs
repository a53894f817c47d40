//! Async Loader
//!
//! Drives the forest protocol against a remote source. The forest is only
//! touched between awaits, never across them.

use std::cell::RefCell;
use std::fmt::Display;

use async_trait::async_trait;
use log::{debug, info};

use crate::entity::Entity;
use crate::forest::{Branch, Forest, LoadOutcome, Toggle};

/// Shared handle to a forest owned by a view.
///
/// Returns `None` when the owner is gone, so late results are dropped.
pub trait ForestCell<G: Entity, I> {
    fn update_forest<R>(&self, f: impl FnOnce(&mut Forest<G, I>) -> R) -> Option<R>;
}

impl<G: Entity, I> ForestCell<G, I> for RefCell<Forest<G, I>> {
    fn update_forest<R>(&self, f: impl FnOnce(&mut Forest<G, I>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Remote collections the forest is filled from
#[async_trait(?Send)]
pub trait BranchSource<G: Entity, I> {
    type Error: Display;

    /// Groups without a parent
    async fn fetch_roots(&self) -> Result<Vec<G>, Self::Error>;

    /// Direct child groups and attached items of `parent`
    async fn fetch_branch(&self, parent: &G::Id) -> Result<Branch<G, I>, Self::Error>;

    /// Ask the backend to pull the catalog from its upstream source
    async fn sync(&self) -> Result<(), Self::Error>;
}

/// What a call to `toggle` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Missing,
    InFlight,
    Expanded,
    Collapsed,
    Loaded { groups: usize, items: usize },
    Failed,
    Discarded,
    /// The forest owner went away before or during the fetch
    Detached,
}

impl From<LoadOutcome> for ToggleOutcome {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Applied { groups, items } => ToggleOutcome::Loaded { groups, items },
            LoadOutcome::Failed => ToggleOutcome::Failed,
            LoadOutcome::Discarded => ToggleOutcome::Discarded,
        }
    }
}

/// Expand or collapse `id`, fetching its branch on first expansion.
pub async fn toggle<G, I, C, S>(cell: &C, source: &S, id: &G::Id) -> ToggleOutcome
where
    G: Entity,
    C: ForestCell<G, I>,
    S: BranchSource<G, I>,
{
    let Some(step) = cell.update_forest(|forest| forest.begin_toggle(id)) else {
        return ToggleOutcome::Detached;
    };

    let ticket = match step {
        Toggle::Missing => return ToggleOutcome::Missing,
        Toggle::InFlight => {
            debug!("toggle of {:?} ignored, fetch in flight", id);
            return ToggleOutcome::InFlight;
        }
        Toggle::Expanded => return ToggleOutcome::Expanded,
        Toggle::Collapsed => return ToggleOutcome::Collapsed,
        Toggle::Fetch(ticket) => ticket,
    };

    let result = source.fetch_branch(id).await;
    cell.update_forest(move |forest| forest.finish_load(ticket, result))
        .map(ToggleOutcome::from)
        .unwrap_or(ToggleOutcome::Detached)
}

/// Re-read the root level and replace the whole forest.
///
/// On failure the current forest is kept.
pub async fn refresh_roots<G, I, C, S>(cell: &C, source: &S) -> Result<usize, S::Error>
where
    G: Entity,
    C: ForestCell<G, I>,
    S: BranchSource<G, I>,
{
    let roots = source.fetch_roots().await?;
    let count = roots.len();
    if cell.update_forest(move |forest| forest.replace_roots(roots)).is_none() {
        debug!("forest dropped before roots arrived");
    } else {
        info!("loaded {} root groups", count);
    }
    Ok(count)
}

/// Trigger an upstream sync, then reload the roots.
pub async fn sync_and_refresh<G, I, C, S>(cell: &C, source: &S) -> Result<usize, S::Error>
where
    G: Entity,
    C: ForestCell<G, I>,
    S: BranchSource<G, I>,
{
    source.sync().await?;
    info!("catalog sync finished, reloading roots");
    refresh_roots(cell, source).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Clone, PartialEq)]
    struct Group {
        id: String,
    }

    impl Entity for Group {
        type Id = String;

        fn id(&self) -> String {
            self.id.clone()
        }
    }

    fn group(id: &str) -> Group {
        Group { id: id.to_string() }
    }

    /// In-memory catalog with call counters
    #[derive(Default)]
    struct FakeSource {
        roots: RefCell<Vec<Group>>,
        branches: HashMap<String, Branch<Group, u32>>,
        failing: RefCell<HashSet<String>>,
        branch_calls: RefCell<Vec<String>>,
        syncs: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl BranchSource<Group, u32> for FakeSource {
        type Error = String;

        async fn fetch_roots(&self) -> Result<Vec<Group>, String> {
            if self.failing.borrow().contains("roots") {
                return Err("roots unavailable".to_string());
            }
            Ok(self.roots.borrow().clone())
        }

        async fn fetch_branch(&self, parent: &String) -> Result<Branch<Group, u32>, String> {
            self.branch_calls.borrow_mut().push(parent.clone());
            tokio::task::yield_now().await;
            if self.failing.borrow().contains(parent) {
                return Err(format!("404 for {}", parent));
            }
            Ok(self.branches.get(parent).cloned().unwrap_or_default())
        }

        async fn sync(&self) -> Result<(), String> {
            self.syncs.set(self.syncs.get() + 1);
            Ok(())
        }
    }

    /// A view that has already been torn down
    struct Unmounted;

    impl ForestCell<Group, u32> for Unmounted {
        fn update_forest<R>(&self, _f: impl FnOnce(&mut Forest<Group, u32>) -> R) -> Option<R> {
            None
        }
    }

    fn source() -> FakeSource {
        let mut branches = HashMap::new();
        branches.insert("g1".to_string(), Branch::groups_only(vec![group("g2")]));
        branches.insert("g2".to_string(), Branch::new(vec![], vec![1, 2, 3]));
        FakeSource {
            roots: RefCell::new(vec![group("g1"), group("g5")]),
            branches,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_toggle_loads_then_flips() {
        let src = source();
        let cell = RefCell::new(Forest::with_roots(src.roots.borrow().clone()));
        let g1 = "g1".to_string();

        assert_eq!(toggle(&cell, &src, &g1).await, ToggleOutcome::Loaded { groups: 1, items: 0 });
        assert_eq!(toggle(&cell, &src, &g1).await, ToggleOutcome::Collapsed);
        assert_eq!(toggle(&cell, &src, &g1).await, ToggleOutcome::Expanded);

        // Only the first toggle hit the network
        assert_eq!(src.branch_calls.borrow().as_slice(), &["g1".to_string()]);
        assert_eq!(cell.borrow().get(&g1).unwrap().children().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_toggle_retries_on_next_call() {
        let src = source();
        src.failing.borrow_mut().insert("g1".to_string());
        let cell = RefCell::new(Forest::with_roots(vec![group("g1")]));
        let g1 = "g1".to_string();

        assert_eq!(toggle(&cell, &src, &g1).await, ToggleOutcome::Failed);
        {
            let forest = cell.borrow();
            let node = forest.get(&g1).unwrap();
            assert!(!node.is_loaded() && !node.is_loading() && !node.is_expanded());
        }

        src.failing.borrow_mut().clear();
        assert_eq!(toggle(&cell, &src, &g1).await, ToggleOutcome::Loaded { groups: 1, items: 0 });
        assert_eq!(src.branch_calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_fetch_once() {
        let src = source();
        let cell = RefCell::new(Forest::with_roots(vec![group("g1")]));
        let g1 = "g1".to_string();

        let (first, second) = tokio::join!(toggle(&cell, &src, &g1), toggle(&cell, &src, &g1));

        assert_eq!(first, ToggleOutcome::Loaded { groups: 1, items: 0 });
        assert_eq!(second, ToggleOutcome::InFlight);
        assert_eq!(src.branch_calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_on_unmounted_view() {
        let src = source();
        assert_eq!(toggle(&Unmounted, &src, &"g1".to_string()).await, ToggleOutcome::Detached);
        assert!(src.branch_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_replaces_forest() {
        let src = source();
        let cell = RefCell::new(Forest::with_roots(vec![group("g1")]));
        let g1 = "g1".to_string();
        toggle(&cell, &src, &g1).await;

        let count = refresh_roots(&cell, &src).await.unwrap();
        assert_eq!(count, 2);

        let forest = cell.borrow();
        let node = forest.get(&g1).unwrap();
        assert!(!node.is_loaded());
        assert!(!node.is_expanded());
        assert!(!forest.contains(&"g2".to_string()));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_forest() {
        let src = source();
        src.failing.borrow_mut().insert("roots".to_string());
        let cell = RefCell::new(Forest::with_roots(vec![group("g1")]));
        toggle(&cell, &src, &"g1".to_string()).await;

        assert!(refresh_roots(&cell, &src).await.is_err());
        assert!(cell.borrow().get(&"g1".to_string()).unwrap().is_loaded());
    }

    #[tokio::test]
    async fn test_sync_then_refresh() {
        let src = source();
        let cell = RefCell::new(Forest::new());

        assert_eq!(sync_and_refresh(&cell, &src).await.unwrap(), 2);
        assert_eq!(src.syncs.get(), 1);
        assert_eq!(cell.borrow().roots().len(), 2);
    }

    #[tokio::test]
    async fn test_product_walkthrough() {
        let src = source();
        let cell = RefCell::new(Forest::with_roots(vec![group("g1")]));

        toggle(&cell, &src, &"g1".to_string()).await;
        let outcome = toggle(&cell, &src, &"g2".to_string()).await;

        assert_eq!(outcome, ToggleOutcome::Loaded { groups: 0, items: 3 });
        let forest = cell.borrow();
        let g2 = forest.get(&"g2".to_string()).unwrap();
        assert!(g2.is_expanded());
        assert_eq!(g2.items().unwrap().len(), 3);
        assert_eq!(g2.depth(), 1);
    }
}
