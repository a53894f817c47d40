//! Forest Arena
//!
//! Nodes keyed by id with explicit parent/child links. A node's children
//! exist only after its first successful load, so "loaded" is simply
//! "has a branch".

use std::collections::HashMap;
use std::fmt::Display;

use log::{debug, warn};

use crate::entity::Entity;

/// Transient view state of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Children currently visible
    pub expanded: bool,
    /// Fetch in flight
    pub loading: bool,
}

/// Content fetched for one node: child groups plus directly attached items
#[derive(Debug, Clone, PartialEq)]
pub struct Branch<G, I> {
    pub groups: Vec<G>,
    pub items: Vec<I>,
}

impl<G, I> Branch<G, I> {
    pub fn new(groups: Vec<G>, items: Vec<I>) -> Self {
        Self { groups, items }
    }

    pub fn groups_only(groups: Vec<G>) -> Self {
        Self { groups, items: Vec::new() }
    }
}

impl<G, I> Default for Branch<G, I> {
    fn default() -> Self {
        Self { groups: Vec::new(), items: Vec::new() }
    }
}

#[derive(Debug, Clone)]
struct Loaded<Id, I> {
    children: Vec<Id>,
    items: Vec<I>,
}

/// A group plus its view state and arena links
#[derive(Debug, Clone)]
pub struct Node<G: Entity, I> {
    group: G,
    state: ViewState,
    parent: Option<G::Id>,
    depth: usize,
    loaded: Option<Loaded<G::Id, I>>,
}

impl<G: Entity, I> Node<G, I> {
    fn new(group: G, parent: Option<G::Id>, depth: usize) -> Self {
        Self {
            group,
            state: ViewState::default(),
            parent,
            depth,
            loaded: None,
        }
    }

    pub fn group(&self) -> &G {
        &self.group
    }

    pub fn id(&self) -> G::Id {
        self.group.id()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn is_expanded(&self) -> bool {
        self.state.expanded
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Parent id, `None` for roots
    pub fn parent(&self) -> Option<&G::Id> {
        self.parent.as_ref()
    }

    /// Distance from the root level (roots are 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Child ids in server order, `None` until the node has been loaded
    pub fn children(&self) -> Option<&[G::Id]> {
        self.loaded.as_ref().map(|l| l.children.as_slice())
    }

    /// Items attached directly to this node, `None` until loaded
    pub fn items(&self) -> Option<&[I]> {
        self.loaded.as_ref().map(|l| l.items.as_slice())
    }
}

/// Handle for one in-flight fetch, tied to the forest generation it started in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket<Id> {
    id: Id,
    generation: u64,
}

impl<Id> LoadTicket<Id> {
    pub fn id(&self) -> &Id {
        &self.id
    }
}

/// Result of starting a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle<Id> {
    /// No such node in the current forest
    Missing,
    /// A fetch for this node is already running
    InFlight,
    /// Loaded node is now expanded
    Expanded,
    /// Loaded node is now collapsed
    Collapsed,
    /// Node is marked loading; fetch its branch and hand the result to `finish_load`
    Fetch(LoadTicket<Id>),
}

/// Result of merging a fetched branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { groups: usize, items: usize },
    Failed,
    /// The forest was replaced or the node is gone
    Discarded,
}

/// Arena of lazily loaded group nodes
#[derive(Debug, Clone)]
pub struct Forest<G: Entity, I> {
    nodes: HashMap<G::Id, Node<G, I>>,
    roots: Vec<G::Id>,
    generation: u64,
}

impl<G: Entity, I> Default for Forest<G, I> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            generation: 0,
        }
    }
}

impl<G: Entity, I> Forest<G, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roots(groups: Vec<G>) -> Self {
        let mut forest = Self::new();
        forest.install_roots(groups);
        forest
    }

    /// Drop every node and start over with a fresh root level.
    ///
    /// Fetches started before this call are discarded when they finish.
    pub fn replace_roots(&mut self, groups: Vec<G>) {
        self.nodes.clear();
        self.roots.clear();
        self.generation += 1;
        self.install_roots(groups);
    }

    fn install_roots(&mut self, groups: Vec<G>) {
        self.roots.reserve(groups.len());
        for group in groups {
            let id = group.id();
            if self.nodes.contains_key(&id) {
                warn!("duplicate root {:?} ignored", id);
                continue;
            }
            self.nodes.insert(id.clone(), Node::new(group, None, 0));
            self.roots.push(id);
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn roots(&self) -> &[G::Id] {
        &self.roots
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &Node<G, I>> + '_ {
        self.roots.iter().filter_map(move |id| self.nodes.get(id))
    }

    pub fn get(&self, id: &G::Id) -> Option<&Node<G, I>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &G::Id) -> bool {
        self.nodes.contains_key(id)
    }

    /// Loaded children of `id`; empty when the node is missing or unloaded
    pub fn child_nodes<'a>(&'a self, id: &G::Id) -> impl Iterator<Item = &'a Node<G, I>> + 'a {
        self.nodes
            .get(id)
            .and_then(|node| node.children())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |child| self.nodes.get(child))
    }

    /// Number of nodes currently in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Flip a loaded node, or mark an unloaded one as loading.
    pub fn begin_toggle(&mut self, id: &G::Id) -> Toggle<G::Id> {
        let generation = self.generation;
        let Some(node) = self.nodes.get_mut(id) else {
            return Toggle::Missing;
        };

        if node.state.loading {
            return Toggle::InFlight;
        }

        if node.loaded.is_some() {
            node.state.expanded = !node.state.expanded;
            return if node.state.expanded {
                Toggle::Expanded
            } else {
                Toggle::Collapsed
            };
        }

        node.state.loading = true;
        Toggle::Fetch(LoadTicket {
            id: id.clone(),
            generation,
        })
    }

    /// Merge the outcome of a fetch started by `begin_toggle`.
    ///
    /// Only the target node changes; new children are inserted unloaded.
    /// A child whose id is already in the arena is skipped, which also
    /// rejects a node listed under itself or one of its descendants.
    pub fn finish_load<E: Display>(
        &mut self,
        ticket: LoadTicket<G::Id>,
        result: Result<Branch<G, I>, E>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!("stale load for {:?} dropped", ticket.id);
            return LoadOutcome::Discarded;
        }

        let depth = match self.nodes.get(&ticket.id) {
            Some(node) if node.state.loading => node.depth + 1,
            _ => {
                debug!("load for {:?} has no pending node", ticket.id);
                return LoadOutcome::Discarded;
            }
        };

        let branch = match result {
            Ok(branch) => branch,
            Err(err) => {
                warn!("failed to load children of {:?}: {}", ticket.id, err);
                if let Some(node) = self.nodes.get_mut(&ticket.id) {
                    node.state.loading = false;
                }
                return LoadOutcome::Failed;
            }
        };

        let mut children = Vec::with_capacity(branch.groups.len());
        for group in branch.groups {
            let child_id = group.id();
            if self.nodes.contains_key(&child_id) {
                warn!("child {:?} of {:?} is already in the forest, skipped", child_id, ticket.id);
                continue;
            }
            self.nodes
                .insert(child_id.clone(), Node::new(group, Some(ticket.id.clone()), depth));
            children.push(child_id);
        }

        let groups = children.len();
        let items = branch.items.len();
        if let Some(node) = self.nodes.get_mut(&ticket.id) {
            node.loaded = Some(Loaded {
                children,
                items: branch.items,
            });
            node.state = ViewState {
                expanded: true,
                loading: false,
            };
        }

        LoadOutcome::Applied { groups, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Group {
        id: String,
        name: String,
    }

    impl Entity for Group {
        type Id = String;

        fn id(&self) -> String {
            self.id.clone()
        }
    }

    fn group(id: &str, name: &str) -> Group {
        Group { id: id.to_string(), name: name.to_string() }
    }

    fn ticket(forest: &mut Forest<Group, u32>, id: &str) -> LoadTicket<String> {
        match forest.begin_toggle(&id.to_string()) {
            Toggle::Fetch(ticket) => ticket,
            other => panic!("expected fetch for {}, got {:?}", id, other),
        }
    }

    fn load(forest: &mut Forest<Group, u32>, id: &str, branch: Branch<Group, u32>) -> LoadOutcome {
        let t = ticket(forest, id);
        forest.finish_load::<String>(t, Ok(branch))
    }

    fn sample() -> Forest<Group, u32> {
        Forest::with_roots(vec![group("g1", "Drinks"), group("g5", "Food")])
    }

    #[test]
    fn test_roots_start_unloaded() {
        let forest = sample();
        assert_eq!(forest.roots(), &["g1".to_string(), "g5".to_string()]);
        let node = forest.get(&"g1".to_string()).unwrap();
        assert!(!node.is_loaded());
        assert!(!node.is_expanded());
        assert!(node.children().is_none());
        assert_eq!(node.depth(), 0);
    }

    #[test]
    fn test_successful_load_expands_node() {
        let mut forest = sample();
        let outcome = load(
            &mut forest,
            "g1",
            Branch::groups_only(vec![group("g2", "Soda"), group("g3", "Juice"), group("g4", "Water")]),
        );

        assert_eq!(outcome, LoadOutcome::Applied { groups: 3, items: 0 });
        let node = forest.get(&"g1".to_string()).unwrap();
        assert!(node.is_loaded());
        assert!(node.is_expanded());
        assert!(!node.is_loading());
        assert_eq!(node.children().unwrap().len(), 3);

        let child = forest.get(&"g2".to_string()).unwrap();
        assert_eq!(child.parent(), Some(&"g1".to_string()));
        assert_eq!(child.depth(), 1);
        assert!(!child.is_loaded());
    }

    #[test]
    fn test_failed_load_leaves_node_retryable() {
        let mut forest = sample();
        let t = ticket(&mut forest, "g1");
        assert!(forest.get(&"g1".to_string()).unwrap().is_loading());

        let outcome = forest.finish_load(t, Err("connection reset"));
        assert_eq!(outcome, LoadOutcome::Failed);

        let node = forest.get(&"g1".to_string()).unwrap();
        assert!(!node.is_loaded());
        assert!(!node.is_expanded());
        assert!(!node.is_loading());

        // Next toggle asks for a fetch again
        assert!(matches!(forest.begin_toggle(&"g1".to_string()), Toggle::Fetch(_)));
    }

    #[test]
    fn test_loaded_node_flips_without_fetch() {
        let mut forest = sample();
        load(&mut forest, "g1", Branch::groups_only(vec![group("g2", "Soda")]));

        assert_eq!(forest.begin_toggle(&"g1".to_string()), Toggle::Collapsed);
        let node = forest.get(&"g1".to_string()).unwrap();
        assert!(!node.is_expanded());
        assert_eq!(node.children().unwrap(), &["g2".to_string()]);

        assert_eq!(forest.begin_toggle(&"g1".to_string()), Toggle::Expanded);
        let node = forest.get(&"g1".to_string()).unwrap();
        assert!(node.is_expanded());
        assert_eq!(node.children().unwrap(), &["g2".to_string()]);
    }

    #[test]
    fn test_reentrant_toggle_is_rejected() {
        let mut forest = sample();
        let _pending = ticket(&mut forest, "g1");
        assert_eq!(forest.begin_toggle(&"g1".to_string()), Toggle::InFlight);
        assert!(forest.get(&"g1".to_string()).unwrap().is_loading());
    }

    #[test]
    fn test_missing_node_is_noop() {
        let mut forest = sample();
        assert_eq!(forest.begin_toggle(&"nope".to_string()), Toggle::Missing);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_toggle_leaves_other_nodes_untouched() {
        let mut forest = sample();
        load(&mut forest, "g5", Branch::groups_only(vec![group("g6", "Soup")]));
        let sibling_before = forest.get(&"g5".to_string()).unwrap().clone();
        let nephew_before = forest.get(&"g6".to_string()).unwrap().clone();

        load(&mut forest, "g1", Branch::groups_only(vec![group("g2", "Soda")]));
        forest.begin_toggle(&"g1".to_string());

        let sibling = forest.get(&"g5".to_string()).unwrap();
        assert_eq!(sibling.state(), sibling_before.state());
        assert_eq!(sibling.children(), sibling_before.children());
        let nephew = forest.get(&"g6".to_string()).unwrap();
        assert_eq!(nephew.state(), nephew_before.state());
    }

    #[test]
    fn test_replace_roots_resets_state() {
        let mut forest = sample();
        load(&mut forest, "g1", Branch::groups_only(vec![group("g2", "Soda")]));

        forest.replace_roots(vec![group("g1", "Drinks"), group("g5", "Food")]);

        let node = forest.get(&"g1".to_string()).unwrap();
        assert!(!node.is_loaded());
        assert!(!node.is_expanded());
        assert!(!forest.contains(&"g2".to_string()));
        assert!(matches!(forest.begin_toggle(&"g1".to_string()), Toggle::Fetch(_)));
    }

    #[test]
    fn test_load_from_previous_generation_is_discarded() {
        let mut forest = sample();
        let stale = ticket(&mut forest, "g1");
        forest.replace_roots(vec![group("g1", "Drinks")]);

        let outcome = forest.finish_load::<String>(stale, Ok(Branch::groups_only(vec![group("g2", "Soda")])));
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(!forest.get(&"g1".to_string()).unwrap().is_loaded());
        assert!(!forest.contains(&"g2".to_string()));
    }

    #[test]
    fn test_cyclic_child_is_skipped() {
        let mut forest = sample();
        load(&mut forest, "g1", Branch::groups_only(vec![group("g2", "Soda")]));

        // Server lists g2's own ancestor and a duplicate root as its children
        let outcome = load(
            &mut forest,
            "g2",
            Branch::groups_only(vec![group("g1", "Drinks"), group("g5", "Food"), group("g7", "Cola")]),
        );

        assert_eq!(outcome, LoadOutcome::Applied { groups: 1, items: 0 });
        assert_eq!(forest.get(&"g2".to_string()).unwrap().children().unwrap(), &["g7".to_string()]);
        assert_eq!(forest.get(&"g1".to_string()).unwrap().depth(), 0);
    }

    #[test]
    fn test_duplicate_roots_keep_first() {
        let forest: Forest<Group, u32> = Forest::with_roots(vec![group("g1", "Drinks"), group("g1", "Again")]);
        assert_eq!(forest.roots().len(), 1);
        assert_eq!(forest.get(&"g1".to_string()).unwrap().group().name, "Drinks");
    }

    #[test]
    fn test_drinks_walkthrough() {
        let mut forest: Forest<Group, u32> = Forest::with_roots(vec![group("g1", "Drinks")]);

        load(&mut forest, "g1", Branch::groups_only(vec![group("g2", "Soda")]));
        let g1 = forest.get(&"g1".to_string()).unwrap();
        assert!(g1.is_expanded());
        assert_eq!(forest.child_nodes(&"g1".to_string()).count(), 1);
        assert!(!forest.get(&"g2".to_string()).unwrap().is_loaded());

        let outcome = load(&mut forest, "g2", Branch::new(vec![], vec![10, 11, 12]));
        assert_eq!(outcome, LoadOutcome::Applied { groups: 0, items: 3 });
        let g2 = forest.get(&"g2".to_string()).unwrap();
        assert!(g2.is_expanded());
        assert_eq!(g2.items().unwrap(), &[10, 11, 12]);
        assert!(g2.children().unwrap().is_empty());
    }
}
