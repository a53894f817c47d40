//! Tree Utilities
//!
//! Flattening the lazily loaded catalog forest into rows for rendering.

use lazy_forest::{Forest, ViewState};

use crate::models::{Group, Product};

pub type CatalogForest = Forest<Group, Product>;

/// One rendered line of the catalog tree
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Group {
        group: Group,
        depth: usize,
        state: ViewState,
        /// Known only once the node is loaded
        subgroups: Option<usize>,
        products: Option<usize>,
    },
    Product {
        product: Product,
        depth: usize,
    },
}

impl Row {
    /// Stable key for keyed list rendering
    pub fn key(&self) -> String {
        match self {
            Row::Group { group, state, .. } => {
                format!("g:{}:{}:{}", group.id, state.expanded, state.loading)
            }
            Row::Product { product, .. } => format!("p:{}", product.id),
        }
    }
}

/// Render the forest as an indented list using recursive DFS.
///
/// Only roots accepted by `keep_root` are shown. Children of a group appear
/// when it is loaded and expanded: subgroups first, then products.
pub fn visible_rows(forest: &CatalogForest, keep_root: impl Fn(&Group) -> bool) -> Vec<Row> {
    fn collect(forest: &CatalogForest, id: &String, result: &mut Vec<Row>) {
        let Some(node) = forest.get(id) else {
            return;
        };

        result.push(Row::Group {
            group: node.group().clone(),
            depth: node.depth(),
            state: node.state(),
            subgroups: node.children().map(<[String]>::len),
            products: node.items().map(<[Product]>::len),
        });

        if !node.is_expanded() {
            return;
        }
        if let Some(children) = node.children() {
            for child in children {
                collect(forest, child, result);
            }
        }
        if let Some(products) = node.items() {
            for product in products {
                result.push(Row::Product {
                    product: product.clone(),
                    depth: node.depth() + 1,
                });
            }
        }
    }

    let mut result = Vec::new();
    for root in forest.root_nodes().filter(|n| keep_root(n.group())) {
        collect(forest, &root.id(), &mut result);
    }
    result
}

/// Number of roots accepted by `keep_root`
pub fn count_roots(forest: &CatalogForest, keep_root: impl Fn(&Group) -> bool) -> usize {
    forest.root_nodes().filter(|n| keep_root(n.group())).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_forest::{Branch, Toggle};

    fn group(id: &str, name: &str) -> Group {
        serde_json::from_value(serde_json::json!({
            "id": id, "name_uz": name, "name_ru": name, "name_en": name,
            "description_uz": null, "description_ru": null, "description_en": null,
            "parent_group_id": null, "is_active": true
        }))
        .unwrap()
    }

    fn product(id: &str, group_id: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id, "name_uz": id, "name_ru": id, "name_en": id,
            "description_uz": null, "description_ru": null, "description_en": null,
            "price": 10.0, "group_id": group_id, "is_active": true
        }))
        .unwrap()
    }

    fn expand(forest: &mut CatalogForest, id: &str, branch: Branch<Group, Product>) {
        let Toggle::Fetch(ticket) = forest.begin_toggle(&id.to_string()) else {
            panic!("expected a fetch for {}", id);
        };
        forest.finish_load::<String>(ticket, Ok(branch));
    }

    fn labels(rows: &[Row]) -> Vec<(String, usize)> {
        rows.iter()
            .map(|row| match row {
                Row::Group { group, depth, .. } => (group.id.clone(), *depth),
                Row::Product { product, depth } => (product.id.clone(), *depth),
            })
            .collect()
    }

    #[test]
    fn test_visible_rows_depth_first() {
        let mut forest = CatalogForest::with_roots(vec![group("g1", "Drinks"), group("g2", "Food")]);
        expand(
            &mut forest,
            "g1",
            Branch::new(vec![group("g3", "Cold")], vec![product("p1", "g1")]),
        );
        expand(&mut forest, "g3", Branch::new(vec![], vec![product("p2", "g3")]));

        let rows = visible_rows(&forest, |_| true);
        assert_eq!(
            labels(&rows),
            vec![
                ("g1".to_string(), 0),
                ("g3".to_string(), 1),
                ("p2".to_string(), 2),
                ("p1".to_string(), 1),
                ("g2".to_string(), 0),
            ]
        );

        match &rows[0] {
            Row::Group { subgroups, products, .. } => {
                assert_eq!(*subgroups, Some(1));
                assert_eq!(*products, Some(1));
            }
            other => panic!("unexpected row {:?}", other),
        }
        match &rows[4] {
            Row::Group { subgroups, .. } => assert_eq!(*subgroups, None),
            other => panic!("unexpected row {:?}", other),
        }
    }

    #[test]
    fn test_collapsed_node_hides_children() {
        let mut forest = CatalogForest::with_roots(vec![group("g1", "Drinks")]);
        expand(&mut forest, "g1", Branch::groups_only(vec![group("g3", "Cold")]));
        assert_eq!(forest.begin_toggle(&"g1".to_string()), Toggle::Collapsed);

        let rows = visible_rows(&forest, |_| true);
        assert_eq!(labels(&rows), vec![("g1".to_string(), 0)]);
    }

    #[test]
    fn test_root_filter_applies_to_roots_only() {
        let mut forest = CatalogForest::with_roots(vec![group("g1", "Drinks"), group("g2", "Food")]);
        expand(&mut forest, "g1", Branch::groups_only(vec![group("g3", "Cold")]));

        let rows = visible_rows(&forest, |g| g.name_en == "Drinks");
        assert_eq!(labels(&rows), vec![("g1".to_string(), 0), ("g3".to_string(), 1)]);
    }

    #[test]
    fn test_count_roots_ignores_loaded_children() {
        let mut forest = CatalogForest::with_roots(vec![group("g1", "Drinks"), group("g2", "Food")]);
        expand(&mut forest, "g1", Branch::groups_only(vec![group("g3", "Drinks")]));

        assert_eq!(count_roots(&forest, |_| true), 2);
        assert_eq!(count_roots(&forest, |g| g.name_en == "Drinks"), 1);
        assert_eq!(count_roots(&forest, |g| g.name_en == "Pizza"), 0);
    }

    #[test]
    fn test_row_key_tracks_view_state() {
        let mut forest = CatalogForest::with_roots(vec![group("g1", "Drinks")]);
        let before = visible_rows(&forest, |_| true)[0].key();
        let _ = forest.begin_toggle(&"g1".to_string());
        let during = visible_rows(&forest, |_| true)[0].key();
        assert_ne!(before, during);
    }
}
