//! Per-category price tree.
//!
//! An unbalanced binary search tree keyed by price, built fresh for every
//! category view and thrown away afterwards. Prices equal to a node's price
//! go to its right subtree, so an in-order walk yields non-decreasing prices
//! with ties kept in insertion order.

use std::collections::VecDeque;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::product::Product;

#[derive(Debug)]
struct Node {
    product: Product,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(product: Product) -> Box<Self> {
        Box::new(Self { product, left: None, right: None })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelNode<'a> {
    pub product: &'a Product,
    pub has_left: bool,
    pub has_right: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeLevel<'a> {
    pub depth: usize,
    pub nodes: Vec<LevelNode<'a>>,
}

#[derive(Debug, Default)]
pub struct CategoryTree {
    category: String,
    root: Option<Box<Node>>,
    len: usize,
    height: usize,
}

impl CategoryTree {
    pub fn new(category: impl Into<String>) -> Self {
        Self { category: category.into(), ..Self::default() }
    }

    /// Inserts the category's products in catalog order.
    pub fn build(catalog: &Catalog, category: &str) -> Self {
        let mut tree = Self::new(category);
        for product in catalog.in_category(category) {
            tree.insert(product.clone());
        }
        tree
    }

    pub fn insert(&mut self, product: Product) {
        let mut depth = 1;
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if product.price < node.product.price {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }
        *slot = Some(Node::leaf(product));

        self.len += 1;
        self.height = self.height.max(depth);
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn root(&self) -> Option<&Product> {
        self.root.as_ref().map(|node| &node.product)
    }

    pub fn in_order(&self) -> Vec<&Product> {
        let mut ordered = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = self.root.as_deref();

        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                ordered.push(&node.product);
                current = node.right.as_deref();
            }
        }

        ordered
    }

    /// Breadth-first walk grouped by depth, left child before right child.
    pub fn levels(&self) -> Vec<TreeLevel<'_>> {
        let mut levels: Vec<TreeLevel<'_>> = Vec::with_capacity(self.height);
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back((root, 0usize));
        }

        while let Some((node, depth)) = queue.pop_front() {
            if levels.len() == depth {
                levels.push(TreeLevel { depth, nodes: Vec::new() });
            }
            levels[depth].nodes.push(LevelNode {
                product: &node.product,
                has_left: node.left.is_some(),
                has_right: node.right.is_some(),
            });

            if let Some(left) = node.left.as_deref() {
                queue.push_back((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back((right, depth + 1));
            }
        }

        levels
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::CategoryTree;
    use crate::catalog::Catalog;
    use crate::domain::product::Product;

    fn product(name: &str, price: i64) -> Product {
        Product::new(name, Decimal::new(price, 0), "Test", "📦")
    }

    fn names<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a str> {
        products.into_iter().map(|product| product.name.as_str()).collect()
    }

    #[test]
    fn levels_are_grouped_by_depth_left_first() {
        let mut tree = CategoryTree::new("Test");
        for (name, price) in [("m", 50), ("d", 30), ("t", 70), ("a", 20), ("g", 40), ("z", 80)] {
            tree.insert(product(name, price));
        }

        let levels = tree.levels();
        let by_level = levels
            .iter()
            .map(|level| names(level.nodes.iter().map(|node| node.product)))
            .collect::<Vec<_>>();

        assert_eq!(by_level, vec![vec!["m"], vec!["d", "t"], vec!["a", "g", "z"]]);
        assert_eq!(tree.height(), 3);
        assert!(levels[1].nodes[1].has_right);
        assert!(!levels[1].nodes[1].has_left);
    }

    #[test]
    fn equal_prices_go_right_and_keep_insertion_order() {
        let mut tree = CategoryTree::new("Test");
        tree.insert(product("first", 40));
        tree.insert(product("second", 40));
        tree.insert(product("cheaper", 10));

        let levels = tree.levels();
        assert_eq!(names(levels[1].nodes.iter().map(|node| node.product)), ["cheaper", "second"]);
        assert_eq!(names(tree.in_order()), ["cheaper", "first", "second"]);
    }

    #[test]
    fn in_order_is_sorted_for_every_sample_category() {
        let catalog = Catalog::sample();
        for category in catalog.categories() {
            let tree = CategoryTree::build(&catalog, category);
            let prices =
                tree.in_order().into_iter().map(|product| product.price).collect::<Vec<_>>();

            assert_eq!(prices.len(), catalog.in_category(category).count());
            assert!(prices.windows(2).all(|pair| pair[0] <= pair[1]), "{category} out of order");
        }
    }

    #[test]
    fn sorted_insertions_degenerate_into_a_chain() {
        let mut tree = CategoryTree::new("Test");
        for price in 1..=5 {
            tree.insert(product(&format!("p{price}"), price));
        }

        assert_eq!(tree.height(), 5);
        assert!(tree.levels().iter().all(|level| level.nodes.len() == 1));
    }

    #[test]
    fn unknown_category_builds_an_empty_tree() {
        let tree = CategoryTree::build(&Catalog::sample(), "Hardware");
        assert!(tree.is_empty());
        assert!(tree.levels().is_empty());
        assert!(tree.in_order().is_empty());
        assert_eq!(tree.root(), None);
    }
}
