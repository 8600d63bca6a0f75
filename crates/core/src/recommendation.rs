//! Co-purchase recommendation graph.
//!
//! Logically undirected: every relationship is stored as two directed
//! adjacency entries carrying the same weight. Entries are appended, never
//! merged, so a pair listed twice contributes both weights to every query.
//! Rankings are by accumulated weight descending, then product name
//! ascending.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::seeds::{RelationshipSeed, RELATIONSHIP_SEEDS};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub name: String,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub weight: u32,
}

#[derive(Clone, Debug, Default)]
pub struct RecommendationGraph {
    adjacency: HashMap<String, Vec<Neighbor>>,
    nodes: Vec<String>,
    relationship_count: usize,
}

impl RecommendationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seeds(seeds: &[RelationshipSeed]) -> Self {
        let mut graph = Self::new();
        for seed in seeds {
            graph.add_relationship(seed.first, seed.second, seed.weight);
        }

        debug!(
            event_name = "recommendations.graph_built",
            nodes = graph.node_count(),
            relationships = graph.edge_count(),
            "recommendation graph built"
        );
        graph
    }

    pub fn sample() -> Self {
        Self::from_seeds(RELATIONSHIP_SEEDS)
    }

    pub fn add_node(&mut self, name: &str) {
        if !self.adjacency.contains_key(name) {
            self.adjacency.insert(name.to_owned(), Vec::new());
            self.nodes.push(name.to_owned());
        }
    }

    pub fn add_relationship(&mut self, first: &str, second: &str, weight: u32) {
        self.add_node(first);
        self.add_node(second);
        self.push_entry(first, second, weight);
        self.push_entry(second, first, weight);
        self.relationship_count += 1;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Node names in the order they were first seen.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.relationship_count
    }

    /// Raw adjacency entries for `name` in insertion order.
    pub fn neighbors(&self, name: &str) -> &[Neighbor] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Weight of the direct edge `from -> to`, or 0 when the two are not
    /// related.
    pub fn edge_weight(&self, from: &str, to: &str) -> u32 {
        self.neighbors(from)
            .iter()
            .filter(|neighbor| neighbor.name == to)
            .map(|neighbor| neighbor.weight)
            .sum()
    }

    pub fn recommendations(&self, name: &str, limit: usize) -> Vec<Recommendation> {
        let mut scores = Scores::default();
        for neighbor in self.neighbors(name) {
            scores.add(&neighbor.name, neighbor.weight);
        }
        scores.ranked(limit)
    }

    /// Ranks the union of neighbours of `names`, summing weights when a
    /// product is reachable from several sources. Products already in
    /// `names` are never recommended. Repeated source names count once.
    pub fn multi_product_recommendations<S: AsRef<str>>(
        &self,
        names: &[S],
        limit: usize,
    ) -> Vec<Recommendation> {
        let sources = names.iter().map(AsRef::as_ref).collect::<BTreeSet<&str>>();
        let mut scores = Scores::default();

        for source in &sources {
            for neighbor in self.neighbors(source) {
                if !sources.contains(neighbor.name.as_str()) {
                    scores.add(&neighbor.name, neighbor.weight);
                }
            }
        }

        scores.ranked(limit)
    }

    fn push_entry(&mut self, from: &str, to: &str, weight: u32) {
        if let Some(entries) = self.adjacency.get_mut(from) {
            entries.push(Neighbor { name: to.to_owned(), weight });
        }
    }
}

#[derive(Default)]
struct Scores {
    totals: HashMap<String, u32>,
}

impl Scores {
    fn add(&mut self, name: &str, weight: u32) {
        let total = self.totals.entry(name.to_owned()).or_insert(0);
        *total = total.saturating_add(weight);
    }

    fn ranked(self, limit: usize) -> Vec<Recommendation> {
        let mut ranked = self
            .totals
            .into_iter()
            .map(|(name, weight)| Recommendation { name, weight })
            .collect::<Vec<_>>();
        ranked.sort_by(by_weight_then_name);
        ranked.truncate(limit);
        ranked
    }
}

fn by_weight_then_name(left: &Recommendation, right: &Recommendation) -> Ordering {
    right.weight.cmp(&left.weight).then_with(|| left.name.cmp(&right.name))
}
