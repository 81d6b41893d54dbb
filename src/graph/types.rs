use std::collections::HashMap;

use fxhash::{FxHashMap, FxHashSet};

use crate::kmer::Kmer;

/// Weighted directed overlap graph over (k-1)-mer nodes.
///
/// A node's identity is its string value. Twin adjacency maps hold forward
/// edges with their weights and reverse links for predecessor queries; every
/// node is present in both maps, with empty entries at the extremities.
///
/// The graph is built once from k-mer counts and only ever shrinks
/// afterwards: simplification removes nodes, nothing adds them back.
#[derive(Debug, Clone, Default)]
pub struct OverlapGraph {
    succ: FxHashMap<String, FxHashMap<String, usize>>,
    pred: FxHashMap<String, FxHashSet<String>>,
}

impl OverlapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from aggregated k-mer counts: one edge per distinct
    /// k-mer, from its prefix node to its suffix node, weighted by count.
    pub fn from_kmer_counts(counts: &HashMap<String, usize>) -> Self {
        let mut graph = Self::new();
        for (sequence, &count) in counts {
            if sequence.len() < 2 {
                continue;
            }
            let kmer = Kmer::new(sequence.as_bytes());
            graph.add_edge(&kmer.prefix(), &kmer.suffix(), count);
        }
        graph
    }

    fn ensure_node(&mut self, node: &str) {
        if !self.succ.contains_key(node) {
            self.succ.insert(node.to_string(), FxHashMap::default());
            self.pred.insert(node.to_string(), FxHashSet::default());
        }
    }

    pub fn add_edge(&mut self, from: &str, to: &str, weight: usize) {
        self.ensure_node(from);
        self.ensure_node(to);
        if let Some(targets) = self.succ.get_mut(from) {
            targets.insert(to.to_string(), weight);
        }
        if let Some(sources) = self.pred.get_mut(to) {
            sources.insert(from.to_string());
        }
    }

    /// Remove a node together with all its incident edges. Returns false if
    /// the node was not present.
    pub fn remove_node(&mut self, node: &str) -> bool {
        let Some(targets) = self.succ.remove(node) else {
            return false;
        };
        for target in targets.keys() {
            if let Some(sources) = self.pred.get_mut(target) {
                sources.remove(node);
            }
        }
        if let Some(sources) = self.pred.remove(node) {
            for source in sources {
                if let Some(targets) = self.succ.get_mut(&source) {
                    targets.remove(node);
                }
            }
        }
        true
    }

    pub fn contains(&self, node: &str) -> bool {
        self.succ.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.succ.len()
    }

    pub fn edge_count(&self) -> usize {
        self.succ.values().map(|targets| targets.len()).sum()
    }

    /// Node identities in lexicographic order. Simplification passes iterate
    /// this snapshot so that in-place removal never invalidates iteration and
    /// processing order is reproducible.
    pub fn sorted_nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self.succ.keys().cloned().collect();
        nodes.sort();
        nodes
    }

    /// All edges as (from, to, weight), lexicographically ordered.
    pub fn sorted_edges(&self) -> Vec<(String, String, usize)> {
        let mut edges: Vec<(String, String, usize)> = self
            .succ
            .iter()
            .flat_map(|(from, targets)| {
                targets
                    .iter()
                    .map(move |(to, &weight)| (from.clone(), to.clone(), weight))
            })
            .collect();
        edges.sort();
        edges
    }

    /// Direct successors in lexicographic order.
    pub fn successors(&self, node: &str) -> Vec<String> {
        let mut targets: Vec<String> = self
            .succ
            .get(node)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default();
        targets.sort();
        targets
    }

    /// Direct predecessors in lexicographic order.
    pub fn predecessors(&self, node: &str) -> Vec<String> {
        let mut sources: Vec<String> = self
            .pred
            .get(node)
            .map(|sources| sources.iter().cloned().collect())
            .unwrap_or_default();
        sources.sort();
        sources
    }

    pub fn out_degree(&self, node: &str) -> usize {
        self.succ.get(node).map_or(0, |targets| targets.len())
    }

    pub fn in_degree(&self, node: &str) -> usize {
        self.pred.get(node).map_or(0, |sources| sources.len())
    }

    pub fn edge_weight(&self, from: &str, to: &str) -> Option<usize> {
        self.succ.get(from).and_then(|targets| targets.get(to)).copied()
    }

    /// Nodes without predecessors, in lexicographic order.
    pub fn starting_nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self
            .succ
            .keys()
            .filter(|node| self.in_degree(node) == 0)
            .cloned()
            .collect();
        nodes.sort();
        nodes
    }

    /// Nodes without successors, in lexicographic order.
    pub fn sink_nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self
            .succ
            .keys()
            .filter(|node| self.out_degree(node) == 0)
            .cloned()
            .collect();
        nodes.sort();
        nodes
    }

    /// Breadth-first reachability. A node reaches itself.
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        if from == to {
            return true;
        }
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut queue: Vec<&str> = vec![from];
        seen.insert(from);
        while let Some(node) = queue.pop() {
            if let Some(targets) = self.succ.get(node) {
                for target in targets.keys() {
                    if target == to {
                        return true;
                    }
                    if seen.insert(target) {
                        queue.push(target);
                    }
                }
            }
        }
        false
    }
}
